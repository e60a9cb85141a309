//! Tracing initialisation for the `jobnotify` binary.
//!
//! Logs are written to stderr. Stdout is reserved for workflow commands and
//! the success marker, which the Actions runner parses.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. With `json` set, log lines are
/// newline-delimited JSON. Only the first call in a process takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing(false, Level::DEBUG);
        init_tracing(true, Level::INFO);
        tracing::debug!("still logging");
    }
}
