//! GitHub Actions workflow commands.
//!
//! A run is marked failed by printing `::error::<message>` to stdout and
//! exiting non-zero. Message data must escape `%`, `\r` and `\n`.

/// Escape command data.
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// The `::error::` command line for `message`.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}
