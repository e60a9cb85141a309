//! jobnotify - workflow job notifications for Slack
//!
//! Reads the `job_name`, `job_status` and `slack_webhook_url` action inputs,
//! aggregates parallel job statuses into one outcome and posts it to Slack.
//!
//! On failure the run is marked failed with an `::error::` workflow command
//! and a non-zero exit code.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use jobnotify_core::inputs::{JOB_NAME, JOB_STATUS, SLACK_WEBHOOK_URL};
use jobnotify_core::{
    error_command, prepare, resolve_inputs, run, EnvInputSource, InputSource, Layered,
    MapInputSource, RunContext,
};
use jobnotify_slack::{SlackWebhook, WebhookConfig};
use tracing::{error, Level};

#[derive(Parser, Debug)]
#[command(name = "jobnotify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Post an aggregated workflow job status to Slack", long_about = None)]
struct Cli {
    /// Job name(s), comma-separated (default: INPUT_JOB_NAME)
    #[arg(long)]
    job_name: Option<String>,

    /// Job status(es), comma-separated (default: INPUT_JOB_STATUS)
    #[arg(long)]
    job_status: Option<String>,

    /// Slack incoming-webhook URL (default: INPUT_SLACK_WEBHOOK_URL)
    #[arg(long)]
    webhook_url: Option<String>,

    /// HTTP timeout for the webhook call, in seconds
    #[arg(long, env = "JOBNOTIFY_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Print the webhook payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Command-line values layered over the `INPUT_*` environment.
    fn input_source(&self) -> Layered<MapInputSource, EnvInputSource> {
        let overrides = MapInputSource::new()
            .with_opt(JOB_NAME, self.job_name.as_deref())
            .with_opt(JOB_STATUS, self.job_status.as_deref())
            .with_opt(SLACK_WEBHOOK_URL, self.webhook_url.as_deref());
        Layered::new(overrides, EnvInputSource)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    jobnotify_core::init_tracing(cli.json, level);

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "notification failed");
            println!("{}", error_command(&message));
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: &Cli) -> Result<()> {
    let source = cli.input_source();

    if cli.dry_run {
        return cmd_dry_run(&source);
    }

    let timeout = Duration::from_secs(cli.timeout_secs);
    run(&source, RunContext::from_env, |url| {
        SlackWebhook::new(WebhookConfig::new(url).with_timeout(timeout))
    })
    .await?;

    println!("ok!");
    Ok(())
}

fn cmd_dry_run(source: &dyn InputSource) -> Result<()> {
    let inputs = resolve_inputs(source)?;
    let ctx = RunContext::from_env()?;
    let notification = prepare(&inputs, &ctx);

    let body = serde_json::to_string_pretty(&notification.message.to_payload())
        .context("Failed to serialize webhook payload")?;
    println!("{body}");
    Ok(())
}
