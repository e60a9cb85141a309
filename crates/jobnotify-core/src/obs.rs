//! Structured observability hooks for the notification lifecycle.
//!
//! Events are emitted at `info!` level with an `event` field so they can be
//! filtered in JSON log output:
//! - `notify.inputs_resolved`
//! - `notify.outcome_aggregated`
//! - `notify.delivery_started`
//! - `notify.delivered`
//! - `notify.delivery_failed` (warn)

use tracing::info;

use crate::domain::{AggregatedOutcome, RunContext};

/// Span tagging every event of one notification run with the repository and run id.
pub fn run_span(ctx: &RunContext) -> tracing::Span {
    let repo = format!("{}/{}", ctx.repo_owner, ctx.repo_name);
    let run_id = ctx.run_id.map(|id| id.to_string()).unwrap_or_default();
    tracing::info_span!("jobnotify.run", repo = %repo, run_id = %run_id)
}

pub fn emit_inputs_resolved(job_count: usize, status_count: usize) {
    info!(
        event = "notify.inputs_resolved",
        job_count = job_count,
        status_count = status_count,
    );
}

pub fn emit_outcome_aggregated(outcome: &AggregatedOutcome) {
    info!(
        event = "notify.outcome_aggregated",
        name = %outcome.name,
        status = %outcome.status,
    );
}

pub fn emit_delivery_started(color: &str, text_len: usize) {
    info!(event = "notify.delivery_started", color = %color, text_len = text_len);
}

pub fn emit_delivered() {
    info!(event = "notify.delivered");
}

pub fn emit_delivery_failed(error: &dyn std::fmt::Display) {
    tracing::warn!(event = "notify.delivery_failed", error = %error);
}
