//! The notification pipeline: resolve inputs, aggregate, render, deliver.
//!
//! Every step runs once, in order. Input resolution happens before the run
//! context is read or a sink is built, so a missing input never reaches the
//! network.

use tracing::Instrument;

use crate::aggregate::{aggregate, split_list};
use crate::domain::{AggregatedOutcome, RenderedMessage, RunContext};
use crate::error::{DeliveryError, NotifyError, Result};
use crate::inputs::{resolve_inputs, InputSource, NotifyInputs};
use crate::obs;
use crate::render::render;
use crate::sink::MessageSink;

/// An aggregated outcome together with the message rendered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub outcome: AggregatedOutcome,
    pub message: RenderedMessage,
}

/// Aggregate the job statuses and render the message. Performs no I/O.
pub fn prepare(inputs: &NotifyInputs, ctx: &RunContext) -> Notification {
    obs::emit_inputs_resolved(
        split_list(&inputs.job_name).len(),
        split_list(&inputs.job_status).len(),
    );

    let outcome = aggregate(&inputs.job_name, &inputs.job_status);
    obs::emit_outcome_aggregated(&outcome);

    let message = render(&outcome, ctx);
    Notification { outcome, message }
}

/// Deliver a prepared notification through `sink`.
pub async fn send<S>(sink: &S, notification: &Notification) -> Result<()>
where
    S: MessageSink + ?Sized,
{
    let message = &notification.message;
    obs::emit_delivery_started(message.color.as_str(), message.text.len());

    match sink.deliver(message).await {
        Ok(()) => {
            obs::emit_delivered();
            Ok(())
        }
        Err(err) => {
            obs::emit_delivery_failed(&err);
            Err(err.into())
        }
    }
}

/// Run the whole pipeline.
///
/// `load_context` is called only after every input resolved, and `connect`
/// receives the webhook URL to build the sink.
pub async fn run<L, C, S>(
    source: &dyn InputSource,
    load_context: L,
    connect: C,
) -> Result<Notification>
where
    L: FnOnce() -> Result<RunContext>,
    C: FnOnce(&str) -> std::result::Result<S, DeliveryError>,
    S: MessageSink,
{
    let inputs = resolve_inputs(source)?;
    let ctx = load_context()?;
    let span = obs::run_span(&ctx);

    async move {
        let notification = prepare(&inputs, &ctx);
        let sink = connect(&inputs.webhook_url)?;
        send(&sink, &notification).await?;
        Ok::<_, NotifyError>(notification)
    }
    .instrument(span)
    .await
}
