//! Domain models for job notifications.
//!
//! - `JobResult` / `AggregatedOutcome`: per-job statuses and their reduction
//! - `RunContext`: ambient workflow-run metadata
//! - `RenderedMessage` / `WebhookPayload`: the message and its wire shape

pub mod context;
pub mod job;
pub mod message;

pub use context::{
    CommitUser, EventPayload, HeadCommit, PayloadOwner, PayloadRepository, RunContext,
};
pub use job::{AggregatedOutcome, JobResult, JobStatus};
pub use message::{Attachment, ColorTag, RenderedMessage, WebhookPayload};
