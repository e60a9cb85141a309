//! jobnotify core library
//!
//! Aggregates the statuses of parallel workflow jobs into one outcome and
//! renders it as a Slack incoming-webhook message.
//!
//! ```text
//! inputs -> aggregate -> render -> MessageSink
//! ```

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod inputs;
pub mod obs;
pub mod pipeline;
pub mod render;
pub mod sink;
pub mod telemetry;
pub mod workflow_commands;

pub use aggregate::{aggregate, aggregate_jobs, split_list};
pub use domain::{
    AggregatedOutcome, Attachment, ColorTag, CommitUser, EventPayload, HeadCommit, JobResult,
    JobStatus, PayloadOwner, PayloadRepository, RenderedMessage, RunContext, WebhookPayload,
};
pub use error::{DeliveryError, NotifyError, Result};
pub use inputs::{
    resolve_inputs, EnvInputSource, InputSource, Layered, MapInputSource, NotifyInputs,
};
pub use pipeline::{prepare, run, send, Notification};
pub use render::{commit_label, render, status_to_color, status_to_label, strip_ref, RunLinks};
pub use sink::{check_acknowledgement, MemorySink, MessageSink, ACK_OK};
pub use telemetry::init_tracing;
pub use workflow_commands::error_command;

/// jobnotify version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
