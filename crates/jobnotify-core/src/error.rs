//! Error taxonomy for job notifications.

/// Errors raised while delivering a rendered message to a sink.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The sink answered with a success status but not the `ok` marker.
    #[error("Failed to send notification to Slack: {text}")]
    UnexpectedResponse { text: String },

    /// The sink answered with a non-2xx status.
    #[error("An HTTP protocol error occurred: statusCode = {status}, body = {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Top-level errors for a notification run.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Input required and not supplied: {name}")]
    MissingInput { name: String },

    #[error("missing run context: {0}")]
    MissingContext(String),

    #[error("invalid event payload at {path}")]
    InvalidEventPayload {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl NotifyError {
    pub fn missing_input(name: impl Into<String>) -> Self {
        NotifyError::MissingInput { name: name.into() }
    }
}

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;
