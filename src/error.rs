//! Error types for Survey Flow.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session-related errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Address lookup failed: {0}")]
    Lookup(String),
}

/// Transport-level failures from a single outbound send.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (connect, DNS, or
    /// timeout failure — the browser's "Failed to fetch" class).
    #[error("Failed to fetch: {0}")]
    FetchFailed(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Failures surfaced by the reporting client.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Transport failure for action {action}: {source}")]
    Transport {
        action: String,
        #[source]
        source: TransportError,
    },

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to serialize report payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures surfaced by the stage controller.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The client address has not resolved; the registration submission was
    /// not attempted and the stage is unchanged.
    #[error("Client address not resolved; registration not submitted")]
    AddressUnresolved,

    #[error("Registration submission failed: {0}")]
    Submission(#[from] ReportError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
