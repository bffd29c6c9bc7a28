use thiserror::Error;

/// Failure of the order search transport.
///
/// Every variant is recoverable: the session clears the result set, shows the
/// message and waits for the next edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("failed to reach order search endpoint: {0}")]
    Unreachable(String),
    #[error("API error: {reason}")]
    Status { code: u16, reason: String },
    #[error("malformed order search response: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn status(code: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            code,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("search session is no longer running")]
    Closed,
}
