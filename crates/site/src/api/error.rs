//! Errors from the waitlist backend API.

use thiserror::Error;

/// Failure talking to the waitlist backend.
///
/// `Display` is the text shown inline to the user, so each variant renders
/// as a complete, human-readable sentence.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response at all (connection refused, timeout, TLS failure).
    ///
    /// The underlying error names the backend URL, so it is only logged and
    /// kept as the source.
    #[error("Could not reach the server. Please try again.")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the body's `error` field when present,
    /// otherwise a message naming the status code.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The identity check rejected the stored token.
    #[error("Session expired. Please log in again.")]
    Unauthorized,

    /// A 2xx response missing a field the caller needs.
    #[error("Unexpected response from server.")]
    UnexpectedResponse,
}

impl ApiError {
    /// HTTP status of the backend response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
