//! Client error types.

use thiserror::Error;

/// Errors from a backend exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect failure, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, for diagnostics only.
        body: String,
    },

    /// A 2xx response body did not have the expected shape.
    #[error("malformed response: {message}")]
    Decode {
        /// Error description.
        message: String,
    },

    /// A configured value cannot be sent as a header.
    #[error("invalid header value: {message}")]
    InvalidHeader {
        /// Error description.
        message: String,
    },
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Whether the backend was never reached or answered unintelligibly.
    ///
    /// `false` only for a well-formed non-2xx status.
    pub fn is_connection_failure(&self) -> bool {
        !matches!(self, Self::Status { .. })
    }

    /// HTTP status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode { .. } | Self::InvalidHeader { .. } => None,
        }
    }

    /// Error category string for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(_) => "network",
            Self::Status { .. } => "api",
            Self::Decode { .. } => "parse",
            Self::InvalidHeader { .. } => "config",
        }
    }
}
