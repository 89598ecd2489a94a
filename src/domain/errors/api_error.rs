//! Remote API error types.

use thiserror::Error;

/// Failure of a request against the fleet API.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}{}", body_suffix(.body))]
    Status { status: u16, body: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

fn body_suffix(body: &str) -> String {
    if body.trim().is_empty() {
        String::new()
    } else {
        format!(": {}", body.trim())
    }
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates client construction error.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Returns whether retrying the same request can succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Decode { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::Client { .. } => false,
        }
    }
}
