//! Error types for e-Mola client operations.

use emola_soap::{DecodeError, EncodeError};
use thiserror::Error;

/// Result type for e-Mola operations.
pub type EmolaResult<T> = Result<T, EmolaError>;

/// Errors that can occur while talking to the gateway.
#[derive(Debug, Error)]
pub enum EmolaError {
    /// Required configuration is missing or invalid.
    #[error("emola config: {0}")]
    Config(String),

    /// Caller-supplied payment fields are missing.
    #[error("invalid payment request: {0}")]
    Validation(String),

    /// The request envelope could not be built.
    #[error("{0}")]
    Encode(#[from] EncodeError),

    /// The HTTP call could not be completed.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The HTTP call exceeded the configured timeout.
    #[error("HTTP request timed out: {0}")]
    Timeout(String),

    /// The gateway answered with a non-success status.
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The response could not be unwrapped.
    #[error("{0}")]
    Decode(#[from] DecodeError),
}

impl EmolaError {
    /// Create a new Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new Validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new UnexpectedStatus error.
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the same call may succeed when repeated.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns a short recovery hint for this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Config(_) => {
                "Check partner code, partner key, username, password and environment"
            }
            Self::Validation(_) => "Provide phone, amount and reference",
            Self::Encode(_) => "Check that the param fragment is well-formed XML",
            Self::Transport(_) => "Check network connectivity to the gateway",
            Self::Timeout(_) => {
                "The customer may still confirm the push; query the transaction before resending"
            }
            Self::UnexpectedStatus { .. } => "Inspect the response body returned by the gateway",
            Self::Decode(DecodeError::EmptyReturn) => {
                "The gateway returned no result data; contact the provider"
            }
            Self::Decode(_) => "The gateway response format was not recognized",
        }
    }
}

impl From<reqwest::Error> for EmolaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}
