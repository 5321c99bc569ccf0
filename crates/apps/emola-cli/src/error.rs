//! CLI error types.

use emola_client::EmolaError;
use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gateway client error.
    #[error("{0}")]
    Emola(#[from] EmolaError),

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User-facing error with actionable message.
    #[error("{0}")]
    User(String),
}

impl From<emola_soap::EncodeError> for CliError {
    fn from(e: emola_soap::EncodeError) -> Self {
        Self::Emola(EmolaError::from(e))
    }
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a user-facing error.
    pub fn user(msg: impl Into<String>) -> Self {
        Self::User(msg.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors: 1
            Self::User(_) | Self::Emola(EmolaError::Validation(_)) => 1,
            // Config errors: 3
            Self::Config(_) | Self::Toml(_) | Self::Emola(EmolaError::Config(_)) => 3,
            // Network errors: 5
            Self::Emola(EmolaError::Transport(_))
            | Self::Emola(EmolaError::Timeout(_))
            | Self::Emola(EmolaError::UnexpectedStatus { .. }) => 5,
            // Gateway response errors: 6
            Self::Emola(EmolaError::Decode(_)) => 6,
            // IO errors: 9
            Self::Io(_) => 9,
            // Encoding/format errors: 10
            Self::Json(_) | Self::Emola(EmolaError::Encode(_)) => 10,
        }
    }

    /// Get a recovery hint for this error, if one applies.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Emola(e) => Some(e.suggestion()),
            Self::Config(_) | Self::Toml(_) => Some(
                "Set credentials in config.toml or via EMOLA_USERNAME, EMOLA_PASSWORD, \
                 EMOLA_PARTNER_CODE and EMOLA_PARTNER_KEY",
            ),
            _ => None,
        }
    }
}
