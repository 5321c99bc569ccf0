//! Codec error types.

use quick_xml::de::DeError;
use thiserror::Error;

/// Result type for envelope encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for envelope decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while building the outbound envelope.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The caller-supplied `param` fragment is not well-formed XML.
    #[error("malformed param fragment: {reason}")]
    MalformedParam {
        /// Parser diagnostic
        reason: String,
    },

    /// The serializer rejected the envelope.
    #[error("failed to serialize SOAP envelope: {0}")]
    Serialize(String),
}

/// Errors raised while unwrapping a response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not a valid outer response envelope.
    #[error("failed to unmarshal SOAP response: {0}")]
    Envelope(#[source] DeError),

    /// The envelope parsed but its `return` field carried no data.
    #[error("empty return data in SOAP response")]
    EmptyReturn,

    /// The XML nested inside `return` could not be parsed.
    #[error("failed to unmarshal inner detail response: {0}")]
    InnerDetail(#[source] DeError),
}

impl EncodeError {
    /// Create a new MalformedParam error.
    pub fn malformed_param(reason: impl Into<String>) -> Self {
        Self::MalformedParam {
            reason: reason.into(),
        }
    }
}

impl DecodeError {
    /// True for the valid-but-empty protocol state.
    pub fn is_empty_return(&self) -> bool {
        matches!(self, Self::EmptyReturn)
    }

    /// True when the nested document was the part that failed.
    pub fn is_inner(&self) -> bool {
        matches!(self, Self::InnerDetail(_))
    }
}
