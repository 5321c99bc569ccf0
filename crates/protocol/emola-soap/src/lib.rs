//! SOAP wire format for the e-Mola USSD push gateway.
//!
//! This crate owns everything that touches XML:
//!
//! - **[`escape`]**: escaping of untrusted values placed in hand-built XML
//! - **[`param`]**: the ordered builder for the `param` fragment
//! - **[`envelope`]**: request encoding and the two-stage response unwrap
//! - **[`error`]**: encode and decode errors
//!
//! # Request / Response Flow
//!
//! ```text
//! ParamBuilder ──► param fragment ──► RequestEnvelope::to_bytes ──► HTTP body
//!
//! HTTP body ──► decode_response ──► return text ──► decode_detail ──► DetailResponse
//!                (stage one)                          (stage two)
//! ```
//!
//! # Example
//!
//! ```rust
//! use emola_soap::{encode_request, ParamBuilder};
//!
//! let param = ParamBuilder::new()
//!     .field("msisdn", "861234567")
//!     .field("transAmount", "500")
//!     .build();
//!
//! let body = encode_request("user", "secret", "pushUssdMessage", &param).unwrap();
//! assert!(String::from_utf8(body).unwrap().contains("<wscode>pushUssdMessage</wscode>"));
//! ```

pub mod envelope;
pub mod error;
pub mod escape;
pub mod param;

pub use envelope::{
    decode_detail, decode_request, decode_response, encode_request, unwrap_response,
    DetailResponse, Process, ProcessResponse, RequestEnvelope, ResponseEnvelope,
    NS_SOAP_ENVELOPE, NS_WEB_SERVICE, XML_HEADER,
};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use escape::{escape_xml, replace_invalid_chars};
pub use param::ParamBuilder;
