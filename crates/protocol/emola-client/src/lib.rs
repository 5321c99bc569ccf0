//! Client for the Movitel e-Mola mobile-money gateway.
//!
//! The gateway exposes a single SOAP endpoint; this crate models one of its
//! procedures, `pushUssdMessage`, which sends a USSD prompt to a customer's
//! phone asking them to authorize a payment to the merchant.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  param fragment  ┌──────────────────┐  SOAP/HTTP  ┌─────────┐
//! │ PaymentService   │ ───────────────► │ SoapCaller       │ ──────────► │ e-Mola  │
//! │  validate        │                  │  └─ EmolaClient  │ ◄────────── │ gateway │
//! │  build fragment  │ ◄─────────────── │     encode/send/ │  envelope   └─────────┘
//! │  map response    │  DetailResponse  │     unwrap       │
//! └──────────────────┘                  └──────────────────┘
//! ```
//!
//! # Components
//!
//! - **[`config`]**: credentials, environment and endpoint resolution
//! - **[`client`]**: the HTTP transport
//! - **[`caller`]**: the [`SoapCaller`] seam used by the payment service
//! - **[`payment`]**: the USSD push operation
//! - **[`types`]**: request/response types and known provider codes
//! - **[`error`]**: error types with recovery suggestions
//!
//! # Usage
//!
//! ```rust,no_run
//! use emola_client::{EmolaClient, EmolaConfig, PaymentRequest};
//!
//! # async fn example() -> emola_client::EmolaResult<()> {
//! let config = EmolaConfig::uat("PARTNER", "partner-key", "user", "password");
//! let client = EmolaClient::new(config)?;
//!
//! let request = PaymentRequest::new("861234567", "500", "ORDER-42");
//! let response = client.payment().receive(&request).await?;
//!
//! if response.is_success() {
//!     println!("paid: {}", response.trans_id);
//! } else if response.is_processing() {
//!     println!("waiting for customer confirmation");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! No call is ever retried. Timeouts come from [`EmolaConfig::timeout`] or
//! from dropping the call's future.

pub mod caller;
pub mod client;
pub mod config;
pub mod error;
pub mod payment;
pub mod types;

// Re-export main types
pub use caller::SoapCaller;
pub use client::{EmolaClient, HEADER_SOAP_ACTION, SOAP_CONTENT_TYPE};
pub use config::{EmolaConfig, Environment, DEFAULT_TIMEOUT, PROD_ENDPOINT, UAT_ENDPOINT};
pub use error::{EmolaError, EmolaResult};
pub use payment::{push_param, PaymentService};
pub use types::{
    PaymentRequest, PaymentResponse, ERROR_CODE_PROCESSING, ERROR_CODE_SUCCESS,
    ERROR_CODE_TIMEOUT, PUSH_LANGUAGE, WSCODE_PUSH_USSD,
};

pub use emola_soap::DetailResponse;
