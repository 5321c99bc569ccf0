//! Command-line interface for the e-Mola USSD push API.
//!
//! This crate provides the `emola` binary:
//!
//! - **push**: send a payment prompt to a customer's phone
//! - **envelope**: print the SOAP request a push would send, offline
//! - **config**: show the resolved configuration and validate it
//!
//! # Quick Start
//!
//! ```bash
//! export EMOLA_USERNAME=user EMOLA_PASSWORD=secret
//! export EMOLA_PARTNER_CODE=SHOP EMOLA_PARTNER_KEY=k3y
//!
//! emola config
//! emola push --phone 861234567 --amount 500 --reference ORDER-42
//! ```
//!
//! # Output Formats
//!
//! All commands support `--format` for output control:
//!
//! - `human` (default): Human-readable with colors
//! - `json`: Machine-readable JSON
//!
//! # Configuration
//!
//! Configuration is loaded from `<data dir>/config.toml` (override the data
//! directory with `EMOLA_DATA_DIR`, or the file with `--config`).
//! `EMOLA_*` environment variables take precedence over the file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

// Re-export main types
pub use cli::{Cli, Commands, OutputFormatArg, PaymentArgs};
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Render};
