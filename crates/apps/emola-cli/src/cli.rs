//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// e-Mola USSD push CLI.
#[derive(Parser, Debug)]
#[command(name = "emola")]
#[command(version)]
#[command(about = "Command-line interface for the e-Mola USSD push API")]
#[command(
    long_about = "Sends customer-to-business payment prompts through the Movitel e-Mola gateway.\n\nCredentials come from config.toml or EMOLA_* environment variables. Run 'emola config' to check them."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json).
    #[arg(short, long, global = true, default_value = "human")]
    pub format: OutputFormatArg,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Payment fields shared by `push` and `envelope`.
#[derive(Args, Debug, Clone)]
pub struct PaymentArgs {
    /// Customer phone number (MSISDN).
    #[arg(long)]
    pub phone: String,

    /// Amount to charge.
    #[arg(long)]
    pub amount: String,

    /// Unique transaction reference.
    #[arg(long)]
    pub reference: String,

    /// Text shown to the customer (defaults to the partner code).
    #[arg(long)]
    pub content: Option<String>,
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a USSD payment prompt to a customer.
    ///
    /// Blocks until the gateway answers. Provider codes are shown as-is:
    /// "0" success, "11" customer timeout, "22" processing.
    Push {
        #[command(flatten)]
        payment: PaymentArgs,

        /// Also show balance and upstream response code.
        #[arg(long)]
        detail: bool,
    },

    /// Print the SOAP request `push` would send, without sending it.
    Envelope {
        #[command(flatten)]
        payment: PaymentArgs,

        /// Include the password and partner key in the output.
        #[arg(long)]
        show_secrets: bool,
    },

    /// Show the resolved configuration and whether it is valid.
    Config,
}
