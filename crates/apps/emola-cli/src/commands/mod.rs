//! CLI command implementations.

pub mod envelope;
pub mod push;
pub mod show_config;

// Re-export command handlers
pub use envelope::envelope;
pub use push::push;
pub use show_config::show_config;

use emola_client::PaymentRequest;

use crate::cli::PaymentArgs;

/// Build the library request from command-line arguments.
pub(crate) fn payment_request(args: &PaymentArgs) -> PaymentRequest {
    let request = PaymentRequest::new(&args.phone, &args.amount, &args.reference);
    match &args.content {
        Some(content) => request.with_content(content),
        None => request,
    }
}
