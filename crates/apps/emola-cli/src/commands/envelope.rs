//! Print the SOAP request a push would send.

use emola_client::{push_param, WSCODE_PUSH_USSD};
use emola_soap::RequestEnvelope;

use crate::cli::PaymentArgs;
use crate::commands::payment_request;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{EnvelopeOutput, OutputFormat, Render, REDACTED};

/// Execute the envelope command.
///
/// Nothing is sent. Unless `show_secrets` is set, the password and partner
/// key are replaced before encoding.
pub fn envelope(
    config: CliConfig,
    format: OutputFormat,
    args: &PaymentArgs,
    show_secrets: bool,
) -> CliResult<String> {
    let mut emola = config.to_emola_config()?;
    let request = payment_request(args);
    request.validate()?;

    if !show_secrets {
        emola.password = REDACTED.to_string();
        emola.partner_key = REDACTED.to_string();
    }

    let param = push_param(&emola, &request);
    let bytes = RequestEnvelope::new(&emola.username, &emola.password, WSCODE_PUSH_USSD, &param)
        .to_bytes()?;

    let output = EnvelopeOutput {
        url: emola.url().to_string(),
        envelope: String::from_utf8_lossy(&bytes).into_owned(),
    };

    Ok(output.render(format))
}
