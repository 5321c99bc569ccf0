//! Show the resolved configuration.

use std::path::Path;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{redact, ConfigOutput, OutputFormat, Render};

/// Execute the config command.
///
/// An invalid configuration is reported in the output, not as an error.
pub fn show_config(config: CliConfig, format: OutputFormat, path: &Path) -> CliResult<String> {
    let (endpoint, error) = match config.to_emola_config() {
        Ok(emola) => (
            emola.url().to_string(),
            emola.validate().err().map(|e| e.to_string()),
        ),
        Err(e) => (
            config.gateway.endpoint.clone().unwrap_or_default(),
            Some(e.to_string()),
        ),
    };

    let output = ConfigOutput {
        config_path: path.display().to_string(),
        environment: config.gateway.environment.clone(),
        endpoint,
        timeout_secs: config.gateway.timeout_secs,
        partner_code: config.credentials.partner_code.clone(),
        partner_key: redact(&config.credentials.partner_key),
        username: config.credentials.username.clone(),
        password: redact(&config.credentials.password),
        valid: error.is_none(),
        error,
    };

    Ok(output.render(format))
}
