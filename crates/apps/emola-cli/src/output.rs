//! Output formatting for CLI.

use colored::Colorize;
use serde::Serialize;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use 'human' or 'json'.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Trait for renderable output.
pub trait Render {
    /// Render as human-readable string.
    fn render_human(&self) -> String;

    /// Render as JSON string.
    fn render_json(&self) -> String;

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => self.render_json(),
        }
    }
}

/// Placeholder shown instead of a secret value.
pub const REDACTED: &str = "********";

/// Show whether a secret is set without revealing it.
pub fn redact(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        REDACTED.to_string()
    }
}

fn or_unset(value: &str) -> String {
    if value.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// Output for the push command.
#[derive(Debug, Serialize)]
pub struct PushOutput {
    pub trans_id: String,
    pub error_code: String,
    pub message: String,
    /// "success", "timeout", "processing" or "failed".
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_response_code: Option<String>,
}

impl Render for PushOutput {
    fn render_human(&self) -> String {
        let status = match self.status.as_str() {
            "success" => self.status.green().bold(),
            "processing" => self.status.yellow().bold(),
            _ => self.status.red().bold(),
        };
        let mut lines = vec![
            format!("{} {}", "Status:".bold(), status),
            format!("{} {}", "Transaction:".bold(), or_unset(&self.trans_id)),
            format!("{} {}", "Error code:".bold(), self.error_code),
            format!("{} {}", "Message:".bold(), or_unset(&self.message)),
        ];
        if let Some(balance) = &self.balance {
            lines.push(format!("{} {}", "Balance:".bold(), or_unset(balance)));
        }
        if let Some(code) = &self.org_response_code {
            lines.push(format!("{} {}", "Upstream code:".bold(), or_unset(code)));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for the envelope command.
#[derive(Debug, Serialize)]
pub struct EnvelopeOutput {
    pub url: String,
    pub envelope: String,
}

impl Render for EnvelopeOutput {
    fn render_human(&self) -> String {
        format!("{} {}\n\n{}", "POST".cyan().bold(), self.url, self.envelope)
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Output for the config command.
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub config_path: String,
    pub environment: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub partner_code: String,
    pub partner_key: String,
    pub username: String,
    pub password: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Render for ConfigOutput {
    fn render_human(&self) -> String {
        let validity = match (&self.error, self.valid) {
            (_, true) => "valid".green().bold().to_string(),
            (Some(e), false) => format!("{} ({})", "invalid".red().bold(), e),
            (None, false) => "invalid".red().bold().to_string(),
        };
        [
            format!("{} {}", "Config file:".bold(), self.config_path),
            format!("{} {}", "Environment:".bold(), or_unset(&self.environment)),
            format!("{} {}", "Endpoint:".bold(), or_unset(&self.endpoint)),
            format!("{} {}s", "Timeout:".bold(), self.timeout_secs),
            format!("{} {}", "Partner code:".bold(), or_unset(&self.partner_code)),
            format!("{} {}", "Partner key:".bold(), or_unset(&self.partner_key)),
            format!("{} {}", "Username:".bold(), or_unset(&self.username)),
            format!("{} {}", "Password:".bold(), or_unset(&self.password)),
            format!("{} {}", "Status:".bold(), validity),
        ]
        .join("\n")
    }

    fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
