//! Configuration for the e-Mola client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{EmolaError, EmolaResult};

/// Gateway endpoint for the UAT (pre-production) environment.
pub const UAT_ENDPOINT: &str = "http://10.229.16.29:8520/BCCSGateway/BCCSGateway";

/// Gateway endpoint for production.
pub const PROD_ENDPOINT: &str = "http://10.229.16.30:9821/BCCSGateway/BCCSGateway";

/// Default HTTP timeout. Synchronous pushes block until the customer
/// answers the PIN prompt, so this is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Gateway environment selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// User acceptance testing (default)
    #[default]
    Uat,
    /// Production
    Prod,
}

impl Environment {
    /// Get the environment name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uat => "uat",
            Self::Prod => "prod",
        }
    }

    /// Endpoint URL for this environment.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Uat => UAT_ENDPOINT,
            Self::Prod => PROD_ENDPOINT,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = EmolaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uat" => Ok(Self::Uat),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(EmolaError::config(format!(
                "Environment must be UAT or PROD, got '{}'",
                s
            ))),
        }
    }
}

/// Credentials and settings issued by the provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmolaConfig {
    /// Merchant identity, sent in every payment fragment
    pub partner_code: String,

    /// Merchant shared secret, sent in every payment fragment
    pub partner_key: String,

    /// SOAP account name
    pub username: String,

    /// SOAP account password
    pub password: String,

    /// Which gateway to talk to
    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment endpoint when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Per-call HTTP timeout
    #[serde(default = "default_timeout", with = "duration_millis")]
    pub timeout: Duration,
}

impl EmolaConfig {
    /// Create a configuration for the UAT environment.
    pub fn uat(partner_code: &str, partner_key: &str, username: &str, password: &str) -> Self {
        Self {
            partner_code: partner_code.to_string(),
            partner_key: partner_key.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            environment: Environment::Uat,
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a configuration for production.
    pub fn prod(partner_code: &str, partner_key: &str, username: &str, password: &str) -> Self {
        Self {
            environment: Environment::Prod,
            ..Self::uat(partner_code, partner_key, username, password)
        }
    }

    /// Send requests to `endpoint` instead of the environment default.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the endpoint URL.
    pub fn url(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.endpoint())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> EmolaResult<()> {
        let required = [
            ("PartnerCode", &self.partner_code),
            ("PartnerKey", &self.partner_key),
            ("Username", &self.username),
            ("Password", &self.password),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(EmolaError::config(format!("{} is required", name)));
            }
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(EmolaError::config(format!(
                    "endpoint must be an http(s) URL, got '{}'",
                    endpoint
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(EmolaError::config("timeout must be greater than zero"));
        }

        Ok(())
    }
}

impl Default for EmolaConfig {
    fn default() -> Self {
        Self::uat("", "", "", "")
    }
}

impl std::fmt::Debug for EmolaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmolaConfig")
            .field("partner_code", &self.partner_code)
            .field("partner_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("environment", &self.environment)
            .field("endpoint", &self.url())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

/// Serde helper for Duration as milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
