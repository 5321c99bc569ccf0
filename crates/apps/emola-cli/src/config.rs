//! CLI configuration.
//!
//! Values come from `config.toml` first; `${VAR}` references inside string
//! fields are expanded, then `EMOLA_*` environment variables override.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use emola_client::{EmolaConfig, Environment, DEFAULT_TIMEOUT};

use crate::error::{CliError, CliResult};

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "EMOLA_DATA_DIR";

pub const ENV_USERNAME: &str = "EMOLA_USERNAME";
pub const ENV_PASSWORD: &str = "EMOLA_PASSWORD";
pub const ENV_PARTNER_CODE: &str = "EMOLA_PARTNER_CODE";
pub const ENV_PARTNER_KEY: &str = "EMOLA_PARTNER_KEY";
pub const ENV_ENVIRONMENT: &str = "EMOLA_ENVIRONMENT";
pub const ENV_ENDPOINT: &str = "EMOLA_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "EMOLA_TIMEOUT_SECS";

/// Expand environment variables in a string.
/// Supports `${VAR_NAME}` syntax.
fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}

/// CLI configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Gateway selection.
    pub gateway: GatewayConfig,
    /// Provider-issued credentials.
    pub credentials: CredentialsConfig,
}

/// Gateway selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// "uat" or "prod".
    pub environment: String,
    /// Overrides the environment endpoint.
    pub endpoint: Option<String>,
    /// Per-call HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default().as_str().to_string(),
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Provider-issued credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub partner_code: String,
    pub partner_key: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("partner_code", &self.partner_code)
            .field("partner_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from a file.
    /// Environment variables in `${VAR}` format are expanded in string fields.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;

        let credentials = &mut config.credentials;
        for field in [
            &mut credentials.partner_code,
            &mut credentials.partner_key,
            &mut credentials.username,
            &mut credentials.password,
            &mut config.gateway.environment,
        ] {
            *field = expand_env_vars(field);
        }
        if let Some(endpoint) = &mut config.gateway.endpoint {
            *endpoint = expand_env_vars(endpoint);
        }

        Ok(config)
    }

    /// Load from `path`, then apply `EMOLA_*` overrides from the process environment.
    pub fn resolve(path: &Path) -> CliResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(v) = get(ENV_USERNAME) {
            self.credentials.username = v;
        }
        if let Some(v) = get(ENV_PASSWORD) {
            self.credentials.password = v;
        }
        if let Some(v) = get(ENV_PARTNER_CODE) {
            self.credentials.partner_code = v;
        }
        if let Some(v) = get(ENV_PARTNER_KEY) {
            self.credentials.partner_key = v;
        }
        if let Some(v) = get(ENV_ENVIRONMENT) {
            self.gateway.environment = v;
        }
        if let Some(v) = get(ENV_ENDPOINT) {
            self.gateway.endpoint = Some(v);
        }
        if let Some(v) = get(ENV_TIMEOUT_SECS) {
            self.gateway.timeout_secs = v.trim().parse().map_err(|_| {
                CliError::config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, v
                ))
            })?;
        }
        Ok(())
    }

    /// Build the client configuration. Not validated here.
    pub fn to_emola_config(&self) -> CliResult<EmolaConfig> {
        let environment: Environment = self.gateway.environment.parse()?;
        Ok(EmolaConfig {
            partner_code: self.credentials.partner_code.clone(),
            partner_key: self.credentials.partner_key.clone(),
            username: self.credentials.username.clone(),
            password: self.credentials.password.clone(),
            environment,
            endpoint: self.gateway.endpoint.clone(),
            timeout: Duration::from_secs(self.gateway.timeout_secs),
        })
    }
}

/// Get the default base directory for emola data.
///
/// Resolution order:
/// 1. `EMOLA_DATA_DIR` environment variable (if set)
/// 2. Platform-specific data directory (e.g., `~/.local/share/emola` on Linux)
/// 3. Fallback to `~/.emola`
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("com", "movitel", "emola")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".emola")
        })
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    default_base_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[gateway]
environment = "prod"
timeout_secs = 30

[credentials]
partner_code = "SHOP"
partner_key = "k3y"
username = "user"
password = "secret"
"#;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.gateway.environment, "uat");
        assert_eq!(config.gateway.timeout_secs, 90);
        assert!(config.gateway.endpoint.is_none());
        assert!(config.credentials.username.is_empty());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CliConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.gateway.environment, "uat");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.credentials.partner_code, "SHOP");
        assert_eq!(config.gateway.timeout_secs, 30);

        let emola = config.to_emola_config().unwrap();
        assert_eq!(emola.environment, Environment::Prod);
        assert_eq!(emola.timeout, Duration::from_secs(30));
        assert!(emola.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\n").unwrap();
        assert!(matches!(CliConfig::load(&path), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("EMOLA_CLI_TEST_SECRET", "from-env");

        assert_eq!(expand_env_vars("${EMOLA_CLI_TEST_SECRET}"), "from-env");
        assert_eq!(
            expand_env_vars("pre-${EMOLA_CLI_TEST_SECRET}-post"),
            "pre-from-env-post"
        );

        // Unset variable should remain as-is
        assert_eq!(
            expand_env_vars("${NONEXISTENT_VAR_12345}"),
            "${NONEXISTENT_VAR_12345}"
        );
    }

    #[test]
    fn test_load_expands_secrets() {
        std::env::set_var("EMOLA_CLI_TEST_PASSWORD", "hunter2");

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[credentials]\npassword = \"${EMOLA_CLI_TEST_PASSWORD}\"\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.credentials.password, "hunter2");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_USERNAME, "env-user"),
            (ENV_PARTNER_KEY, "env-key"),
            (ENV_ENVIRONMENT, "PROD"),
            (ENV_ENDPOINT, "http://127.0.0.1:9/gw"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_PASSWORD, ""),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config.credentials.password = "from-file".into();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.credentials.username, "env-user");
        assert_eq!(config.credentials.partner_key, "env-key");
        assert_eq!(config.credentials.password, "from-file");
        assert_eq!(config.gateway.timeout_secs, 15);

        let emola = config.to_emola_config().unwrap();
        assert_eq!(emola.environment, Environment::Prod);
        assert_eq!(emola.url(), "http://127.0.0.1:9/gw");
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = CliConfig::default();
        let err = config
            .apply_overrides(|name| (name == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_unknown_environment() {
        let mut config = CliConfig::default();
        config.gateway.environment = "staging".into();
        let err = config.to_emola_config().unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let mut config = CliConfig::default();
        config.credentials.password = "secret".into();
        config.credentials.partner_key = "k3y".into();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("k3y"));
    }
}
