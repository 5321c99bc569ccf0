//! HTTP transport for gateway calls.
//!
//! `EmolaClient` owns the HTTP conversation for a single call:
//! 1. Encode the SOAP envelope
//! 2. POST it with the SOAP headers
//! 3. Read the whole body, then check the status
//! 4. Unwrap the two-stage response
//!
//! Dropping the future returned by [`EmolaClient::call_soap`] aborts the
//! in-flight request; wrap it in `tokio::time::timeout` or `select!` for a
//! per-call deadline shorter than the configured timeout.

use std::sync::Arc;

use async_trait::async_trait;
use emola_soap::{unwrap_response, DetailResponse, RequestEnvelope};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::caller::SoapCaller;
use crate::config::EmolaConfig;
use crate::error::{EmolaError, EmolaResult};
use crate::payment::PaymentService;

/// Content type of every request.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Header the legacy gateway requires, always sent empty.
pub const HEADER_SOAP_ACTION: &str = "SOAPAction";

/// Client for the e-Mola gateway.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct EmolaClient {
    /// HTTP client
    http: Client,
    /// Validated configuration
    config: Arc<EmolaConfig>,
}

impl EmolaClient {
    /// Create a new client after validating `config`.
    pub fn new(config: EmolaConfig) -> EmolaResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmolaError::transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create a client with a custom `reqwest::Client`.
    ///
    /// The configured timeout is not applied to `http`.
    pub fn with_http_client(config: EmolaConfig, http: Client) -> EmolaResult<Self> {
        config.validate()?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Payment service bound to this client.
    pub fn payment(&self) -> PaymentService {
        PaymentService::new(Arc::new(self.clone()))
    }

    /// Get the configuration.
    pub fn config(&self) -> &EmolaConfig {
        &self.config
    }

    /// Get the resolved endpoint URL.
    pub fn url(&self) -> &str {
        self.config.url()
    }

    /// Encode, send and decode one call.
    pub async fn call_soap(&self, wscode: &str, param_xml: &str) -> EmolaResult<DetailResponse> {
        let payload = RequestEnvelope::new(
            &self.config.username,
            &self.config.password,
            wscode,
            param_xml,
        )
        .to_bytes()?;

        let url = self.config.url();
        debug!(url = %url, wscode = %wscode, bytes = payload.len(), "Sending SOAP request");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE))
            .header(HEADER_SOAP_ACTION, HeaderValue::from_static(""))
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(
                status = status.as_u16(),
                wscode = %wscode,
                "Gateway returned non-success status"
            );
            return Err(EmolaError::unexpected_status(status.as_u16(), body));
        }

        let detail = unwrap_response(&body)?;
        debug!(
            wscode = %wscode,
            error_code = %detail.error_code,
            trans_id = %detail.trans_id,
            "SOAP response decoded"
        );

        Ok(detail)
    }
}

#[async_trait]
impl SoapCaller for EmolaClient {
    fn config(&self) -> &EmolaConfig {
        &self.config
    }

    async fn call_soap(&self, wscode: &str, param_xml: &str) -> EmolaResult<DetailResponse> {
        EmolaClient::call_soap(self, wscode, param_xml).await
    }
}

impl std::fmt::Debug for EmolaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmolaClient")
            .field("url", &self.config.url())
            .field("environment", &self.config.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, PROD_ENDPOINT, UAT_ENDPOINT};

    fn config() -> EmolaConfig {
        EmolaConfig::uat("SHOP", "key", "user", "secret")
    }

    #[test]
    fn test_client_creation() {
        let client = EmolaClient::new(config()).unwrap();
        assert_eq!(client.url(), UAT_ENDPOINT);

        let prod = EmolaClient::new(EmolaConfig::prod("SHOP", "key", "user", "secret")).unwrap();
        assert_eq!(prod.url(), PROD_ENDPOINT);
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let err = EmolaClient::new(EmolaConfig::default()).unwrap_err();
        assert!(matches!(err, EmolaError::Config(_)));
    }

    #[test]
    fn test_client_with_custom_http_client() {
        let http = Client::builder().build().unwrap();
        let client = EmolaClient::with_http_client(config(), http.clone()).unwrap();
        assert_eq!(client.url(), UAT_ENDPOINT);
        assert_eq!(client.config().username, "user");

        let err = EmolaClient::with_http_client(EmolaConfig::default(), http).unwrap_err();
        assert!(matches!(err, EmolaError::Config(_)));
    }

    #[test]
    fn test_client_exposes_config() {
        let client = EmolaClient::new(config()).unwrap();
        let caller: &dyn SoapCaller = &client;
        assert_eq!(caller.config().partner_code, "SHOP");
        assert_eq!(caller.config().environment, Environment::Uat);
    }

    #[test]
    fn test_client_debug() {
        let client = EmolaClient::new(config()).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("BCCSGateway"));
        assert!(!debug.contains("secret"));
    }

    #[tokio::test]
    async fn test_malformed_param_fails_before_network() {
        // Unroutable endpoint: reaching the network would surface a transport error.
        let client =
            EmolaClient::new(config().with_endpoint("http://192.0.2.1:1/gw")).unwrap();
        let err = client
            .call_soap("pushUssdMessage", "<msisdn>1</transId>")
            .await
            .unwrap_err();
        assert!(matches!(err, EmolaError::Encode(_)), "{err}");
    }
}
