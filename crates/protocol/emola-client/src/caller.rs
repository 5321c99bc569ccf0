//! SOAP caller trait definition.

use async_trait::async_trait;
use emola_soap::DetailResponse;

use crate::config::EmolaConfig;
use crate::error::EmolaResult;

/// One encode-send-decode round trip against the gateway.
///
/// This trait abstracts the transport so that:
/// - [`EmolaClient`](crate::EmolaClient) talks HTTP in production
/// - a mock can stand in for it in tests, with no network
#[async_trait]
pub trait SoapCaller: Send + Sync {
    /// Configuration the caller was built with.
    fn config(&self) -> &EmolaConfig;

    /// Invoke `wscode` with a pre-built `param` fragment and return the
    /// unwrapped detail document.
    async fn call_soap(&self, wscode: &str, param_xml: &str) -> EmolaResult<DetailResponse>;
}
