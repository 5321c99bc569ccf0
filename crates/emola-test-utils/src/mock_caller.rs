//! Mock implementation of the `SoapCaller` trait for testing.
//!
//! Records every call and answers with a configurable detail document,
//! so payment logic can be exercised without a gateway.

use async_trait::async_trait;
use emola_client::{EmolaConfig, EmolaError, EmolaResult, SoapCaller};
use emola_soap::DetailResponse;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// A call captured by [`MockSoapCaller`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Remote procedure name.
    pub wscode: String,
    /// Param fragment as handed to the transport.
    pub param: String,
}

struct MockSoapCallerInner {
    /// Every call made, in order.
    calls: Vec<RecordedCall>,
    /// Responses served first, one per call.
    queued: VecDeque<DetailResponse>,
    /// Response served once the queue is empty.
    fallback: DetailResponse,
    /// When true, every call fails with a transport error.
    should_fail: bool,
}

/// A mock implementation of the `SoapCaller` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and
/// all clones share the same state.
#[derive(Clone)]
pub struct MockSoapCaller {
    config: Arc<EmolaConfig>,
    inner: Arc<RwLock<MockSoapCallerInner>>,
}

impl Default for MockSoapCaller {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoapCaller {
    /// Create a mock that answers every call with error code "0".
    ///
    /// The fallback response echoes the `transId` found in the param.
    pub fn new() -> Self {
        Self::with_config(crate::helpers::test_config(emola_client::UAT_ENDPOINT))
    }

    /// Create a mock exposing a specific configuration.
    pub fn with_config(config: EmolaConfig) -> Self {
        Self {
            config: Arc::new(config),
            inner: Arc::new(RwLock::new(MockSoapCallerInner {
                calls: Vec::new(),
                queued: VecDeque::new(),
                fallback: DetailResponse {
                    error_code: "0".to_string(),
                    message: "Success".to_string(),
                    ..Default::default()
                },
                should_fail: false,
            })),
        }
    }

    /// Serve `detail` for every call not covered by a queued response.
    pub fn with_response(self, detail: DetailResponse) -> Self {
        self.inner.write().unwrap().fallback = detail;
        self
    }

    /// Serve `detail` for the next call only.
    pub fn push_response(&self, detail: DetailResponse) {
        self.inner.write().unwrap().queued.push_back(detail);
    }

    /// Configure the mock to fail all calls.
    pub fn with_failure(self) -> Self {
        self.inner.write().unwrap().should_fail = true;
        self
    }

    /// Set the failure mode at runtime.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.inner.write().unwrap().should_fail = should_fail;
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.read().unwrap().calls.clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.inner.read().unwrap().calls.len()
    }

    /// Get the most recent call, if any.
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.inner.read().unwrap().calls.last().cloned()
    }
}

/// Text content of the first `<name>` element in a param fragment.
fn extract_field<'a>(param: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{}>", name);
    let close = format!("</{}>", name);
    let start = param.find(&open)? + open.len();
    let len = param[start..].find(&close)?;
    Some(&param[start..start + len])
}

#[async_trait]
impl SoapCaller for MockSoapCaller {
    fn config(&self) -> &EmolaConfig {
        &self.config
    }

    async fn call_soap(&self, wscode: &str, param_xml: &str) -> EmolaResult<DetailResponse> {
        let mut inner = self.inner.write().unwrap();
        inner.calls.push(RecordedCall {
            wscode: wscode.to_string(),
            param: param_xml.to_string(),
        });

        if inner.should_fail {
            return Err(EmolaError::transport("mock: configured to fail"));
        }

        if let Some(detail) = inner.queued.pop_front() {
            return Ok(detail);
        }

        let mut detail = inner.fallback.clone();
        if detail.trans_id.is_empty() {
            if let Some(trans_id) = extract_field(param_xml, "transId") {
                detail.trans_id = trans_id.to_string();
            }
        }
        Ok(detail)
    }
}
