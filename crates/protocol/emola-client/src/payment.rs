//! Customer-to-business payments via USSD push.

use std::sync::Arc;

use emola_soap::{DetailResponse, ParamBuilder};
use tracing::debug;

use crate::caller::SoapCaller;
use crate::config::EmolaConfig;
use crate::error::EmolaResult;
use crate::types::{PaymentRequest, PaymentResponse, PUSH_LANGUAGE, WSCODE_PUSH_USSD};

/// Payment service bound to a [`SoapCaller`].
#[derive(Clone)]
pub struct PaymentService {
    caller: Arc<dyn SoapCaller>,
}

impl PaymentService {
    /// Create a new payment service.
    pub fn new(caller: Arc<dyn SoapCaller>) -> Self {
        Self { caller }
    }

    /// Initiate a USSD push payment.
    ///
    /// Depending on the merchant account setup the gateway either blocks
    /// until the customer enters their PIN, or answers at once with code
    /// "22" and delivers the result out of band. Provider codes are returned
    /// as-is in [`PaymentResponse::error_code`]; only local failures are
    /// errors.
    pub async fn receive(&self, request: &PaymentRequest) -> EmolaResult<PaymentResponse> {
        self.receive_detailed(request).await.map(PaymentResponse::from)
    }

    /// Like [`receive`](Self::receive), but returns the full detail document
    /// including balance and upstream response code.
    pub async fn receive_detailed(&self, request: &PaymentRequest) -> EmolaResult<DetailResponse> {
        request.validate()?;

        let param = push_param(self.caller.config(), request);
        debug!(reference = %request.reference, "Initiating USSD push");

        self.caller.call_soap(WSCODE_PUSH_USSD, &param).await
    }
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("url", &self.caller.config().url())
            .finish()
    }
}

/// Build the `pushUssdMessage` fragment. The gateway parses it positionally.
pub fn push_param(config: &EmolaConfig, request: &PaymentRequest) -> String {
    let content = request
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(config.partner_code.as_str());

    ParamBuilder::new()
        .field("msisdn", &request.phone)
        .field("transId", &request.reference)
        .field("transAmount", &request.amount)
        .field("partnerCode", &config.partner_code)
        .field("smsContent", content)
        .field("language", PUSH_LANGUAGE)
        .field("key", &config.partner_key)
        .field("refNo", &request.reference)
        .build()
}
