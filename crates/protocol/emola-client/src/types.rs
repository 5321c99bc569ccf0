//! Request and response types for the payment operation.

use emola_soap::DetailResponse;
use serde::{Deserialize, Serialize};

use crate::error::{EmolaError, EmolaResult};

/// Remote procedure that triggers the USSD push.
pub const WSCODE_PUSH_USSD: &str = "pushUssdMessage";

/// Language tag sent with every push.
pub const PUSH_LANGUAGE: &str = "en";

/// Provider code for a completed payment.
pub const ERROR_CODE_SUCCESS: &str = "0";

/// Provider code for a push the customer did not answer in time.
pub const ERROR_CODE_TIMEOUT: &str = "11";

/// Provider code for a push accepted for asynchronous processing.
pub const ERROR_CODE_PROCESSING: &str = "22";

/// A customer-to-business payment request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Customer MSISDN (e.g. "861234567").
    pub phone: String,

    /// Amount in the provider's format (e.g. "500").
    pub amount: String,

    /// Unique caller reference, used as both transaction ID and reference number.
    pub reference: String,

    /// Text shown to the customer; defaults to the partner code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PaymentRequest {
    /// Create a request without custom content.
    pub fn new(
        phone: impl Into<String>,
        amount: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            amount: amount.into(),
            reference: reference.into(),
            content: None,
        }
    }

    /// Set the text shown to the customer.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Check that the required fields are present.
    pub fn validate(&self) -> EmolaResult<()> {
        if self.phone.is_empty() || self.amount.is_empty() || self.reference.is_empty() {
            return Err(EmolaError::validation(
                "phone, amount, and reference are required",
            ));
        }
        Ok(())
    }
}

/// Result of a push request.
///
/// `error_code` is passed through from the provider unchanged. The payment
/// may have completed synchronously ("0"), timed out waiting for the
/// customer ("11"), or been queued with the final result delivered out of
/// band ("22"); other codes are possible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Transaction ID
    pub trans_id: String,
    /// Provider error code
    pub error_code: String,
    /// Provider message
    pub message: String,
}

impl PaymentResponse {
    /// True when the provider reported success.
    pub fn is_success(&self) -> bool {
        self.error_code == ERROR_CODE_SUCCESS
    }

    /// True when the customer did not answer in time.
    pub fn is_timeout(&self) -> bool {
        self.error_code == ERROR_CODE_TIMEOUT
    }

    /// True when the result will arrive asynchronously.
    pub fn is_processing(&self) -> bool {
        self.error_code == ERROR_CODE_PROCESSING
    }
}

impl From<DetailResponse> for PaymentResponse {
    fn from(detail: DetailResponse) -> Self {
        Self {
            trans_id: detail.trans_id,
            error_code: detail.error_code,
            message: detail.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_detail() {
        let detail = DetailResponse {
            error_code: "0".into(),
            message: "ok".into(),
            trans_id: "REF1".into(),
            balance: "1000".into(),
            org_response_code: "01".into(),
        };
        let response = PaymentResponse::from(detail);
        assert_eq!(response.trans_id, "REF1");
        assert_eq!(response.error_code, "0");
        assert_eq!(response.message, "ok");
        assert!(response.is_success());
    }

    #[test]
    fn test_code_predicates() {
        let mut response = PaymentResponse::default();
        response.error_code = "11".into();
        assert!(response.is_timeout() && !response.is_success());
        response.error_code = "22".into();
        assert!(response.is_processing());
        response.error_code = "99".into();
        assert!(!response.is_success() && !response.is_timeout() && !response.is_processing());
    }

    #[test]
    fn test_request_validate() {
        assert!(PaymentRequest::new("1", "2", "3").validate().is_ok());
        for request in [
            PaymentRequest::new("", "500", "REF"),
            PaymentRequest::new("861234567", "", "REF"),
            PaymentRequest::new("861234567", "500", ""),
        ] {
            assert!(matches!(request.validate(), Err(EmolaError::Validation(_))));
        }
    }

    #[test]
    fn test_request_builder() {
        let request = PaymentRequest::new("861234567", "500", "REF123").with_content("Order 7");
        assert_eq!(request.phone, "861234567");
        assert_eq!(request.content.as_deref(), Some("Order 7"));
    }
}
