//! Payment operation integration tests.
//!
//! The mock caller checks what the payment service hands to the transport;
//! the stub server checks the whole path from request to decoded response.

use std::sync::Arc;

use emola_client::{
    EmolaClient, EmolaError, PaymentRequest, PaymentService, ERROR_CODE_TIMEOUT,
    WSCODE_PUSH_USSD,
};
use emola_soap::{decode_request, DetailResponse};
use emola_test_utils::{
    detail_envelope, success_envelope, test_config, MockSoapCaller, StubServer,
    TEST_PARTNER_CODE, TEST_PARTNER_KEY,
};

fn service(mock: &MockSoapCaller) -> PaymentService {
    PaymentService::new(Arc::new(mock.clone()))
}

#[tokio::test]
async fn test_missing_fields_make_no_call() {
    let mock = MockSoapCaller::new();
    let payments = service(&mock);

    for request in [
        PaymentRequest::new("", "500", "REF123"),
        PaymentRequest::new("861234567", "", "REF123"),
        PaymentRequest::new("861234567", "500", ""),
    ] {
        let err = payments.receive(&request).await.unwrap_err();
        assert!(matches!(err, EmolaError::Validation(_)));
        assert!(err.to_string().contains("phone, amount, and reference are required"));
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_param_sent_to_caller() {
    let mock = MockSoapCaller::new();
    let request = PaymentRequest::new("861234567", "500", "REF123");

    service(&mock).receive(&request).await.unwrap();

    let call = mock.last_call().unwrap();
    assert_eq!(call.wscode, WSCODE_PUSH_USSD);
    assert_eq!(
        call.param,
        format!(
            "<msisdn>861234567</msisdn><transId>REF123</transId><transAmount>500</transAmount>\
             <partnerCode>{TEST_PARTNER_CODE}</partnerCode><smsContent>{TEST_PARTNER_CODE}</smsContent>\
             <language>en</language><key>{TEST_PARTNER_KEY}</key><refNo>REF123</refNo>"
        )
    );
}

#[tokio::test]
async fn test_calls_recorded_in_order() {
    let mock = MockSoapCaller::new();
    let payments = service(&mock);

    payments
        .receive(&PaymentRequest::new("861111111", "100", "REF1"))
        .await
        .unwrap();
    payments
        .receive(&PaymentRequest::new("862222222", "200", "REF2"))
        .await
        .unwrap();

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.wscode == WSCODE_PUSH_USSD));
    assert!(calls[0].param.contains("<transId>REF1</transId>"));
    assert!(calls[1].param.contains("<transId>REF2</transId>"));
}

#[tokio::test]
async fn test_provider_codes_pass_through() {
    let mock = MockSoapCaller::new().with_response(DetailResponse {
        error_code: ERROR_CODE_TIMEOUT.into(),
        message: "Customer did not confirm".into(),
        trans_id: "REF7".into(),
        ..Default::default()
    });

    let response = service(&mock)
        .receive(&PaymentRequest::new("861234567", "500", "REF7"))
        .await
        .unwrap();

    assert_eq!(response.error_code, "11");
    assert_eq!(response.message, "Customer did not confirm");
    assert!(response.is_timeout());
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let mock = MockSoapCaller::new().with_failure();
    let err = service(&mock)
        .receive(&PaymentRequest::new("861234567", "500", "REF123"))
        .await
        .unwrap_err();
    assert!(matches!(err, EmolaError::Transport(_)));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_end_to_end_success() {
    let detail = DetailResponse {
        error_code: "0".into(),
        message: "Success".into(),
        trans_id: "REF123".into(),
        balance: "1000".into(),
        ..Default::default()
    };
    let server = StubServer::start(200, detail_envelope(&detail)).await.unwrap();
    let client = EmolaClient::new(test_config(&server.url())).unwrap();

    let response = client
        .payment()
        .receive(&PaymentRequest::new("861234567", "500", "REF123"))
        .await
        .unwrap();

    assert_eq!(response.trans_id, "REF123");
    assert_eq!(response.error_code, "0");
    assert!(response.is_success());

    let sent = decode_request(&server.last_request().unwrap().body).unwrap();
    assert!(sent.process().param.contains("<refNo>REF123</refNo>"));
}

#[tokio::test]
async fn test_end_to_end_hostile_content_stays_in_its_field() {
    let server = StubServer::start(200, success_envelope("REF9")).await.unwrap();
    let client = EmolaClient::new(test_config(&server.url())).unwrap();

    let request = PaymentRequest::new("861234567", "500", "REF9")
        .with_content("</smsContent><key>stolen</key>");
    client.payment().receive(&request).await.unwrap();

    let sent = decode_request(&server.last_request().unwrap().body).unwrap();
    let param = &sent.process().param;
    assert!(param.contains(
        "<smsContent>&lt;/smsContent&gt;&lt;key&gt;stolen&lt;/key&gt;</smsContent>"
    ));
    assert_eq!(param.matches("<key>").count(), 1);
}

#[tokio::test]
async fn test_detailed_response_exposes_balance() {
    let detail = DetailResponse {
        error_code: "0".into(),
        message: "Success".into(),
        trans_id: "REF5".into(),
        balance: "98000".into(),
        org_response_code: "01".into(),
    };
    let server = StubServer::start(200, detail_envelope(&detail)).await.unwrap();
    let client = EmolaClient::new(test_config(&server.url())).unwrap();

    let decoded = client
        .payment()
        .receive_detailed(&PaymentRequest::new("861234567", "500", "REF5"))
        .await
        .unwrap();
    assert_eq!(decoded.balance, "98000");
    assert_eq!(decoded.org_response_code, "01");
}
