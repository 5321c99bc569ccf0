//! Helper functions for creating test fixtures.
//!
//! Builds gateway responses in the two-layer shape the gateway sends, and
//! client configurations aimed at a local stub.

use std::time::Duration;

use emola_client::EmolaConfig;
use emola_soap::{escape_xml, DetailResponse, NS_SOAP_ENVELOPE, NS_WEB_SERVICE, XML_HEADER};

/// Partner code used by [`test_config`].
pub const TEST_PARTNER_CODE: &str = "PARTNER";

/// Partner key used by [`test_config`].
pub const TEST_PARTNER_KEY: &str = "partner-key";

/// Username used by [`test_config`].
pub const TEST_USERNAME: &str = "user";

/// Password used by [`test_config`].
pub const TEST_PASSWORD: &str = "s3cret";

/// UAT configuration pointed at `endpoint`, with a short timeout.
pub fn test_config(endpoint: &str) -> EmolaConfig {
    EmolaConfig::uat(
        TEST_PARTNER_CODE,
        TEST_PARTNER_KEY,
        TEST_USERNAME,
        TEST_PASSWORD,
    )
    .with_endpoint(endpoint)
    .with_timeout(Duration::from_secs(5))
}

/// Detail document as a flat element sequence, the way the gateway emits it.
pub fn detail_xml(detail: &DetailResponse) -> String {
    let mut xml = format!("<errorCode>{}</errorCode>", escape_xml(&detail.error_code));
    for (name, value) in [
        ("message", &detail.message),
        ("transId", &detail.trans_id),
        ("balance", &detail.balance),
        ("orgResponseCode", &detail.org_response_code),
    ] {
        if !value.is_empty() {
            xml.push_str(&format!("<{name}>{}</{name}>", escape_xml(value)));
        }
    }
    xml
}

/// Full response envelope carrying `return_text` escaped inside `return`.
pub fn response_envelope(return_text: &str) -> String {
    format!(
        "{XML_HEADER}<S:Envelope xmlns:S=\"{NS_SOAP_ENVELOPE}\">\
         <S:Body><ns2:processResponse xmlns:ns2=\"{NS_WEB_SERVICE}\">\
         <return>{}</return>\
         </ns2:processResponse></S:Body></S:Envelope>",
        escape_xml(return_text)
    )
}

/// Response envelope for a detail document.
pub fn detail_envelope(detail: &DetailResponse) -> String {
    response_envelope(&detail_xml(detail))
}

/// Response envelope reporting success for `trans_id`.
pub fn success_envelope(trans_id: &str) -> String {
    detail_envelope(&DetailResponse {
        error_code: "0".to_string(),
        message: "Success".to_string(),
        trans_id: trans_id.to_string(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use emola_soap::unwrap_response;

    #[test]
    fn test_success_envelope_unwraps() {
        let detail = unwrap_response(success_envelope("REF1").as_bytes()).unwrap();
        assert_eq!(detail.error_code, "0");
        assert_eq!(detail.trans_id, "REF1");
        assert_eq!(detail.message, "Success");
    }

    #[test]
    fn test_detail_xml_escapes_values() {
        let xml = detail_xml(&DetailResponse {
            error_code: "1".into(),
            message: "a < b & c".into(),
            ..Default::default()
        });
        assert_eq!(
            xml,
            "<errorCode>1</errorCode><message>a &lt; b &amp; c</message>"
        );
    }

    #[test]
    fn test_config_points_at_endpoint() {
        let config = test_config("http://127.0.0.1:9/gw");
        assert_eq!(config.url(), "http://127.0.0.1:9/gw");
        assert!(config.validate().is_ok());
    }
}
