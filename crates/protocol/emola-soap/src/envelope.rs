//! SOAP envelope encoding and the two-stage response unwrap.
//!
//! # Request
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <soapenv:Envelope xmlns:soapenv="..." xmlns:web="...">
//!   <soapenv:Header/>
//!   <soapenv:Body>
//!     <web:process>
//!       <username>..</username>
//!       <password>..</password>
//!       <wscode>..</wscode>
//!       <param>&lt;msisdn&gt;..</param>
//!     </web:process>
//!   </soapenv:Body>
//! </soapenv:Envelope>
//! ```
//!
//! # Response
//!
//! The gateway answers with `Envelope/Body/processResponse/return`, where
//! `return` holds a second XML document as escaped text. Decoding therefore
//! runs twice: once for the outer envelope and once, independently, for the
//! nested detail document. Namespace prefixes are ignored; elements are
//! matched by local name.

use std::borrow::Cow;

use quick_xml::de::DeError;
use quick_xml::events::Event;
use quick_xml::se::QuoteLevel;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::escape::replace_invalid_chars;

/// XML declaration written ahead of every request.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// SOAP 1.1 envelope namespace.
pub const NS_SOAP_ENVELOPE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the gateway web service.
pub const NS_WEB_SERVICE: &str = "http://webservice.com/";

/// Element names allowed at the top level of a bare detail document.
const DETAIL_FIELDS: [&str; 5] = [
    "errorCode",
    "message",
    "transId",
    "balance",
    "orgResponseCode",
];

/// Local name required of the response root.
const ENVELOPE_ROOT: &str = "Envelope";

/// Root wrapped around a bare sequence of detail elements.
const DETAIL_ROOT: &str = "detail";

// =============================================================================
// Request
// =============================================================================

/// Outbound `soapenv:Envelope`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename(serialize = "soapenv:Envelope", deserialize = "Envelope"))]
pub struct RequestEnvelope {
    #[serde(rename = "@xmlns:soapenv", default)]
    soapenv_ns: String,

    #[serde(rename = "@xmlns:web", default)]
    web_ns: String,

    /// Always empty, but the gateway rejects envelopes without it.
    #[serde(
        rename(serialize = "soapenv:Header", deserialize = "Header"),
        default
    )]
    header: Header,

    #[serde(rename(serialize = "soapenv:Body", deserialize = "Body"))]
    body: RequestBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Header;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RequestBody {
    #[serde(rename(serialize = "web:process", deserialize = "process"))]
    process: Process,
}

/// The `web:process` call. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// SOAP account name
    pub username: String,
    /// SOAP account password
    pub password: String,
    /// Remote procedure selector
    pub wscode: String,
    /// Operation-specific XML fragment, carried as character data
    pub param: String,
    /// Optional raw payload, omitted when absent
    #[serde(
        rename = "rawData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_data: Option<String>,
}

impl RequestEnvelope {
    /// Create an envelope for one call.
    pub fn new(username: &str, password: &str, wscode: &str, param: &str) -> Self {
        Self {
            soapenv_ns: NS_SOAP_ENVELOPE.to_string(),
            web_ns: NS_WEB_SERVICE.to_string(),
            header: Header,
            body: RequestBody {
                process: Process {
                    username: username.to_string(),
                    password: password.to_string(),
                    wscode: wscode.to_string(),
                    param: param.to_string(),
                    raw_data: None,
                },
            },
        }
    }

    /// Attach a `rawData` payload. An empty payload is not sent.
    pub fn with_raw_data(mut self, raw_data: impl Into<String>) -> Self {
        let raw_data = raw_data.into();
        self.body.process.raw_data = (!raw_data.is_empty()).then_some(raw_data);
        self
    }

    /// The call carried by this envelope.
    pub fn process(&self) -> &Process {
        &self.body.process
    }

    /// Serialize to the request body: declaration plus indented envelope.
    ///
    /// Characters XML 1.0 cannot carry are replaced with U+FFFD.
    pub fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        let mut envelope = self.clone();
        let process = &mut envelope.body.process;
        for field in [
            &mut process.username,
            &mut process.password,
            &mut process.wscode,
            &mut process.param,
        ] {
            *field = replace_invalid_chars(field).into_owned();
        }
        if let Some(raw_data) = &mut process.raw_data {
            *raw_data = replace_invalid_chars(raw_data).into_owned();
        }

        check_fragment(&envelope.body.process.param)?;

        let mut xml = String::from(XML_HEADER);
        let mut ser = quick_xml::se::Serializer::new(&mut xml);
        ser.indent(' ', 2);
        ser.set_quote_level(QuoteLevel::Full);
        envelope
            .serialize(ser)
            .map_err(|e| EncodeError::Serialize(e.to_string()))?;

        Ok(xml.into_bytes())
    }
}

/// Encode a request body for `wscode` with the given credentials and fragment.
pub fn encode_request(
    username: &str,
    password: &str,
    wscode: &str,
    param: &str,
) -> EncodeResult<Vec<u8>> {
    RequestEnvelope::new(username, password, wscode, param).to_bytes()
}

/// Parse a request body produced by [`encode_request`].
///
/// Used by gateway stubs and diagnostics; the client never needs it.
pub fn decode_request(bytes: &[u8]) -> DecodeResult<RequestEnvelope> {
    quick_xml::de::from_reader(bytes).map_err(DecodeError::Envelope)
}

/// Reject fragments that are not well-formed XML content.
fn check_fragment(fragment: &str) -> EncodeResult<()> {
    let wrapped = format!("<param>{fragment}</param>");
    let mut reader = Reader::from_str(&wrapped);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return Ok(()),
            Ok(Event::Text(text)) => {
                text.unescape()
                    .map_err(|e| EncodeError::malformed_param(e.to_string()))?;
            }
            Ok(_) => {}
            Err(e) => return Err(EncodeError::malformed_param(e.to_string())),
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Inbound envelope, stage one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseEnvelope {
    /// SOAP body
    #[serde(rename = "Body")]
    pub body: ResponseBody,
}

/// Body of the inbound envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseBody {
    /// The single response element
    #[serde(rename = "processResponse")]
    pub process_response: ProcessResponse,
}

/// `processResponse` with the escaped detail document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProcessResponse {
    /// Nested XML document, already unescaped by the first parse
    #[serde(rename = "return", default)]
    pub return_data: String,

    /// Echo of the request as seen by the gateway
    #[serde(default)]
    pub original: String,
}

impl ResponseEnvelope {
    /// Content of the `return` field.
    pub fn return_data(&self) -> &str {
        &self.body.process_response.return_data
    }

    /// Content of the `original` field.
    pub fn original(&self) -> &str {
        &self.body.process_response.original
    }
}

/// Business result carried inside `return`, stage two.
///
/// Codes are opaque provider strings and are passed through untouched.
/// Leading and trailing whitespace of every field is trimmed by the parser;
/// whitespace inside the text is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    /// Provider error code ("0" on success)
    pub error_code: String,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Transaction ID
    #[serde(default)]
    pub trans_id: String,
    /// Account balance after the operation
    #[serde(default)]
    pub balance: String,
    /// Response code of the upstream mobile-money platform
    #[serde(default)]
    pub org_response_code: String,
}

/// Parse the outer response envelope. The root must be `Envelope`.
pub fn decode_response(bytes: &[u8]) -> DecodeResult<ResponseEnvelope> {
    match first_element(bytes).map_err(DecodeError::Envelope)? {
        Some(name) if name == ENVELOPE_ROOT => {}
        other => {
            return Err(DecodeError::Envelope(DeError::Custom(format!(
                "expected root element `{}`, found `{}`",
                ENVELOPE_ROOT,
                other.as_deref().unwrap_or("<none>")
            ))))
        }
    }

    quick_xml::de::from_reader(bytes).map_err(DecodeError::Envelope)
}

/// Parse the nested detail document taken from `return`.
///
/// Accepts an optional XML declaration and either a bare sequence of detail
/// elements or a single enclosing element.
pub fn decode_detail(inner: &str) -> DecodeResult<DetailResponse> {
    let body = strip_declaration(inner.trim());

    let document = match first_element(body.as_bytes()).map_err(DecodeError::InnerDetail)? {
        Some(name) if !DETAIL_FIELDS.contains(&name.as_str()) => Cow::Borrowed(body),
        _ => Cow::Owned(format!("<{DETAIL_ROOT}>{body}</{DETAIL_ROOT}>")),
    };

    quick_xml::de::from_str(&document).map_err(DecodeError::InnerDetail)
}

/// Run both stages on a raw HTTP response body.
pub fn unwrap_response(bytes: &[u8]) -> DecodeResult<DetailResponse> {
    let envelope = decode_response(bytes)?;

    let inner = envelope.return_data().trim();
    if inner.is_empty() {
        return Err(DecodeError::EmptyReturn);
    }

    decode_detail(inner)
}

fn strip_declaration(xml: &str) -> &str {
    if xml.starts_with("<?xml") {
        if let Some(end) = xml.find("?>") {
            return xml[end + 2..].trim_start();
        }
    }
    xml
}

/// Local name of the first element in `xml`, if any.
fn first_element(xml: &[u8]) -> Result<Option<String>, DeError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(DeError::from)? {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                return Ok(Some(name));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
