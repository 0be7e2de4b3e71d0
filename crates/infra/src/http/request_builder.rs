//! Outbound request construction
//!
//! Turns an [`OperationRequest`] plus the current credential into a
//! [`PreparedRequest`] the transport can send as-is. This is the only place
//! that decides body encoding and whether a bearer header is attached.

use paylink_domain::{
    ApiError, Credential, Encoding, HttpMethod, OperationRequest, OperationResult, PayLinkError,
    Payload,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Encoded request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Form(String),
    /// Text parts; the transport picks the boundary and content type.
    Multipart(Vec<(String, String)>),
}

/// A fully-built request, ready for one send
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: Url,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// Builds requests against one API base URL
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
}

impl RequestBuilder {
    /// # Errors
    /// Returns `PayLinkError::Config` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, PayLinkError> {
        Url::parse(base_url)
            .map_err(|e| PayLinkError::Config(format!("Invalid base URL '{base_url}': {e}")))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the wire request for `op`.
    ///
    /// # Errors
    /// - `AuthRequired` when `op.requires_auth` and `credential` is `None`
    /// - `Validation` when the endpoint does not form a valid URL or the
    ///   credential cannot be carried in a header
    pub fn build(
        &self,
        op: &OperationRequest,
        credential: Option<&Credential>,
    ) -> OperationResult<PreparedRequest> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

        if op.requires_auth {
            let credential = credential.ok_or_else(ApiError::not_authenticated)?;
            let mut value = HeaderValue::from_str(&credential.bearer())
                .map_err(|_| ApiError::validation("credential is not a valid header value"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let body = if op.method == HttpMethod::Get {
            RequestBody::Empty
        } else {
            encode_body(&op.payload, op.encoding)?
        };

        match &body {
            RequestBody::Json(_) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            }
            RequestBody::Form(_) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            }
            RequestBody::Empty | RequestBody::Multipart(_) => {}
        }

        Ok(PreparedRequest {
            url: self.url_for(&op.endpoint, &op.query)?,
            method: method_for(op.method),
            headers,
            body,
        })
    }

    fn url_for(&self, endpoint: &str, query: &[(String, String)]) -> OperationResult<Url> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| ApiError::validation(format!("invalid endpoint '{endpoint}': {e}")))?;

        if !query.is_empty() {
            url.set_query(Some(&encode_pairs(query.iter().map(|(k, v)| (k.as_str(), v.clone())))));
        }
        Ok(url)
    }
}

const fn method_for(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

fn encode_body(payload: &Payload, encoding: Encoding) -> OperationResult<RequestBody> {
    match encoding {
        Encoding::Json => serde_json::to_string(payload)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::validation(format!("payload is not serializable: {e}"))),
        Encoding::FormUrlencoded => Ok(RequestBody::Form(encode_pairs(
            payload.iter().map(|(k, v)| (k.as_str(), field_text(v))),
        ))),
        Encoding::Multipart => Ok(RequestBody::Multipart(
            payload.iter().map(|(k, v)| (k.clone(), field_text(v))).collect(),
        )),
    }
}

/// `k=v` pairs joined with `&`, both sides percent-encoded.
fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, String)>) -> String {
    pairs
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Text form of a payload value for form and multipart bodies.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
