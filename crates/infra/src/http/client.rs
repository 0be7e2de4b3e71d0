use std::time::Duration;

use async_trait::async_trait;
use paylink_domain::{ApiError, OperationResult, PayLinkError};
use reqwest::multipart::Form;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use super::request_builder::{PreparedRequest, RequestBody};
use crate::errors::InfraError;

/// Status and body text of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one prepared request and reads the whole response.
///
/// Any received response is `Ok`, whatever its status. `Err` means no
/// response was obtained and always carries `ErrorKind::Transport`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> OperationResult<RawResponse>;
}

/// reqwest-backed transport. Each request is attempted exactly once.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, PayLinkError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    pub async fn send(&self, builder: RequestBuilder) -> OperationResult<Response> {
        let request = builder.build().map_err(|err| ApiError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn execute(&self, request: PreparedRequest) -> OperationResult<RawResponse> {
        let PreparedRequest { url, method, headers, body } = request;
        let mut builder = self.request(method, url).headers(headers);

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) | RequestBody::Form(text) => builder.body(text),
            RequestBody::Multipart(parts) => builder.multipart(
                parts.into_iter().fold(Form::new(), |form, (name, value)| form.text(name, value)),
            ),
        };

        let response = self.send(builder).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| ApiError::from(InfraError::from(err)))?;

        Ok(RawResponse { status, body })
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl HttpClientBuilder {
    /// Whole-request timeout. Without one, requests wait indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, PayLinkError> {
        let mut builder = ReqwestClient::builder().no_proxy();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| PayLinkError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use paylink_domain::ErrorKind;
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
    use url::Url;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn prepared(server: &MockServer, method: Method, route: &str, body: RequestBody) -> PreparedRequest {
        PreparedRequest {
            url: Url::parse(&format!("{}{}", server.uri(), route)).unwrap(),
            method,
            headers: HeaderMap::new(),
            body,
        }
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let response = client
            .execute(prepared(&server, Method::GET, "/balance", RequestBody::Empty))
            .await
            .expect("response");

        assert_eq!(response, RawResponse { status: 503, body: "maintenance".into() });
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sends_encoded_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(body_string(r#"{"amount":10,"to":"bob"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"message":"ok"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let body = RequestBody::Json(r#"{"amount":10,"to":"bob"}"#.into());
        let response = client.execute(prepared(&server, Method::POST, "/send", body)).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"message":"ok"}"#);
    }

    #[tokio::test]
    async fn multipart_parts_get_a_boundary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = HttpClient::new().expect("http client");
        let body = RequestBody::Multipart(vec![("username".into(), "alice".into())]);
        client.execute(prepared(&server, Method::POST, "/signup", body)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get(CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        assert!(String::from_utf8_lossy(&requests[0].body).contains("alice"));
    }

    #[tokio::test]
    async fn applies_user_agent_and_default_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "paylink-test"))
            .and(header("x-client", "cli"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-client", HeaderValue::from_static("cli"));
        let client = HttpClient::builder()
            .user_agent("paylink-test")
            .default_headers(headers)
            .build()
            .expect("http client");

        let response =
            client.execute(prepared(&server, Method::GET, "/", RequestBody::Empty)).await.unwrap();
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn timeout_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client =
            HttpClient::builder().timeout(Duration::from_millis(100)).build().expect("http client");
        let err = client
            .execute(prepared(&server, Method::GET, "/slow", RequestBody::Empty))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Transport);
        assert_eq!(err.status_code, None);
        assert!(err.message.contains("timed out"), "unexpected message: {}", err.message);
    }
}
