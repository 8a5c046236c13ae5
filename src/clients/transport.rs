//! The layered transport abstraction requests travel through.
//!
//! A [`Transport`] performs one HTTP round trip. Layers wrap each other:
//!
//! ```text
//! AuthorizingTransport   detect and report token rotation
//!   └─ BearerTransport   attach "Authorization: Bearer <token>"
//!        └─ ReqwestTransport   network I/O
//! ```
//!
//! Tests replace any layer with a double.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::TokenSource;
use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;

/// Performs a single HTTP round trip.
///
/// Implementations never inspect the response status: any response that
/// arrives is returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid, cannot be authorized,
    /// or fails at the network level.
    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// The network layer, backed by `reqwest` with rustls.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Returns the underlying `reqwest` client.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn build_headers(
        request: &HttpRequest,
    ) -> Result<reqwest::header::HeaderMap, InvalidHttpRequestError> {
        use reqwest::header::{HeaderName, HeaderValue};

        let mut headers = reqwest::header::HeaderMap::new();
        for (key, value) in &request.headers {
            let invalid = || InvalidHttpRequestError::InvalidHeader { name: key.clone() };
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        if let Some(form) = &request.form {
            req_builder = req_builder.form(form);
        }

        // Replaces rather than appends, so an explicit Content-Type wins over the form's
        req_builder = req_builder.headers(Self::build_headers(&request)?);

        tracing::debug!("Sending {} request to {}", request.method, request.url);
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        Ok(HttpResponse::new(code, headers, body))
    }
}

/// Attaches the current access token to every request.
///
/// The token is obtained from the [`TokenSource`] right before the request is
/// handed to the inner transport, so a refreshing source refreshes here.
pub struct BearerTransport {
    source: Arc<dyn TokenSource>,
    inner: Arc<dyn Transport>,
}

impl BearerTransport {
    /// Wraps `inner`, authorizing requests with tokens from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn TokenSource>, inner: Arc<dyn Transport>) -> Self {
        Self { source, inner }
    }
}

impl std::fmt::Debug for BearerTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for BearerTransport {
    async fn round_trip(&self, mut request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let credential = self.source.token().await?;
        request.set_header("Authorization", credential.authorization_header());
        self.inner.round_trip(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::OAuthError;
    use crate::auth::{Credential, StaticTokenSource};
    use parking_lot::Mutex;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Records every request it receives and answers 200.
    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().push(request);
            Ok(HttpResponse::new(200, HashMap::new(), Vec::new()))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TokenSource for FailingSource {
        async fn token(&self) -> Result<Credential, OAuthError> {
            Err(OAuthError::MissingRefreshToken)
        }
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_form_and_reads_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/user/-/body/log/weight.json"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("date=2024-01-01&weight=70.500000"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Fitbit-Rate-Limit-Limit", "150")
                    .set_body_string("<xml/>"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = HttpRequest::builder(
            HttpMethod::Post,
            format!("{}/1/user/-/body/log/weight.json", server.uri()),
        )
        .form([("date", "2024-01-01"), ("weight", "70.500000")])
        .build()
        .unwrap();

        let response = ReqwestTransport::new().round_trip(request).await.unwrap();

        assert_eq!(response.code, 201);
        assert_eq!(response.header("fitbit-rate-limit-limit"), Some("150"));
        assert_eq!(response.body, b"<xml/>".to_vec());
    }

    #[tokio::test]
    async fn test_reqwest_transport_returns_error_statuses_as_responses() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let request = HttpRequest::builder(HttpMethod::Delete, format!("{}/x.json", server.uri()))
            .build()
            .unwrap();

        let response = ReqwestTransport::new().round_trip(request).await.unwrap();
        assert_eq!(response.code, 404);
        assert_eq!(response.body_text(), "not found");
    }

    #[tokio::test]
    async fn test_reqwest_transport_rejects_invalid_request() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "api.fitbit.com/1/user/-/profile.json".to_string(),
            headers: Vec::new(),
            form: None,
        };

        let result = ReqwestTransport::new().round_trip(request).await;
        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_bearer_transport_attaches_authorization() {
        let inner = Arc::new(RecordingTransport::default());
        let source = Arc::new(StaticTokenSource::new(Credential::new("A", "R", None)));
        let transport = BearerTransport::new(source, inner.clone());

        let request = HttpRequest::builder(HttpMethod::Get, "https://api.fitbit.com/x.json")
            .build()
            .unwrap();
        transport.round_trip(request).await.unwrap();

        let requests = inner.requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("authorization"), Some("Bearer A"));
    }

    #[tokio::test]
    async fn test_bearer_transport_surfaces_token_errors() {
        let inner = Arc::new(RecordingTransport::default());
        let transport = BearerTransport::new(Arc::new(FailingSource), inner.clone());

        let request = HttpRequest::builder(HttpMethod::Get, "https://api.fitbit.com/x.json")
            .build()
            .unwrap();
        let result = transport.round_trip(request).await;

        assert!(matches!(
            result,
            Err(HttpError::Token(OAuthError::MissingRefreshToken))
        ));
        assert!(inner.requests.lock().is_empty());
    }
}
