//! HTTP request types for the Fitbit API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. Requests
//! carry an absolute URL (path and query string included), headers, and for
//! POST an optional URL-encoded form.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Fitbit API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources.
    Get,
    /// HTTP POST method for creating resources, with a form body.
    Post,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request travelling through the transport stack.
///
/// Transports may add headers (authorization, user agent) before handing the
/// request to the next layer.
///
/// # Example
///
/// ```rust
/// use fitbit_api::clients::{HttpRequest, HttpMethod};
///
/// let request = HttpRequest::builder(HttpMethod::Post, "https://api.fitbit.com/1/user/-/body/log/weight.json")
///     .form_param("date", "2024-01-01")
///     .form_param("weight", "70.500000")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.form.as_ref().unwrap().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute target URL, including any query string.
    pub url: String,
    /// Headers to send, in insertion order. Later entries with the same
    /// name replace earlier ones.
    pub headers: Vec<(String, String)>,
    /// Form fields for a URL-encoded body.
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Sets a header, replacing any existing header with the same name
    /// (compared case-insensitively).
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Returns the value of a header, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - the URL is not an absolute `http`/`https` URL
    /// - a form is attached to a GET or DELETE request
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(InvalidHttpRequestError::InvalidUrl {
                url: self.url.clone(),
            });
        }

        if self.form.is_some() && self.method != HttpMethod::Post {
            return Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                method,
                url: url.into(),
                headers: Vec::new(),
                form: None,
            },
        }
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.set_header(name, value);
        self
    }

    /// Sets all form fields at once. An empty form is sent as an empty body.
    #[must_use]
    pub fn form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.request.form = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Adds a single form field.
    #[must_use]
    pub fn form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .form
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}
