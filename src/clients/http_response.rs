//! HTTP response types for the Fitbit API client.
//!
//! This module provides the [`HttpResponse`] type returned by every request
//! primitive. The body is kept as raw bytes: most endpoints return JSON, but
//! activity exports are TCX (XML).

use std::borrow::Cow;
use std::collections::HashMap;

/// An HTTP response from the Fitbit API.
///
/// The status code is reported but never acted upon by the transport stack.
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The fully drained response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    ///
    /// Header names are lower-cased so lookups through [`header`](Self::header)
    /// are case-insensitive.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is 2xx.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Consumes the response, returning the raw body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
