//! HTTP-specific error types for the Fitbit API client.
//!
//! This module contains error types for the transport stack: request
//! validation, token acquisition and network failures.
//!
//! # Error Handling
//!
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport errors
//!
//! HTTP error statuses (4xx/5xx) are **not** errors at this layer. The
//! request primitives return every response with its status, headers and
//! body; callers inspect the status themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::HttpError;
//!
//! match session.get(&url).await {
//!     Ok(response) if response.is_ok() => println!("{}", response.body_text()),
//!     Ok(response) => println!("Provider returned {}", response.code),
//!     Err(HttpError::ExpiredToken) => {
//!         // Send the user through the authorization flow again
//!     }
//!     Err(HttpError::Token(e)) => println!("Token error: {e}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use crate::auth::oauth::OAuthError;
use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use fitbit_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::UnexpectedBody {
///     method: "get".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot send a form body with get.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A form body was attached to a method that does not carry one.
    #[error("Cannot send a form body with {method}.")]
    UnexpectedBody {
        /// The HTTP method of the request.
        method: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("Invalid value for header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The target URL is not an absolute `http` or `https` URL.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },
}

/// Unified error type for all transport errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The token source could not produce a valid token before the call.
    ///
    /// The request was not sent. The user has to authorize the application
    /// again (or a fresh credential has to be installed with
    /// [`Session::set_token`](crate::Session::set_token)).
    #[error("expired token")]
    ExpiredToken,

    /// The token source failed while the request was being authorized.
    #[error(transparent)]
    Token(#[from] OAuthError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<InvalidHttpRequestError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_token_message() {
        assert_eq!(HttpError::ExpiredToken.to_string(), "expired token");
    }

    #[test]
    fn test_invalid_url_message() {
        let error = InvalidHttpRequestError::InvalidUrl {
            url: "/1/user/-/profile.json".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request URL '/1/user/-/profile.json'."
        );
    }

    #[test]
    fn test_oauth_error_converts_transparently() {
        let error: HttpError = OAuthError::MissingRefreshToken.into();
        assert!(matches!(error, HttpError::Token(_)));
        assert_eq!(
            error.to_string(),
            OAuthError::MissingRefreshToken.to_string()
        );
    }

    #[test]
    fn test_invalid_request_converts() {
        let error: HttpError = InvalidHttpRequestError::UnexpectedBody {
            method: "delete".to_string(),
        }
        .into();
        assert!(matches!(error, HttpError::InvalidRequest(_)));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &HttpError::ExpiredToken;
        assert!(error.source().is_none());
    }
}
