//! Error types for resource accessors.
//!
//! Unlike the request primitives, accessors do look at the status code: a
//! non-2xx response is decoded into [`ResourceError::Api`] using the
//! provider's error envelope:
//!
//! ```json
//! {
//!   "errors": [
//!     { "errorType": "validation", "fieldName": "date", "message": "Invalid date" }
//!   ],
//!   "success": false
//! }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse};

/// One entry of the provider's error envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    /// Error category, e.g. `validation`, `expired_token`, `insufficient_scope`.
    #[serde(default)]
    pub error_type: String,
    /// The offending field, if the error concerns one.
    #[serde(default)]
    pub field_name: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

/// Error type for resource accessor operations.
///
/// # Example
///
/// ```rust
/// use fitbit_api::resources::{ApiErrorDetail, ResourceError};
///
/// let error = ResourceError::Api {
///     status: 401,
///     errors: vec![ApiErrorDetail {
///         error_type: "expired_token".to_string(),
///         field_name: None,
///         message: "Access token expired".to_string(),
///     }],
/// };
/// assert!(error.to_string().contains("401"));
/// assert!(error.to_string().contains("expired_token"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request could not be sent or authorized.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// An argument was rejected before any request was made.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },

    /// The provider answered with a non-2xx status.
    #[error("Fitbit API returned status {status}: {}", summarize(.errors))]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The decoded error envelope; empty if the body carried none.
        errors: Vec<ApiErrorDetail>,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ResourceError {
    /// Builds an [`ResourceError::Api`] from a non-2xx response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let errors = serde_json::from_slice::<ErrorEnvelope>(&response.body)
            .map(|envelope| envelope.errors)
            .unwrap_or_default();
        Self::Api {
            status: response.code,
            errors,
        }
    }

    /// Returns `true` if the provider reported an expired or invalid token.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        match self {
            Self::Http(HttpError::ExpiredToken | HttpError::Token(_)) => true,
            Self::Api { errors, .. } => errors
                .iter()
                .any(|e| e.error_type == "expired_token" || e.error_type == "invalid_token"),
            _ => false,
        }
    }
}

fn summarize(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} ({})", e.message, e.error_type))
        .collect::<Vec<_>>()
        .join("; ")
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
