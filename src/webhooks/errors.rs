//! Error types for the subscriber endpoint.
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::webhooks::WebhookError;
//!
//! let error = WebhookError::InvalidSignature;
//! assert_eq!(error.to_string(), "Notification signature verification failed");
//! ```

use thiserror::Error;

/// Error type for subscriber verification and notification handling.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `verify` code sent by the provider did not match the configured
    /// code.
    ///
    /// The subscriber endpoint must answer this with `404 Not Found`.
    #[error("Subscriber verification code does not match")]
    InvalidVerificationCode,

    /// The `X-Fitbit-Signature` header does not match the request body.
    ///
    /// The message is generic so it leaks nothing about the expected value.
    /// Notifications failing this check should be dropped and answered with
    /// `404 Not Found`.
    #[error("Notification signature verification failed")]
    InvalidSignature,

    /// The body is not a JSON array of notifications.
    #[error("Invalid notification payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    /// The status code the subscriber endpoint should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidVerificationCode | Self::InvalidSignature => 404,
            Self::InvalidPayload(_) => 400,
        }
    }
}

// Verify WebhookError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};
