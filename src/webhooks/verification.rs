//! Subscriber endpoint verification and notification signatures.
//!
//! The provider talks to the subscriber endpoint in two ways:
//!
//! - **Verification**: when a subscriber is configured, the provider sends
//!   `GET <endpoint>?verify=<code>` twice, once with the correct code and
//!   once with a wrong one. The endpoint answers `204 No Content` for the
//!   correct code and `404 Not Found` otherwise.
//! - **Notifications**: `POST <endpoint>` with a JSON array body, signed in
//!   the `X-Fitbit-Signature` header with HMAC-SHA1 keyed by the client
//!   secret followed by `&`.
//!
//! All comparisons are constant time.
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::webhooks::{sign_body, verify_signature, verify_subscriber_code};
//!
//! assert!(verify_subscriber_code("abc123", "abc123").is_ok());
//! assert!(verify_subscriber_code("abc123", "wrong").is_err());
//!
//! let body = br#"[{"collectionType":"body","date":"2024-01-01","ownerId":"ABC123","ownerType":"user","subscriptionId":"320"}]"#;
//! let signature = sign_body(body, "secret");
//! assert!(verify_signature(body, &signature, "secret").is_ok());
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

use crate::config::FitbitConfig;
use crate::webhooks::notification::{parse_notifications, Notification};
use crate::webhooks::WebhookError;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the notification signature.
pub const SIGNATURE_HEADER: &str = "X-Fitbit-Signature";

/// Query parameter carrying the verification code.
pub const VERIFY_QUERY_PARAM: &str = "verify";

/// Checks the `verify` code of a subscriber verification request.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidVerificationCode`] on mismatch.
pub fn verify_subscriber_code(expected: &str, received: &str) -> Result<(), WebhookError> {
    if bool::from(expected.as_bytes().ct_eq(received.as_bytes())) {
        Ok(())
    } else {
        Err(WebhookError::InvalidVerificationCode)
    }
}

/// Computes the base64 `X-Fitbit-Signature` value for a body.
#[must_use]
pub fn sign_body(body: &[u8], client_secret: &str) -> String {
    let key = format!("{client_secret}&");
    // HMAC accepts keys of any length, so this cannot fail
    let Ok(mut mac) = HmacSha1::new_from_slice(key.as_bytes()) else {
        return String::new();
    };
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Checks the `X-Fitbit-Signature` header of a notification.
///
/// `body` must be the raw request body exactly as received.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSignature`] on mismatch.
pub fn verify_signature(
    body: &[u8],
    signature: &str,
    client_secret: &str,
) -> Result<(), WebhookError> {
    let computed = sign_body(body, client_secret);
    if !computed.is_empty() && bool::from(computed.as_bytes().ct_eq(signature.trim().as_bytes())) {
        Ok(())
    } else {
        Err(WebhookError::InvalidSignature)
    }
}

/// Verifies a notification with the configured client secret and parses it.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSignature`] if the signature does not
/// match, or [`WebhookError::InvalidPayload`] if the body is not a
/// notification array.
pub fn verify_notification(
    config: &FitbitConfig,
    body: &[u8],
    signature: &str,
) -> Result<Vec<Notification>, WebhookError> {
    if let Err(e) = verify_signature(body, signature, config.client_secret().as_ref()) {
        tracing::debug!("Dropping notification with invalid signature");
        return Err(e);
    }
    parse_notifications(body)
}
