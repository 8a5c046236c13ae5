//! OAuth-specific error types for the Fitbit API client.
//!
//! This module contains error types for OAuth operations including state
//! verification, code exchange, token refresh and token-change persistence.
//!
//! # Error Types
//!
//! - [`OAuthError::StateMismatch`]: OAuth state parameter doesn't match expected
//! - [`OAuthError::TokenExchangeFailed`]: Authorization code exchange failed
//! - [`OAuthError::TokenRefreshFailed`]: Refresh token exchange failed
//! - [`OAuthError::MissingCredential`]: No credential has been installed yet
//! - [`OAuthError::MissingRefreshToken`]: Credential expired and cannot be refreshed
//! - [`OAuthError::TokenChangeHookMissing`]: No token-change hook is registered
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::StateMismatch {
//!     expected: "abc123".to_string(),
//!     received: "xyz789".to_string(),
//! };
//! assert!(error.to_string().contains("abc123"));
//! ```

use thiserror::Error;

/// Errors that can occur during OAuth operations.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
///
/// # Example
///
/// ```rust
/// use fitbit_api::auth::oauth::OAuthError;
///
/// fn needs_reauthorization(err: &OAuthError) -> bool {
///     matches!(
///         err,
///         OAuthError::MissingCredential
///             | OAuthError::MissingRefreshToken
///             | OAuthError::TokenRefreshFailed { .. }
///     )
/// }
///
/// assert!(needs_reauthorization(&OAuthError::MissingRefreshToken));
/// ```
#[derive(Debug, Error)]
pub enum OAuthError {
    /// OAuth state parameter mismatch.
    ///
    /// The state parameter in the callback does not match the one generated
    /// for the authorization request.
    #[error("State parameter mismatch: expected '{expected}', received '{received}'")]
    StateMismatch {
        /// The expected state value that was generated.
        expected: String,
        /// The state value received in the callback.
        received: String,
    },

    /// Authorization code exchange failed.
    ///
    /// `message` carries the provider's response body unchanged. A status of
    /// `0` means the request never produced a response.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// Refresh token exchange failed.
    #[error("Token refresh failed with status {status}: {message}")]
    TokenRefreshFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// No credential is available.
    #[error("No credential available; complete the authorization flow or call set_token")]
    MissingCredential,

    /// The access token expired and no refresh token is available.
    #[error("Access token expired and no refresh token is available")]
    MissingRefreshToken,

    /// `save_token` was called without a registered token-change hook.
    #[error("Token change hook is not defined")]
    TokenChangeHookMissing,
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
