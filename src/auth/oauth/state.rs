//! Anti-forgery state for the authorization redirect.
//!
//! The value generated here is embedded as the `state` query parameter of the
//! login URL and must come back unchanged on the redirect to the callback.
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::auth::oauth::StateParam;
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 15);
//!
//! // On the callback
//! let received = state.as_ref().to_string();
//! assert!(state.verify(&received).is_ok());
//! assert!(state.verify("forged").is_err());
//! ```

use super::OAuthError;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;
use subtle::ConstantTimeEq;

/// An OAuth `state` value used for CSRF protection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    const NONCE_LENGTH: usize = 15;

    /// Creates a state from 15 random alphanumeric characters drawn from the
    /// thread-local CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();

        Self { value }
    }

    /// Wraps a caller-supplied anti-forgery token as-is.
    ///
    /// Use this when the host application already manages its own CSRF
    /// tokens and only needs them embedded in the login URL.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Checks the `state` received on the callback against this one.
    ///
    /// The comparison runs in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::StateMismatch`] if the values differ.
    pub fn verify(&self, received: &str) -> Result<(), OAuthError> {
        let equal: bool = self.value.as_bytes().ct_eq(received.as_bytes()).into();
        if equal {
            Ok(())
        } else {
            Err(OAuthError::StateMismatch {
                expected: self.value.clone(),
                received: received.to_string(),
            })
        }
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_15_char_alphanumeric_value() {
        let state = StateParam::new();
        assert_eq!(state.as_ref().len(), 15);
        assert!(state.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_new_generates_unique_values() {
        assert_ne!(StateParam::new(), StateParam::new());
    }

    #[test]
    fn test_from_raw_keeps_value() {
        let state = StateParam::from_raw("csrf-token-123");
        assert_eq!(state.as_ref(), "csrf-token-123");
        assert_eq!(state.to_string(), "csrf-token-123");
    }

    #[test]
    fn test_verify_accepts_matching_state() {
        let state = StateParam::from_raw("abc");
        assert!(state.verify("abc").is_ok());
    }

    #[test]
    fn test_verify_rejects_mismatch() {
        let state = StateParam::from_raw("abc");

        let result = state.verify("abd");
        assert!(matches!(
            result,
            Err(OAuthError::StateMismatch { expected, received })
                if expected == "abc" && received == "abd"
        ));

        // Length differences are mismatches too
        assert!(state.verify("abcd").is_err());
        assert!(state.verify("").is_err());
    }
}
