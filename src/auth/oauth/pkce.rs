//! Proof Key for Code Exchange (RFC 7636) support.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// The only challenge method the provider accepts.
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// A PKCE verifier and its S256 challenge.
///
/// The challenge goes into the login URL; the verifier is kept by the
/// application and sent with the authorization code exchange.
///
/// # Example
///
/// ```rust
/// use fitbit_api::auth::oauth::PkceChallenge;
///
/// let pkce = PkceChallenge::new();
/// assert_eq!(pkce.verifier().len(), 43);
/// assert_eq!(PkceChallenge::challenge_for(pkce.verifier()), pkce.challenge());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PkceChallenge {
    verifier: String,
    challenge: String,
}

impl PkceChallenge {
    /// Generates a random 43-character verifier and derives its challenge.
    #[must_use]
    pub fn new() -> Self {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();
        Self::from_verifier(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    /// Derives the challenge for a known verifier.
    #[must_use]
    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = Self::challenge_for(&verifier);
        Self {
            verifier,
            challenge,
        }
    }

    /// Computes `BASE64URL(SHA256(verifier))`.
    #[must_use]
    pub fn challenge_for(verifier: &str) -> String {
        URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
    }

    /// Returns the code verifier.
    #[must_use]
    pub fn verifier(&self) -> &str {
        &self.verifier
    }

    /// Returns the S256 code challenge.
    #[must_use]
    pub fn challenge(&self) -> &str {
        &self.challenge
    }
}

impl Default for PkceChallenge {
    fn default() -> Self {
        Self::new()
    }
}
