//! Sources of the access token used to authorize requests.
//!
//! A [`TokenSource`] answers "which token should the next request carry?",
//! refreshing it first if needed. Sessions install a
//! [`RefreshingTokenSource`] whenever a credential is set; tests and hosts
//! with externally managed tokens can use [`StaticTokenSource`] or their own
//! implementation.

use super::oauth::{OAuthError, TokenEndpoint};
use super::Credential;
use async_trait::async_trait;

/// Produces the credential a request should be authorized with.
///
/// Implementations may refresh the credential as a side effect of being
/// asked for it. A refresh that changes the access or refresh token is what
/// the session detects as a rotation.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns the currently valid credential.
    ///
    /// # Errors
    ///
    /// Returns an [`OAuthError`] if no valid credential can be produced.
    async fn token(&self) -> Result<Credential, OAuthError>;
}

/// A token source that always returns the same credential.
///
/// The credential is returned even once expired; the provider will reject
/// it and the caller sees the error status.
#[derive(Clone, Debug)]
pub struct StaticTokenSource {
    credential: Credential,
}

impl StaticTokenSource {
    /// Creates a static source around `credential`.
    #[must_use]
    pub const fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> Result<Credential, OAuthError> {
        Ok(self.credential.clone())
    }
}

/// A token source that refreshes its credential through the token endpoint
/// once it expires.
///
/// Concurrent callers are serialized while a refresh is in flight, so an
/// expired credential is refreshed once rather than once per caller.
#[derive(Debug)]
pub struct RefreshingTokenSource {
    endpoint: TokenEndpoint,
    current: tokio::sync::Mutex<Option<Credential>>,
}

impl RefreshingTokenSource {
    /// Creates a source seeded with `credential`.
    #[must_use]
    pub fn new(endpoint: TokenEndpoint, credential: Option<Credential>) -> Self {
        Self {
            endpoint,
            current: tokio::sync::Mutex::new(credential),
        }
    }
}

#[async_trait]
impl TokenSource for RefreshingTokenSource {
    async fn token(&self) -> Result<Credential, OAuthError> {
        let mut current = self.current.lock().await;

        let credential = current.as_ref().ok_or(OAuthError::MissingCredential)?;
        if credential.is_valid() {
            return Ok(credential.clone());
        }
        if !credential.can_refresh() {
            return Err(OAuthError::MissingRefreshToken);
        }

        tracing::debug!("Access token expired, refreshing");
        let refreshed = self.endpoint.refresh(&credential.refresh_token).await?;
        *current = Some(refreshed.clone());
        Ok(refreshed)
    }
}
