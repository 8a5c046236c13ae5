//! Token rotation detection around each API call.
//!
//! [`AuthorizingTransport`] wraps the authorized transport stack. For every
//! call it:
//!
//! 1. asks the token source for a token, failing with
//!    [`HttpError::ExpiredToken`] (and sending nothing) if none is available;
//! 2. delegates the call, propagating transport errors unchanged;
//! 3. asks the token source again and, if the access or refresh token
//!    differs from the stored credential, replaces the stored credential
//!    under the store's lock and hands the new credential to the
//!    token-change hook on a background thread.
//!
//! A failure in step 3 is logged and the response is returned regardless.

use std::sync::{Arc, Weak};

use async_trait::async_trait;

use crate::auth::{Credential, TokenSource};
use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;

/// Callback invoked with the new credential whenever it rotates.
///
/// Hooks run on Tokio's blocking thread pool, so they may perform blocking
/// I/O such as writing the credential to a file.
pub type TokenChangeHook = Arc<dyn Fn(Credential) + Send + Sync>;

/// Where the current credential is kept.
///
/// [`Session`](crate::Session) implements this over its state lock.
pub trait CredentialStore: Send + Sync {
    /// Replaces the stored credential with `observed` if their tokens differ.
    ///
    /// Compare and write must happen under one exclusive lock. An empty store
    /// counts as different from any credential. Returns `true` if the
    /// credential was replaced.
    fn replace_if_changed(&self, observed: &Credential) -> bool;

    /// Returns the hook to notify after a replacement, if any.
    fn token_change_hook(&self) -> Option<TokenChangeHook>;
}

/// Transport layer that detects and reports credential rotation.
pub struct AuthorizingTransport {
    source: Arc<dyn TokenSource>,
    base: Arc<dyn Transport>,
    store: Weak<dyn CredentialStore>,
}

impl AuthorizingTransport {
    /// Creates the layer.
    ///
    /// `base` is expected to authorize requests with tokens from the same
    /// `source`. The store is held weakly; once it is dropped, rotations are
    /// no longer recorded.
    #[must_use]
    pub fn new(
        source: Arc<dyn TokenSource>,
        base: Arc<dyn Transport>,
        store: Weak<dyn CredentialStore>,
    ) -> Self {
        Self {
            source,
            base,
            store,
        }
    }

    fn record(&self, observed: Credential) {
        let Some(store) = self.store.upgrade() else {
            return;
        };

        if !store.replace_if_changed(&observed) {
            return;
        }

        tracing::debug!("Credential rotated during request (expiry: {:?})", observed.expiry);

        if let Some(hook) = store.token_change_hook() {
            // Detached: the call never waits on, or observes, the hook
            drop(tokio::task::spawn_blocking(move || hook(observed)));
        }
    }
}

impl std::fmt::Debug for AuthorizingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizingTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for AuthorizingTransport {
    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        if let Err(e) = self.source.token().await {
            tracing::debug!("No valid token before request: {e}");
            return Err(HttpError::ExpiredToken);
        }

        let response = self.base.round_trip(request).await?;

        match self.source.token().await {
            Ok(observed) => self.record(observed),
            Err(e) => {
                tracing::warn!("Could not read token after request, credential not updated: {e}");
            }
        }

        Ok(response)
    }
}
