//! The session facade: configuration, credential and request primitives.
//!
//! A [`Session`] is constructed explicitly and passed to whoever needs it.
//! It holds no process-wide state, so several sessions (one per user, for
//! example) can coexist in one process.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::{FitbitConfig, Session};
//! use std::sync::Arc;
//!
//! let session = Arc::new(Session::new(config));
//!
//! // Persist rotated credentials
//! session.on_token_change(|credential| {
//!     let json = serde_json::to_string(&credential).unwrap_or_default();
//!     let _ = std::fs::write("token.json", json);
//! });
//!
//! // Either run the authorization flow ...
//! let url = session.login_url("csrf-token");
//! // ... redirect, then on the callback:
//! session.exchange(&code).await?;
//!
//! // ... or resume from storage
//! session.set_token(restored_credential);
//!
//! let response = session.get("https://api.fitbit.com/1/user/-/profile.json").await?;
//! println!("{}", response.body_text());
//! println!("{:?}", session.rate_limit());
//! ```

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::auth::oauth::{self, BeginAuthResult, OAuthError, TokenEndpoint};
use crate::auth::{Credential, RefreshingTokenSource, TokenSource};
use crate::clients::{
    AuthorizingTransport, BearerTransport, CredentialStore, HttpError, HttpMethod, HttpRequest,
    HttpResponse, RateLimit, RateLimitTracker, ReqwestTransport, TokenChangeHook, Transport,
};
use crate::config::FitbitConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An authenticated connection to the Fitbit Web API for one user.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`. Share it behind an `Arc`; every method takes
/// `&self`. The credential and the authorized client are guarded by one
/// lock, which is never held across a network call.
pub struct Session {
    config: FitbitConfig,
    shared: Arc<Shared>,
    rate_limit: RateLimitTracker,
    base: Arc<dyn Transport>,
    endpoint: TokenEndpoint,
}

/// State shared with the authorizing transport through a weak reference.
struct Shared {
    state: Mutex<State>,
    hook: RwLock<Option<TokenChangeHook>>,
}

#[derive(Default)]
struct State {
    credential: Option<Credential>,
    client: Option<Arc<AuthorizingTransport>>,
}

impl CredentialStore for Shared {
    fn replace_if_changed(&self, observed: &Credential) -> bool {
        let mut state = self.state.lock();
        if state
            .credential
            .as_ref()
            .is_some_and(|current| current.same_tokens(observed))
        {
            return false;
        }
        state.credential = Some(observed.clone());
        true
    }

    fn token_change_hook(&self) -> Option<TokenChangeHook> {
        self.hook.read().clone()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

impl Session {
    /// Creates a session with no credential.
    ///
    /// The network layer is `reqwest` with rustls; the token endpoint shares
    /// its connection pool.
    #[must_use]
    pub fn new(config: FitbitConfig) -> Self {
        let transport = ReqwestTransport::new();
        let endpoint = TokenEndpoint::with_client(&config, transport.client().clone());
        Self::build(config, Arc::new(transport), endpoint)
    }

    /// Creates a session whose API requests go through `transport`.
    ///
    /// The token endpoint still uses its own `reqwest` client.
    #[must_use]
    pub fn with_transport(config: FitbitConfig, transport: Arc<dyn Transport>) -> Self {
        let endpoint = TokenEndpoint::new(&config);
        Self::build(config, transport, endpoint)
    }

    fn build(config: FitbitConfig, base: Arc<dyn Transport>, endpoint: TokenEndpoint) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                hook: RwLock::new(None),
            }),
            rate_limit: RateLimitTracker::new(),
            base,
            endpoint,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &FitbitConfig {
        &self.config
    }

    /// Returns the authorization URL with `csrf` embedded as `state`.
    ///
    /// The URL requests offline access so a refresh token is issued.
    #[must_use]
    pub fn login_url(&self, csrf: &str) -> String {
        oauth::login_url(&self.config, csrf, None)
    }

    /// Starts the authorization flow with a generated state and, optionally,
    /// a PKCE challenge.
    #[must_use]
    pub fn begin_auth(&self, use_pkce: bool) -> BeginAuthResult {
        oauth::begin_auth(&self.config, use_pkce)
    }

    /// Trades an authorization code for a credential, installs it and
    /// returns a copy.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenExchangeFailed`] carrying the provider's
    /// error. Any existing credential is left untouched.
    pub async fn exchange(&self, code: &str) -> Result<Credential, OAuthError> {
        self.exchange_with_verifier(code, None).await
    }

    /// Like [`exchange`](Self::exchange), sending the PKCE code verifier.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenExchangeFailed`] carrying the provider's
    /// error. Any existing credential is left untouched.
    pub async fn exchange_with_verifier(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<Credential, OAuthError> {
        let credential = self.endpoint.exchange_code(code, code_verifier).await?;
        self.set_token(credential.clone());
        Ok(credential)
    }

    /// Installs a credential, for example one restored from storage, and
    /// rebuilds the authorized client around it.
    pub fn set_token(&self, credential: Credential) {
        let mut state = self.shared.state.lock();
        state.client = Some(self.build_client(Some(credential.clone())));
        state.credential = Some(credential);
        tracing::debug!("Installed credential and rebuilt authorized client");
    }

    /// Returns a copy of the current credential.
    #[must_use]
    pub fn token(&self) -> Option<Credential> {
        self.shared.state.lock().credential.clone()
    }

    /// Registers the hook called with the new credential whenever it rotates.
    ///
    /// Replaces any previously registered hook. The hook runs on a
    /// background thread; requests never wait for it.
    pub fn on_token_change<F>(&self, hook: F)
    where
        F: Fn(Credential) + Send + Sync + 'static,
    {
        *self.shared.hook.write() = Some(Arc::new(hook));
    }

    /// Runs the token-change hook with the current credential, on the
    /// calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenChangeHookMissing`] if no hook is
    /// registered, or [`OAuthError::MissingCredential`] if there is no
    /// credential.
    pub fn save_token(&self) -> Result<(), OAuthError> {
        let hook = self
            .shared
            .token_change_hook()
            .ok_or(OAuthError::TokenChangeHookMissing)?;
        let credential = self.token().ok_or(OAuthError::MissingCredential)?;
        hook(credential);
        Ok(())
    }

    /// Returns the rate limit reported by the most recent responses.
    #[must_use]
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit.snapshot()
    }

    /// Issues an authorized GET request.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.send(self.request_builder(HttpMethod::Get, url).build()?)
            .await
    }

    /// Issues an authorized POST request with a URL-encoded form body.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn post<I, K, V>(&self, url: &str, form: I) -> Result<HttpResponse, HttpError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = self
            .request_builder(HttpMethod::Post, url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .form(form)
            .build()?;
        self.send(request).await
    }

    /// Issues an authorized DELETE request.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn delete(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.send(self.request_builder(HttpMethod::Delete, url).build()?)
            .await
    }

    /// Sends a request through the authorized client and records the rate
    /// limit headers of the response.
    ///
    /// The client is built on first use if no credential was installed yet;
    /// such requests fail with [`HttpError::ExpiredToken`] without touching
    /// the network. The response status is not inspected.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ExpiredToken`] if no valid token can be obtained,
    /// or the transport error unchanged.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let client = self.client();
        let response = client.round_trip(request).await?;
        self.rate_limit.update(&response);
        Ok(response)
    }

    fn request_builder(&self, method: HttpMethod, url: &str) -> crate::clients::HttpRequestBuilder {
        let locale = self.config.locale().as_str();
        HttpRequest::builder(method, url)
            .header("User-Agent", self.config.user_agent())
            .header("Accept-Language", locale)
            .header("Accept-Locale", locale)
    }

    fn client(&self) -> Arc<AuthorizingTransport> {
        let mut state = self.shared.state.lock();
        if let Some(client) = &state.client {
            return Arc::clone(client);
        }
        let client = self.build_client(state.credential.clone());
        state.client = Some(Arc::clone(&client));
        client
    }

    fn build_client(&self, credential: Option<Credential>) -> Arc<AuthorizingTransport> {
        let source: Arc<dyn TokenSource> =
            Arc::new(RefreshingTokenSource::new(self.endpoint.clone(), credential));
        let bearer = BearerTransport::new(Arc::clone(&source), Arc::clone(&self.base));
        let store: Weak<dyn CredentialStore> = Arc::downgrade(&self.shared) as Weak<dyn CredentialStore>;
        Arc::new(AuthorizingTransport::new(source, Arc::new(bearer), store))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("credential", &self.token())
            .field("rate_limit", &self.rate_limit())
            .finish_non_exhaustive()
    }
}
