//! Configuration types for the Fitbit API client.
//!
//! This module provides the core configuration types used to set up a
//! [`Session`](crate::Session).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`FitbitConfig`]: The configuration struct holding all client settings
//! - [`FitbitConfigBuilder`]: A builder for constructing [`FitbitConfig`] instances
//! - [`ClientId`]: A validated OAuth 2.0 client ID
//! - [`ClientSecret`]: A validated client secret with masked debug output
//! - [`RedirectUrl`]: A validated OAuth redirect URL
//! - [`Locale`]: The locale sent with every API request
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::{FitbitConfig, ClientId, ClientSecret, RedirectUrl, Locale};
//!
//! let config = FitbitConfig::builder()
//!     .client_id(ClientId::new("23ABCD").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .redirect_url(RedirectUrl::new("https://myapp.example.com/callback").unwrap())
//!     .scopes("activity sleep weight".parse().unwrap())
//!     .locale("en_US")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.locale(), Locale::EnUs);
//! ```

mod locale;
mod newtypes;

pub use locale::Locale;
pub use newtypes::{ClientId, ClientSecret, RedirectUrl};

use crate::auth::Scopes;
use crate::error::ConfigError;

/// The provider's authorization endpoint (browser redirect target).
pub const AUTHORIZE_URL: &str = "https://www.fitbit.com/oauth2/authorize";

/// The provider's token endpoint (code and refresh-token exchanges).
pub const TOKEN_URL: &str = "https://api.fitbit.com/oauth2/token";

/// The host all resource requests are sent to.
pub const API_BASE_URL: &str = "https://api.fitbit.com";

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for a Fitbit API session.
///
/// # Thread Safety
///
/// `FitbitConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks. It is immutable once built.
///
/// # Endpoints
///
/// The authorize, token, and API endpoints default to the provider's
/// well-known URLs ([`AUTHORIZE_URL`], [`TOKEN_URL`], [`API_BASE_URL`]).
/// They can be overridden to point at a local stub server in tests.
#[derive(Clone, Debug)]
pub struct FitbitConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    scopes: Scopes,
    locale: Locale,
    user_agent: String,
    authorize_url: String,
    token_url: String,
    api_base_url: String,
}

impl FitbitConfig {
    /// Creates a new builder for constructing a `FitbitConfig`.
    #[must_use]
    pub fn builder() -> FitbitConfigBuilder {
        FitbitConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the redirect URL.
    #[must_use]
    pub const fn redirect_url(&self) -> &RedirectUrl {
        &self.redirect_url
    }

    /// Returns the requested permission scopes.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the locale used for `Accept-Language` and `Accept-Locale`.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the authorization endpoint URL.
    #[must_use]
    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    /// Returns the token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the resource API base URL, without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

// Verify FitbitConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FitbitConfig>();
};

/// Builder for constructing [`FitbitConfig`] instances.
///
/// Required fields are `client_id`, `client_secret` and `redirect_url`.
///
/// # Defaults
///
/// - `scopes`: Empty
/// - `locale`: `de_DE`
/// - `user_agent`: `fitbit-api-rust/<version>`
/// - endpoints: the provider's well-known URLs
#[derive(Debug, Default)]
pub struct FitbitConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    redirect_url: Option<RedirectUrl>,
    scopes: Option<Scopes>,
    locale: Option<Locale>,
    user_agent: Option<String>,
    authorize_url: Option<String>,
    token_url: Option<String>,
    api_base_url: Option<String>,
}

impl FitbitConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the redirect URL (required).
    #[must_use]
    pub fn redirect_url(mut self, url: RedirectUrl) -> Self {
        self.redirect_url = Some(url);
        self
    }

    /// Sets the permission scopes to request.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the locale from a tag such as `"en_US"`.
    ///
    /// Tags outside the supported set are replaced by the default locale
    /// rather than rejected.
    #[must_use]
    pub fn locale(mut self, tag: impl AsRef<str>) -> Self {
        self.locale = Some(Locale::resolve(tag.as_ref()));
        self
    }

    /// Sets an already-validated locale.
    #[must_use]
    pub const fn locale_value(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Overrides the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Overrides the authorization endpoint.
    #[must_use]
    pub fn authorize_url(mut self, url: impl Into<String>) -> Self {
        self.authorize_url = Some(url.into());
        self
    }

    /// Overrides the token endpoint.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Overrides the resource API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Builds the [`FitbitConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id`,
    /// `client_secret` or `redirect_url` are not set.
    pub fn build(self) -> Result<FitbitConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let redirect_url = self
            .redirect_url
            .ok_or(ConfigError::MissingRequiredField {
                field: "redirect_url",
            })?;

        let api_base_url = self
            .api_base_url
            .map_or_else(|| API_BASE_URL.to_string(), |url| {
                url.trim_end_matches('/').to_string()
            });

        Ok(FitbitConfig {
            client_id,
            client_secret,
            redirect_url,
            scopes: self.scopes.unwrap_or_default(),
            locale: self.locale.unwrap_or_default(),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("fitbit-api-rust/{SDK_VERSION}")),
            authorize_url: self
                .authorize_url
                .unwrap_or_else(|| AUTHORIZE_URL.to_string()),
            token_url: self.token_url.unwrap_or_else(|| TOKEN_URL.to_string()),
            api_base_url,
        })
    }
}
