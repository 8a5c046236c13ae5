//! The delegated-authorization credential held by a session.
//!
//! This module provides the [`Credential`] type (access token, refresh token,
//! expiry, token type) and [`TokenResponse`], the JSON body returned by the
//! token endpoint.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens are treated as expired this many seconds before their real expiry,
/// so a request never leaves with a token that dies in flight.
pub const EXPIRY_DELTA_SECS: i64 = 10;

/// Token type used when the provider does not report one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// An OAuth 2.0 access/refresh token pair with its expiry.
///
/// Credentials serialize to a JSON object with `access_token`, `token_type`,
/// `refresh_token` and an RFC 3339 `expiry`, so a host can persist the value
/// handed to its token-change hook and restore it later with
/// [`Session::set_token`](crate::Session::set_token).
///
/// The `Debug` implementation masks both tokens.
///
/// # Example
///
/// ```rust
/// use fitbit_api::Credential;
/// use chrono::{Duration, Utc};
///
/// let credential = Credential::new("access", "refresh", Some(Utc::now() + Duration::hours(8)));
/// assert!(credential.is_valid());
///
/// let json = serde_json::to_string(&credential).unwrap();
/// let restored: Credential = serde_json::from_str(&json).unwrap();
/// assert!(restored.same_tokens(&credential));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token sent with every API request.
    pub access_token: String,

    /// The token type, normally `Bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// The token used to obtain a new access token once this one expires.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,

    /// When the access token expires. `None` means it never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

impl Credential {
    /// Creates a bearer credential.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            refresh_token: refresh_token.into(),
            expiry,
        }
    }

    /// Builds a credential from a token endpoint response received now.
    ///
    /// `expires_in` is converted into an absolute expiry at the time of the
    /// call. A lifetime too large to represent is treated as no expiry.
    #[must_use]
    pub fn from_token_response(response: &TokenResponse) -> Self {
        let expiry = response
            .expires_in
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));

        Self {
            access_token: response.access_token.clone(),
            token_type: response
                .token_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(default_token_type),
            refresh_token: response.refresh_token.clone().unwrap_or_default(),
            expiry,
        }
    }

    /// Returns `true` if the access token has expired, or will within
    /// [`EXPIRY_DELTA_SECS`].
    ///
    /// Credentials without an expiry never expire. An expiry so early that
    /// the delta cannot be subtracted counts as expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| {
            match expiry.checked_sub_signed(Duration::seconds(EXPIRY_DELTA_SECS)) {
                Some(deadline) => deadline < Utc::now(),
                None => true,
            }
        })
    }

    /// Returns `true` if the credential can be used for a request as-is.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }

    /// Returns `true` if a refresh token is available.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Returns `true` if both tokens are identical to `other`'s.
    ///
    /// Expiry and token type are not compared; a rotation always changes at
    /// least one of the two tokens.
    #[must_use]
    pub fn same_tokens(&self, other: &Self) -> bool {
        self.access_token == other.access_token && self.refresh_token == other.refresh_token
    }

    /// Returns the value of the `Authorization` header for this credential.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let token_type = if self.token_type.eq_ignore_ascii_case("bearer") {
            DEFAULT_TOKEN_TYPE
        } else {
            self.token_type.as_str()
        };
        format!("{token_type} {}", self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"*****")
            .field("token_type", &self.token_type)
            .field("refresh_token", &"*****")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// The JSON body returned by the token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// The new access token.
    pub access_token: String,
    /// The new refresh token, if one was issued.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// The token type, normally `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Space-separated scopes the user actually granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// The encoded ID of the user who authorized the application.
    #[serde(default)]
    pub user_id: Option<String>,
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};
