//! Authorization URL generation.
//!
//! This module provides [`login_url`] for building the provider's authorize
//! URL from a caller-supplied anti-forgery token, and [`begin_auth`] which
//! also generates that token (and optionally a PKCE pair).
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::{FitbitConfig, ClientId, ClientSecret, RedirectUrl};
//! use fitbit_api::auth::oauth::begin_auth;
//!
//! let config = FitbitConfig::builder()
//!     .client_id(ClientId::new("23ABCD").unwrap())
//!     .client_secret(ClientSecret::new("secret").unwrap())
//!     .redirect_url(RedirectUrl::new("https://myapp.example.com/callback").unwrap())
//!     .scopes("activity sleep".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let result = begin_auth(&config, true);
//!
//! // Store result.state and result.code_verifier in the user's session,
//! // then redirect the user to result.auth_url
//! assert!(result.auth_url.contains("code_challenge_method=S256"));
//! assert!(result.code_verifier.is_some());
//! ```

use super::pkce::{PkceChallenge, CODE_CHALLENGE_METHOD};
use super::state::StateParam;
use crate::config::FitbitConfig;

/// Result of initiating OAuth authorization.
///
/// The `state` (and `code_verifier` when PKCE is used) **must** be stored by
/// the application: the state is checked with [`StateParam::verify`] when the
/// callback arrives, and the verifier is sent with the code exchange.
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// The full authorization URL to redirect the user to.
    pub auth_url: String,

    /// The state parameter generated for this authorization request.
    pub state: StateParam,

    /// The PKCE code verifier, if PKCE was requested.
    pub code_verifier: Option<String>,
}

/// Builds the provider's authorization URL.
///
/// The URL carries `response_type=code`, the client ID, the redirect URL, the
/// space-separated scopes, `access_type=offline` (so a refresh token is
/// issued) and the given `state`. With `pkce`, the S256 challenge is added.
///
/// This is a pure function of its inputs.
#[must_use]
pub fn login_url(config: &FitbitConfig, state: &str, pkce: Option<&PkceChallenge>) -> String {
    let mut params = vec![
        ("response_type", "code".to_string()),
        ("client_id", config.client_id().as_ref().to_string()),
        ("redirect_uri", config.redirect_url().as_ref().to_string()),
        ("scope", config.scopes().to_string()),
        ("state", state.to_string()),
        ("access_type", "offline".to_string()),
    ];

    if let Some(pkce) = pkce {
        params.push(("code_challenge", pkce.challenge().to_string()));
        params.push(("code_challenge_method", CODE_CHALLENGE_METHOD.to_string()));
    }

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let authorize_url = config.authorize_url();
    let separator = if authorize_url.contains('?') { '&' } else { '?' };
    format!("{authorize_url}{separator}{query_string}")
}

/// Initiates the authorization code flow.
///
/// Generates a random [`StateParam`] and, when `use_pkce` is `true`, a
/// [`PkceChallenge`], then builds the authorization URL with [`login_url`].
#[must_use]
pub fn begin_auth(config: &FitbitConfig, use_pkce: bool) -> BeginAuthResult {
    let state = StateParam::new();
    let pkce = use_pkce.then(PkceChallenge::new);

    let auth_url = login_url(config, state.as_ref(), pkce.as_ref());

    BeginAuthResult {
        auth_url,
        state,
        code_verifier: pkce.map(|p| p.verifier().to_string()),
    }
}

// Verify BeginAuthResult is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BeginAuthResult>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, RedirectUrl, AUTHORIZE_URL};

    fn create_test_config() -> FitbitConfig {
        FitbitConfig::builder()
            .client_id(ClientId::new("23ABCD").unwrap())
            .client_secret(ClientSecret::new("test-secret").unwrap())
            .redirect_url(RedirectUrl::new("https://myapp.example.com/callback").unwrap())
            .scopes("activity sleep weight".parse().unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_login_url_points_at_authorize_endpoint() {
        let url = login_url(&create_test_config(), "csrf", None);
        assert!(url.starts_with(&format!("{AUTHORIZE_URL}?")));
    }

    #[test]
    fn test_login_url_includes_all_required_params() {
        let url = login_url(&create_test_config(), "csrf-token", None);

        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=23ABCD"));
        assert!(url.contains("state=csrf-token"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("scope=activity%20sleep%20weight"));

        let expected = urlencoding::encode("https://myapp.example.com/callback");
        assert!(url.contains(&format!("redirect_uri={expected}")));
    }

    #[test]
    fn test_login_url_encodes_state() {
        let url = login_url(&create_test_config(), "a b&c", None);
        assert!(url.contains("state=a%20b%26c"));
    }

    #[test]
    fn test_login_url_without_pkce_has_no_challenge() {
        let url = login_url(&create_test_config(), "csrf", None);
        assert!(!url.contains("code_challenge"));
    }

    #[test]
    fn test_login_url_is_pure() {
        let config = create_test_config();
        assert_eq!(
            login_url(&config, "same", None),
            login_url(&config, "same", None)
        );
    }

    #[test]
    fn test_begin_auth_state_in_url_matches_returned_state() {
        let result = begin_auth(&create_test_config(), false);

        assert_eq!(result.state.as_ref().len(), 15);
        assert!(result
            .auth_url
            .contains(&format!("state={}", result.state.as_ref())));
        assert!(result.code_verifier.is_none());
    }

    #[test]
    fn test_begin_auth_with_pkce_embeds_matching_challenge() {
        let result = begin_auth(&create_test_config(), true);

        let verifier = result.code_verifier.as_deref().unwrap();
        let challenge = PkceChallenge::challenge_for(verifier);
        assert!(result
            .auth_url
            .contains(&format!("code_challenge={challenge}")));
        assert!(result.auth_url.contains("code_challenge_method=S256"));
    }

    #[test]
    fn test_begin_auth_unique_states() {
        let config = create_test_config();
        let first = begin_auth(&config, false);
        let second = begin_auth(&config, false);
        assert_ne!(first.state, second.state);
    }
}
