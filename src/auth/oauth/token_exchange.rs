//! Token endpoint client for code exchange and token refresh.
//!
//! Both grants are POSTed to the token URL as a URL-encoded form, with the
//! client credentials sent through HTTP Basic authentication.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::auth::oauth::TokenEndpoint;
//!
//! let endpoint = TokenEndpoint::new(&config);
//!
//! // After the user is redirected back with ?code=...
//! let credential = endpoint.exchange_code(&code, None).await?;
//!
//! // Later, once the access token expired
//! let refreshed = endpoint.refresh(&credential.refresh_token).await?;
//! ```

use super::OAuthError;
use crate::auth::{Credential, TokenResponse};
use crate::config::FitbitConfig;

const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Which grant a token endpoint call performs; selects the error variant.
#[derive(Clone, Copy, Debug)]
enum Grant {
    AuthorizationCode,
    RefreshToken,
}

impl Grant {
    fn error(self, status: u16, message: String) -> OAuthError {
        match self {
            Self::AuthorizationCode => OAuthError::TokenExchangeFailed { status, message },
            Self::RefreshToken => OAuthError::TokenRefreshFailed { status, message },
        }
    }
}

/// Client for the provider's token endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct TokenEndpoint {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

// Verify TokenEndpoint is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenEndpoint>();
};

impl TokenEndpoint {
    /// Creates a token endpoint client from the session configuration.
    #[must_use]
    pub fn new(config: &FitbitConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Creates a token endpoint client that reuses an existing `reqwest` client.
    #[must_use]
    pub fn with_client(config: &FitbitConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            token_url: config.token_url().to_string(),
            client_id: config.client_id().as_ref().to_string(),
            client_secret: config.client_secret().as_ref().to_string(),
            redirect_uri: config.redirect_url().as_ref().to_string(),
        }
    }

    /// Trades a one-time authorization code for a credential.
    ///
    /// Pass the PKCE `code_verifier` if the login URL carried a challenge.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenExchangeFailed`] with the provider's body
    /// unchanged on a non-2xx response, or with status `0` if no response
    /// was received.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<Credential, OAuthError> {
        let mut form = vec![
            ("grant_type", AUTHORIZATION_CODE_GRANT_TYPE),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
        ];
        if let Some(verifier) = code_verifier {
            form.push(("code_verifier", verifier));
        }

        let response = self.request(Grant::AuthorizationCode, &form).await?;
        tracing::debug!(
            "Exchanged authorization code (user_id: {:?}, scope: {:?})",
            response.user_id,
            response.scope
        );
        Ok(Credential::from_token_response(&response))
    }

    /// Obtains a fresh credential using a refresh token.
    ///
    /// If the provider does not issue a new refresh token, the one passed in
    /// is carried over to the returned credential.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::TokenRefreshFailed`] with the provider's body
    /// unchanged on a non-2xx response, or with status `0` if no response
    /// was received.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential, OAuthError> {
        let form = [
            ("grant_type", REFRESH_TOKEN_GRANT_TYPE),
            ("refresh_token", refresh_token),
        ];

        let response = self.request(Grant::RefreshToken, &form).await?;
        let mut credential = Credential::from_token_response(&response);
        if credential.refresh_token.is_empty() {
            credential.refresh_token = refresh_token.to_string();
        }

        tracing::debug!("Refreshed access token (expiry: {:?})", credential.expiry);
        Ok(credential)
    }

    async fn request(
        &self,
        grant: Grant,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, OAuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| grant.error(0, format!("Network error: {e}")))?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(grant.error(status, error_body));
        }

        response
            .json()
            .await
            .map_err(|e| grant.error(status, format!("Failed to parse token response: {e}")))
    }
}
