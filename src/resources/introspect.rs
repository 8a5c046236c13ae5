//! Token introspection (RFC 7662).

use serde::{Deserialize, Serialize};

use crate::auth::oauth::OAuthError;
use crate::clients::HttpError;
use crate::resources::{decode, ResourceError};
use crate::Session;

/// State of the current access token as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TokenState {
    /// `false` once the token is expired or revoked; the other fields are
    /// then absent.
    pub active: bool,
    /// Granted scopes, in the provider's `{ACTIVITY=READ, ...}` notation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Expiry, in seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, in seconds since the Unix epoch.
    pub iat: i64,
}

impl Session {
    /// Asks the provider whether the current access token is still active.
    ///
    /// The provider reports `exp` and `iat` in milliseconds; they are
    /// returned in seconds as RFC 7662 specifies.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] wrapping [`OAuthError::MissingCredential`]
    /// if no credential is installed, otherwise as any other accessor.
    pub async fn introspect(&self) -> Result<TokenState, ResourceError> {
        let credential = self
            .token()
            .ok_or(HttpError::Token(OAuthError::MissingCredential))?;
        let url = format!("{}/1.1/oauth2/introspect", self.config().api_base_url());

        let response = self
            .post(&url, [("token", credential.access_token)])
            .await?;
        let mut state: TokenState = decode(&response)?;
        state.exp /= 1000;
        state.iat /= 1000;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing;

    #[tokio::test]
    async fn test_introspect_converts_milliseconds() {
        let body = br#"{"active":true,"scope":"{WEIGHT=READ_WRITE}","client_id":"23ABCD","user_id":"ABC123","token_type":"access_token","exp":1704067200000,"iat":1704038400000}"#;
        let (session, transport) = testing::session(200, body);

        let state = session.introspect().await.unwrap();

        assert!(state.active);
        assert_eq!(state.exp, 1_704_067_200);
        assert_eq!(state.iat, 1_704_038_400);
        assert_eq!(state.user_id.as_deref(), Some("ABC123"));

        let request = transport.last();
        assert_eq!(request.url, "https://api.fitbit.com/1.1/oauth2/introspect");
        assert_eq!(
            request.form.unwrap(),
            vec![("token".to_string(), "access".to_string())]
        );
    }

    #[tokio::test]
    async fn test_inactive_token() {
        let (session, _) = testing::session(200, br#"{"active":false}"#);

        let state = session.introspect().await.unwrap();

        assert!(!state.active);
        assert_eq!(state.exp, 0);
        assert!(state.scope.is_none());
    }
}
