//! OAuth 2.0 authorization code flow for the Fitbit Web API.
//!
//! This module covers the browser leg and the token endpoint leg of the flow:
//!
//! 1. **Authorization Initiation** ([`begin_auth`], [`login_url`]): build the
//!    authorize URL the user is redirected to. The URL requests offline
//!    access so the provider issues a refresh token.
//!
//! 2. **Callback Validation** ([`StateParam::verify`]): check the `state`
//!    returned on the redirect against the one that was sent.
//!
//! 3. **Code Exchange** ([`TokenEndpoint::exchange_code`]): trade the one-time
//!    code for a [`Credential`](crate::Credential).
//!
//! 4. **Token Refresh** ([`TokenEndpoint::refresh`]): obtain a new access
//!    token with the refresh token. Sessions do this transparently through
//!    [`RefreshingTokenSource`](crate::auth::RefreshingTokenSource).
//!
//! # Security Features
//!
//! - **CSRF Protection**: the state parameter is compared in constant time
//! - **PKCE**: optional S256 code challenge ([`PkceChallenge`])
//! - **Client authentication**: HTTP Basic on every token endpoint call
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::auth::oauth::{begin_auth, OAuthError};
//! use fitbit_api::Session;
//!
//! // Step 1: redirect
//! let result = begin_auth(session.config(), true);
//! // store result.state and result.code_verifier, redirect to result.auth_url
//!
//! // Step 2: callback
//! async fn handle_callback(
//!     session: &Session,
//!     stored: &BeginAuthResult,
//!     code: &str,
//!     state: &str,
//! ) -> Result<(), OAuthError> {
//!     stored.state.verify(state)?;
//!     session
//!         .exchange_with_verifier(code, stored.code_verifier.as_deref())
//!         .await
//! }
//! ```

mod begin_auth;
mod error;
mod pkce;
mod state;
mod token_exchange;

pub use begin_auth::{begin_auth, login_url, BeginAuthResult};
pub use error::OAuthError;
pub use pkce::{PkceChallenge, CODE_CHALLENGE_METHOD};
pub use state::StateParam;
pub use token_exchange::TokenEndpoint;
