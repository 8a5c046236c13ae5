//! Authentication types for the Fitbit API client.
//!
//! This module provides the credential held by a session, the permission
//! scopes requested during authorization, and the token sources that keep the
//! credential usable.
//!
//! # Overview
//!
//! - [`Credential`]: Access token, refresh token, expiry and token type
//! - [`Scope`] / [`Scopes`]: Permission scopes requested from the user
//! - [`TokenSource`]: Produces the token for the next request, refreshing if needed
//! - [`oauth`]: OAuth 2.0 authorization code flow implementation
//!
//! # Credential Lifecycle
//!
//! A credential is created by the authorization code exchange or restored
//! from storage by the host application. While a session is in use the
//! provider may rotate it: an expired access token is refreshed with the
//! refresh token, and the provider may issue a new refresh token at the same
//! time. Sessions detect these rotations and report them through the
//! token-change hook so the host can persist the new value.
//!
//! # Example
//!
//! ```rust
//! use fitbit_api::{Credential, Scopes};
//!
//! let scopes: Scopes = "activity heartrate".parse().unwrap();
//! assert_eq!(scopes.to_string(), "activity heartrate");
//!
//! let credential = Credential::new("access-token", "refresh-token", None);
//! assert!(credential.is_valid());
//! ```

mod credential;
pub mod oauth;
mod scopes;
mod token_source;

pub use credential::{Credential, TokenResponse, DEFAULT_TOKEN_TYPE, EXPIRY_DELTA_SECS};
pub use scopes::{Scope, Scopes};
pub use token_source::{RefreshingTokenSource, StaticTokenSource, TokenSource};
