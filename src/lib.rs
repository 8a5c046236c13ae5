//! # Fitbit Web API Rust Client
//!
//! A Rust client for the Fitbit Web API, built around an authenticated
//! request core that keeps OAuth 2.0 credentials usable without involving
//! every call site.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`FitbitConfig`] and [`FitbitConfigBuilder`]
//! - Validated newtypes for client credentials, redirect URL and locale
//! - OAuth 2.0 authorization code flow, with optional PKCE, via [`auth::oauth`]
//! - Transparent token refresh with rotation detection and a token-change hook
//! - GET/POST/DELETE request primitives that report rate-limit headers
//! - Typed accessors for a set of resources via [`resources`]
//! - Subscriber endpoint verification via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use fitbit_api::{ClientId, ClientSecret, FitbitConfig, RedirectUrl, Session};
//!
//! let config = FitbitConfig::builder()
//!     .client_id(ClientId::new("23ABCD").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .redirect_url(RedirectUrl::new("https://your-app.example.com/callback").unwrap())
//!     .scopes("activity heartrate sleep weight".parse().unwrap())
//!     .locale("en_US")
//!     .build()
//!     .unwrap();
//!
//! let session = Session::new(config);
//! let url = session.login_url("csrf-token");
//! assert!(url.starts_with("https://www.fitbit.com/oauth2/authorize?"));
//! ```
//!
//! ## Authorization
//!
//! ```rust,ignore
//! // Step 1: Redirect the user
//! let auth = session.begin_auth(true);
//! // Store auth.state and auth.code_verifier, redirect to auth.auth_url
//!
//! // Step 2: On the callback, check the state and exchange the code
//! auth.state.verify(&query.state)?;
//! session
//!     .exchange_with_verifier(&query.code, auth.code_verifier.as_deref())
//!     .await?;
//! ```
//!
//! ## Persisting Credentials
//!
//! Access tokens expire after a few hours and are refreshed on demand. The
//! provider rotates the refresh token at the same time, so the new
//! credential has to be stored:
//!
//! ```rust,ignore
//! session.on_token_change(|credential| {
//!     if let Ok(json) = serde_json::to_string(&credential) {
//!         let _ = std::fs::write("token.json", json);
//!     }
//! });
//!
//! // On the next start
//! let credential: Credential = serde_json::from_str(&std::fs::read_to_string("token.json")?)?;
//! session.set_token(credential);
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! // Typed accessor
//! let profile = session.profile(None).await?;
//!
//! // Or any endpoint through the primitives
//! let response = session
//!     .get("https://api.fitbit.com/1/user/-/activities/date/2024-01-05.json")
//!     .await?;
//! if response.is_ok() {
//!     println!("{}", response.body_text());
//! }
//! println!("{:?}", session.rate_limit());
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Sessions are constructed and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Status-agnostic primitives**: `get`/`post`/`delete` return every
//!   response; typed accessors turn non-2xx statuses into errors

pub mod auth;
pub mod clients;
pub mod config;
mod error;
pub mod resources;
mod session;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use auth::{Credential, Scope, Scopes, TokenSource};
pub use config::{ClientId, ClientSecret, FitbitConfig, FitbitConfigBuilder, Locale, RedirectUrl};
pub use error::ConfigError;
pub use session::Session;

// Re-export HTTP types
pub use clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, RateLimit, Transport};

// Re-export OAuth types for convenience
pub use auth::oauth::{BeginAuthResult, OAuthError, PkceChallenge, StateParam};

pub use resources::ResourceError;
pub use webhooks::WebhookError;
