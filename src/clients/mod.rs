//! HTTP transport types for Fitbit API communication.
//!
//! This module provides the transport stack every API call travels through
//! and the request/response types it carries.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: One HTTP round trip; layers wrap each other
//! - [`ReqwestTransport`]: The network layer
//! - [`BearerTransport`]: Attaches the access token
//! - [`AuthorizingTransport`]: Detects and reports token rotation
//! - [`HttpRequest`] / [`HttpResponse`]: What travels through the stack
//! - [`RateLimit`] / [`RateLimitTracker`]: Quota parsed from response headers
//!
//! # Status Codes
//!
//! The stack does not treat 4xx/5xx statuses as errors. Responses come back
//! with their status, headers and raw body, and callers decide what a status
//! means. The resource accessors in [`crate::resources`] decode the
//! provider's error envelope for non-2xx statuses.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::clients::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "https://api.fitbit.com/1/foods/units.json")
//!     .header("Accept-Language", "en_US")
//!     .build()?;
//!
//! let response = ReqwestTransport::new().round_trip(request).await?;
//! println!("{} {}", response.code, response.body_text());
//! ```

mod authorizing;
mod errors;
mod http_request;
mod http_response;
mod rate_limit;
mod transport;

pub use authorizing::{AuthorizingTransport, CredentialStore, TokenChangeHook};
pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use rate_limit::{
    RateLimit, RateLimitTracker, RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
    RATE_LIMIT_RESET_HEADER,
};
pub use transport::{BearerTransport, ReqwestTransport, Transport};
