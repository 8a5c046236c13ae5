//! Subscriber endpoint support.
//!
//! After registering subscriptions with
//! [`Session::add_subscription`](crate::Session::add_subscription), the
//! provider calls the application's subscriber endpoint. This module covers
//! the receiving side; the HTTP server itself is the application's.
//!
//! # Overview
//!
//! - [`verify_subscriber_code`]: The `?verify=<code>` handshake
//! - [`verify_signature`] / [`sign_body`]: The `X-Fitbit-Signature` check
//! - [`parse_notifications`]: Decodes the notification array
//! - [`verify_notification`]: Signature check and decode in one step
//! - [`WebhookError`]: Error types, with the status to answer
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::webhooks::{verify_notification, verify_subscriber_code, SIGNATURE_HEADER};
//!
//! // GET /fitbit/notifications?verify=<code>
//! let status = match verify_subscriber_code(&expected_code, &query_code) {
//!     Ok(()) => 204,
//!     Err(e) => e.status_code(),
//! };
//!
//! // POST /fitbit/notifications
//! let signature = headers.get(SIGNATURE_HEADER).unwrap_or_default();
//! match verify_notification(&config, &body, signature) {
//!     Ok(notifications) => {
//!         for n in notifications {
//!             queue.push((n.owner_id, n.collection_type, n.date));
//!         }
//!         204
//!     }
//!     Err(e) => e.status_code(),
//! }
//! ```
//!
//! The provider expects an answer within a few seconds, so fetch the
//! changed data after responding.

mod errors;
mod notification;
mod verification;

pub use errors::WebhookError;
pub use notification::{parse_notifications, Notification};
pub use verification::{
    sign_body, verify_notification, verify_signature, verify_subscriber_code, SIGNATURE_HEADER,
    VERIFY_QUERY_PARAM,
};
