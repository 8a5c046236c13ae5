//! Typed accessors for Fitbit Web API resources.
//!
//! Every accessor follows the same shape: build the URL (and form, for
//! writes), call one of the [`Session`](crate::Session) request primitives,
//! and decode the response. A non-2xx status becomes
//! [`ResourceError::Api`] with the provider's error envelope; the primitives
//! themselves never inspect the status.
//!
//! # Available Resources
//!
//! | Accessor | Endpoint |
//! |----------|----------|
//! | [`Session::devices`](crate::Session::devices) | `/1/user/{id}/devices.json` |
//! | [`Session::profile`](crate::Session::profile) | `/1/user/{id}/profile.json` |
//! | [`Session::body_weight_log_by_day`](crate::Session::body_weight_log_by_day) and friends | `/1/user/-/body/log/weight/...` |
//! | [`Session::body_fat_log_by_day`](crate::Session::body_fat_log_by_day) and friends | `/1/user/-/body/log/fat/...` |
//! | [`Session::add_subscription`](crate::Session::add_subscription) and friends | `/1/user/-/{collection}/apiSubscriptions/...` |
//! | [`Session::introspect`](crate::Session::introspect) | `/1.1/oauth2/introspect` |
//! | [`Session::activity_tcx`](crate::Session::activity_tcx) | `/1/user/-/activities/{log_id}.tcx` |
//!
//! # Example
//!
//! ```rust,ignore
//! use fitbit_api::resources::ResourceError;
//!
//! match session.devices(None).await {
//!     Ok(devices) => {
//!         for device in devices {
//!             println!("{} last synced {}", device.device_version, device.last_sync_time);
//!         }
//!     }
//!     Err(ResourceError::Api { status, errors }) => println!("{status}: {errors:?}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod activity;
mod body;
mod devices;
mod errors;
mod introspect;
mod profile;
mod subscriptions;

pub use body::{BodyFat, BodyFatLog, BodyWeight, BodyWeightLog};
pub use devices::Device;
pub use errors::{ApiErrorDetail, ResourceError};
pub use introspect::TokenState;
pub use profile::{Profile, User};
pub use subscriptions::{Subscription, SubscriptionCollection};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::clients::HttpResponse;

/// Date format used in resource paths and form fields.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Path segment for a user: `-` addresses the authorized user.
pub(crate) fn user_segment(user_id: Option<u64>) -> String {
    match user_id {
        Some(id) if id > 0 => id.to_string(),
        _ => "-".to_string(),
    }
}

pub(crate) fn format_date(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

/// Decodes a JSON response body, turning a non-2xx status into
/// [`ResourceError::Api`].
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ResourceError> {
    ensure_ok(response)?;
    Ok(serde_json::from_slice(&response.body)?)
}

/// Fails with [`ResourceError::Api`] unless the status is 2xx.
pub(crate) fn ensure_ok(response: &HttpResponse) -> Result<(), ResourceError> {
    if response.is_ok() {
        Ok(())
    } else {
        Err(ResourceError::from_response(response))
    }
}

pub(crate) fn require_id(name: &str, id: u64) -> Result<(), ResourceError> {
    if id == 0 {
        return Err(ResourceError::InvalidArgument {
            reason: format!("{name} must be non-zero"),
        });
    }
    Ok(())
}

/// A session whose network layer answers every request with one canned
/// response and records what it was sent.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::auth::Credential;
    use crate::clients::{HttpError, HttpRequest, HttpResponse, Transport};
    use crate::config::{ClientId, ClientSecret, FitbitConfig, RedirectUrl};
    use crate::Session;

    pub struct CannedTransport {
        response: HttpResponse,
        pub requests: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        pub fn last(&self) -> HttpRequest {
            self.requests.lock().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.requests.lock().push(request);
            Ok(self.response.clone())
        }
    }

    pub fn session(code: u16, body: &[u8]) -> (Session, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport {
            response: HttpResponse::new(code, HashMap::new(), body.to_vec()),
            requests: Mutex::new(Vec::new()),
        });
        let config = FitbitConfig::builder()
            .client_id(ClientId::new("23ABCD").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .redirect_url(RedirectUrl::new("https://app.example.com/callback").unwrap())
            .build()
            .unwrap();
        let session = Session::with_transport(config, Arc::clone(&transport) as Arc<dyn Transport>);
        session.set_token(Credential::new("access", "refresh", None));
        (session, transport)
    }
}
