//! Notification payloads delivered to the subscriber endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resources::SubscriptionCollection;
use crate::webhooks::WebhookError;

/// One change notification.
///
/// A notification only says *that* data changed; fetch the collection for
/// `date` with a session for `owner_id` to see what changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The collection that changed, e.g. `activities` or `userRevokedAccess`.
    pub collection_type: String,
    /// The day whose data changed, in the user's timezone.
    pub date: NaiveDate,
    /// The encoded id of the user whose data changed.
    pub owner_id: String,
    #[serde(default)]
    pub owner_type: String,
    /// The id given when the subscription was added.
    pub subscription_id: String,
}

impl Notification {
    /// Returns the collection as an enum, or `None` for collections this
    /// crate does not know.
    #[must_use]
    pub fn collection(&self) -> Option<SubscriptionCollection> {
        serde_json::from_value(serde_json::Value::String(self.collection_type.clone())).ok()
    }

    /// Returns `true` if the user revoked the application's access.
    #[must_use]
    pub fn is_access_revoked(&self) -> bool {
        self.collection() == Some(SubscriptionCollection::UserRevokedAccess)
    }
}

/// Parses a notification body.
///
/// The signature should be checked first with
/// [`verify_signature`](crate::webhooks::verify_signature).
///
/// # Errors
///
/// Returns [`WebhookError::InvalidPayload`] if the body is not a JSON array
/// of notifications.
pub fn parse_notifications(body: &[u8]) -> Result<Vec<Notification>, WebhookError> {
    Ok(serde_json::from_slice(body)?)
}
