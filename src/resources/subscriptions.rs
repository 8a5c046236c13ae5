//! Subscriber notification registrations.
//!
//! A subscription asks the provider to notify the application's subscriber
//! endpoint when the authorized user's data in a collection changes. The
//! `subscription_id` is chosen by the application and must be unique per
//! user; use [`crate::webhooks`] on the receiving side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resources::{decode, ensure_ok, require_id, ResourceError};
use crate::Session;

/// Data collections a subscription can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionCollection {
    Activities,
    Body,
    Foods,
    Sleep,
    UserRevokedAccess,
}

impl SubscriptionCollection {
    /// The collection's path segment and wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Body => "body",
            Self::Foods => "foods",
            Self::Sleep => "sleep",
            Self::UserRevokedAccess => "userRevokedAccess",
        }
    }
}

impl fmt::Display for SubscriptionCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered subscription.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    /// The collection, or `user` for a subscription to all collections.
    pub collection_type: String,
    pub owner_id: String,
    pub owner_type: String,
    /// The subscriber endpoint configured for the application.
    pub subscriber_id: String,
    pub subscription_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionList {
    #[serde(default)]
    api_subscriptions: Vec<Subscription>,
}

impl Session {
    fn subscriptions_url(&self, collection: Option<SubscriptionCollection>, rest: &str) -> String {
        let collection = collection.map_or_else(String::new, |c| format!("{c}/"));
        format!(
            "{}/1/user/-/{collection}apiSubscriptions{rest}",
            self.config().api_base_url()
        )
    }

    /// Subscribes to changes in `collection` (all collections if `None`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a zero
    /// `subscription_id`, [`ResourceError::Api`] if the provider refuses it
    /// (409 when the id is already used for another collection), or
    /// [`ResourceError::Http`] / [`ResourceError::Decode`].
    pub async fn add_subscription(
        &self,
        collection: Option<SubscriptionCollection>,
        subscription_id: u64,
    ) -> Result<Subscription, ResourceError> {
        require_id("subscription_id", subscription_id)?;
        let url = self.subscriptions_url(collection, &format!("/{subscription_id}.json"));
        let response = self
            .post(&url, std::iter::empty::<(String, String)>())
            .await?;
        decode(&response)
    }

    /// Removes a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a zero
    /// `subscription_id`, [`ResourceError::Api`] if the provider rejects the
    /// removal, or [`ResourceError::Http`].
    pub async fn remove_subscription(
        &self,
        collection: Option<SubscriptionCollection>,
        subscription_id: u64,
    ) -> Result<(), ResourceError> {
        require_id("subscription_id", subscription_id)?;
        let url = self.subscriptions_url(collection, &format!("/{subscription_id}.json"));
        ensure_ok(&self.delete(&url).await?)
    }

    /// Lists the authorized user's subscriptions in `collection` (all
    /// collections if `None`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the provider answers
    /// with a non-2xx status, or the body cannot be decoded.
    pub async fn subscriptions(
        &self,
        collection: Option<SubscriptionCollection>,
    ) -> Result<Vec<Subscription>, ResourceError> {
        let url = self.subscriptions_url(collection, ".json");
        let list: SubscriptionList = decode(&self.get(&url).await?)?;
        Ok(list.api_subscriptions)
    }
}
