//! User profile.

use serde::{Deserialize, Serialize};

use crate::resources::{decode, user_segment, ResourceError};
use crate::Session;

/// The `profile.json` envelope.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    /// The profile itself.
    pub user: User,
}

/// Profile fields of a user.
///
/// Fields the user keeps private, or that a friend's profile omits, are
/// left at their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub age: u32,
    pub avatar: String,
    pub avatar150: String,
    pub avatar640: String,
    pub average_daily_steps: u32,
    /// `12hour` or `24hour`.
    pub clock_time_display_format: String,
    pub country: String,
    /// Birth date as `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub display_name: String,
    pub distance_unit: String,
    /// The user's identifier in path form.
    pub encoded_id: String,
    pub foods_locale: String,
    pub full_name: String,
    pub gender: String,
    pub glucose_unit: String,
    pub height: f64,
    pub height_unit: String,
    pub is_child: bool,
    pub language_locale: String,
    pub locale: String,
    /// Account creation date as `YYYY-MM-DD`.
    pub member_since: String,
    /// Offset of the user's timezone from UTC, in milliseconds.
    #[serde(rename = "offsetFromUTCMillis")]
    pub offset_from_utc_millis: i64,
    pub sleep_tracking: String,
    pub start_day_of_week: String,
    pub stride_length_running: f64,
    pub stride_length_walking: f64,
    pub swim_unit: String,
    /// IANA timezone name, e.g. `Europe/Berlin`.
    pub timezone: String,
    pub water_unit: String,
    pub weight: f64,
    pub weight_unit: String,
}

impl Session {
    /// Returns a user's profile.
    ///
    /// `None` (or `Some(0)`) addresses the authorized user; any other id
    /// must be a friend of the authorized user.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the provider answers
    /// with a non-2xx status, or the body cannot be decoded.
    pub async fn profile(&self, user_id: Option<u64>) -> Result<Profile, ResourceError> {
        let url = format!(
            "{}/1/user/{}/profile.json",
            self.config().api_base_url(),
            user_segment(user_id)
        );
        let response = self.get(&url).await?;
        decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use crate::resources::{testing, ResourceError};

    #[tokio::test]
    async fn test_profile_decodes_known_fields() {
        let body = br#"{
            "user": {
                "age": 37,
                "displayName": "Sam",
                "encodedId": "ABC123",
                "offsetFromUTCMillis": 3600000,
                "timezone": "Europe/Berlin",
                "weight": 72.4,
                "topBadges": [],
                "features": {"exerciseGoal": true}
            }
        }"#;
        let (session, transport) = testing::session(200, body);

        let profile = session.profile(None).await.unwrap();

        assert_eq!(profile.user.age, 37);
        assert_eq!(profile.user.display_name, "Sam");
        assert_eq!(profile.user.offset_from_utc_millis, 3_600_000);
        assert!(profile.user.full_name.is_empty());
        assert_eq!(
            transport.last().url,
            "https://api.fitbit.com/1/user/-/profile.json"
        );
    }

    #[tokio::test]
    async fn test_profile_of_non_friend_is_api_error() {
        let body = br#"{"errors":[{"errorType":"authorization","message":"Not a friend"}],"success":false}"#;
        let (session, _) = testing::session(403, body);

        let error = session.profile(Some(77)).await.unwrap_err();

        match error {
            ResourceError::Api { status, errors } => {
                assert_eq!(status, 403);
                assert_eq!(errors[0].error_type, "authorization");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }
}
