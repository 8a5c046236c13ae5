//! Paired tracker and scale devices.

use serde::{Deserialize, Serialize};

use crate::resources::{decode, user_segment, ResourceError};
use crate::Session;

/// A device paired with the user's account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Battery state, e.g. `High`, `Medium`, `Low`, `Empty`.
    #[serde(default)]
    pub battery: String,

    /// Battery level in percent, when the device reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,

    /// Product name, e.g. `Charge 6`.
    #[serde(default)]
    pub device_version: String,

    #[serde(default)]
    pub features: Vec<serde_json::Value>,

    /// The device identifier.
    #[serde(default)]
    pub id: String,

    /// Local time of the last sync, e.g. `2024-01-05T08:12:44.000`.
    #[serde(default)]
    pub last_sync_time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,

    /// `TRACKER` or `SCALE`.
    #[serde(default, rename = "type")]
    pub device_type: String,
}

impl Session {
    /// Lists the devices paired with a user's account.
    ///
    /// `None` (or `Some(0)`) addresses the authorized user.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the provider answers
    /// with a non-2xx status, or the body cannot be decoded.
    pub async fn devices(&self, user_id: Option<u64>) -> Result<Vec<Device>, ResourceError> {
        let url = format!(
            "{}/1/user/{}/devices.json",
            self.config().api_base_url(),
            user_segment(user_id)
        );
        let response = self.get(&url).await?;
        decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use crate::clients::HttpMethod;
    use crate::resources::testing;

    const DEVICES_JSON: &str = r#"[
        {
            "battery": "High",
            "batteryLevel": 80,
            "deviceVersion": "Charge 6",
            "features": [],
            "id": "2570612980",
            "lastSyncTime": "2024-01-05T08:12:44.000",
            "mac": "D6E3D9A6F1B2",
            "type": "TRACKER"
        },
        {
            "battery": "Medium",
            "deviceVersion": "Aria Air",
            "features": [],
            "id": "99",
            "lastSyncTime": "2024-01-04T07:00:00.000",
            "type": "SCALE"
        }
    ]"#;

    #[tokio::test]
    async fn test_devices_for_authorized_user() {
        let (session, transport) = testing::session(200, DEVICES_JSON.as_bytes());

        let devices = session.devices(None).await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].battery_level, Some(80));
        assert_eq!(devices[0].device_type, "TRACKER");
        assert_eq!(devices[1].battery_level, None);
        assert_eq!(devices[1].mac, None);

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://api.fitbit.com/1/user/-/devices.json");
    }

    #[tokio::test]
    async fn test_devices_for_other_user() {
        let (session, transport) = testing::session(200, b"[]");

        let devices = session.devices(Some(1234)).await.unwrap();

        assert!(devices.is_empty());
        assert_eq!(
            transport.last().url,
            "https://api.fitbit.com/1/user/1234/devices.json"
        );
    }
}
