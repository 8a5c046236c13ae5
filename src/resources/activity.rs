//! Activity exports.

use crate::resources::{ensure_ok, require_id, ResourceError};
use crate::Session;

impl Session {
    /// Downloads the TCX (Training Center XML) export of an activity log.
    ///
    /// Partial exports are included, so activities recorded without GPS
    /// still yield a document. The XML is returned unparsed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a zero log id,
    /// [`ResourceError::Api`] for a non-2xx status, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn activity_tcx(&self, log_id: u64) -> Result<Vec<u8>, ResourceError> {
        require_id("log_id", log_id)?;
        let url = format!(
            "{}/1/user/-/activities/{log_id}.tcx?includePartialTCX=true",
            self.config().api_base_url()
        );
        let response = self.get(&url).await?;
        ensure_ok(&response)?;
        Ok(response.into_body())
    }
}

#[cfg(test)]
mod tests {
    use crate::resources::{testing, ResourceError};

    const TCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
  <Activities><Activity Sport="Running"><Id>2024-01-05T07:00:00.000+01:00</Id></Activity></Activities>
</TrainingCenterDatabase>"#;

    #[tokio::test]
    async fn test_activity_tcx_returns_raw_bytes() {
        let (session, transport) = testing::session(200, TCX.as_bytes());

        let bytes = session.activity_tcx(1_234_567).await.unwrap();

        assert_eq!(bytes, TCX.as_bytes());
        assert_eq!(
            transport.last().url,
            "https://api.fitbit.com/1/user/-/activities/1234567.tcx?includePartialTCX=true"
        );
    }

    #[tokio::test]
    async fn test_activity_tcx_zero_id() {
        let (session, transport) = testing::session(200, TCX.as_bytes());

        let result = session.activity_tcx(0).await;

        assert!(matches!(result, Err(ResourceError::InvalidArgument { .. })));
        assert!(transport.requests.lock().is_empty());
    }

    #[tokio::test]
    async fn test_activity_tcx_not_found() {
        let (session, _) = testing::session(404, br#"{"errors":[]}"#);
        assert!(matches!(
            session.activity_tcx(5).await,
            Err(ResourceError::Api { status: 404, .. })
        ));
    }
}
