//! Body weight and body fat logs.
//!
//! Both logs live under `/1/user/-/body/log/` and share one shape: read a
//! day or a date range, add an entry for a day, remove an entry by its log
//! id. Dates are calendar days in the user's timezone.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let entry = session.add_body_weight(day, 70.5).await?;
//! println!("Logged {} as {}", entry.weight, entry.log_id);
//!
//! let logs = session.body_weight_log_by_day(day).await?;
//! session.remove_body_weight(entry.log_id).await?;
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resources::{decode, ensure_ok, format_date, require_id, ResourceError};
use crate::Session;

/// Weight log entries for a day or date range.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BodyWeight {
    #[serde(default)]
    pub weight: Vec<BodyWeightLog>,
}

/// One weight log entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyWeightLog {
    pub bmi: f64,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Body fat percentage, present when a scale measured it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    pub log_id: u64,
    /// `API`, `Aria` or `Withings`, among others.
    pub source: String,
    /// `HH:mm:ss`.
    pub time: String,
    /// Weight in the unit selected by the request's locale.
    pub weight: f64,
}

/// Body fat log entries for a day or date range.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BodyFat {
    #[serde(default)]
    pub fat: Vec<BodyFatLog>,
}

/// One body fat log entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyFatLog {
    pub date: String,
    /// Body fat percentage.
    pub fat: f64,
    pub log_id: u64,
    pub source: String,
    pub time: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeightLogEnvelope {
    weight_log: BodyWeightLog,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FatLogEnvelope {
    fat_log: BodyFatLog,
}

/// The two body logs, named by their path segment.
#[derive(Clone, Copy)]
enum BodyLog {
    Weight,
    Fat,
}

impl BodyLog {
    const fn segment(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Fat => "fat",
        }
    }
}

impl Session {
    fn body_log_url(&self, log: BodyLog, rest: &str) -> String {
        format!(
            "{}/1/user/-/body/log/{}{rest}",
            self.config().api_base_url(),
            log.segment()
        )
    }

    fn body_log_range_url(
        &self,
        log: BodyLog,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<String, ResourceError> {
        if end < start {
            return Err(ResourceError::InvalidArgument {
                reason: format!("date range ends ({end}) before it starts ({start})"),
            });
        }
        Ok(self.body_log_url(
            log,
            &format!("/date/{}/{}.json", format_date(start), format_date(end)),
        ))
    }

    /// Returns the weight log entries of one day.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the provider answers
    /// with a non-2xx status, or the body cannot be decoded.
    pub async fn body_weight_log_by_day(&self, day: NaiveDate) -> Result<BodyWeight, ResourceError> {
        let url = self.body_log_url(BodyLog::Weight, &format!("/date/{}.json", format_date(day)));
        decode(&self.get(&url).await?)
    }

    /// Returns the weight log entries between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `end` precedes `start`,
    /// otherwise as [`body_weight_log_by_day`](Self::body_weight_log_by_day).
    pub async fn body_weight_log_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BodyWeight, ResourceError> {
        let url = self.body_log_range_url(BodyLog::Weight, start, end)?;
        decode(&self.get(&url).await?)
    }

    /// Logs a weight for a day and returns the created entry.
    ///
    /// The weight is sent with six decimals in the unit of the session
    /// locale (kilograms for `de_DE`, pounds for `en_US`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a non-finite or
    /// non-positive weight, otherwise as
    /// [`body_weight_log_by_day`](Self::body_weight_log_by_day).
    pub async fn add_body_weight(
        &self,
        day: NaiveDate,
        weight: f64,
    ) -> Result<BodyWeightLog, ResourceError> {
        require_positive("weight", weight)?;
        let url = self.body_log_url(BodyLog::Weight, ".json");
        let form = [
            ("date", format_date(day)),
            ("weight", format!("{weight:.6}")),
        ];
        let envelope: WeightLogEnvelope = decode(&self.post(&url, form).await?)?;
        Ok(envelope.weight_log)
    }

    /// Removes a weight log entry.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a zero log id,
    /// [`ResourceError::Api`] if the provider rejects the removal, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn remove_body_weight(&self, log_id: u64) -> Result<(), ResourceError> {
        require_id("log_id", log_id)?;
        let url = self.body_log_url(BodyLog::Weight, &format!("/{log_id}.json"));
        ensure_ok(&self.delete(&url).await?)
    }

    /// Returns the body fat log entries of one day.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails, the provider answers
    /// with a non-2xx status, or the body cannot be decoded.
    pub async fn body_fat_log_by_day(&self, day: NaiveDate) -> Result<BodyFat, ResourceError> {
        let url = self.body_log_url(BodyLog::Fat, &format!("/date/{}.json", format_date(day)));
        decode(&self.get(&url).await?)
    }

    /// Returns the body fat log entries between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] if `end` precedes `start`,
    /// otherwise as [`body_fat_log_by_day`](Self::body_fat_log_by_day).
    pub async fn body_fat_log_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BodyFat, ResourceError> {
        let url = self.body_log_range_url(BodyLog::Fat, start, end)?;
        decode(&self.get(&url).await?)
    }

    /// Logs a body fat percentage for a day and returns the created entry.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a non-finite or
    /// non-positive percentage, otherwise as
    /// [`body_fat_log_by_day`](Self::body_fat_log_by_day).
    pub async fn add_body_fat(&self, day: NaiveDate, fat: f64) -> Result<BodyFatLog, ResourceError> {
        require_positive("fat", fat)?;
        let url = self.body_log_url(BodyLog::Fat, ".json");
        let form = [("date", format_date(day)), ("fat", format!("{fat:.6}"))];
        let envelope: FatLogEnvelope = decode(&self.post(&url, form).await?)?;
        Ok(envelope.fat_log)
    }

    /// Removes a body fat log entry.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidArgument`] for a zero log id,
    /// [`ResourceError::Api`] if the provider rejects the removal, or
    /// [`ResourceError::Http`] if the request fails.
    pub async fn remove_body_fat(&self, log_id: u64) -> Result<(), ResourceError> {
        require_id("log_id", log_id)?;
        let url = self.body_log_url(BodyLog::Fat, &format!("/{log_id}.json"));
        ensure_ok(&self.delete(&url).await?)
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), ResourceError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ResourceError::InvalidArgument {
            reason: format!("{name} must be a positive number, got {value}"),
        })
    }
}
