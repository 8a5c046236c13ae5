//! Rate limit accounting from Fitbit response headers.
//!
//! Every API response may carry three headers describing the hourly request
//! quota of the user/application pair:
//!
//! | Header                         | Field                       |
//! |--------------------------------|-----------------------------|
//! | `fitbit-rate-limit-remaining`  | [`RateLimit::requests_used`]    |
//! | `fitbit-rate-limit-limit`      | [`RateLimit::requests_allowed`] |
//! | `fitbit-rate-limit-reset`      | [`RateLimit::reset_at`] (now + seconds) |
//!
//! The `remaining` header is stored in `requests_used`. This mapping is kept
//! for compatibility with existing callers.

use crate::clients::HttpResponse;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Header carrying the number of requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "fitbit-rate-limit-remaining";

/// Header carrying the quota of the current window.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "fitbit-rate-limit-limit";

/// Header carrying the number of seconds until the window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "fitbit-rate-limit-reset";

/// A snapshot of the rate limit reported by the most recent responses.
///
/// Fields are `None` until a response reports them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Value of `fitbit-rate-limit-remaining`.
    pub requests_used: Option<u32>,
    /// Value of `fitbit-rate-limit-limit`.
    pub requests_allowed: Option<u32>,
    /// When the current window resets.
    pub reset_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Merges the rate limit headers of `response` into this snapshot.
    ///
    /// Each header is handled on its own. Absent or non-integer values, and
    /// reset offsets outside the representable time range, leave the
    /// corresponding field untouched.
    pub fn merge_headers(&mut self, response: &HttpResponse) {
        self.merge_headers_at(response, Utc::now());
    }

    fn merge_headers_at(&mut self, response: &HttpResponse, now: DateTime<Utc>) {
        if let Some(used) = parse_header::<u32>(response, RATE_LIMIT_REMAINING_HEADER) {
            self.requests_used = Some(used);
        }
        if let Some(allowed) = parse_header::<u32>(response, RATE_LIMIT_LIMIT_HEADER) {
            self.requests_allowed = Some(allowed);
        }
        if let Some(reset_at) = parse_header::<i64>(response, RATE_LIMIT_RESET_HEADER)
            .and_then(Duration::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
        {
            self.reset_at = Some(reset_at);
        }
    }
}

fn parse_header<T: std::str::FromStr>(response: &HttpResponse, name: &str) -> Option<T> {
    response.header(name)?.trim().parse().ok()
}

/// Shared holder of the latest [`RateLimit`] snapshot.
///
/// Updates merge under a short write lock; readers get a copy.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    current: RwLock<RateLimit>,
}

impl RateLimitTracker {
    /// Creates a tracker with nothing reported yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the headers of a response into the tracked snapshot.
    pub fn update(&self, response: &HttpResponse) {
        let now = Utc::now();
        self.current.write().merge_headers_at(response, now);
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> RateLimit {
        *self.current.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response_with(headers: &[(&str, &str)]) -> HttpResponse {
        let headers: HashMap<String, Vec<String>> = headers
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect();
        HttpResponse::new(200, headers, Vec::new())
    }

    #[test]
    fn test_all_headers_are_parsed() {
        let tracker = RateLimitTracker::new();
        let before = Utc::now();

        tracker.update(&response_with(&[
            (RATE_LIMIT_REMAINING_HEADER, "42"),
            (RATE_LIMIT_LIMIT_HEADER, "150"),
            (RATE_LIMIT_RESET_HEADER, "120"),
        ]));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.requests_used, Some(42));
        assert_eq!(snapshot.requests_allowed, Some(150));
        let reset = snapshot.reset_at.unwrap();
        assert!(reset >= before + Duration::seconds(119));
        assert!(reset <= Utc::now() + Duration::seconds(121));
    }

    #[test]
    fn test_missing_reset_keeps_previous_value() {
        let now = Utc::now();
        let mut limit = RateLimit::default();
        limit.merge_headers_at(&response_with(&[(RATE_LIMIT_RESET_HEADER, "600")]), now);
        let first_reset = limit.reset_at;

        limit.merge_headers_at(
            &response_with(&[
                (RATE_LIMIT_REMAINING_HEADER, "10"),
                (RATE_LIMIT_LIMIT_HEADER, "150"),
            ]),
            now + Duration::seconds(30),
        );

        assert_eq!(limit.reset_at, first_reset);
        assert_eq!(limit.requests_used, Some(10));
        assert_eq!(limit.requests_allowed, Some(150));
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let mut limit = RateLimit {
            requests_used: Some(5),
            requests_allowed: Some(150),
            reset_at: None,
        };

        limit.merge_headers(&response_with(&[
            (RATE_LIMIT_REMAINING_HEADER, "many"),
            (RATE_LIMIT_LIMIT_HEADER, "150.5"),
            (RATE_LIMIT_RESET_HEADER, ""),
        ]));

        assert_eq!(limit.requests_used, Some(5));
        assert_eq!(limit.requests_allowed, Some(150));
        assert_eq!(limit.reset_at, None);
    }

    #[test]
    fn test_out_of_range_reset_is_ignored() {
        let now = Utc::now();
        let mut limit = RateLimit::default();
        limit.merge_headers_at(&response_with(&[(RATE_LIMIT_RESET_HEADER, "60")]), now);
        let first_reset = limit.reset_at;

        for value in ["9223372036854775807", "10000000000000", "-9223372036854775808"] {
            limit.merge_headers_at(
                &response_with(&[
                    (RATE_LIMIT_REMAINING_HEADER, "7"),
                    (RATE_LIMIT_RESET_HEADER, value),
                ]),
                now,
            );
            assert_eq!(limit.reset_at, first_reset, "reset header {value}");
        }
        assert_eq!(limit.requests_used, Some(7));

        // Through the public entry point as well
        limit.merge_headers(&response_with(&[(RATE_LIMIT_RESET_HEADER, "9223372036854775807")]));
        assert_eq!(limit.reset_at, first_reset);
    }

    #[test]
    fn test_headers_are_parsed_independently() {
        let mut limit = RateLimit::default();
        limit.merge_headers(&response_with(&[
            (RATE_LIMIT_REMAINING_HEADER, "bad"),
            (RATE_LIMIT_LIMIT_HEADER, "150"),
        ]));

        assert_eq!(limit.requests_used, None);
        assert_eq!(limit.requests_allowed, Some(150));
    }

    #[test]
    fn test_no_headers_leaves_snapshot_untouched() {
        let tracker = RateLimitTracker::new();
        tracker.update(&response_with(&[(RATE_LIMIT_LIMIT_HEADER, "150")]));
        tracker.update(&response_with(&[]));
        assert_eq!(tracker.snapshot().requests_allowed, Some(150));
    }
}
