//! JSON `releases.json` feed for the macOS client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name of the macOS feed.
pub const RELEASES_JSON_FILE: &str = "releases.json";

/// Update descriptor read by the macOS client. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacReleaseFeed {
    /// Download URL of the zipped app bundle
    pub url: String,
    /// Display name, always empty
    pub name: String,
    /// Release notes, always empty
    pub notes: Vec<String>,
    /// Publication time, `YYYY-MM-DDTHH:MM:SSZ`
    pub pub_date: String,
    /// Release version
    pub version: String,
}

impl MacReleaseFeed {
    /// Feed entry published at `now`.
    pub fn new(url: String, version: &str, now: DateTime<Utc>) -> Self {
        Self {
            url,
            name: String::new(),
            notes: Vec::new(),
            pub_date: pub_date(now),
            version: version.to_string(),
        }
    }
}

/// UTC timestamp with second precision and a `Z` suffix.
pub fn pub_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_compact_json_layout() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let feed = MacReleaseFeed::new("https://host/a.zip".to_string(), "3.4.1", now);
        assert_eq!(
            serde_json::to_string(&feed).unwrap(),
            r#"{"url":"https://host/a.zip","name":"","notes":[],"pub_date":"2024-03-09T07:05:01Z","version":"3.4.1"}"#
        );
    }

    #[test]
    fn test_pub_date_drops_subseconds() {
        let now = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(pub_date(now), "2023-11-14T22:13:20Z");
    }
}
