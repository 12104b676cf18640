use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Asia::Tehran;
use serde::Deserialize;

use crate::constants::{DOWN_GLYPH, FLAT_GLYPH, STALE_MARKER, STALE_QUOTE_SECS, UP_GLYPH};

/// Source-reported direction of the last price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum ChangeDirection {
    Up,
    Down,
    /// Unchanged, unknown, or not reported
    #[default]
    Flat,
}

impl From<String> for ChangeDirection {
    fn from(value: String) -> Self {
        match value.as_str() {
            "high" => ChangeDirection::Up,
            "low" => ChangeDirection::Down,
            _ => ChangeDirection::Flat,
        }
    }
}

/// One instrument record as delivered by the pricing API.
///
/// The feed is best-effort: any field may be missing or garbage, so
/// everything defaults and numeric derivations degrade to zero downstream
/// instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quote {
    /// Raw price text, possibly comma-grouped ("1,234,500")
    #[serde(rename = "p", default)]
    pub price: String,

    /// Source-reported update time, "YYYY-MM-DD HH:MM:SS" in Tehran time
    #[serde(rename = "ts", default)]
    pub updated_at: String,

    /// Short clock time shown next to the label
    #[serde(rename = "t", default)]
    pub time: String,

    /// Change percentage since the previous close
    #[serde(rename = "dp", default)]
    pub change_percent: f64,

    /// "high" or "low"; empty when unchanged
    #[serde(rename = "dt", default)]
    pub direction: ChangeDirection,
}

impl Quote {
    /// Direction used for rendering: a zero percentage is always flat, no
    /// matter what the feed put in `dt`.
    fn effective_direction(&self) -> ChangeDirection {
        if self.change_percent == 0.0 {
            ChangeDirection::Flat
        } else {
            self.direction
        }
    }

    /// Source-reported update instant, if `updated_at` parses
    fn observed_at(&self) -> Option<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(&self.updated_at, "%Y-%m-%d %H:%M:%S").ok()?;
        naive
            .and_local_timezone(Tehran)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// A quote is stale when its source-reported update time is more than an
    /// hour behind `now`. An unparseable update time is not stale.
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.observed_at() {
            Some(observed) => now.signed_duration_since(observed).num_seconds() > STALE_QUOTE_SECS,
            None => false,
        }
    }

    /// Short change annotation: staleness marker plus direction/percentage,
    /// or a plain unchanged glyph.
    pub fn change_tag(&self, now: DateTime<Utc>) -> String {
        let marker = if self.is_stale(now) { STALE_MARKER } else { "" };

        match self.effective_direction() {
            ChangeDirection::Up => format!("({}{:.2}%{})", marker, self.change_percent, UP_GLYPH),
            ChangeDirection::Down => format!("({}{:.2}%{})", marker, self.change_percent, DOWN_GLYPH),
            ChangeDirection::Flat if !marker.is_empty() => marker.to_string(),
            ChangeDirection::Flat => FLAT_GLYPH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tehran_utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Tehran
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn quote(percent: f64, direction: &str, updated_at: &str) -> Quote {
        Quote {
            price: "500000".to_string(),
            updated_at: updated_at.to_string(),
            time: "12:00".to_string(),
            change_percent: percent,
            direction: ChangeDirection::from(direction.to_string()),
        }
    }

    #[test]
    fn test_fresh_up_change() {
        let now = tehran_utc(2024, 3, 20, 12, 0, 30);
        let tag = quote(2.45, "high", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "(2.45%🟢)");
    }

    #[test]
    fn test_fresh_down_change() {
        let now = tehran_utc(2024, 3, 20, 12, 0, 30);
        let tag = quote(1.1, "low", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "(1.10%🔴)");
    }

    #[test]
    fn test_stale_up_change_carries_marker() {
        // 61 minutes old
        let now = tehran_utc(2024, 3, 20, 13, 1, 0);
        let tag = quote(2.45, "high", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "(⏳2.45%🟢)");
        assert!(tag.contains("2.45%"));
    }

    #[test]
    fn test_exactly_one_hour_is_not_stale() {
        let now = tehran_utc(2024, 3, 20, 13, 0, 0);
        let tag = quote(2.45, "high", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "(2.45%🟢)");
    }

    #[test]
    fn test_fresh_flat_is_plain_glyph() {
        let now = tehran_utc(2024, 3, 20, 12, 0, 30);
        let tag = quote(0.0, "", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "⬅️");
    }

    #[test]
    fn test_stale_flat_is_marker_alone() {
        let now = tehran_utc(2024, 3, 20, 18, 0, 0);
        let tag = quote(0.0, "", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "⏳");
    }

    #[test]
    fn test_zero_percent_overrides_direction() {
        let now = tehran_utc(2024, 3, 20, 12, 0, 30);
        let tag = quote(0.0, "high", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "⬅️");
    }

    #[test]
    fn test_unknown_direction_falls_back_to_flat() {
        let now = tehran_utc(2024, 3, 20, 12, 0, 30);
        let tag = quote(3.0, "sideways", "2024-03-20 12:00:00").change_tag(now);
        assert_eq!(tag, "⬅️");
    }

    #[test]
    fn test_unparseable_timestamp_never_stale() {
        let now = tehran_utc(2024, 3, 20, 12, 0, 30);
        let tag = quote(2.45, "high", "yesterday-ish").change_tag(now);
        assert_eq!(tag, "(2.45%🟢)");
    }

    #[test]
    fn test_direction_from_feed_values() {
        assert_eq!(ChangeDirection::from("high".to_string()), ChangeDirection::Up);
        assert_eq!(ChangeDirection::from("low".to_string()), ChangeDirection::Down);
        assert_eq!(ChangeDirection::from("".to_string()), ChangeDirection::Flat);
        assert_eq!(ChangeDirection::from("???".to_string()), ChangeDirection::Flat);
    }
}
