//! Core types for studyload-core.
//!
//! This module defines the data structures shared across all pipeline
//! stages: the exported [`RawRecord`], the reconstructed [`Event`], and the
//! tag identifiers the pipeline reads.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tag identifiers in the `"(GGGG,EEEE)"` form used as record keys.
pub mod tags {
    /// Study Date, `DA`.
    pub const STUDY_DATE: &str = "(0008,0020)";
    /// Study Time, `TM`.
    pub const STUDY_TIME: &str = "(0008,0030)";
    /// Study Instance UID, `UI`. Used as the identity key.
    pub const STUDY_INSTANCE_UID: &str = "(0020,000D)";
    /// Institution Name, `LO`.
    pub const INSTITUTION_NAME: &str = "(0008,0080)";
}

/// Weekdays in the fixed Monday-first order used for every bucket table.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English day name (`"Monday"` … `"Sunday"`).
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ---------------------------------------------------------------------------
// RawRecord
// ---------------------------------------------------------------------------

/// One exported study record: tag identifier → formatted value string.
///
/// Values keep whatever prefix the exporter wrote (`"DA: '20241006'"`,
/// `"UI: 1.2.840..."`); the extractor strips it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatted value stored under `tag`, if any.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields.get(tag).map(String::as_str)
    }

    pub fn insert(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(tag.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A study event reconstructed from one [`RawRecord`].
///
/// Only the timestamp is stored; `date`, `hour` and `weekday` are derived
/// from it so they can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    /// Study date and time at whole-second resolution.
    pub timestamp: NaiveDateTime,
    /// Opaque study identity used for deduplication, when known.
    pub identity_key: Option<String>,
}

impl Event {
    pub fn new(timestamp: NaiveDateTime, identity_key: Option<String>) -> Self {
        Self {
            timestamp,
            identity_key,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of day, always in `0..=23`.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    pub fn weekday_name(&self) -> &'static str {
        day_name(self.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_derives_calendar_fields_from_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 10, 6)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let event = Event::new(ts, None);
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 10, 6).unwrap());
        assert_eq!(event.hour(), 23);
        assert_eq!(event.weekday(), Weekday::Sun);
        assert_eq!(event.weekday_name(), "Sunday");
    }

    #[test]
    fn weekdays_start_on_monday() {
        assert_eq!(WEEKDAYS[0], Weekday::Mon);
        assert_eq!(WEEKDAYS[6], Weekday::Sun);
        let names: Vec<_> = WEEKDAYS.iter().map(|d| day_name(*d)).collect();
        assert_eq!(names[4], "Friday");
    }

    #[test]
    fn raw_record_lookup() {
        let record: RawRecord = [("(0008,0020)", "DA: '20241006'")].into_iter().collect();
        assert_eq!(record.get(tags::STUDY_DATE), Some("DA: '20241006'"));
        assert_eq!(record.get(tags::STUDY_TIME), None);
        assert_eq!(record.len(), 1);
    }
}
