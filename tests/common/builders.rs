//! Test builders: ergonomic constructors for `RawRecord` and `Event`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use studyload_core::{tags, Event, RawRecord};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures in export format.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::study("20241006", "235959.123")
///     .uid("1.2.840.1")
///     .institution("North Clinic")
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    record: RawRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with study date and time set.
    pub fn study(date: &str, time: &str) -> Self {
        Self::new().date(date).time(time)
    }

    pub fn date(self, date: &str) -> Self {
        self.tag(tags::STUDY_DATE, format!("DA: '{date}'"))
    }

    pub fn time(self, time: &str) -> Self {
        self.tag(tags::STUDY_TIME, format!("TM: '{time}'"))
    }

    pub fn uid(self, uid: &str) -> Self {
        self.tag(tags::STUDY_INSTANCE_UID, format!("UI: {uid}"))
    }

    pub fn institution(self, name: &str) -> Self {
        self.tag(tags::INSTITUTION_NAME, format!("LO: '{name}'"))
    }

    /// Set a tag to an already formatted value.
    pub fn tag(mut self, tag: &str, value: impl Into<String>) -> Self {
        self.record.insert(tag, value);
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// EventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Event`] fixtures.
pub struct EventBuilder {
    timestamp: NaiveDateTime,
    identity_key: Option<String>,
}

impl EventBuilder {
    pub fn at(year: i32, month: u32, day_of_month: u32, hour: u32) -> Self {
        Self {
            timestamp: day(year, month, day_of_month)
                .and_hms_opt(hour, 0, 0)
                .expect("valid hour"),
            identity_key: None,
        }
    }

    pub fn minute(mut self, minute: u32) -> Self {
        self.timestamp = self.timestamp.with_minute(minute).expect("valid minute");
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    pub fn build(self) -> Event {
        Event::new(self.timestamp, self.identity_key)
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

pub fn day(year: i32, month: u32, day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day_of_month).expect("valid date")
}

/// Anonymous event on the hour.
pub fn event_at(year: i32, month: u32, day_of_month: u32, hour: u32) -> Event {
    EventBuilder::at(year, month, day_of_month, hour).build()
}

/// Event carrying an identity key.
pub fn keyed_event(year: i32, month: u32, day_of_month: u32, hour: u32, key: &str) -> Event {
    EventBuilder::at(year, month, day_of_month, hour).key(key).build()
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// `n` anonymous events spread over consecutive days and working hours,
/// starting on Monday 2024-01-01.
pub fn build_corpus(n: usize) -> Vec<Event> {
    let start = day(2024, 1, 1);
    (0..n)
        .map(|i| {
            let date = start + chrono::Days::new((i / 12) as u64 % 365);
            let hour = 7 + (i % 12) as u32;
            Event::new(date.and_hms_opt(hour, (i % 60) as u32, 0).expect("valid time"), None)
        })
        .collect()
}
