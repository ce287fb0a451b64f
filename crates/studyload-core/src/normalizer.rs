//! Normalizer: turns exported [`RawRecord`]s into canonical [`Event`]s.
//!
//! A record becomes an event only when both the study date (`YYYYMMDD`) and
//! the study time (`HHMMSS`, optionally followed by `.ffffff`) extract and
//! parse jointly as `%Y%m%d%H%M%S`. Fractional seconds are dropped. Anything
//! else is a [`MalformedRecord`]: the record is skipped and the batch
//! continues.

use crate::error::MalformedRecord;
use crate::extract::Extractor;
use crate::types::{tags, Event, RawRecord};
use chrono::{NaiveDateTime, Timelike};
use std::str::FromStr;

const DATE_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// How the study identity key (`(0020,000D)`) is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Never read the key; every event counts on its own.
    Ignore,
    /// Read the key when present.
    #[default]
    Optional,
    /// Skip records that have no key.
    Required,
}

impl FromStr for IdentityPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "off" => Ok(IdentityPolicy::Ignore),
            "optional" => Ok(IdentityPolicy::Optional),
            "required" | "strict" => Ok(IdentityPolicy::Required),
            _ => Err(crate::Error::invalid(
                "identity policy",
                s,
                "one of ignore, optional, required",
            )),
        }
    }
}

/// A record that was rejected, with its position in the input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: MalformedRecord,
}

/// Result of normalising a whole batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    /// Events in input order.
    pub events: Vec<Event>,
    pub skipped: Vec<SkippedRecord>,
}

impl NormalizedBatch {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Normalise one record.
pub fn normalize(record: &RawRecord, policy: IdentityPolicy) -> Result<Event, MalformedRecord> {
    let extractor = Extractor::tag_value();

    let date = extractor
        .extract_tag(record, tags::STUDY_DATE)
        .filter(|v| !v.is_empty())
        .ok_or(MalformedRecord::MissingDate)?;
    let time = extractor
        .extract_tag(record, tags::STUDY_TIME)
        .filter(|v| !v.is_empty())
        .ok_or(MalformedRecord::MissingTime)?;

    let timestamp = parse_date_time(date, time).ok_or_else(|| MalformedRecord::InvalidDateTime {
        date: date.to_string(),
        time: time.to_string(),
    })?;

    let identity_key = match policy {
        IdentityPolicy::Ignore => None,
        IdentityPolicy::Optional | IdentityPolicy::Required => extractor
            .extract_tag(record, tags::STUDY_INSTANCE_UID)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    };
    if policy == IdentityPolicy::Required && identity_key.is_none() {
        return Err(MalformedRecord::MissingIdentity);
    }

    Ok(Event::new(timestamp, identity_key))
}

/// Normalise every record, collecting skips instead of failing.
pub fn normalize_batch(records: &[RawRecord], policy: IdentityPolicy) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for (index, record) in records.iter().enumerate() {
        match normalize(record, policy) {
            Ok(event) => batch.events.push(event),
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "skipping malformed record");
                batch.skipped.push(SkippedRecord { index, reason });
            }
        }
    }
    tracing::debug!(
        events = batch.events.len(),
        skipped = batch.skipped.len(),
        "normalised batch"
    );
    batch
}

/// Parse an 8-digit date and a `HHMMSS[.ffffff]` time into a timestamp.
///
/// The fraction after the first `.` is discarded. Both parts must be pure
/// ASCII digits of the exact width; leap seconds are rejected.
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let whole_seconds = time.split('.').next().unwrap_or(time);
    if !is_digits(date, 8) || !is_digits(whole_seconds, 6) {
        return None;
    }
    let combined = format!("{date}{whole_seconds}");
    let parsed = NaiveDateTime::parse_from_str(&combined, DATE_TIME_FORMAT).ok()?;
    (parsed.nanosecond() < 1_000_000_000).then_some(parsed)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
