//! Distribution aggregator.
//!
//! Two views over the same `(date, hour)` grouping:
//!
//! - [`top_n`] ranks the busiest `(date, weekday, hour)` slots.
//! - [`bucketize`] folds the slots into the 7 × 24 `(weekday, hour)` grid,
//!   keeping one observation per date so the day-to-day spread survives for
//!   box-and-whisker summaries.
//!
//! Counting is polymorphic over [`CountMode`]: raw events, or distinct study
//! identities. Under [`CountMode::DistinctIdentities`] an event without an
//! identity key counts as its own unique study.

use crate::normalizer::IdentityPolicy;
use crate::types::{day_name, Event, WEEKDAYS};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{HashMap, HashSet};

/// Number of rows [`top_n`] returns unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;
pub const HOURS_PER_DAY: u32 = 24;
/// Every distribution has exactly this many buckets.
pub const BUCKET_COUNT: usize = 7 * HOURS_PER_DAY as usize;

/// What a bucket count measures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountMode {
    #[default]
    Events,
    DistinctIdentities,
}

impl CountMode {
    /// Distinct identities when the policy reads keys and at least one event
    /// carries one; raw events otherwise.
    pub fn infer(policy: IdentityPolicy, events: &[Event]) -> Self {
        match policy {
            IdentityPolicy::Ignore => CountMode::Events,
            IdentityPolicy::Optional | IdentityPolicy::Required => {
                if events.iter().any(|e| e.identity_key.is_some()) {
                    CountMode::DistinctIdentities
                } else {
                    CountMode::Events
                }
            }
        }
    }
}

#[derive(Debug, Default)]
struct Tally<'a> {
    events: usize,
    keys: HashSet<&'a str>,
    anonymous: usize,
}

impl<'a> Tally<'a> {
    fn add(&mut self, event: &'a Event) {
        self.events += 1;
        match event.identity_key.as_deref() {
            Some(key) => {
                self.keys.insert(key);
            }
            None => self.anonymous += 1,
        }
    }

    fn count(&self, mode: CountMode) -> usize {
        match mode {
            CountMode::Events => self.events,
            CountMode::DistinctIdentities => self.keys.len() + self.anonymous,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-N
// ---------------------------------------------------------------------------

/// One `(date, weekday, hour)` slot and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopEntry {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub hour: u32,
    pub count: usize,
}

impl TopEntry {
    pub fn weekday_name(&self) -> &'static str {
        day_name(self.weekday)
    }
}

/// Count every `(date, hour)` slot that has at least one event.
///
/// Rows come out in order of first appearance in `events`.
pub fn hourly_counts(events: &[Event], mode: CountMode) -> Vec<TopEntry> {
    let mut index: HashMap<(NaiveDate, u32), usize> = HashMap::new();
    let mut slots: Vec<((NaiveDate, u32), Tally<'_>)> = Vec::new();

    for event in events {
        let key = (event.date(), event.hour());
        let slot = *index.entry(key).or_insert_with(|| {
            slots.push((key, Tally::default()));
            slots.len() - 1
        });
        slots[slot].1.add(event);
    }

    slots
        .into_iter()
        .map(|((date, hour), tally)| TopEntry {
            date,
            weekday: date.weekday(),
            hour,
            count: tally.count(mode),
        })
        .collect()
}

/// The `n` busiest slots, count descending. Equal counts keep their
/// first-appearance order.
pub fn top_n(events: &[Event], n: usize, mode: CountMode) -> Vec<TopEntry> {
    let mut rows = hourly_counts(events, mode);
    // `sort_by` is stable, which is what keeps ties in input order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Bucketize
// ---------------------------------------------------------------------------

/// Count for one date inside a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub date: NaiveDate,
    pub count: usize,
}

/// One `(weekday, hour)` cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub weekday: Weekday,
    pub hour: u32,
    /// One entry per distinct date that touched this cell, ordered by date.
    pub observations: Vec<Observation>,
}

impl Bucket {
    fn empty(weekday: Weekday, hour: u32) -> Self {
        Self {
            weekday,
            hour,
            observations: Vec::new(),
        }
    }

    /// Per-date counts, ordered by date.
    pub fn population(&self) -> Vec<usize> {
        self.observations.iter().map(|o| o.count).collect()
    }

    pub fn total(&self) -> usize {
        self.observations.iter().map(|o| o.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn weekday_name(&self) -> &'static str {
        day_name(self.weekday)
    }
}

/// The full 7 × 24 grid, Monday 00h first, Sunday 23h last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    buckets: Vec<Bucket>,
}

fn slot(weekday: Weekday, hour: u32) -> usize {
    weekday.num_days_from_monday() as usize * HOURS_PER_DAY as usize + hour as usize
}

impl Distribution {
    fn empty() -> Self {
        let buckets = WEEKDAYS
            .iter()
            .flat_map(|day| (0..HOURS_PER_DAY).map(move |hour| Bucket::empty(*day, hour)))
            .collect();
        Self { buckets }
    }

    /// Bucket for `(weekday, hour)`.
    ///
    /// # Panics
    ///
    /// Panics if `hour` is not in `0..24`.
    pub fn get(&self, weekday: Weekday, hour: u32) -> &Bucket {
        assert!(hour < HOURS_PER_DAY, "hour out of range: {hour}");
        &self.buckets[slot(weekday, hour)]
    }

    /// The 24 hourly buckets of one weekday, hour 0 first.
    pub fn weekday(&self, weekday: Weekday) -> &[Bucket] {
        let start = slot(weekday, 0);
        &self.buckets[start..start + HOURS_PER_DAY as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// Sum of every observation in every bucket.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Bucket::total).sum()
    }
}

/// Group `events` into the 168-cell `(weekday, hour)` grid.
///
/// All cells are present even when `events` is empty.
pub fn bucketize(events: &[Event], mode: CountMode) -> Distribution {
    let mut dist = Distribution::empty();
    for row in hourly_counts(events, mode) {
        dist.buckets[slot(row.weekday, row.hour)]
            .observations
            .push(Observation {
                date: row.date,
                count: row.count,
            });
    }
    for bucket in &mut dist.buckets {
        bucket.observations.sort_by_key(|o| o.date);
    }
    dist
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
