//! Public-holiday calendars and the holiday / non-holiday partitioner.
//!
//! A calendar is anything implementing [`HolidayCalendar`]. The built-in
//! [`RegionCalendar`] evaluates a static rule table per [`Region`]: fixed
//! dates, Easter-relative days and n-th weekday rules, plus weekend
//! substitution for regions that observe it.

use crate::types::Event;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Answers whether a date is a public holiday.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl<F> HolidayCalendar for F
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// Austria.
    At,
    /// Switzerland (federal holidays only).
    Ch,
    /// Germany (nationwide holidays only).
    #[default]
    De,
    /// France.
    Fr,
    /// United Kingdom, England and Wales.
    Gb,
    /// United States (federal holidays).
    Us,
}

static REGION_CODES: phf::Map<&'static str, Region> = phf::phf_map! {
    "AT" => Region::At,
    "CH" => Region::Ch,
    "DE" => Region::De,
    "FR" => Region::Fr,
    "GB" => Region::Gb,
    "UK" => Region::Gb,
    "US" => Region::Us,
};

impl Region {
    pub fn code(self) -> &'static str {
        match self {
            Region::At => "AT",
            Region::Ch => "CH",
            Region::De => "DE",
            Region::Fr => "FR",
            Region::Gb => "GB",
            Region::Us => "US",
        }
    }

    fn table(self) -> &'static RegionTable {
        match self {
            Region::At => &AT,
            Region::Ch => &CH,
            Region::De => &DE,
            Region::Fr => &FR,
            Region::Gb => &GB,
            Region::Us => &US,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGION_CODES
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| crate::Error::invalid("region", s, "one of AT, CH, DE, FR, GB, US"))
    }
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Rule {
    Fixed { month: u32, day: u32 },
    /// Days relative to Easter Sunday.
    Easter(i64),
    Nth { month: u32, weekday: Weekday, n: u8 },
    Last { month: u32, weekday: Weekday },
}

#[derive(Debug, Clone, Copy)]
struct HolidayRule {
    name: &'static str,
    rule: Rule,
    since: Option<i32>,
}

/// How a holiday falling on a weekend is compensated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observance {
    None,
    /// Saturday moves to Friday, Sunday to Monday.
    NearestWeekday,
    /// Moves forward to the next weekday that is not already a holiday.
    NextFreeWeekday,
}

struct RegionTable {
    observance: Observance,
    rules: &'static [HolidayRule],
}

const fn fixed(name: &'static str, month: u32, day: u32) -> HolidayRule {
    HolidayRule { name, rule: Rule::Fixed { month, day }, since: None }
}

const fn easter(name: &'static str, offset: i64) -> HolidayRule {
    HolidayRule { name, rule: Rule::Easter(offset), since: None }
}

const fn nth(name: &'static str, month: u32, weekday: Weekday, n: u8) -> HolidayRule {
    HolidayRule { name, rule: Rule::Nth { month, weekday, n }, since: None }
}

const fn last(name: &'static str, month: u32, weekday: Weekday) -> HolidayRule {
    HolidayRule { name, rule: Rule::Last { month, weekday }, since: None }
}

const fn since(mut rule: HolidayRule, year: i32) -> HolidayRule {
    rule.since = Some(year);
    rule
}

static DE: RegionTable = RegionTable {
    observance: Observance::None,
    rules: &[
        fixed("New Year's Day", 1, 1),
        easter("Good Friday", -2),
        easter("Easter Monday", 1),
        fixed("Labour Day", 5, 1),
        easter("Ascension Day", 39),
        easter("Whit Monday", 50),
        since(fixed("German Unity Day", 10, 3), 1990),
        fixed("Christmas Day", 12, 25),
        fixed("Second Day of Christmas", 12, 26),
    ],
};

static AT: RegionTable = RegionTable {
    observance: Observance::None,
    rules: &[
        fixed("New Year's Day", 1, 1),
        fixed("Epiphany", 1, 6),
        easter("Easter Monday", 1),
        fixed("Labour Day", 5, 1),
        easter("Ascension Day", 39),
        easter("Whit Monday", 50),
        easter("Corpus Christi", 60),
        fixed("Assumption Day", 8, 15),
        fixed("National Day", 10, 26),
        fixed("All Saints' Day", 11, 1),
        fixed("Immaculate Conception", 12, 8),
        fixed("Christmas Day", 12, 25),
        fixed("St. Stephen's Day", 12, 26),
    ],
};

static CH: RegionTable = RegionTable {
    observance: Observance::None,
    rules: &[
        fixed("New Year's Day", 1, 1),
        easter("Ascension Day", 39),
        fixed("National Day", 8, 1),
        fixed("Christmas Day", 12, 25),
    ],
};

static FR: RegionTable = RegionTable {
    observance: Observance::None,
    rules: &[
        fixed("New Year's Day", 1, 1),
        easter("Easter Monday", 1),
        fixed("Labour Day", 5, 1),
        fixed("Victory in Europe Day", 5, 8),
        easter("Ascension Day", 39),
        easter("Whit Monday", 50),
        fixed("National Day", 7, 14),
        fixed("Assumption Day", 8, 15),
        fixed("All Saints' Day", 11, 1),
        fixed("Armistice Day", 11, 11),
        fixed("Christmas Day", 12, 25),
    ],
};

static GB: RegionTable = RegionTable {
    observance: Observance::NextFreeWeekday,
    rules: &[
        fixed("New Year's Day", 1, 1),
        easter("Good Friday", -2),
        easter("Easter Monday", 1),
        nth("May Day", 5, Weekday::Mon, 1),
        last("Spring Bank Holiday", 5, Weekday::Mon),
        last("Late Summer Bank Holiday", 8, Weekday::Mon),
        fixed("Christmas Day", 12, 25),
        fixed("Boxing Day", 12, 26),
    ],
};

static US: RegionTable = RegionTable {
    observance: Observance::NearestWeekday,
    rules: &[
        fixed("New Year's Day", 1, 1),
        since(nth("Martin Luther King Jr. Day", 1, Weekday::Mon, 3), 1986),
        nth("Washington's Birthday", 2, Weekday::Mon, 3),
        last("Memorial Day", 5, Weekday::Mon),
        since(fixed("Juneteenth National Independence Day", 6, 19), 2021),
        fixed("Independence Day", 7, 4),
        nth("Labor Day", 9, Weekday::Mon, 1),
        nth("Columbus Day", 10, Weekday::Mon, 2),
        fixed("Veterans Day", 11, 11),
        nth("Thanksgiving", 11, Weekday::Thu, 4),
        fixed("Christmas Day", 12, 25),
    ],
};

/// Easter Sunday in the Gregorian calendar (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last_day = first_of_next.pred_opt()?;
    let back = (7 + last_day.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last_day.checked_sub_days(Days::new(u64::from(back)))
}

impl Rule {
    fn resolve(self, year: i32) -> Option<NaiveDate> {
        match self {
            Rule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            Rule::Easter(offset) => {
                let sunday = easter_sunday(year)?;
                if offset >= 0 {
                    sunday.checked_add_days(Days::new(offset as u64))
                } else {
                    sunday.checked_sub_days(Days::new(offset.unsigned_abs()))
                }
            }
            Rule::Nth { month, weekday, n } => {
                NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            }
            Rule::Last { month, weekday } => last_weekday_of_month(year, month, weekday),
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

// ---------------------------------------------------------------------------
// RegionCalendar
// ---------------------------------------------------------------------------

/// Rule-based calendar for one [`Region`], optionally extended with extra
/// closure days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCalendar {
    region: Region,
    extra: BTreeSet<NaiveDate>,
}

impl RegionCalendar {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            extra: BTreeSet::new(),
        }
    }

    /// Add site-specific closure days that count as holidays.
    pub fn with_extra_days(mut self, days: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra.extend(days);
        self
    }

    /// All holidays whose rule belongs to `year`, sorted by date, including
    /// substituted days. A substitute may land in a neighbouring year (US New
    /// Year's Day on a Saturday is observed on 31 December).
    pub fn holidays(&self, year: i32) -> Vec<(NaiveDate, &'static str)> {
        let table = self.region.table();
        let mut days: Vec<(NaiveDate, &'static str)> = table
            .rules
            .iter()
            .filter(|r| r.since.map_or(true, |y| year >= y))
            .filter_map(|r| r.rule.resolve(year).map(|d| (d, r.name)))
            .collect();
        days.sort_by_key(|(d, _)| *d);

        let mut observed = Vec::new();
        match table.observance {
            Observance::None => {}
            Observance::NearestWeekday => {
                for (date, name) in &days {
                    let shifted = match date.weekday() {
                        Weekday::Sat => date.pred_opt(),
                        Weekday::Sun => date.succ_opt(),
                        _ => None,
                    };
                    if let Some(s) = shifted {
                        observed.push((s, *name));
                    }
                }
            }
            Observance::NextFreeWeekday => {
                let mut taken: BTreeSet<NaiveDate> = days.iter().map(|(d, _)| *d).collect();
                for (date, name) in &days {
                    if !is_weekend(*date) {
                        continue;
                    }
                    let mut candidate = *date;
                    while let Some(next) = candidate.succ_opt() {
                        candidate = next;
                        if !is_weekend(candidate) && !taken.contains(&candidate) {
                            taken.insert(candidate);
                            observed.push((candidate, *name));
                            break;
                        }
                    }
                }
            }
        }

        days.extend(observed);
        days.sort_by_key(|(d, _)| *d);
        days
    }

    /// Name of the holiday on `date`, if any. Extra closure days are named
    /// `"Closure"`.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        let year = date.year();
        [year, year + 1]
            .into_iter()
            .flat_map(|y| self.holidays(y))
            .find(|(d, _)| *d == date)
            .map(|(_, name)| name)
            .or_else(|| self.extra.contains(&date).then_some("Closure"))
    }
}

impl HolidayCalendar for RegionCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// Events split by holiday status. Every input event lands in exactly one side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub workdays: Vec<Event>,
    pub holidays: Vec<Event>,
}

/// Split `events` into (non-holiday, holiday), preserving input order on both sides.
pub fn partition<C>(events: Vec<Event>, calendar: &C) -> Partition
where
    C: HolidayCalendar + ?Sized,
{
    let (holidays, workdays): (Vec<Event>, Vec<Event>) = events
        .into_iter()
        .partition(|e| calendar.is_holiday(e.date()));
    tracing::debug!(
        workdays = workdays.len(),
        holidays = holidays.len(),
        "partitioned events by holiday calendar"
    );
    Partition { workdays, holidays }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
