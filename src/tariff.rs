//! Tariff data model
//!
//! Plain value types for a single pricing rule: time-of-day windows, recurring
//! month/day ranges and the tariff itself. Everything here is immutable once
//! built by the catalog.

use crate::error::{Result, TariffError};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

/// Time-of-day window, half-open `[start, end)`.
///
/// When `end < start` the window wraps past midnight (e.g. 22:00-06:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Build a window, rejecting zero-length windows
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start == end {
            return Err(TariffError::config(format!(
                "time window {}-{} has no duration",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a window from two `HH:MM` strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    /// Whether the window wraps past midnight
    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A recurring calendar day, year ignored. Orders as `(month, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Build a month/day pair; February 29th is accepted
    pub fn new(month: u32, day: u32) -> Result<Self> {
        // 2000 is a leap year, so every real month/day combination is valid there
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(TariffError::config(format!(
                "invalid month/day {:02}-{:02}",
                month, day
            )));
        }
        Ok(Self { month, day })
    }

    /// Parse `MM-DD` or `YYYY-MM-DD`; the year, when present, is dropped
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();
        let (month, day) = match parts.as_slice() {
            [m, d] => (*m, *d),
            [y, m, d] => {
                if y.len() != 4 || y.parse::<i32>().is_err() {
                    return Err(invalid_date(s));
                }
                (*m, *d)
            }
            _ => return Err(invalid_date(s)),
        };
        if month.len() != 2 || day.len() != 2 {
            return Err(invalid_date(s));
        }
        let month = month.parse::<u32>().map_err(|_| invalid_date(s))?;
        let day = day.parse::<u32>().map_err(|_| invalid_date(s))?;
        let md = Self::new(month, day).map_err(|_| invalid_date(s))?;
        // A full date must also exist in its own year (2023-02-29 is rejected)
        if parts.len() == 3 && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
            return Err(invalid_date(s));
        }
        Ok(md)
    }

    /// Month/day of a concrete date
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

fn invalid_date(s: &str) -> TariffError {
    TariffError::config(format!(
        "invalid date '{}', expected MM-DD or YYYY-MM-DD",
        s
    ))
}

/// Seasonal range between two month/day bounds, both inclusive.
///
/// `start > end` wraps across the year boundary (e.g. 12-01 to 02-28).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl DateRange {
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Whether the range wraps across December 31st
    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One named pricing rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tariff {
    /// Unique name, as declared in the configuration
    pub name: String,

    /// Non-negative rate
    pub price: f64,

    /// Time-of-day windows; empty means the tariff applies all day
    pub time_windows: Vec<TimeWindow>,

    /// Optional recurring seasonal range
    pub date_range: Option<DateRange>,

    /// Never applies on weekends or public holidays
    pub weekdays_only: bool,
}

impl Tariff {
    /// A tariff without any constraint: matches every instant it is asked about
    pub fn is_universal_fallback(&self) -> bool {
        self.time_windows.is_empty() && self.date_range.is_none() && !self.weekdays_only
    }
}

/// Parse a strict `HH:MM` time of day
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    let invalid = || {
        TariffError::config(format!("invalid time '{}', expected HH:MM", s))
    };
    let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(invalid());
    }
    let hour = hour.parse::<u32>().map_err(|_| invalid())?;
    let minute = minute.parse::<u32>().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
