//! Applicability evaluation
//!
//! Decides whether one tariff is active at one local date-time. The checks
//! run in a fixed order (season, weekday/holiday, time of day) and all of them
//! must pass. A failed check is an ordinary `Ok(false)`; only a failing
//! holiday calendar produces an error.

use crate::error::Result;
use crate::holidays::HolidayCalendar;
use crate::tariff::{DateRange, MonthDay, Tariff, TimeWindow};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

impl TimeWindow {
    /// Whether `time` falls inside `[start, end)`, wrapping past midnight
    /// when the window is overnight
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.is_overnight() {
            time >= self.start || time < self.end
        } else {
            self.start <= time && time < self.end
        }
    }
}

impl DateRange {
    /// Whether the month/day of `date` lies in the range, bounds inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        let md = MonthDay::of(date);
        if self.wraps_year() {
            md >= self.start || md <= self.end
        } else {
            self.start <= md && md <= self.end
        }
    }
}

/// Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl Tariff {
    /// Whether this tariff applies at local time `at`
    pub fn is_active(&self, at: NaiveDateTime, calendar: &dyn HolidayCalendar) -> Result<bool> {
        let date = at.date();

        if let Some(range) = &self.date_range
            && !range.contains(date)
        {
            return Ok(false);
        }

        if self.weekdays_only && (is_weekend(date) || calendar.is_holiday(date)?) {
            return Ok(false);
        }

        Ok(self.matches_time_of_day(at.time()))
    }

    /// Time-window check alone; no windows means the whole day
    pub fn matches_time_of_day(&self, time: NaiveTime) -> bool {
        self.time_windows.is_empty() || self.time_windows.iter().any(|w| w.contains(time))
    }
}
