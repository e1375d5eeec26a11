//! Public-holiday calendars
//!
//! `weekdays_only` tariffs consult a [`HolidayCalendar`] to skip public
//! holidays. The calendar is chosen once from the `public_holidays` section
//! of the configuration and shared read-only afterwards. When no section is
//! present, [`NoHolidays`] keeps the evaluator's control flow uniform.

use crate::config::PublicHolidaysConfig;
use crate::error::{Result, TariffError};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

mod australia;

pub use australia::{AuRegion, AustralianHolidays};

/// Answers "is this date a public holiday?"
pub trait HolidayCalendar: Send + Sync {
    /// Human-readable calendar name, for logs
    fn name(&self) -> &str;

    /// Whether `date` is a public holiday.
    ///
    /// Implementations backed by an external source must return an error
    /// when they cannot answer rather than guessing.
    fn is_holiday(&self, date: NaiveDate) -> Result<bool>;
}

/// Calendar without any holidays
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn name(&self) -> &str {
        "none"
    }

    fn is_holiday(&self, _date: NaiveDate) -> Result<bool> {
        Ok(false)
    }
}

/// Explicit list of dates
#[derive(Debug, Clone, Default)]
pub struct FixedDates {
    dates: BTreeSet<NaiveDate>,
}

impl FixedDates {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parse `YYYY-MM-DD` strings
    pub fn parse<S: AsRef<str>>(dates: &[S]) -> Result<Self> {
        let parsed = dates
            .iter()
            .map(|s| {
                let s = s.as_ref().trim();
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                    TariffError::config(format!(
                        "invalid holiday date '{}', expected YYYY-MM-DD",
                        s
                    ))
                })
            })
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self { dates: parsed })
    }

    /// Dates in ascending order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for FixedDates {
    fn name(&self) -> &str {
        "fixed dates"
    }

    fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.dates.contains(&date))
    }
}

/// Union of several calendars; the first error encountered is returned
pub struct CombinedCalendar {
    name: String,
    members: Vec<Arc<dyn HolidayCalendar>>,
}

impl CombinedCalendar {
    pub fn new(members: Vec<Arc<dyn HolidayCalendar>>) -> Self {
        let name = members
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(" + ");
        Self { name, members }
    }
}

impl HolidayCalendar for CombinedCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        for member in &self.members {
            if member.is_holiday(date)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Build the calendar selected by the configuration.
///
/// A missing section yields [`NoHolidays`]. Unsupported countries or regions
/// are rejected so that `weekdays_only` tariffs are never evaluated against
/// a calendar that silently knows nothing.
pub fn from_config(config: Option<&PublicHolidaysConfig>) -> Result<Arc<dyn HolidayCalendar>> {
    let Some(config) = config else {
        return Ok(Arc::new(NoHolidays));
    };

    let base: Arc<dyn HolidayCalendar> = match config.country.trim().to_uppercase().as_str() {
        "AU" | "AUS" | "AUSTRALIA" => {
            let region = config
                .region
                .as_deref()
                .map(str::parse::<AuRegion>)
                .transpose()?;
            Arc::new(AustralianHolidays::new(region))
        }
        other => {
            return Err(TariffError::holiday(format!(
                "unsupported holiday country '{}'",
                other
            )));
        }
    };

    if config.extra_dates.is_empty() {
        return Ok(base);
    }
    let extra: Arc<dyn HolidayCalendar> = Arc::new(FixedDates::parse(&config.extra_dates)?);
    Ok(Arc::new(CombinedCalendar::new(vec![base, extra])))
}
