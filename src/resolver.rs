//! Tariff resolution
//!
//! Picks the single applicable tariff for a local date-time. Tariffs are
//! tried in declaration order and the first active one wins; overlapping
//! windows are therefore resolved in favour of whichever tariff was declared
//! first. No overlap detection happens at build time.

use crate::catalog::TariffCatalog;
use crate::error::{Result, TariffError};
use crate::holidays::HolidayCalendar;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Name of the winning tariff
    pub tariff: String,

    /// Its price
    pub price: f64,

    /// Local time the resolution was made for
    pub at: NaiveDateTime,
}

/// Resolve the active tariff at `at`.
///
/// Returns `NoApplicableTariff` when nothing matches, including for an empty
/// catalog. Holiday calendar errors are passed through unchanged.
pub fn resolve(
    catalog: &TariffCatalog,
    calendar: &dyn HolidayCalendar,
    at: NaiveDateTime,
) -> Result<Resolution> {
    for tariff in catalog {
        if tariff.is_active(at, calendar)? {
            return Ok(Resolution {
                tariff: tariff.name.clone(),
                price: tariff.price,
                at,
            });
        }
    }
    Err(TariffError::no_applicable_tariff(at))
}

/// Resolve and return only the price
pub fn resolve_price(
    catalog: &TariffCatalog,
    calendar: &dyn HolidayCalendar,
    at: NaiveDateTime,
) -> Result<f64> {
    resolve(catalog, calendar, at).map(|r| r.price)
}
