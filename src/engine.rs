//! Tariff engine
//!
//! Bundles an immutable catalog with the holiday calendar it is evaluated
//! against. Both parts are read-only after construction, so an engine can be
//! shared behind an `Arc` and queried from anywhere without locking.

use crate::catalog::TariffCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::holidays::{self, HolidayCalendar};
use crate::resolver::{self, Resolution};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Catalog plus holiday calendar
#[derive(Clone)]
pub struct TariffEngine {
    catalog: TariffCatalog,
    calendar: Arc<dyn HolidayCalendar>,
}

impl TariffEngine {
    pub fn new(catalog: TariffCatalog, calendar: Arc<dyn HolidayCalendar>) -> Self {
        Self { catalog, calendar }
    }

    /// Build the catalog and the holiday calendar from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = TariffCatalog::build(&config.tariffs)?;
        let calendar = holidays::from_config(config.public_holidays.as_ref())?;
        Ok(Self::new(catalog, calendar))
    }

    /// Resolve the active tariff at local time `at`
    pub fn resolve(&self, at: NaiveDateTime) -> Result<Resolution> {
        resolver::resolve(&self.catalog, self.calendar.as_ref(), at)
    }

    /// Resolve and return only the price
    pub fn resolve_price(&self, at: NaiveDateTime) -> Result<f64> {
        resolver::resolve_price(&self.catalog, self.calendar.as_ref(), at)
    }

    pub fn catalog(&self) -> &TariffCatalog {
        &self.catalog
    }

    pub fn calendar(&self) -> &dyn HolidayCalendar {
        self.calendar.as_ref()
    }
}

impl std::fmt::Debug for TariffEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TariffEngine")
            .field("catalog", &self.catalog)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}
