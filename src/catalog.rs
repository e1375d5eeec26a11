//! Tariff catalog
//!
//! The ordered, immutable set of tariffs built once from configuration.
//! Declaration order is significant: the resolver returns the first active
//! tariff, so earlier entries take priority over later ones.

use crate::config::{TariffConfig, TariffsConfig};
use crate::error::{Result, TariffError};
use crate::tariff::{DateRange, MonthDay, Tariff, TimeWindow};
use std::collections::HashSet;

/// Ordered collection of tariffs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffCatalog {
    tariffs: Vec<Tariff>,
}

impl TariffCatalog {
    /// Build the catalog from the configured tariff table.
    ///
    /// Fails on duplicate names, negative or non-finite prices, malformed or
    /// zero-length time windows and half-specified seasons.
    pub fn build(config: &TariffsConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut tariffs = Vec::with_capacity(config.len());
        for (name, tariff) in config.iter() {
            if !seen.insert(name) {
                return Err(TariffError::config(format!(
                    "duplicate tariff name '{}'",
                    name
                )));
            }
            tariffs.push(build_tariff(name, tariff)?);
        }
        Ok(Self { tariffs })
    }

    /// Wrap already-built tariffs, enforcing the same invariants as `build`
    pub fn from_tariffs(tariffs: Vec<Tariff>) -> Result<Self> {
        let mut seen = HashSet::new();
        for tariff in &tariffs {
            if !seen.insert(tariff.name.as_str()) {
                return Err(TariffError::config(format!(
                    "duplicate tariff name '{}'",
                    tariff.name
                )));
            }
            check_price(&tariff.name, tariff.price)?;
            // Fields are public, so windows may not have gone through `TimeWindow::new`
            for window in &tariff.time_windows {
                TimeWindow::new(window.start, window.end).map_err(|e| {
                    TariffError::config(format!("tariff '{}': {}", tariff.name, e))
                })?;
            }
        }
        Ok(Self { tariffs })
    }

    /// Tariffs in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, Tariff> {
        self.tariffs.iter()
    }

    pub fn len(&self) -> usize {
        self.tariffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tariffs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Tariff> {
        self.tariffs.iter().find(|t| t.name == name)
    }

    /// Whether some tariff matches every instant it is reached at
    pub fn has_universal_fallback(&self) -> bool {
        self.tariffs.iter().any(Tariff::is_universal_fallback)
    }
}

impl<'a> IntoIterator for &'a TariffCatalog {
    type Item = &'a Tariff;
    type IntoIter = std::slice::Iter<'a, Tariff>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_price(name: &str, price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(TariffError::config(format!(
            "tariff '{}' has invalid price {}",
            name, price
        )));
    }
    Ok(())
}

fn build_tariff(name: &str, config: &TariffConfig) -> Result<Tariff> {
    let context = |e: TariffError| TariffError::config(format!("tariff '{}': {}", name, e));

    check_price(name, config.price)?;

    let time_windows = config
        .times
        .iter()
        .map(|p| TimeWindow::parse(&p.start, &p.end))
        .collect::<Result<Vec<_>>>()
        .map_err(context)?;

    let date_range = match (&config.start_date, &config.end_date) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(DateRange::new(
            MonthDay::parse(start).map_err(context)?,
            MonthDay::parse(end).map_err(context)?,
        )),
        _ => {
            return Err(TariffError::config(format!(
                "tariff '{}' must set both start_date and end_date",
                name
            )));
        }
    };

    Ok(Tariff {
        name: name.to_string(),
        price: config.price,
        time_windows,
        date_range,
        weekdays_only: config.weekdays_only,
    })
}
