//! # pvtariff - Time-of-use tariff resolver for PVOutput
//!
//! Works out which electricity tariff applies at a given local time and
//! reports its price to PVOutput as an extended parameter, so that the
//! monitoring graphs show the cost of grid energy next to generation.
//!
//! ## Architecture
//!
//! - `tariff`: tariff data model (time windows, seasonal ranges)
//! - `catalog`: ordered, immutable tariff catalog built from configuration
//! - `evaluator`: per-tariff applicability checks
//! - `resolver`: first-match resolution over the catalog
//! - `engine`: catalog + holiday calendar, ready to share
//! - `holidays`: public-holiday calendars
//! - `config`: YAML configuration loading and validation
//! - `pvoutput`: PVOutput upload transport
//! - `runner`: one-shot and periodic resolve-and-upload cycles
//! - `logging`: structured logging and tracing
//!
//! ## Resolution rules
//!
//! Tariffs are tried in the order they are declared; the first active one
//! wins. A tariff is active when its seasonal range (if any) contains the
//! date, it is not excluded as a weekend or public holiday (for
//! `weekdays_only` tariffs) and the time of day lies inside one of its
//! windows. A tariff without windows matches all day and is the natural
//! fallback, so it belongs at the end of the list.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod holidays;
pub mod logging;
pub mod pvoutput;
pub mod resolver;
pub mod runner;
pub mod tariff;

// Re-export commonly used types
pub use catalog::TariffCatalog;
pub use config::Config;
pub use engine::TariffEngine;
pub use error::{Result, TariffError};
pub use holidays::HolidayCalendar;
pub use resolver::{Resolution, resolve, resolve_price};
pub use tariff::Tariff;
