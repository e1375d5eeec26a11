//! Configuration management for pvtariff
//!
//! This module handles loading and validation of the application
//! configuration from YAML files: the ordered tariff table, the optional
//! public-holiday calendar, the PVOutput target and logging.

use crate::error::{Result, TariffError};
use crate::tariff::{MonthDay, TimeWindow, parse_hhmm};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

mod defaults;

pub use defaults::{DEFAULT_ENDPOINT, DEFAULT_TIMEZONE};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// PVOutput upload target
    pub pvoutput: PvOutputConfig,

    /// Tariffs in declaration order; earlier entries win on overlap
    pub tariffs: TariffsConfig,

    /// Optional public-holiday calendar used by `weekdays_only` tariffs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_holidays: Option<PublicHolidaysConfig>,

    /// IANA timezone the tariff times are expressed in
    #[serde(default = "defaults::default_timezone")]
    pub timezone: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// PVOutput target configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PvOutputConfig {
    /// Extended parameter receiving the price (`v1`..`v12`)
    pub extended_param: String,

    /// Add-status endpoint
    #[serde(default = "defaults::default_endpoint")]
    pub endpoint: String,
}

/// A single tariff as written in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    /// Rate reported while this tariff is active
    pub price: f64,

    /// Time-of-day windows; empty makes this a fallback
    #[serde(default)]
    pub times: Vec<TimePeriodConfig>,

    /// Skip weekends and public holidays
    #[serde(default)]
    pub weekdays_only: bool,

    /// Season start, `MM-DD` or `YYYY-MM-DD` (year ignored)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Season end, `MM-DD` or `YYYY-MM-DD` (year ignored)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Time window as written in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriodConfig {
    /// Start time in HH:MM format
    pub start: String,

    /// End time in HH:MM format
    pub end: String,
}

impl TimePeriodConfig {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Ordered `name -> tariff` table.
///
/// Entries are kept exactly as they appear in the document, duplicates
/// included, so the catalog builder can reject repeated names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TariffsConfig {
    entries: Vec<(String, TariffConfig)>,
}

impl TariffsConfig {
    /// Build from explicit entries, keeping their order
    pub fn from_entries(entries: Vec<(String, TariffConfig)>) -> Self {
        Self { entries }
    }

    /// Append an entry
    pub fn push<S: Into<String>>(&mut self, name: S, tariff: TariffConfig) {
        self.entries.push((name.into(), tariff));
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TariffConfig)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given name
    pub fn get(&self, name: &str) -> Option<&TariffConfig> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }
}

impl Serialize for TariffsConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, tariff) in &self.entries {
            map.serialize_entry(name, tariff)?;
        }
        map.end()
    }
}

struct TariffsVisitor;

impl<'de> Visitor<'de> for TariffsVisitor {
    type Value = TariffsConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of tariff names to tariffs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, tariff)) = access.next_entry::<String, TariffConfig>()? {
            entries.push((name, tariff));
        }
        Ok(TariffsConfig { entries })
    }
}

impl<'de> Deserialize<'de> for TariffsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TariffsVisitor)
    }
}

/// Public-holiday calendar selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHolidaysConfig {
    /// ISO 3166 country code
    pub country: String,

    /// Optional subdivision (state/territory) code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Additional non-working days, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_dates: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-specific level
    pub console_level: Option<String>,

    /// Optional file-specific level
    pub file_level: Option<String>,

    /// Log file path or directory; empty disables file output
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Err(TariffError::config("Configuration file is empty"));
        }
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        let default_paths = [
            "pvtariff.yaml",
            "/config/config.yaml",
            "/etc/pvtariff/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Err(TariffError::config(format!(
            "No configuration file found (searched {})",
            default_paths.join(", ")
        )))
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.validate_pvoutput()?;
        self.validate_tariffs()?;
        if let Some(holidays) = &self.public_holidays {
            validate_public_holidays(holidays)?;
        }

        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(TariffError::validation(
                "timezone",
                format!("unknown timezone '{}'", self.timezone),
            ));
        }

        crate::logging::parse_log_level(&self.logging.level)
            .map_err(|e| TariffError::validation("logging.level", e.to_string()))?;

        Ok(())
    }

    fn validate_pvoutput(&self) -> Result<()> {
        let param = self.pvoutput.extended_param.as_str();
        let number = param
            .strip_prefix('v')
            .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            .and_then(|n| n.parse::<u32>().ok());
        match number {
            None => Err(TariffError::validation(
                "pvoutput.extended_param",
                "must be in format 'v1' to 'v12'",
            )),
            Some(n) if !(1..=12).contains(&n) => Err(TariffError::validation(
                "pvoutput.extended_param",
                "must be between v1 and v12",
            )),
            Some(_) => Ok(()),
        }
    }

    fn validate_tariffs(&self) -> Result<()> {
        if self.tariffs.is_empty() {
            return Err(TariffError::validation("tariffs", "cannot be empty"));
        }

        let mut seen = std::collections::HashSet::new();
        for (name, tariff) in self.tariffs.iter() {
            let field = format!("tariffs.{}", name);
            if !seen.insert(name) {
                return Err(TariffError::validation(field, "duplicate tariff name"));
            }
            validate_tariff(&field, tariff)?;
        }
        Ok(())
    }
}

fn validate_tariff(field: &str, tariff: &TariffConfig) -> Result<()> {
    if !tariff.price.is_finite() {
        return Err(TariffError::validation(
            format!("{}.price", field),
            "must be a number".to_string(),
        ));
    }
    if tariff.price < 0.0 {
        return Err(TariffError::validation(
            format!("{}.price", field),
            "cannot be negative".to_string(),
        ));
    }

    for (i, period) in tariff.times.iter().enumerate() {
        let period_field = format!("{}.times[{}]", field, i);
        parse_hhmm(&period.start).map_err(|e| {
            TariffError::validation(format!("{}.start", period_field), e.to_string())
        })?;
        parse_hhmm(&period.end).map_err(|e| {
            TariffError::validation(format!("{}.end", period_field), e.to_string())
        })?;
        TimeWindow::parse(&period.start, &period.end)
            .map_err(|e| TariffError::validation(period_field, e.to_string()))?;
    }

    match (&tariff.start_date, &tariff.end_date) {
        (None, None) => {}
        (Some(start), Some(end)) => {
            MonthDay::parse(start).map_err(|e| {
                TariffError::validation(format!("{}.start_date", field), e.to_string())
            })?;
            MonthDay::parse(end).map_err(|e| {
                TariffError::validation(format!("{}.end_date", field), e.to_string())
            })?;
        }
        _ => {
            return Err(TariffError::validation(
                field.to_string(),
                "seasonal tariffs must have both start_date and end_date".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_public_holidays(holidays: &PublicHolidaysConfig) -> Result<()> {
    if holidays.country.trim().is_empty() {
        return Err(TariffError::validation(
            "public_holidays.country",
            "cannot be empty",
        ));
    }
    if let Some(region) = &holidays.region
        && region.trim().is_empty()
    {
        return Err(TariffError::validation(
            "public_holidays.region",
            "cannot be empty when present",
        ));
    }
    for (i, date) in holidays.extra_dates.iter().enumerate() {
        if chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
            return Err(TariffError::validation(
                format!("public_holidays.extra_dates[{}]", i),
                format!("invalid date '{}', expected YYYY-MM-DD", date),
            ));
        }
    }
    Ok(())
}
