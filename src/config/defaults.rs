use super::*;

/// PVOutput add-status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://pvoutput.org/service/r2/addstatus.jsp";

/// Timezone used when neither the config nor the command line names one
pub const DEFAULT_TIMEZONE: &str = "Australia/Sydney";

pub(super) fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

pub(super) fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for PvOutputConfig {
    fn default() -> Self {
        Self {
            extended_param: "v12".to_string(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: String::new(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            price: 0.0,
            times: Vec::new(),
            weekdays_only: false,
            start_date: None,
            end_date: None,
        }
    }
}

/// An empty configuration; it has no tariffs and therefore does not validate
impl Default for Config {
    fn default() -> Self {
        Self {
            pvoutput: PvOutputConfig::default(),
            tariffs: TariffsConfig::default(),
            public_holidays: None,
            timezone: default_timezone(),
            logging: LoggingConfig::default(),
        }
    }
}
