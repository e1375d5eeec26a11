//! PVOutput upload transport
//!
//! Sends the resolved price as an extended parameter of a PVOutput status
//! update. PVOutput expects one data point per 5-minute slot, so the status
//! time is floored to the slot boundary.

use crate::error::{Result, TariffError};
#[cfg(feature = "upload")]
use crate::logging::{LogContext, get_logger_with_context};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike};

/// Anything that accepts a status update, the PVOutput client in production
#[async_trait]
pub trait PriceSink: Send + Sync {
    /// Deliver one update; returns a short human-readable acknowledgement
    async fn send(&self, update: &StatusUpdate) -> Result<String>;
}

/// One add-status request
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    /// Extended parameter name (`v1`..`v12`)
    pub param: String,

    /// Price to report
    pub price: f64,

    /// Local time of the reading
    pub at: NaiveDateTime,
}

impl StatusUpdate {
    pub fn new<S: Into<String>>(param: S, price: f64, at: NaiveDateTime) -> Self {
        Self {
            param: param.into(),
            price,
            at,
        }
    }

    /// `YYYYMMDD`
    pub fn date_str(&self) -> String {
        self.at.format("%Y%m%d").to_string()
    }

    /// `HH:MM`, minute floored to a multiple of 5
    pub fn time_str(&self) -> String {
        let minute = self.at.minute() - self.at.minute() % 5;
        format!("{:02}:{:02}", self.at.hour(), minute)
    }

    /// `application/x-www-form-urlencoded` request body
    pub fn form_body(&self) -> String {
        format!(
            "{}={}&d={}&t={}",
            self.param,
            self.price,
            self.date_str(),
            self.time_str()
        )
    }
}

/// PVOutput API client
pub struct PvOutputClient {
    #[cfg(feature = "upload")]
    api_key: String,
    #[cfg(feature = "upload")]
    system_id: String,
    #[cfg(feature = "upload")]
    endpoint: String,
    #[cfg(feature = "upload")]
    http: reqwest::Client,
    #[cfg(feature = "upload")]
    logger: crate::logging::StructuredLogger,
}

impl PvOutputClient {
    /// Create a new client for one system
    pub fn new(api_key: String, system_id: String, endpoint: String) -> Result<Self> {
        if api_key.trim().is_empty() || system_id.trim().is_empty() {
            return Err(TariffError::config("Missing required API credentials"));
        }
        #[cfg(feature = "upload")]
        {
            let http = reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()?;
            let logger = get_logger_with_context(
                LogContext::new("pvoutput").with_system_id(system_id.trim().to_string()),
            );
            Ok(Self {
                api_key,
                system_id,
                endpoint,
                http,
                logger,
            })
        }
        #[cfg(not(feature = "upload"))]
        {
            let _ = (&api_key, &system_id, &endpoint);
            Err(TariffError::config(
                "PVOutput upload support is disabled in this build",
            ))
        }
    }
}

#[async_trait]
impl PriceSink for PvOutputClient {
    #[cfg(feature = "upload")]
    async fn send(&self, update: &StatusUpdate) -> Result<String> {
        use reqwest::header::{CONTENT_TYPE, USER_AGENT};

        self.logger.debug(&format!(
            "POST {} {}",
            self.endpoint,
            update.form_body()
        ));

        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-Pvoutput-Apikey", self.api_key.trim())
            .header("X-Pvoutput-SystemId", self.system_id.trim())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(USER_AGENT, concat!("pvtariff/", env!("APP_VERSION")))
            .body(update.form_body())
            .send()
            .await?;

        let status = resp.status();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                self.logger
                    .warn(&format!("Failed to read PVOutput response body: {}", e));
                format!("<unreadable response body: {}>", e)
            }
        };
        if !status.is_success() {
            self.logger
                .error(&format!("PVOutput API error: {} {}", status, body.trim()));
            return Err(TariffError::api(format!(
                "PVOutput returned {}: {}",
                status,
                body.trim()
            )));
        }
        Ok(format!("{} - {}", status.as_u16(), body.trim()))
    }

    #[cfg(not(feature = "upload"))]
    async fn send(&self, _update: &StatusUpdate) -> Result<String> {
        Err(TariffError::config(
            "PVOutput upload support is disabled in this build",
        ))
    }
}
