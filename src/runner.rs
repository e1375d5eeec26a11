//! Resolution and upload cycles
//!
//! One cycle = take the local time, resolve the active tariff, hand the price
//! to the sink. `run_once` propagates every failure to the caller; `run_watch`
//! repeats on a fixed interval, logs failed cycles and keeps going until
//! Ctrl-C.

use crate::engine::TariffEngine;
use crate::error::{Result, TariffError};
use crate::logging::{StructuredLogger, get_logger};
use crate::pvoutput::{PriceSink, StatusUpdate};
use crate::resolver::Resolution;
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TariffError::config(format!("unknown timezone '{}'", name)))
}

/// Current wall-clock time in `tz`, without offset
pub fn local_now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Parse a local `YYYY-MM-DDTHH:MM[:SS]` (a space works as separator too)
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    Err(TariffError::validation(
        "at",
        format!("invalid local date-time '{}', expected YYYY-MM-DDTHH:MM", s),
    ))
}

/// Result of one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub resolution: Resolution,

    /// Sink acknowledgement; `None` when nothing was uploaded
    pub acknowledgement: Option<String>,
}

/// Drives resolution cycles against an optional sink
pub struct Runner {
    engine: Arc<TariffEngine>,
    sink: Option<Arc<dyn PriceSink>>,
    extended_param: String,
    logger: StructuredLogger,
}

impl Runner {
    /// `sink = None` runs in dry-run mode
    pub fn new(
        engine: Arc<TariffEngine>,
        sink: Option<Arc<dyn PriceSink>>,
        extended_param: String,
    ) -> Self {
        Self {
            engine,
            sink,
            extended_param,
            logger: get_logger("runner"),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.sink.is_none()
    }

    /// Resolve at `at` and upload the price
    pub async fn run_once(&self, at: NaiveDateTime) -> Result<CycleReport> {
        let resolution = self.engine.resolve(at)?;
        self.logger.info(&format!(
            "Tariff '{}' active at {} (price {})",
            resolution.tariff, at, resolution.price
        ));

        let Some(sink) = &self.sink else {
            self.logger.info("Dry run, upload skipped");
            return Ok(CycleReport {
                resolution,
                acknowledgement: None,
            });
        };

        let update = StatusUpdate::new(self.extended_param.clone(), resolution.price, at);
        let ack = sink.send(&update).await?;
        self.logger.info(&format!(
            "Sent tariff {} to PVOutput ({}={} at {} {}): {}",
            resolution.price,
            update.param,
            update.price,
            update.date_str(),
            update.time_str(),
            ack
        ));
        Ok(CycleReport {
            resolution,
            acknowledgement: Some(ack),
        })
    }

    /// Run a cycle every `interval` using the current time in `tz`.
    ///
    /// Failed cycles are logged and skipped. Returns after Ctrl-C or after
    /// `max_cycles` cycles when given.
    pub async fn run_watch(&self, tz: Tz, interval: Duration, max_cycles: Option<u64>) -> Result<u64> {
        if interval.is_zero() {
            return Err(TariffError::config("watch interval must be greater than 0"));
        }

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut cycles: u64 = 0;

        self.logger.info(&format!(
            "Watching tariffs every {}s in {}",
            interval.as_secs(),
            tz
        ));

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    self.logger.info("Shutdown requested");
                    break;
                }
            }

            let now = local_now(tz);
            match self.run_once(now).await {
                Ok(_) => {}
                Err(e @ TariffError::NoApplicableTariff { .. }) => {
                    self.logger
                        .error(&format!("Skipping cycle, configuration gap: {}", e));
                }
                Err(e) => {
                    self.logger.error(&format!("Cycle failed: {}", e));
                }
            }

            cycles += 1;
            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }
        }
        Ok(cycles)
    }
}
