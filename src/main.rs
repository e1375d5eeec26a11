//! pvtariff command line
//!
//! ```sh
//! # Resolve the current tariff and upload it
//! pvtariff --config /config/config.yaml --api-key KEY --system-id 12345
//!
//! # Show what would be sent at a given local time
//! pvtariff --dry-run --at 2024-06-17T15:30
//!
//! # Keep running, one upload every 5 minutes
//! pvtariff --watch
//! ```

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use pvtariff::config::Config;
use pvtariff::holidays::{AuRegion, AustralianHolidays, FixedDates};
use pvtariff::logging::init_logging;
use pvtariff::pvoutput::{PriceSink, PvOutputClient};
use pvtariff::runner::{self, Runner};
use pvtariff::{HolidayCalendar, TariffEngine};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Report the current electricity tariff to PVOutput
#[derive(Parser, Debug)]
#[command(name = "pvtariff", version = env!("APP_VERSION"), about)]
struct Cli {
    /// Path to the configuration YAML file
    #[arg(long = "config", env = "PVTARIFF_CONFIG", default_value = "/config/config.yaml")]
    config: PathBuf,

    /// PVOutput API key
    #[arg(long, env = "PVOUTPUT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// PVOutput system ID
    #[arg(long, env = "PVOUTPUT_SYSTEM_ID")]
    system_id: Option<String>,

    /// Timezone the tariff times are expressed in (defaults to the config value)
    #[arg(long, env = "TZ")]
    timezone: Option<String>,

    /// Resolve for this local time instead of now (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    at: Option<String>,

    /// Resolve and print the tariff without uploading
    #[arg(long)]
    dry_run: bool,

    /// Keep running and upload on every interval
    #[arg(long, conflicts_with = "at")]
    watch: bool,

    /// Seconds between uploads in watch mode
    #[arg(long, default_value_t = 300)]
    interval_seconds: u64,

    /// Validate the configuration file and exit
    #[arg(long)]
    check: bool,

    /// Print the public holidays of the configured calendar for a year and exit
    #[arg(long, value_name = "YEAR")]
    list_holidays: Option<i32>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_file(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config.logging)?;
    info!("Configuration loaded from {}", cli.config.display());

    config.validate()?;
    let engine = Arc::new(TariffEngine::from_config(&config)?);

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", cli.config.display());
        println!("   Tariffs     : {}", engine.catalog().len());
        println!("   Fallback    : {}", engine.catalog().has_universal_fallback());
        println!("   Holidays    : {}", engine.calendar().name());
        println!("   Parameter   : {}", config.pvoutput.extended_param);
        return Ok(());
    }

    if let Some(year) = cli.list_holidays {
        return list_holidays(&config, year);
    }

    let tz_name = cli
        .timezone
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| config.timezone.clone());
    let tz = runner::parse_timezone(&tz_name)?;

    let sink: Option<Arc<dyn PriceSink>> = if cli.dry_run {
        None
    } else {
        let (Some(api_key), Some(system_id)) = (cli.api_key.clone(), cli.system_id.clone()) else {
            bail!("Missing required API credentials: set --api-key and --system-id");
        };
        let client: Arc<dyn PriceSink> = Arc::new(PvOutputClient::new(
            api_key,
            system_id,
            config.pvoutput.endpoint.clone(),
        )?);
        Some(client)
    };

    let runner = Runner::new(engine, sink, config.pvoutput.extended_param.clone());

    if cli.watch {
        let cycles = runner
            .run_watch(tz, Duration::from_secs(cli.interval_seconds), None)
            .await?;
        info!("Stopped after {} cycles", cycles);
        return Ok(());
    }

    let at = match &cli.at {
        Some(s) => runner::parse_local_datetime(s)?,
        None => runner::local_now(tz),
    };
    match runner.run_once(at).await {
        Ok(report) => {
            match report.acknowledgement {
                Some(ack) => println!(
                    "Sent tariff {}c ({}) to PVOutput. Response: {}",
                    report.resolution.price, report.resolution.tariff, ack
                ),
                None => println!("{}", serde_json::to_string(&report.resolution)?),
            }
            Ok(())
        }
        Err(e) => {
            error!("Tariff upload failed: {}", e);
            Err(e.into())
        }
    }
}

/// Calendar days of `year` plus the extra dates falling in it, sorted
fn holidays_for_year(
    calendar: &AustralianHolidays,
    extra_dates: &[String],
    year: i32,
) -> Result<Vec<(NaiveDate, &'static str)>> {
    let mut days = calendar.holidays_in(year)?;
    let extra = FixedDates::parse(extra_dates)?;
    days.extend(
        extra
            .dates()
            .filter(|d| d.year() == year)
            .map(|d| (d, "Extra date")),
    );
    days.sort_by_key(|(d, _)| *d);
    Ok(days)
}

fn list_holidays(config: &Config, year: i32) -> Result<()> {
    let Some(holidays) = &config.public_holidays else {
        println!("No public_holidays section configured");
        return Ok(());
    };
    let region = holidays
        .region
        .as_deref()
        .map(str::parse::<AuRegion>)
        .transpose()?;
    let calendar = AustralianHolidays::new(region);
    let days = holidays_for_year(&calendar, &holidays.extra_dates, year)?;
    println!("{} public holidays in {}:", calendar.name(), year);
    for (date, name) in days {
        println!("  {}  {:<9}  {}", date, date.format("%A"), name);
    }
    Ok(())
}
