use chrono::{Duration, NaiveDate, NaiveDateTime};
use pvtariff::config::Config;
use pvtariff::{TariffEngine, TariffError};

const NSW_CONFIG: &str = r#"
pvoutput:
  extended_param: v12
public_holidays:
  country: AU
  region: NSW
tariffs:
  super_offpeak:
    price: 12.5
    times:
      - start: "10:00"
        end: "14:00"
  peak_summer:
    price: 55.2
    weekdays_only: true
    start_date: "11-01"
    end_date: "03-31"
    times:
      - start: "14:00"
        end: "20:00"
  peak_winter:
    price: 52.7
    weekdays_only: true
    start_date: "06-01"
    end_date: "08-31"
    times:
      - start: "17:00"
        end: "21:00"
  shoulder:
    price: 33.8415
    times:
      - start: "07:00"
        end: "22:00"
  offpeak:
    price: 21.3
    times: []
"#;

fn engine() -> TariffEngine {
    let config = Config::from_yaml_str(NSW_CONFIG).unwrap();
    config.validate().unwrap();
    TariffEngine::from_config(&config).unwrap()
}

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hh, mm, 0)
        .unwrap()
}

fn tariff_at(engine: &TariffEngine, when: NaiveDateTime) -> String {
    engine.resolve(when).unwrap().tariff
}

#[test]
fn summer_peak_weekday() {
    let engine = engine();
    // Wednesday
    let r = engine.resolve(at(2024, 1, 10, 19, 30)).unwrap();
    assert_eq!(r.tariff, "peak_summer");
    assert_eq!(r.price, 55.2);
}

#[test]
fn summer_peak_public_holiday_falls_back_to_shoulder() {
    let engine = engine();
    assert_eq!(tariff_at(&engine, at(2024, 1, 1, 19, 30)), "shoulder");
}

#[test]
fn summer_peak_not_on_weekend() {
    let engine = engine();
    // Saturday
    assert_eq!(tariff_at(&engine, at(2024, 1, 6, 19, 30)), "shoulder");
}

#[test]
fn winter_peak() {
    let engine = engine();
    // Monday
    assert_eq!(tariff_at(&engine, at(2024, 6, 3, 19, 30)), "peak_winter");
    // Saturday
    assert_eq!(tariff_at(&engine, at(2024, 6, 1, 19, 30)), "shoulder");
    // King's Birthday in NSW
    assert_eq!(tariff_at(&engine, at(2024, 6, 10, 19, 30)), "shoulder");
}

#[test]
fn outside_peak_seasons() {
    let engine = engine();
    assert_eq!(engine.resolve_price(at(2024, 9, 9, 19, 30)).unwrap(), 33.8415);
    assert_eq!(tariff_at(&engine, at(2024, 4, 21, 19, 30)), "shoulder");
}

#[test]
fn offpeak_outside_all_windows() {
    let engine = engine();
    assert_eq!(tariff_at(&engine, at(2024, 9, 9, 6, 30)), "offpeak");
    assert_eq!(tariff_at(&engine, at(2024, 9, 9, 22, 0)), "offpeak");
}

#[test]
fn earlier_tariff_wins_on_overlap() {
    let engine = engine();
    // Shoulder covers 11:30 too, super_offpeak is declared first
    assert_eq!(tariff_at(&engine, at(2024, 9, 9, 11, 30)), "super_offpeak");
}

#[test]
fn window_boundaries_are_half_open() {
    let engine = engine();
    assert_eq!(tariff_at(&engine, at(2024, 1, 10, 14, 0)), "peak_summer");
    assert_eq!(tariff_at(&engine, at(2024, 1, 10, 13, 59)), "super_offpeak");
    assert_eq!(tariff_at(&engine, at(2024, 1, 10, 20, 0)), "shoulder");
    assert_eq!(tariff_at(&engine, at(2024, 1, 10, 7, 0)), "shoulder");
    assert_eq!(tariff_at(&engine, at(2024, 1, 10, 6, 59)), "offpeak");
}

#[test]
fn season_wraps_across_new_year() {
    let engine = engine();
    // Tuesday 2024-12-31 and Friday 2024-11-01 sit inside Nov..Mar
    assert_eq!(tariff_at(&engine, at(2024, 12, 31, 15, 0)), "peak_summer");
    assert_eq!(tariff_at(&engine, at(2024, 11, 1, 15, 0)), "peak_summer");
    // Monday 2024-04-01 is the day after the season ends
    assert_eq!(tariff_at(&engine, at(2024, 4, 1, 15, 0)), "shoulder");
}

#[test]
fn every_minute_of_a_year_resolves() {
    let engine = engine();
    let mut when = at(2024, 1, 1, 0, 0);
    let end = at(2025, 1, 1, 0, 0);
    while when < end {
        assert!(engine.resolve(when).is_ok(), "unresolved at {}", when);
        when += Duration::minutes(17);
    }
}

#[test]
fn gap_without_fallback_is_reported() {
    let yaml = r#"
pvoutput:
  extended_param: v12
tariffs:
  day:
    price: 30.0
    times:
      - start: "07:00"
        end: "22:00"
"#;
    let config = Config::from_yaml_str(yaml).unwrap();
    let engine = TariffEngine::from_config(&config).unwrap();
    assert!(!engine.catalog().has_universal_fallback());

    let night = at(2024, 3, 5, 23, 0);
    let err = engine.resolve(night).unwrap_err();
    assert!(matches!(err, TariffError::NoApplicableTariff { at } if at == night));
}

#[test]
fn overnight_window() {
    let yaml = r#"
pvoutput:
  extended_param: v12
tariffs:
  overnight:
    price: 15.0
    times:
      - start: "22:00"
        end: "06:00"
  offpeak:
    price: 30.0
"#;
    let config = Config::from_yaml_str(yaml).unwrap();
    let engine = TariffEngine::from_config(&config).unwrap();
    assert_eq!(tariff_at(&engine, at(2024, 3, 5, 23, 30)), "overnight");
    assert_eq!(tariff_at(&engine, at(2024, 3, 5, 2, 30)), "overnight");
    assert_eq!(tariff_at(&engine, at(2024, 3, 5, 22, 0)), "overnight");
    assert_eq!(tariff_at(&engine, at(2024, 3, 5, 6, 0)), "offpeak");
    assert_eq!(tariff_at(&engine, at(2024, 3, 5, 12, 30)), "offpeak");
}

#[test]
fn unsupported_holiday_country_is_rejected() {
    let yaml = r#"
pvoutput:
  extended_param: v12
public_holidays:
  country: XX
tariffs:
  offpeak:
    price: 30.0
"#;
    let config = Config::from_yaml_str(yaml).unwrap();
    let err = TariffEngine::from_config(&config).unwrap_err();
    assert!(matches!(err, TariffError::Holiday { .. }));
}
