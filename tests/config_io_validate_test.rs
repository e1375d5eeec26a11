use pvtariff::config::{Config, PublicHolidaysConfig, TariffConfig, TimePeriodConfig};
use std::fs;

fn tariff(price: f64, times: &[(&str, &str)]) -> TariffConfig {
    TariffConfig {
        price,
        times: times
            .iter()
            .map(|(s, e)| TimePeriodConfig::new(s, e))
            .collect(),
        ..TariffConfig::default()
    }
}

fn base_config() -> Config {
    let mut cfg = Config::default();
    cfg.pvoutput.extended_param = "v12".to_string();
    cfg.tariffs.push("peak", tariff(45.87, &[("14:00", "20:00")]));
    cfg.tariffs.push("offpeak", tariff(25.43, &[]));
    cfg
}

#[test]
fn save_and_load_yaml_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");

    let mut cfg = base_config();
    cfg.public_holidays = Some(PublicHolidaysConfig {
        country: "AU".to_string(),
        region: Some("VIC".to_string()),
        extra_dates: vec!["2024-12-31".to_string()],
    });
    cfg.logging.file = path.with_extension("log").to_string_lossy().to_string();

    cfg.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.tariffs, cfg.tariffs);
    assert_eq!(loaded.public_holidays, cfg.public_holidays);
    assert_eq!(loaded.logging.file, cfg.logging.file);
    assert!(loaded.validate().is_ok());
}

#[test]
fn config_validation_errors() {
    assert!(base_config().validate().is_ok());

    // Extended parameter outside v1..v12
    let mut cfg = base_config();
    cfg.pvoutput.extended_param = "v13".to_string();
    assert!(cfg.validate().is_err());
    cfg.pvoutput.extended_param = "x1".to_string();
    assert!(cfg.validate().is_err());

    // No tariffs
    cfg = base_config();
    cfg.tariffs = Default::default();
    assert!(cfg.validate().is_err());

    // Negative price
    cfg = base_config();
    cfg.tariffs.push("credit", tariff(-1.0, &[]));
    assert!(cfg.validate().is_err());

    // Malformed time
    cfg = base_config();
    cfg.tariffs.push("broken", tariff(10.0, &[("25:00", "26:00")]));
    assert!(cfg.validate().is_err());

    // Zero-length window
    cfg = base_config();
    cfg.tariffs.push("instant", tariff(10.0, &[("14:30", "14:30")]));
    assert!(cfg.validate().is_err());

    // Half a season
    cfg = base_config();
    let mut seasonal = tariff(50.0, &[("14:00", "20:00")]);
    seasonal.start_date = Some("11-01".to_string());
    cfg.tariffs.push("summer", seasonal);
    assert!(cfg.validate().is_err());

    // Unknown timezone
    cfg = base_config();
    cfg.timezone = "Mars/Olympus".to_string();
    assert!(cfg.validate().is_err());

    // Bad extra holiday date
    cfg = base_config();
    cfg.public_holidays = Some(PublicHolidaysConfig {
        country: "AU".to_string(),
        region: None,
        extra_dates: vec!["31/12/2024".to_string()],
    });
    assert!(cfg.validate().is_err());
}

#[test]
fn valid_edge_cases() {
    // Zero price and no holidays section
    let mut cfg = Config::default();
    cfg.pvoutput.extended_param = "v1".to_string();
    cfg.tariffs.push("offpeak", tariff(0.0, &[]));
    assert!(cfg.validate().is_ok());

    // Overnight window
    let mut cfg = base_config();
    cfg.tariffs = Default::default();
    cfg.tariffs.push("overnight", tariff(15.0, &[("22:00", "06:00")]));
    cfg.tariffs.push("offpeak", tariff(30.0, &[]));
    assert!(cfg.validate().is_ok());

    // Season crossing new year, full dates accepted
    let mut cfg = base_config();
    let mut summer = tariff(50.0, &[("14:00", "20:00")]);
    summer.start_date = Some("2023-11-01".to_string());
    summer.end_date = Some("03-31".to_string());
    cfg.tariffs.push("summer", summer);
    assert!(cfg.validate().is_ok());
}

#[test]
fn duplicate_names_in_yaml_are_rejected() {
    let yaml = r#"
pvoutput:
  extended_param: v12
tariffs:
  peak:
    price: 40.0
    times:
      - start: "14:00"
        end: "20:00"
  peak:
    price: 45.0
    times: []
"#;
    let result = Config::from_yaml_str(yaml).and_then(|cfg| cfg.validate());
    assert!(result.is_err());
}

#[test]
fn from_file_with_invalid_yaml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"bad: [unclosed").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("Serialization error"));
}

#[test]
fn from_file_empty_and_missing() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"  \n").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration file is empty"));

    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("I/O error"));
}
