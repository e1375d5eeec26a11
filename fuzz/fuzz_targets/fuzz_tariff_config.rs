#![no_main]
use chrono::{Duration, NaiveDate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = pvtariff::Config::from_yaml_str(text) else {
        return;
    };
    let _ = config.validate();
    let Ok(engine) = pvtariff::TariffEngine::from_config(&config) else {
        return;
    };

    // Walk one day in 7-minute steps; resolution must never panic
    let Some(start) = NaiveDate::from_ymd_opt(2024, 12, 31).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return;
    };
    for step in 0..(24 * 60 / 7) {
        let _ = engine.resolve(start + Duration::minutes(step * 7));
    }
});
