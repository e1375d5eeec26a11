//! Australian public holidays.
//!
//! National days:
//! * New Year's Day (Jan 1, Monday substitute when on a weekend)
//! * Australia Day (Jan 26, Monday substitute when on a weekend)
//! * Good Friday, Easter Monday
//! * Anzac Day (Apr 25)
//! * Christmas Day, Boxing Day (weekday substitutes when on a weekend)
//!
//! Regional days depend on the state or territory; see [`AuRegion`].

use super::HolidayCalendar;
use crate::error::{Result, TariffError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

/// Australian state or territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuRegion {
    Act,
    Nsw,
    Nt,
    Qld,
    Sa,
    Tas,
    Vic,
    Wa,
}

impl AuRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Act => "ACT",
            Self::Nsw => "NSW",
            Self::Nt => "NT",
            Self::Qld => "QLD",
            Self::Sa => "SA",
            Self::Tas => "TAS",
            Self::Vic => "VIC",
            Self::Wa => "WA",
        }
    }
}

impl FromStr for AuRegion {
    type Err = TariffError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACT" => Ok(Self::Act),
            "NSW" => Ok(Self::Nsw),
            "NT" => Ok(Self::Nt),
            "QLD" => Ok(Self::Qld),
            "SA" => Ok(Self::Sa),
            "TAS" => Ok(Self::Tas),
            "VIC" => Ok(Self::Vic),
            "WA" => Ok(Self::Wa),
            other => Err(TariffError::holiday(format!(
                "unsupported Australian region '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for AuRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule-based Australian calendar, national days plus optional regional days
#[derive(Debug, Clone)]
pub struct AustralianHolidays {
    region: Option<AuRegion>,
    name: String,
}

impl AustralianHolidays {
    pub fn new(region: Option<AuRegion>) -> Self {
        let name = match region {
            Some(r) => format!("AU-{}", r),
            None => "AU".to_string(),
        };
        Self { region, name }
    }

    pub fn region(&self) -> Option<AuRegion> {
        self.region
    }

    /// All holidays of `year`, sorted by date. A date may appear twice when
    /// two holidays coincide.
    pub fn holidays_in(&self, year: i32) -> Result<Vec<(NaiveDate, &'static str)>> {
        let ymd = |m: u32, d: u32| {
            NaiveDate::from_ymd_opt(year, m, d)
                .ok_or_else(|| TariffError::holiday(format!("year {} out of range", year)))
        };
        let easter = easter_sunday(year)?;
        let mut days: Vec<(NaiveDate, &'static str)> = Vec::new();

        let new_year = ymd(1, 1)?;
        days.push((new_year, "New Year's Day"));
        if let Some(observed) = monday_if_weekend(new_year) {
            days.push((observed, "New Year's Day (observed)"));
        }

        let australia_day = ymd(1, 26)?;
        days.push((australia_day, "Australia Day"));
        if let Some(observed) = monday_if_weekend(australia_day) {
            days.push((observed, "Australia Day (observed)"));
        }

        days.push((easter - Duration::days(2), "Good Friday"));
        days.push((easter + Duration::days(1), "Easter Monday"));
        days.push((ymd(4, 25)?, "Anzac Day"));

        let christmas = ymd(12, 25)?;
        let boxing = ymd(12, 26)?;
        days.push((christmas, "Christmas Day"));
        days.push((boxing, "Boxing Day"));
        match christmas.weekday() {
            // Christmas Sat, Boxing Sun: both move to Mon/Tue
            Weekday::Sat => {
                days.push((ymd(12, 27)?, "Christmas Day (observed)"));
                days.push((ymd(12, 28)?, "Boxing Day (observed)"));
            }
            // Christmas Sun, Boxing Mon: Christmas moves to Tue
            Weekday::Sun => days.push((ymd(12, 27)?, "Christmas Day (observed)")),
            // Christmas Fri, Boxing Sat: Boxing moves to Mon
            Weekday::Fri => days.push((ymd(12, 28)?, "Boxing Day (observed)")),
            _ => {}
        }

        if let Some(region) = self.region {
            regional_days(region, year, easter, &mut days)?;
        }

        days.sort_by_key(|(d, _)| *d);
        Ok(days)
    }
}

impl HolidayCalendar for AustralianHolidays {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        Ok(self
            .holidays_in(date.year())?
            .iter()
            .any(|(d, _)| *d == date))
    }
}

fn regional_days(
    region: AuRegion,
    year: i32,
    easter: NaiveDate,
    days: &mut Vec<(NaiveDate, &'static str)>,
) -> Result<()> {
    use AuRegion::*;
    use Weekday::{Mon, Tue};

    if matches!(region, Act | Nsw | Nt | Qld | Sa | Vic) {
        days.push((easter - Duration::days(1), "Easter Saturday"));
    }
    if matches!(region, Act | Nsw | Qld | Vic) || (region == Wa && year >= 2022) {
        days.push((easter, "Easter Sunday"));
    }

    match region {
        Act | Nsw | Sa => days.push((nth_weekday(year, 10, Mon, 1)?, "Labour Day")),
        Qld => days.push((nth_weekday(year, 5, Mon, 1)?, "Labour Day")),
        Nt => days.push((nth_weekday(year, 5, Mon, 1)?, "May Day")),
        Vic => days.push((nth_weekday(year, 3, Mon, 2)?, "Labour Day")),
        Tas => days.push((nth_weekday(year, 3, Mon, 2)?, "Eight Hours Day")),
        Wa => days.push((nth_weekday(year, 3, Mon, 1)?, "Labour Day")),
    }

    let sovereign = if year >= 2023 {
        "King's Birthday"
    } else {
        "Queen's Birthday"
    };
    match region {
        Qld => days.push((nth_weekday(year, 10, Mon, 1)?, sovereign)),
        Wa => {
            let proclaimed = from_table(WA_SOVEREIGN_BIRTHDAY, year);
            let day = match proclaimed {
                Some(d) => d,
                None => last_weekday(year, 9, Mon)?,
            };
            days.push((day, sovereign));
        }
        _ => days.push((nth_weekday(year, 6, Mon, 2)?, sovereign)),
    }

    match region {
        Act => {
            days.push((nth_weekday(year, 3, Mon, 2)?, "Canberra Day"));
            if year >= 2018 {
                let may_27 = NaiveDate::from_ymd_opt(year, 5, 27)
                    .ok_or_else(|| TariffError::holiday(format!("year {} out of range", year)))?;
                days.push((next_weekday_on_or_after(may_27, Mon), "Reconciliation Day"));
            }
        }
        Nt => days.push((nth_weekday(year, 8, Mon, 1)?, "Picnic Day")),
        Sa => days.push((nth_weekday(year, 3, Mon, 2)?, "Adelaide Cup Day")),
        Vic => {
            days.push((nth_weekday(year, 11, Tue, 1)?, "Melbourne Cup Day"));
            if let Some(d) = from_table(VIC_GRAND_FINAL_FRIDAY, year) {
                days.push((d, "Friday before the AFL Grand Final"));
            }
        }
        Wa => days.push((nth_weekday(year, 6, Mon, 1)?, "Western Australia Day")),
        Nsw | Qld | Tas => {}
    }
    Ok(())
}

// WA sets the sovereign's birthday by proclamation; the last Monday of
// September is only the usual choice
const WA_SOVEREIGN_BIRTHDAY: &[(i32, u32, u32)] = &[
    (2012, 10, 1),
    (2013, 9, 30),
    (2014, 9, 29),
    (2015, 9, 28),
    (2016, 9, 26),
    (2017, 9, 25),
    (2018, 9, 24),
    (2019, 9, 30),
    (2020, 9, 28),
    (2021, 9, 27),
    (2022, 9, 26),
    (2023, 9, 25),
    (2024, 9, 23),
    (2025, 9, 29),
];

// Follows the AFL fixture, declared each year
const VIC_GRAND_FINAL_FRIDAY: &[(i32, u32, u32)] = &[
    (2015, 10, 2),
    (2016, 9, 30),
    (2017, 9, 29),
    (2018, 9, 28),
    (2019, 9, 27),
    (2020, 10, 23),
    (2021, 9, 24),
    (2022, 9, 23),
    (2023, 9, 29),
    (2024, 9, 27),
    (2025, 9, 26),
];

fn from_table(table: &[(i32, u32, u32)], year: i32) -> Option<NaiveDate> {
    table
        .iter()
        .find(|(y, _, _)| *y == year)
        .and_then(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

fn monday_if_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => Some(date + Duration::days(2)),
        Weekday::Sun => Some(date + Duration::days(1)),
        _ => None,
    }
}

fn next_weekday_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = (7 + weekday.num_days_from_monday() - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(offset))
}

/// `n`-th (1-based) `weekday` of a month
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Result<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n).ok_or_else(|| {
        TariffError::holiday(format!(
            "no {:?} #{} in {}-{:02}",
            weekday, n, year, month
        ))
    })
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| TariffError::holiday(format!("year {} out of range", year)))?;
    let last = first_of_next - Duration::days(1);
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    Ok(last - Duration::days(i64::from(back)))
}

/// Gregorian Easter Sunday (anonymous Gregorian computus)
pub(crate) fn easter_sunday(year: i32) -> Result<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or_else(|| TariffError::holiday(format!("cannot compute Easter for {}", year)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_dates() {
        assert_eq!(easter_sunday(2023).unwrap(), date(2023, 4, 9));
        assert_eq!(easter_sunday(2024).unwrap(), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025).unwrap(), date(2025, 4, 20));
        assert_eq!(easter_sunday(2019).unwrap(), date(2019, 4, 21));
    }

    #[test]
    fn national_days() {
        let cal = AustralianHolidays::new(None);
        assert!(cal.is_holiday(date(2024, 1, 1)).unwrap());
        assert!(cal.is_holiday(date(2024, 1, 26)).unwrap());
        assert!(cal.is_holiday(date(2024, 3, 29)).unwrap()); // Good Friday
        assert!(cal.is_holiday(date(2024, 4, 1)).unwrap()); // Easter Monday
        assert!(cal.is_holiday(date(2024, 4, 25)).unwrap());
        assert!(cal.is_holiday(date(2024, 12, 25)).unwrap());
        assert!(cal.is_holiday(date(2024, 12, 26)).unwrap());
        assert!(!cal.is_holiday(date(2024, 12, 24)).unwrap());
        // King's Birthday is regional
        assert!(!cal.is_holiday(date(2024, 6, 10)).unwrap());
    }

    #[test]
    fn weekend_substitutes() {
        let cal = AustralianHolidays::new(None);
        // Jan 1 2022 was a Saturday
        assert!(cal.is_holiday(date(2022, 1, 3)).unwrap());
        // Christmas 2021 was a Saturday
        assert!(cal.is_holiday(date(2021, 12, 27)).unwrap());
        assert!(cal.is_holiday(date(2021, 12, 28)).unwrap());
        // Christmas 2022 was a Sunday, Boxing Day a Monday
        assert!(cal.is_holiday(date(2022, 12, 26)).unwrap());
        assert!(cal.is_holiday(date(2022, 12, 27)).unwrap());
        assert!(!cal.is_holiday(date(2022, 12, 28)).unwrap());
        // Australia Day 2025 was a Sunday
        assert!(cal.is_holiday(date(2025, 1, 27)).unwrap());
    }

    #[test]
    fn nsw_days() {
        let cal = AustralianHolidays::new(Some(AuRegion::Nsw));
        assert!(cal.is_holiday(date(2024, 6, 10)).unwrap()); // King's Birthday
        assert!(cal.is_holiday(date(2024, 10, 7)).unwrap()); // Labour Day
        assert!(cal.is_holiday(date(2024, 3, 30)).unwrap()); // Easter Saturday
        assert!(!cal.is_holiday(date(2024, 11, 5)).unwrap()); // Melbourne Cup elsewhere
    }

    #[test]
    fn other_regions() {
        let vic = AustralianHolidays::new(Some(AuRegion::Vic));
        assert!(vic.is_holiday(date(2024, 11, 5)).unwrap());
        assert!(vic.is_holiday(date(2024, 3, 11)).unwrap());

        let qld = AustralianHolidays::new(Some(AuRegion::Qld));
        assert!(qld.is_holiday(date(2024, 10, 7)).unwrap());
        assert!(qld.is_holiday(date(2024, 5, 6)).unwrap());
        assert!(!qld.is_holiday(date(2024, 6, 10)).unwrap());

        let wa = AustralianHolidays::new(Some(AuRegion::Wa));
        assert!(wa.is_holiday(date(2024, 6, 3)).unwrap());
        assert!(wa.is_holiday(date(2024, 9, 23)).unwrap());
        assert!(!wa.is_holiday(date(2024, 9, 30)).unwrap());
        assert!(wa.is_holiday(date(2024, 3, 4)).unwrap());

        let act = AustralianHolidays::new(Some(AuRegion::Act));
        assert!(act.is_holiday(date(2024, 5, 27)).unwrap());
        assert!(act.is_holiday(date(2024, 3, 11)).unwrap());
    }

    #[test]
    fn proclaimed_and_recent_days() {
        let wa = AustralianHolidays::new(Some(AuRegion::Wa));
        // Easter Sunday became a WA holiday in 2022
        assert!(wa.is_holiday(date(2024, 3, 31)).unwrap());
        assert!(!wa.is_holiday(date(2021, 4, 4)).unwrap());
        // Proclaimed date, not the last Monday of September
        assert!(wa.is_holiday(date(2025, 9, 29)).unwrap());
        // Years past the table fall back to the last Monday
        assert!(wa.is_holiday(date(2030, 9, 30)).unwrap());

        let vic = AustralianHolidays::new(Some(AuRegion::Vic));
        assert!(vic.is_holiday(date(2024, 9, 27)).unwrap());
        assert!(vic.is_holiday(date(2020, 10, 23)).unwrap());
        assert!(!vic.is_holiday(date(2014, 9, 26)).unwrap());

        let nsw = AustralianHolidays::new(Some(AuRegion::Nsw));
        assert!(!nsw.is_holiday(date(2024, 9, 27)).unwrap());
    }

    #[test]
    fn region_parsing() {
        assert_eq!("nsw".parse::<AuRegion>().unwrap(), AuRegion::Nsw);
        assert_eq!(" Vic ".parse::<AuRegion>().unwrap(), AuRegion::Vic);
        assert!("XYZ".parse::<AuRegion>().is_err());
        assert_eq!(AustralianHolidays::new(Some(AuRegion::Tas)).name(), "AU-TAS");
    }

    #[test]
    fn holidays_are_sorted() {
        let days = AustralianHolidays::new(Some(AuRegion::Nsw))
            .holidays_in(2024)
            .unwrap();
        assert!(days.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(days.first().unwrap().1, "New Year's Day");
    }
}
