//! United States calendars: New York settlement and government bond market.

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::OnceLock;

use super::holidays::{HolidayTable, HolidayTableBuilder, Observance};
use super::HolidayCalendar;

static NEW_YORK: OnceLock<HolidayCalendar> = OnceLock::new();
static US_GOVERNMENT_BOND: OnceLock<HolidayCalendar> = OnceLock::new();

/// New York settlement calendar (`NYC`).
///
/// New Year's Day (Sunday moves to Monday, Saturday to Friday Dec 31),
/// Martin Luther King Jr. Day, Washington's Birthday, Memorial Day,
/// Juneteenth (from 2022), Independence Day, Labor Day, Columbus Day,
/// Veterans Day, Thanksgiving and Christmas.
pub fn new_york() -> &'static HolidayCalendar {
    NEW_YORK.get_or_init(|| {
        HolidayCalendar::new(
            federal_holidays(HolidayTable::builder("New York"))
                .rule(new_year_friday_before)
                .fixed(11, 11, Observance::NearestWeekday)
                .build(),
        )
    })
}

/// US government bond calendar (`USGS`, SIFMA recommendations).
///
/// The federal holidays plus Good Friday, with Veterans Day only moved off
/// a Sunday, and the special closings for national days of mourning.
pub fn us_government_bond() -> &'static HolidayCalendar {
    US_GOVERNMENT_BOND.get_or_init(|| {
        HolidayCalendar::new(
            federal_holidays(HolidayTable::builder("US Government Bond"))
                .easter(-2)
                .fixed(11, 11, Observance::SundayToMonday)
                .rule(national_days_of_mourning)
                .build(),
        )
    })
}

/// Holidays shared by both US calendars.
fn federal_holidays(builder: HolidayTableBuilder) -> HolidayTableBuilder {
    builder
        .fixed(1, 1, Observance::SundayToMonday)
        .rule(martin_luther_king_day)
        .nth_weekday(2, Weekday::Mon, 3)
        .last_weekday(5, Weekday::Mon)
        .fixed_between(6, 19, 2022, super::holidays::LAST_YEAR, Observance::NearestWeekday)
        .fixed(7, 4, Observance::NearestWeekday)
        .nth_weekday(9, Weekday::Mon, 1)
        .nth_weekday(10, Weekday::Mon, 2)
        .nth_weekday(11, Weekday::Thu, 4)
        .fixed(12, 25, Observance::NearestWeekday)
}

fn martin_luther_king_day(year: i32) -> Vec<NaiveDate> {
    if year < 1983 {
        return Vec::new();
    }
    super::holidays::nth_weekday_of_month(year, 1, Weekday::Mon, 3)
        .into_iter()
        .collect()
}

/// Friday Dec 31 when the next New Year's Day falls on a Saturday.
fn new_year_friday_before(year: i32) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .filter(|d| d.weekday() == Weekday::Fri)
        .into_iter()
        .collect()
}

fn national_days_of_mourning(year: i32) -> Vec<NaiveDate> {
    let dates: &[(u32, u32)] = match year {
        2004 => &[(6, 11)],
        2007 => &[(1, 2)],
        2018 => &[(12, 5)],
        2025 => &[(1, 9)],
        _ => &[],
    };
    dates
        .iter()
        .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::Calendar;
    use crate::types::Date;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_government_bond_holidays_2024() {
        let cal = us_government_bond();
        for date in [
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 2, 19),
            d(2024, 3, 29),
            d(2024, 5, 27),
            d(2024, 6, 19),
            d(2024, 7, 4),
            d(2024, 9, 2),
            d(2024, 10, 14),
            d(2024, 11, 11),
            d(2024, 11, 28),
            d(2024, 12, 25),
        ] {
            assert!(cal.is_holiday(date), "{date} should be a USGS holiday");
        }
        assert!(cal.is_business_day(d(2024, 1, 16)));
        assert!(cal.is_business_day(d(2024, 4, 15)));
        assert!(cal.is_business_day(d(2024, 7, 15)));
    }

    #[test]
    fn test_new_york_has_no_good_friday() {
        assert!(new_york().is_business_day(d(2024, 3, 29)));
        assert!(us_government_bond().is_holiday(d(2024, 3, 29)));
    }

    #[test]
    fn test_juneteenth_from_2022() {
        assert!(new_york().is_business_day(d(2021, 6, 18)));
        assert!(new_york().is_holiday(d(2022, 6, 20)));
    }

    #[test]
    fn test_saturday_new_year() {
        // 2022-01-01 is a Saturday
        assert!(new_york().is_holiday(d(2021, 12, 31)));
        assert!(us_government_bond().is_business_day(d(2021, 12, 31)));
    }

    #[test]
    fn test_veterans_day_on_saturday() {
        // 2023-11-11 is a Saturday
        assert!(new_york().is_holiday(d(2023, 11, 10)));
        assert!(us_government_bond().is_business_day(d(2023, 11, 10)));
    }

    #[test]
    fn test_day_of_mourning() {
        assert!(us_government_bond().is_holiday(d(2025, 1, 9)));
        assert!(new_york().is_business_day(d(2025, 1, 9)));
    }
}
