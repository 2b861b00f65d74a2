//! Tokyo calendar.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::holidays::{nth_weekday_of_month, HolidayTable};
use super::HolidayCalendar;

static TOKYO: OnceLock<HolidayCalendar> = OnceLock::new();

/// Tokyo calendar (`TOK`).
///
/// National holidays with substitute (furikae) days and sandwiched
/// citizens' holidays, plus the bank closures of January 2-3 and December 31.
pub fn tokyo() -> &'static HolidayCalendar {
    TOKYO.get_or_init(|| {
        HolidayCalendar::new(
            HolidayTable::builder("Tokyo")
                .rule(|year| {
                    let mut days = national_holidays(year);
                    days.extend(bank_closures(year));
                    days
                })
                .build(),
        )
    })
}

fn bank_closures(year: i32) -> Vec<NaiveDate> {
    [(1, 2), (1, 3), (12, 31)]
        .into_iter()
        .filter_map(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .collect()
}

/// Statutory holidays for one year, including substitutes.
fn national_holidays(year: i32) -> Vec<NaiveDate> {
    let date = |m: u32, d: u32| NaiveDate::from_ymd_opt(year, m, d);
    let monday = |m: u32, n: u32| nth_weekday_of_month(year, m, Weekday::Mon, n);

    let mut days: Vec<Option<NaiveDate>> = vec![
        date(1, 1),
        if year < 2000 { date(1, 15) } else { monday(1, 2) },
        date(2, 11),
        date(3, vernal_equinox_day(year)),
        date(4, 29),
        date(5, 3),
        date(5, 4),
        date(5, 5),
        date(9, autumnal_equinox_day(year)),
        date(11, 3),
        date(11, 23),
    ];

    days.push(match year {
        1989..=2018 => date(12, 23),
        2020.. => date(2, 23),
        _ => None,
    });
    days.push(match year {
        1996..=2002 => date(7, 20),
        2003..=2019 | 2022.. => monday(7, 3),
        2020 => date(7, 23),
        2021 => date(7, 22),
        _ => None,
    });
    days.push(match year {
        2016..=2019 | 2022.. => date(8, 11),
        2020 => date(8, 10),
        2021 => date(8, 8),
        _ => None,
    });
    days.push(if year < 2003 { date(9, 15) } else { monday(9, 3) });
    days.push(match year {
        2020 => date(7, 24),
        2021 => date(7, 23),
        _ if year < 2000 => date(10, 10),
        _ => monday(10, 2),
    });
    if year == 2019 {
        days.extend([date(4, 30), date(5, 1), date(5, 2), date(10, 22)]);
    }

    let mut holidays: BTreeSet<NaiveDate> = days.into_iter().flatten().collect();
    add_substitutes(&mut holidays);
    add_citizens_holidays(&mut holidays);
    holidays.into_iter().collect()
}

/// A holiday on a Sunday moves to the next day that is not itself a holiday.
fn add_substitutes(holidays: &mut BTreeSet<NaiveDate>) {
    let sundays: Vec<NaiveDate> = holidays
        .iter()
        .copied()
        .filter(|d| d.weekday() == Weekday::Sun)
        .collect();
    for sunday in sundays {
        let mut substitute = sunday + Duration::days(1);
        while holidays.contains(&substitute) {
            substitute += Duration::days(1);
        }
        holidays.insert(substitute);
    }
}

/// A weekday squeezed between two holidays is itself a holiday.
fn add_citizens_holidays(holidays: &mut BTreeSet<NaiveDate>) {
    let sandwiched: Vec<NaiveDate> = holidays
        .iter()
        .map(|d| *d + Duration::days(1))
        .filter(|d| {
            !holidays.contains(d)
                && d.weekday() != Weekday::Sun
                && holidays.contains(&(*d + Duration::days(1)))
        })
        .collect();
    holidays.extend(sandwiched);
}

fn vernal_equinox_day(year: i32) -> u32 {
    equinox_day(20.8431, year)
}

fn autumnal_equinox_day(year: i32) -> u32 {
    equinox_day(23.2488, year)
}

/// Approximation valid for 1980-2099.
fn equinox_day(base: f64, year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (base + 0.242194 * y - (y / 4.0).floor()) as u32
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
    fn test_golden_week_2024() {
        let cal = tokyo();
        assert!(cal.is_holiday(d(2024, 4, 29)));
        assert!(cal.is_holiday(d(2024, 5, 3)));
        // 2024-05-05 is a Sunday, substitute on Monday 6th
        assert!(cal.is_holiday(d(2024, 5, 6)));
        assert!(cal.is_business_day(d(2024, 5, 7)));
    }

    #[test]
    fn test_equinoxes() {
        let cal = tokyo();
        assert!(cal.is_holiday(d(2024, 3, 20)));
        // 2024-09-22 is a Sunday, substitute on Monday 23rd
        assert!(cal.is_holiday(d(2024, 9, 23)));
    }

    #[test]
    fn test_bank_closures() {
        let cal = tokyo();
        assert!(cal.is_holiday(d(2024, 1, 2)));
        assert!(cal.is_holiday(d(2024, 1, 3)));
        assert!(cal.is_holiday(d(2024, 12, 31)));
        assert!(cal.is_business_day(d(2024, 1, 4)));
    }

    #[test]
    fn test_citizens_holiday_2026() {
        // Respect for the Aged Day Mon 21st and Autumnal Equinox Wed 23rd
        assert!(tokyo().is_holiday(d(2026, 9, 22)));
    }

    #[test]
    fn test_olympic_moves() {
        let cal = tokyo();
        assert!(cal.is_holiday(d(2021, 7, 22)));
        assert!(cal.is_holiday(d(2021, 7, 23)));
        assert!(cal.is_business_day(d(2021, 7, 19)));
        assert!(cal.is_business_day(d(2021, 10, 11)));
    }
}
