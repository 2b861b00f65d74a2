//! London (UK exchange) calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use std::sync::OnceLock;

use super::holidays::{last_weekday_of_month, nth_weekday_of_month, HolidayTable, Observance};
use super::HolidayCalendar;

static LONDON: OnceLock<HolidayCalendar> = OnceLock::new();

/// London calendar (`LON`).
///
/// New Year's Day (substituted to Monday), Good Friday, Easter Monday,
/// Early May and Spring bank holidays (with their jubilee moves), Summer
/// bank holiday, Christmas and Boxing Day (substituted), and the one-off
/// royal closures.
pub fn london() -> &'static HolidayCalendar {
    LONDON.get_or_init(|| {
        HolidayCalendar::new(
            HolidayTable::builder("London")
                .fixed(1, 1, Observance::NextMonday)
                .easter(-2)
                .easter(1)
                .rule(early_may_bank_holiday)
                .rule(spring_bank_holiday)
                .last_weekday(8, Weekday::Mon)
                .rule(christmas_and_boxing_day)
                .rule(royal_closures)
                .build(),
        )
    })
}

/// First Monday in May, moved to VE Day in its 50th and 75th anniversary years.
fn early_may_bank_holiday(year: i32) -> Vec<NaiveDate> {
    match year {
        1995 | 2020 => NaiveDate::from_ymd_opt(year, 5, 8).into_iter().collect(),
        _ => nth_weekday_of_month(year, 5, Weekday::Mon, 1)
            .into_iter()
            .collect(),
    }
}

/// Last Monday in May, moved for the 2002, 2012 and 2022 jubilees.
fn spring_bank_holiday(year: i32) -> Vec<NaiveDate> {
    let moved = match year {
        2002 | 2012 => Some((6, 4)),
        2022 => Some((6, 2)),
        _ => None,
    };
    match moved {
        Some((m, d)) => NaiveDate::from_ymd_opt(year, m, d).into_iter().collect(),
        None => last_weekday_of_month(year, 5, Weekday::Mon)
            .into_iter()
            .collect(),
    }
}

/// Christmas and Boxing Day with substitute days when either falls on a
/// weekend. A Saturday Christmas pushes the pair to Monday and Tuesday.
pub(super) fn christmas_and_boxing_day(year: i32) -> Vec<NaiveDate> {
    let day = |d: u32| NaiveDate::from_ymd_opt(year, 12, d);
    let Some(christmas) = day(25) else {
        return Vec::new();
    };
    let pair = match christmas.weekday() {
        Weekday::Fri => [day(25), day(28)],
        Weekday::Sat => [day(27), day(28)],
        Weekday::Sun => [day(26), day(27)],
        _ => [day(25), day(26)],
    };
    pair.into_iter().flatten().collect()
}

fn royal_closures(year: i32) -> Vec<NaiveDate> {
    let dates: &[(u32, u32)] = match year {
        1999 => &[(12, 31)],
        2002 => &[(6, 3)],
        2011 => &[(4, 29)],
        2012 => &[(6, 5)],
        2022 => &[(6, 3), (9, 19)],
        2023 => &[(5, 8)],
        _ => &[],
    };
    dates
        .iter()
        .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .collect()
}
