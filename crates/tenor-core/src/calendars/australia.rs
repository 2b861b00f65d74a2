//! Sydney (Australian settlement) calendar.

use chrono::Weekday;
use std::sync::OnceLock;

use super::holidays::{HolidayTable, Observance};
use super::uk::christmas_and_boxing_day;
use super::HolidayCalendar;

static SYDNEY: OnceLock<HolidayCalendar> = OnceLock::new();

/// Sydney calendar (`SYD`).
///
/// New Year's Day and Australia Day (moved to Monday), Good Friday, Easter
/// Monday, ANZAC Day, the Sovereign's Birthday (2nd Monday in June), the
/// August bank holiday, Labour Day (1st Monday in October), Christmas and
/// Boxing Day with substitutes, and the 2022 national day of mourning.
pub fn sydney() -> &'static HolidayCalendar {
    SYDNEY.get_or_init(|| {
        HolidayCalendar::new(
            HolidayTable::builder("Sydney")
                .fixed(1, 1, Observance::NextMonday)
                .fixed(1, 26, Observance::NextMonday)
                .easter(-2)
                .easter(1)
                .fixed(4, 25, Observance::Actual)
                .nth_weekday(6, Weekday::Mon, 2)
                .nth_weekday(8, Weekday::Mon, 1)
                .nth_weekday(10, Weekday::Mon, 1)
                .rule(christmas_and_boxing_day)
                .rule(|year| {
                    chrono::NaiveDate::from_ymd_opt(2022, 9, 22)
                        .filter(|_| year == 2022)
                        .into_iter()
                        .collect()
                })
                .build(),
        )
    })
}
