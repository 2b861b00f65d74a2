//! TARGET (euro settlement) calendar.

use std::sync::OnceLock;

use super::holidays::{HolidayTable, Observance, LAST_YEAR};
use super::HolidayCalendar;

static TARGET: OnceLock<HolidayCalendar> = OnceLock::new();

/// TARGET calendar (`TARGET`).
///
/// New Year's Day and Christmas throughout; Good Friday, Easter Monday,
/// Labour Day and Boxing Day from 2000; December 31 in 1998, 1999 and 2001.
/// No weekend observance.
pub fn target() -> &'static HolidayCalendar {
    TARGET.get_or_init(|| {
        HolidayCalendar::new(
            HolidayTable::builder("TARGET")
                .fixed(1, 1, Observance::Actual)
                .fixed(12, 25, Observance::Actual)
                .years(2000, LAST_YEAR)
                .easter(-2)
                .easter(1)
                .fixed(5, 1, Observance::Actual)
                .fixed(12, 26, Observance::Actual)
                .years(1998, 2001)
                .rule(|year| {
                    chrono::NaiveDate::from_ymd_opt(year, 12, 31)
                        .filter(|_| year != 2000)
                        .into_iter()
                        .collect()
                })
                .build(),
        )
    })
}
