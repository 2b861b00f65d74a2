//! 30/360 ISDA.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

/// 30/360 ISDA.
///
/// Day 31 and the last day of February both count as day 30, on either end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360Isda;

impl DayCount for Thirty360Isda {
    fn name(&self) -> &'static str {
        "30/360 ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let clamp = |date: Date| {
            if date.day() == 31 || is_last_day_of_february(date) {
                30
            } else {
                i64::from(date.day())
            }
        };

        360 * i64::from(end.year() - start.year())
            + 30 * (i64::from(end.month()) - i64::from(start.month()))
            + (clamp(end) - clamp(start))
    }
}

/// 30/360 bond basis, used as the fallback of [`super::SimpleDayCount`].
pub(super) fn bond_basis_days(start: Date, end: Date) -> i64 {
    let d1 = i64::from(start.day().min(30));
    let mut d2 = i64::from(end.day());
    if d2 == 31 && d1 == 30 {
        d2 = 30;
    }
    360 * i64::from(end.year() - start.year())
        + 30 * (i64::from(end.month()) - i64::from(start.month()))
        + (d2 - d1)
}
