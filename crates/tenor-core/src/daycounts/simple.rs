//! Simple day count: whole months over twelve.

use rust_decimal::Decimal;

use super::thirty360::bond_basis_days;
use super::DayCount;
use crate::types::Date;

/// Whole calendar months over twelve when both dates share a day of month
/// (or the shorter month ends first); 30/360 bond basis otherwise.
///
/// Backs the `NONE` accrual basis token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleDayCount;

impl DayCount for SimpleDayCount {
    fn name(&self) -> &'static str {
        "SIMPLE"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let (d1, d2) = (start.day(), end.day());
        let whole_months = d1 == d2
            || (d1 > d2 && end.is_end_of_month())
            || (d1 < d2 && start.is_end_of_month());

        if whole_months {
            let months = 12 * (end.year() - start.year()) + end.month() as i32 - start.month() as i32;
            Decimal::from(months) / Decimal::from(12)
        } else {
            Decimal::from(bond_basis_days(start, end)) / Decimal::from(360)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_whole_months() {
        assert_eq!(SimpleDayCount.year_fraction(d(2024, 1, 15), d(2024, 4, 15)), dec!(0.25));
        assert_eq!(SimpleDayCount.year_fraction(d(2024, 1, 31), d(2024, 2, 29)), dec!(1) / dec!(12));
    }

    #[test]
    fn test_broken_period_falls_back() {
        assert_eq!(
            SimpleDayCount.year_fraction(d(2024, 1, 15), d(2024, 1, 25)),
            dec!(10) / dec!(360)
        );
    }
}
