//! Actual-day conventions.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365 FIXED"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(365)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual ISDA.
///
/// Days falling in leap years count over 366, the others over 365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    fn forward_fraction(start: Date, end: Date) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            // January 1st of the next year is never past `end` here
            let next_year = Date::from_ymd(current.year() + 1, 1, 1).unwrap_or(end);
            total += Decimal::from(current.days_between(&next_year))
                / Decimal::from(current.days_in_year());
            current = next_year;
        }

        total + Decimal::from(current.days_between(&end)) / Decimal::from(current.days_in_year())
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start <= end {
            Self::forward_fraction(start, end)
        } else {
            -Self::forward_fraction(end, start)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_act360() {
        assert_eq!(Act360.year_fraction(d(2024, 1, 16), d(2024, 4, 15)), dec!(0.25));
        assert_eq!(Act360.day_count(d(2024, 4, 15), d(2024, 7, 15)), 91);
    }

    #[test]
    fn test_act365_fixed() {
        assert_eq!(Act365Fixed.year_fraction(d(2024, 1, 1), d(2025, 1, 1)), dec!(366) / dec!(365));
    }

    #[test]
    fn test_actact_isda_splits_years() {
        // 2023-07-01 .. 2024-07-01: 184 days in 2023, 182 days in 2024
        let yf = ActActIsda.year_fraction(d(2023, 7, 1), d(2024, 7, 1));
        let expected = dec!(184) / dec!(365) + dec!(182) / dec!(366);
        assert_eq!(yf, expected);
        assert_eq!(ActActIsda.year_fraction(d(2024, 7, 1), d(2023, 7, 1)), -expected);
    }

    #[test]
    fn test_actact_isda_full_leap_year() {
        assert_eq!(ActActIsda.year_fraction(d(2024, 1, 1), d(2025, 1, 1)), dec!(1));
    }

    #[test]
    fn test_actact_isda_float_value() {
        let yf = ActActIsda.year_fraction(d(2023, 7, 1), d(2024, 7, 1));
        assert_relative_eq!(yf.to_f64().unwrap(), 1.001_377_348_603_938, epsilon = 1e-12);
    }
}
