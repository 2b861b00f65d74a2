//! Convention-driven date utilities.
//!
//! Thin functions over [`HolidayConvention`] calendars for callers that hold
//! tokens rather than calendar objects.

use rust_decimal::Decimal;

use crate::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
use crate::error::CoreResult;
use crate::types::{Date, Period};

/// Advances `date` by `period` on the centre's calendar.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if the result leaves the supported range.
pub fn add_period(
    date: Date,
    period: Period,
    convention: BusinessDayConvention,
    holidays: HolidayConvention,
    end_of_month: bool,
) -> CoreResult<Date> {
    holidays
        .calendar()
        .advance(date, period, convention, end_of_month)
}

/// Rolls `date` onto a business day of the centre.
pub fn move_to_business_day(
    date: Date,
    convention: BusinessDayConvention,
    holidays: HolidayConvention,
) -> Date {
    holidays.calendar().adjust(date, convention)
}

/// Year fraction from `start` to `end`, with `end` rolled onto a business day first.
pub fn accrued(
    start: Date,
    end: Date,
    basis: AccrualBasis,
    convention: BusinessDayConvention,
    holidays: HolidayConvention,
) -> Decimal {
    basis.year_fraction(start, move_to_business_day(end, convention, holidays))
}

/// True if `date` is a business day of the centre.
pub fn is_business_day(date: Date, holidays: HolidayConvention) -> bool {
    holidays.calendar().is_business_day(date)
}

/// True if `date` is a weekend or holiday of the centre.
pub fn is_holiday(date: Date, holidays: HolidayConvention) -> bool {
    holidays.calendar().is_holiday(date)
}

/// True if `date` is on or after the centre's last business day of the month.
pub fn is_end_of_month(date: Date, holidays: HolidayConvention) -> bool {
    holidays.calendar().is_end_of_month(date)
}

/// Last business day of the date's month.
pub fn end_of_month(date: Date, holidays: HolidayConvention) -> Date {
    holidays.calendar().end_of_month(date)
}
