//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait: business day tests, adjustment and period arithmetic
//! - Business day adjustment conventions
//! - Rule-built holiday tables for the supported financial centres

mod australia;
mod business_day;
pub mod holidays;
mod japan;
mod target;
mod uk;
mod us;

pub use australia::sydney;
pub use business_day::{adjust, BusinessDayConvention};
pub use holidays::{HolidayTable, Observance};
pub use japan::tokyo;
pub use target::target;
pub use uk::london;
pub use us::{new_york, us_government_bond};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Period, TimeUnit};

/// Trait for business day calendars.
///
/// Only [`Calendar::is_business_day`] is required; adjustment and period
/// arithmetic are derived from it.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend or holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Rolls a date onto a business day.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        business_day::adjust(date, convention, self)
    }

    /// Moves a date by a period.
    ///
    /// A zero period only adjusts. A day period counts business days and
    /// the result is not adjusted further. Week, month and year periods
    /// shift the calendar date (month ends clamp) and then adjust; with
    /// `end_of_month` set and `date` on the last business day of its month,
    /// month and year periods land on the last business day of the target
    /// month.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> CoreResult<Date> {
        let n = period.length();
        if n == 0 {
            return Ok(self.adjust(date, convention));
        }
        match period.unit() {
            TimeUnit::Days => self.add_business_days(date, n),
            TimeUnit::Weeks => Ok(self.adjust(date.add_days(7 * i64::from(n))?, convention)),
            TimeUnit::Months | TimeUnit::Years => {
                let months = if period.unit() == TimeUnit::Years {
                    n.checked_mul(12)
                        .ok_or_else(|| CoreError::invalid_period(period.to_string(), "overflow"))?
                } else {
                    n
                };
                let shifted = date.add_months(months)?;
                if end_of_month && self.is_end_of_month(date) {
                    Ok(self.end_of_month(shifted))
                } else {
                    Ok(self.adjust(shifted, convention))
                }
            }
        }
    }

    /// Moves by `days` business days (negative moves backwards).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the walk leaves the supported range.
    fn add_business_days(&self, date: Date, days: i32) -> CoreResult<Date> {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let step: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(step)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Ok(result)
    }

    /// True if `date` is on or after the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        self.adjust(date.succ(), BusinessDayConvention::Following).month() != date.month()
    }

    /// Last business day of the date's month.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Business days in `(start, end]`.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        let mut count = 0;
        let mut current = start;

        while current < end {
            current = current.succ();
            if self.is_business_day(current) {
                count += 1;
            }
        }

        count
    }
}

/// Every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &'static str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Saturdays and Sundays are the only non-business days.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A financial centre backed by a [`HolidayTable`].
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    table: HolidayTable,
}

impl HolidayCalendar {
    /// Wraps a built table.
    pub fn new(table: HolidayTable) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &HolidayTable {
        &self.table
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &'static str {
        self.table.name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.table.is_business_day(date)
    }
}
