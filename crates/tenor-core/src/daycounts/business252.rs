//! Business/252.

use rust_decimal::Decimal;

use super::DayCount;
use crate::calendars::{Calendar, WeekendCalendar};
use crate::types::Date;

/// Business days in `[start, end)` over 252.
#[derive(Clone, Copy)]
pub struct Business252 {
    calendar: &'static dyn Calendar,
}

impl Business252 {
    /// Counts business days of `calendar`.
    pub fn new(calendar: &'static dyn Calendar) -> Self {
        Self { calendar }
    }
}

impl Default for Business252 {
    fn default() -> Self {
        Self::new(&WeekendCalendar)
    }
}

impl std::fmt::Debug for Business252 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Business252")
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

impl DayCount for Business252 {
    fn name(&self) -> &'static str {
        "BUSINESS252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(252)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.day_count(end, start);
        }
        // (start - 1, end - 1] is the same set as [start, end)
        self.calendar
            .business_days_between(start.pred(), end.pred())
    }
}
