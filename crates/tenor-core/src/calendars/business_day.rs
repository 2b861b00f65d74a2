//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// Parsed from market tokens (`MF`, `F`, `P`, `NONE`). `NONE` is kept as its
/// own variant so it serializes back as `NONE`, but it rolls like
/// [`BusinessDayConvention::Preceding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum BusinessDayConvention {
    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    #[default]
    ModifiedFollowing,

    /// Move to the following business day.
    Following,

    /// Move to the preceding business day.
    Preceding,

    /// The `NONE` token; rolls backwards like `Preceding`.
    None,
}

impl BusinessDayConvention {
    /// Market token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            BusinessDayConvention::ModifiedFollowing => "MF",
            BusinessDayConvention::Following => "F",
            BusinessDayConvention::Preceding => "P",
            BusinessDayConvention::None => "NONE",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MF" => Ok(BusinessDayConvention::ModifiedFollowing),
            "F" => Ok(BusinessDayConvention::Following),
            "P" => Ok(BusinessDayConvention::Preceding),
            "NONE" => Ok(BusinessDayConvention::None),
            _ => Err(CoreError::unknown_convention("business day convention", s)),
        }
    }
}

impl TryFrom<String> for BusinessDayConvention {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BusinessDayConvention> for String {
    fn from(value: BusinessDayConvention) -> Self {
        value.token().to_string()
    }
}

/// Rolls a date onto a business day of `calendar`.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let rolled = following(date, calendar);
            if rolled.month() == date.month() {
                rolled
            } else {
                preceding(date, calendar)
            }
        }
        BusinessDayConvention::Preceding | BusinessDayConvention::None => {
            preceding(date, calendar)
        }
    }
}

// Both rolls stop at the edge of the representable range.
fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        let next = date.succ();
        if next == date {
            break;
        }
        date = next;
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        let prev = date.pred();
        if prev == date {
            break;
        }
        date = prev;
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_following_and_preceding() {
        let cal = WeekendCalendar;
        // 2025-01-04 is a Saturday
        assert_eq!(adjust(d(2025, 1, 4), BusinessDayConvention::Following, &cal), d(2025, 1, 6));
        assert_eq!(adjust(d(2025, 1, 4), BusinessDayConvention::Preceding, &cal), d(2025, 1, 3));
        assert_eq!(adjust(d(2025, 1, 4), BusinessDayConvention::None, &cal), d(2025, 1, 3));
    }

    #[test]
    fn test_modified_following_month_end() {
        let cal = WeekendCalendar;
        // 2024-08-31 is a Saturday; Following would cross into September
        assert_eq!(
            adjust(d(2024, 8, 31), BusinessDayConvention::ModifiedFollowing, &cal),
            d(2024, 8, 30)
        );
        // 2025-01-05 is a Sunday mid-month
        assert_eq!(
            adjust(d(2025, 1, 5), BusinessDayConvention::ModifiedFollowing, &cal),
            d(2025, 1, 6)
        );
    }

    #[test]
    fn test_business_day_unchanged() {
        let monday = d(2025, 1, 6);
        assert_eq!(adjust(monday, BusinessDayConvention::Preceding, &WeekendCalendar), monday);
    }

    #[test]
    fn test_tokens() {
        assert_eq!("mf".parse::<BusinessDayConvention>().unwrap(), BusinessDayConvention::ModifiedFollowing);
        assert_eq!("NONE".parse::<BusinessDayConvention>().unwrap().to_string(), "NONE");
        assert!("MP".parse::<BusinessDayConvention>().is_err());
    }
}
