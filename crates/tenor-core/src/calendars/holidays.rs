//! Rule-built holiday tables with constant-time lookup.
//!
//! A [`HolidayTable`] stores one bit per day for the years
//! [`FIRST_YEAR`]..=[`LAST_YEAR`]. Tables are assembled from yearly rules
//! (fixed dates with an observance policy, nth/last weekday of a month,
//! Easter offsets, and free-form generators for one-off moves).
//! Dates outside the supported range are never holidays.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;

use crate::types::Date;

/// First year covered by holiday tables.
pub const FIRST_YEAR: i32 = 1970;
/// Last year covered by holiday tables.
pub const LAST_YEAR: i32 = 2100;

/// 366 bits per year.
const WORDS_PER_YEAR: usize = 6;

/// How a fixed-date holiday moves when it lands on a weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observance {
    /// Never moved.
    Actual,
    /// Saturday is observed on Friday, Sunday on Monday (US style).
    NearestWeekday,
    /// Only a Sunday holiday moves, to Monday.
    SundayToMonday,
    /// Saturday or Sunday moves to the following Monday (UK/AU style).
    NextMonday,
}

impl Observance {
    fn apply(self, date: NaiveDate) -> NaiveDate {
        match (self, date.weekday()) {
            (Observance::NearestWeekday, Weekday::Sat) => date - Duration::days(1),
            (Observance::NearestWeekday | Observance::SundayToMonday, Weekday::Sun) => {
                date + Duration::days(1)
            }
            (Observance::NextMonday, Weekday::Sat) => date + Duration::days(2),
            (Observance::NextMonday, Weekday::Sun) => date + Duration::days(1),
            _ => date,
        }
    }
}

/// A Saturday/Sunday weekend calendar with a bitmap of holidays.
#[derive(Clone)]
pub struct HolidayTable {
    name: &'static str,
    words: Vec<u64>,
}

impl std::fmt::Debug for HolidayTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayTable")
            .field("name", &self.name)
            .field("holidays", &self.len())
            .finish()
    }
}

impl HolidayTable {
    /// Starts a table for the named centre.
    pub fn builder(name: &'static str) -> HolidayTableBuilder {
        HolidayTableBuilder {
            name,
            first_year: FIRST_YEAR,
            last_year: LAST_YEAR,
            dates: BTreeSet::new(),
        }
    }

    /// Name of the centre.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if the date is a listed holiday (weekends are not listed).
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        Self::slot(date.as_naive_date())
            .map(|(word, mask)| self.words[word] & mask != 0)
            .unwrap_or(false)
    }

    /// True if the date is neither a weekend nor a holiday.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.contains(date)
    }

    /// Number of listed holidays.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// True if no holiday is listed.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    fn slot(date: NaiveDate) -> Option<(usize, u64)> {
        let year = date.year();
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return None;
        }
        let bit = (year - FIRST_YEAR) as usize * WORDS_PER_YEAR * 64 + date.ordinal0() as usize;
        Some((bit / 64, 1u64 << (bit % 64)))
    }
}

/// Accumulates holiday rules year by year.
pub struct HolidayTableBuilder {
    name: &'static str,
    first_year: i32,
    last_year: i32,
    dates: BTreeSet<NaiveDate>,
}

impl HolidayTableBuilder {
    /// Restricts rule expansion to a year range (clamped to the table range).
    pub fn years(mut self, first: i32, last: i32) -> Self {
        self.first_year = first.max(FIRST_YEAR);
        self.last_year = last.min(LAST_YEAR);
        self
    }

    fn each_year(mut self, from: i32, until: i32, rule: impl Fn(i32) -> Option<NaiveDate>) -> Self {
        for year in from.max(self.first_year)..=until.min(self.last_year) {
            if let Some(date) = rule(year) {
                self.dates.insert(date);
            }
        }
        self
    }

    /// Same month/day every year.
    pub fn fixed(self, month: u32, day: u32, observance: Observance) -> Self {
        self.fixed_between(month, day, FIRST_YEAR, LAST_YEAR, observance)
    }

    /// Same month/day for the years `from..=until` only.
    pub fn fixed_between(
        self,
        month: u32,
        day: u32,
        from: i32,
        until: i32,
        observance: Observance,
    ) -> Self {
        self.each_year(from, until, |year| {
            NaiveDate::from_ymd_opt(year, month, day).map(|d| observance.apply(d))
        })
    }

    /// The `n`th given weekday of a month (1-based).
    pub fn nth_weekday(self, month: u32, weekday: Weekday, n: u32) -> Self {
        self.each_year(FIRST_YEAR, LAST_YEAR, |year| {
            nth_weekday_of_month(year, month, weekday, n)
        })
    }

    /// The last given weekday of a month.
    pub fn last_weekday(self, month: u32, weekday: Weekday) -> Self {
        self.each_year(FIRST_YEAR, LAST_YEAR, |year| {
            last_weekday_of_month(year, month, weekday)
        })
    }

    /// Easter Sunday shifted by `offset` days (-2 is Good Friday).
    pub fn easter(self, offset: i64) -> Self {
        self.each_year(FIRST_YEAR, LAST_YEAR, |year| {
            easter_sunday(year).map(|e| e + Duration::days(offset))
        })
    }

    /// Free-form yearly generator for moves and one-off closures.
    pub fn rule(mut self, generator: impl Fn(i32) -> Vec<NaiveDate>) -> Self {
        for year in self.first_year..=self.last_year {
            self.dates.extend(generator(year));
        }
        self
    }

    /// Freezes the rules into a lookup table.
    pub fn build(self) -> HolidayTable {
        let years = (LAST_YEAR - FIRST_YEAR + 1) as usize;
        let mut words = vec![0u64; years * WORDS_PER_YEAR];
        for date in &self.dates {
            if let Some((word, mask)) = HolidayTable::slot(*date) {
                words[word] |= mask;
            }
        }
        HolidayTable {
            name: self.name,
            words,
        }
    }
}

/// The `n`th occurrence (1-based) of a weekday in a month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, u8::try_from(n).ok()?)
}

/// The last occurrence of a weekday in a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    let back = (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    Some(last - Duration::days(i64::from(back)))
}

/// Easter Sunday (anonymous Gregorian algorithm).
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    NaiveDate::from_ymd_opt(year, (n / 31) as u32, (n % 31 + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_observance() {
        // 2026-07-04 is a Saturday, 2027-07-04 a Sunday
        assert_eq!(Observance::NearestWeekday.apply(d(2026, 7, 4)), d(2026, 7, 3));
        assert_eq!(Observance::NearestWeekday.apply(d(2027, 7, 4)), d(2027, 7, 5));
        assert_eq!(Observance::SundayToMonday.apply(d(2026, 7, 4)), d(2026, 7, 4));
        assert_eq!(Observance::NextMonday.apply(d(2026, 7, 4)), d(2026, 7, 6));
        assert_eq!(Observance::Actual.apply(d(2027, 7, 4)), d(2027, 7, 4));
    }

    #[test]
    fn test_weekday_helpers() {
        assert_eq!(nth_weekday_of_month(2024, 1, Weekday::Mon, 3), Some(d(2024, 1, 15)));
        assert_eq!(last_weekday_of_month(2024, 5, Weekday::Mon), Some(d(2024, 5, 27)));
        assert_eq!(last_weekday_of_month(2024, 12, Weekday::Tue), Some(d(2024, 12, 31)));
        assert_eq!(nth_weekday_of_month(2024, 2, Weekday::Thu, 5), Some(d(2024, 2, 29)));
        assert_eq!(nth_weekday_of_month(2024, 2, Weekday::Fri, 5), None);
    }

    #[test]
    fn test_easter() {
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(d(2025, 4, 20)));
        assert_eq!(easter_sunday(2019), Some(d(2019, 4, 21)));
    }

    #[test]
    fn test_table_lookup() {
        let table = HolidayTable::builder("Test")
            .years(2024, 2025)
            .fixed(12, 25, Observance::Actual)
            .easter(-2)
            .build();

        assert_eq!(table.len(), 4);
        assert!(table.contains(Date::from(d(2024, 12, 25))));
        assert!(table.contains(Date::from(d(2025, 4, 18))));
        assert!(!table.contains(Date::from(d(2023, 12, 25))));
        assert!(!table.is_business_day(Date::from(d(2024, 3, 29))));
        assert!(table.is_business_day(Date::from(d(2024, 3, 28))));
        assert!(!table.is_business_day(Date::from(d(2024, 3, 30))));
    }

    #[test]
    fn test_out_of_range_is_not_holiday() {
        let table = HolidayTable::builder("Test")
            .fixed(1, 1, Observance::Actual)
            .build();
        assert!(!table.contains(Date::from(d(1969, 1, 1))));
        assert!(table.contains(Date::from(d(1970, 1, 1))));
    }
}
