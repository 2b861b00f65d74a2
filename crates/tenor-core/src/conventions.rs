//! Market convention tokens and what they resolve to.
//!
//! Holiday centres, accrual bases, business day conventions and currencies
//! are named by short tokens (`USGS`, `ACT/360`, `MF`, `USD`). Parsing is
//! case-insensitive and fails on unknown tokens. Each parsed value keeps its
//! token, so it serializes back to the same string.
//!
//! | Token      | Resolves to                                  |
//! |------------|----------------------------------------------|
//! | `NYC`      | New York settlement calendar                 |
//! | `USGS`     | US government bond calendar                  |
//! | `LON`      | London calendar                              |
//! | `TOK`      | Tokyo calendar                               |
//! | `TARGET`   | TARGET calendar                              |
//! | `SYD`      | Sydney calendar                              |
//! | `NONE`     | Null calendar (every day is a business day)  |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use crate::calendars::BusinessDayConvention;
pub use crate::types::Currency;

use crate::calendars::{self, Calendar, NullCalendar};
use crate::daycounts::{
    Act360, Act365Fixed, ActActIsda, Business252, DayCount, SimpleDayCount, Thirty360Isda,
};
use crate::error::CoreError;
use crate::types::Date;

/// Holiday centre token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum HolidayConvention {
    /// New York (`NYC`).
    Nyc,
    /// US government securities (`USGS`).
    #[default]
    Usgs,
    /// London (`LON`).
    Lon,
    /// Tokyo (`TOK`).
    Tok,
    /// Euro TARGET (`TARGET`).
    Target,
    /// Sydney (`SYD`).
    Syd,
    /// No holidays and no weekends (`NONE`).
    None,
}

impl HolidayConvention {
    /// All centres.
    pub const ALL: [HolidayConvention; 7] = [
        HolidayConvention::Nyc,
        HolidayConvention::Usgs,
        HolidayConvention::Lon,
        HolidayConvention::Tok,
        HolidayConvention::Target,
        HolidayConvention::Syd,
        HolidayConvention::None,
    ];

    /// Market token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            HolidayConvention::Nyc => "NYC",
            HolidayConvention::Usgs => "USGS",
            HolidayConvention::Lon => "LON",
            HolidayConvention::Tok => "TOK",
            HolidayConvention::Target => "TARGET",
            HolidayConvention::Syd => "SYD",
            HolidayConvention::None => "NONE",
        }
    }

    /// The calendar this centre stands for.
    #[must_use]
    pub fn calendar(&self) -> &'static dyn Calendar {
        match self {
            HolidayConvention::Nyc => calendars::new_york(),
            HolidayConvention::Usgs => calendars::us_government_bond(),
            HolidayConvention::Lon => calendars::london(),
            HolidayConvention::Tok => calendars::tokyo(),
            HolidayConvention::Target => calendars::target(),
            HolidayConvention::Syd => calendars::sydney(),
            HolidayConvention::None => &NullCalendar,
        }
    }
}

/// Accrual basis (day count) token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AccrualBasis {
    /// `NONE`: simple day count.
    None,
    /// `ACT/ACT`: Actual/Actual ISDA.
    ActAct,
    /// `ACT/365 FIXED`.
    Act365Fixed,
    /// `ACT/360`.
    Act360,
    /// `30/360`: 30/360 ISDA.
    Thirty360,
    /// `BUSINESS252`: weekdays over 252.
    Business252,
}

impl AccrualBasis {
    /// All bases.
    pub const ALL: [AccrualBasis; 6] = [
        AccrualBasis::None,
        AccrualBasis::ActAct,
        AccrualBasis::Act365Fixed,
        AccrualBasis::Act360,
        AccrualBasis::Thirty360,
        AccrualBasis::Business252,
    ];

    /// Market token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            AccrualBasis::None => "NONE",
            AccrualBasis::ActAct => "ACT/ACT",
            AccrualBasis::Act365Fixed => "ACT/365 FIXED",
            AccrualBasis::Act360 => "ACT/360",
            AccrualBasis::Thirty360 => "30/360",
            AccrualBasis::Business252 => "BUSINESS252",
        }
    }

    /// The day count this basis stands for.
    #[must_use]
    pub fn day_count(&self) -> Box<dyn DayCount> {
        match self {
            AccrualBasis::None => Box::new(SimpleDayCount),
            AccrualBasis::ActAct => Box::new(ActActIsda),
            AccrualBasis::Act365Fixed => Box::new(Act365Fixed),
            AccrualBasis::Act360 => Box::new(Act360),
            AccrualBasis::Thirty360 => Box::new(Thirty360Isda),
            AccrualBasis::Business252 => Box::new(Business252::default()),
        }
    }

    /// Year fraction between two dates under this basis.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.day_count().year_fraction(start, end)
    }
}

macro_rules! token_conversions {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let upper = s.trim().to_uppercase();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.token() == upper)
                    .ok_or_else(|| CoreError::unknown_convention($kind, s))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.token().to_string()
            }
        }
    };
}

token_conversions!(HolidayConvention, "holiday convention");
token_conversions!(AccrualBasis, "accrual basis");

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_holiday_tokens() {
        for hc in HolidayConvention::ALL {
            assert_eq!(hc.token().parse::<HolidayConvention>().unwrap(), hc);
        }
        assert_eq!("usgs".parse::<HolidayConvention>().unwrap(), HolidayConvention::Usgs);
        let err = "XYZ".parse::<HolidayConvention>().unwrap_err();
        assert_eq!(err, CoreError::unknown_convention("holiday convention", "XYZ"));
    }

    #[test]
    fn test_none_calendar_has_no_weekends() {
        let cal = HolidayConvention::None.calendar();
        assert!(cal.is_business_day(d(2025, 1, 4)));
    }

    #[test]
    fn test_calendars_resolve() {
        // 2024-01-15 is MLK day in the US but a business day in London
        assert!(HolidayConvention::Usgs.calendar().is_holiday(d(2024, 1, 15)));
        assert!(HolidayConvention::Nyc.calendar().is_holiday(d(2024, 1, 15)));
        assert!(HolidayConvention::Lon.calendar().is_business_day(d(2024, 1, 15)));
    }

    #[test]
    fn test_accrual_basis_tokens() {
        assert_eq!("act/365 fixed".parse::<AccrualBasis>().unwrap(), AccrualBasis::Act365Fixed);
        assert_eq!(AccrualBasis::Thirty360.to_string(), "30/360");
        assert!("ACT/365".parse::<AccrualBasis>().is_err());
    }

    #[test]
    fn test_accrual_basis_year_fraction() {
        assert_eq!(AccrualBasis::Act360.year_fraction(d(2024, 1, 1), d(2024, 4, 1)), dec!(91) / dec!(360));
        assert_eq!(AccrualBasis::None.year_fraction(d(2024, 1, 15), d(2024, 7, 15)), dec!(0.5));
    }

    #[test]
    fn test_serde_tokens() {
        let json = serde_json::to_string(&AccrualBasis::Act365Fixed).unwrap();
        assert_eq!(json, "\"ACT/365 FIXED\"");
        let back: HolidayConvention = serde_json::from_str("\"tok\"").unwrap();
        assert_eq!(back, HolidayConvention::Tok);
    }
}
