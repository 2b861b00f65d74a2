//! Calendar periods such as `3M`, `1Y` or `-2D`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Days (business days when advanced on a calendar).
    Days,
    /// Weeks.
    Weeks,
    /// Months.
    Months,
    /// Years.
    Years,
}

impl TimeUnit {
    /// Single-letter code used in the short form.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'D' => Some(TimeUnit::Days),
            'W' => Some(TimeUnit::Weeks),
            'M' => Some(TimeUnit::Months),
            'Y' => Some(TimeUnit::Years),
            _ => None,
        }
    }
}

/// A signed length of time expressed in one unit.
///
/// Parsed from and displayed as the canonical short form (`"3M"`, `"0D"`,
/// `"-2D"`). Parsing is case-insensitive.
///
/// ```rust
/// use tenor_core::types::{Period, TimeUnit};
///
/// let p: Period = "3m".parse().unwrap();
/// assert_eq!(p, Period::new(3, TimeUnit::Months));
/// assert_eq!(p.to_string(), "3M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    length: i32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a period.
    #[must_use]
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Signed length.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Unit.
    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// True for a zero-length period of any unit.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.length == 0
    }

    /// The same period repeated `n` times.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` if the length overflows.
    pub fn times(&self, n: i32) -> CoreResult<Self> {
        self.length
            .checked_mul(n)
            .map(|length| Self::new(length, self.unit))
            .ok_or_else(|| CoreError::invalid_period(self.to_string(), format!("{n} repetitions overflow")))
    }

    /// Parses the short form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` for an empty string, a missing or
    /// unknown unit, or a non-integer length.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let unit_char = chars
            .next_back()
            .ok_or_else(|| CoreError::invalid_period(s, "empty period"))?;
        let unit = TimeUnit::from_code(unit_char)
            .ok_or_else(|| CoreError::invalid_period(s, format!("unknown unit '{unit_char}'")))?;
        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(CoreError::invalid_period(s, "missing length"));
        }
        let length = digits
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_period(s, format!("bad length '{digits}'")))?;
        Ok(Self::new(length, unit))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.code())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
