//! Either a term (`3M`) or an explicit date.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Date, Period};
use crate::error::{CoreError, CoreResult};

/// A maturity given either as a period from some start or as a date.
///
/// Text parses as a date first and as a period otherwise, so
/// `"2024-07-15"` is a date and `"5Y"` is a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TermOrDate {
    /// A tenor measured from the effective date.
    Term(Period),
    /// An explicit termination date.
    Date(Date),
}

impl TermOrDate {
    /// True if this is a term.
    #[must_use]
    pub fn is_term(&self) -> bool {
        matches!(self, TermOrDate::Term(_))
    }

    /// The term, if any.
    #[must_use]
    pub fn term(&self) -> Option<Period> {
        match self {
            TermOrDate::Term(p) => Some(*p),
            TermOrDate::Date(_) => None,
        }
    }

    /// The date, if any.
    #[must_use]
    pub fn date(&self) -> Option<Date> {
        match self {
            TermOrDate::Date(d) => Some(*d),
            TermOrDate::Term(_) => None,
        }
    }

    /// Parses a date or a period.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` when the text is neither.
    pub fn parse(s: &str) -> CoreResult<Self> {
        if let Ok(date) = Date::parse(s) {
            return Ok(TermOrDate::Date(date));
        }
        Period::parse(s)
            .map(TermOrDate::Term)
            .map_err(|_| CoreError::invalid_period(s, "neither a date nor a term"))
    }
}

impl From<Period> for TermOrDate {
    fn from(p: Period) -> Self {
        TermOrDate::Term(p)
    }
}

impl From<Date> for TermOrDate {
    fn from(d: Date) -> Self {
        TermOrDate::Date(d)
    }
}

impl fmt::Display for TermOrDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermOrDate::Term(p) => write!(f, "{p}"),
            TermOrDate::Date(d) => write!(f, "{d}"),
        }
    }
}

impl FromStr for TermOrDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TermOrDate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TermOrDate> for String {
    fn from(value: TermOrDate) -> Self {
        value.to_string()
    }
}
