//! Overnight rate compounding methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tenor_core::error::CoreError;

/// How daily overnight fixings combine over an accrual period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompoundingMethod {
    /// Plain accrual of a single rate.
    Simple,
    /// Day-weighted average of the fixings.
    Arithmetic,
    /// Geometric compounding of the fixings.
    #[default]
    Compound,
}

impl CompoundingMethod {
    /// Upper-case token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            CompoundingMethod::Simple => "SIMPLE",
            CompoundingMethod::Arithmetic => "ARITHMETIC",
            CompoundingMethod::Compound => "COMPOUND",
        }
    }
}

impl fmt::Display for CompoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for CompoundingMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SIMPLE" => Ok(CompoundingMethod::Simple),
            "ARITHMETIC" => Ok(CompoundingMethod::Arithmetic),
            "COMPOUND" => Ok(CompoundingMethod::Compound),
            _ => Err(CoreError::unknown_convention("compounding method", s)),
        }
    }
}

impl TryFrom<String> for CompoundingMethod {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompoundingMethod> for String {
    fn from(value: CompoundingMethod) -> Self {
        value.token().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("compound".parse::<CompoundingMethod>().unwrap(), CompoundingMethod::Compound);
        assert_eq!("Simple".parse::<CompoundingMethod>().unwrap(), CompoundingMethod::Simple);
        assert!("geometric".parse::<CompoundingMethod>().is_err());
    }

    #[test]
    fn test_serializes_upper_case() {
        let json = serde_json::to_string(&CompoundingMethod::Arithmetic).unwrap();
        assert_eq!(json, "\"ARITHMETIC\"");
    }
}
