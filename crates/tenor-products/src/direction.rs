//! Trade direction flags.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tenor_core::error::CoreError;

/// Long or short position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LongOrShort {
    /// Long (positive notional).
    Long,
    /// Short (negative notional).
    Short,
}

impl LongOrShort {
    /// Upper-case token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            LongOrShort::Long => "LONG",
            LongOrShort::Short => "SHORT",
        }
    }

    /// Direction implied by a signed notional; zero counts as long.
    #[must_use]
    pub fn from_notional(notional: Decimal) -> Self {
        if notional.is_sign_negative() && !notional.is_zero() {
            LongOrShort::Short
        } else {
            LongOrShort::Long
        }
    }
}

/// Pay or receive the fixed leg of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PayOrReceive {
    /// Pay fixed.
    Pay,
    /// Receive fixed.
    Receive,
}

impl PayOrReceive {
    /// Upper-case token.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            PayOrReceive::Pay => "PAY",
            PayOrReceive::Receive => "RECEIVE",
        }
    }

    /// Sign applied to the fixed leg notional.
    #[must_use]
    pub fn fixed_leg_sign(&self) -> Decimal {
        match self {
            PayOrReceive::Pay => Decimal::ONE,
            PayOrReceive::Receive => Decimal::NEGATIVE_ONE,
        }
    }
}

macro_rules! direction_tokens {
    ($ty:ty, $kind:literal, [$($variant:expr),+]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let upper = s.trim().to_uppercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.token() == upper)
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

direction_tokens!(LongOrShort, "long/short", [LongOrShort::Long, LongOrShort::Short]);
direction_tokens!(PayOrReceive, "pay/receive", [PayOrReceive::Pay, PayOrReceive::Receive]);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse() {
        assert_eq!("long".parse::<LongOrShort>().unwrap(), LongOrShort::Long);
        assert_eq!("Receive".parse::<PayOrReceive>().unwrap(), PayOrReceive::Receive);
        assert!("flat".parse::<LongOrShort>().is_err());
    }

    #[test]
    fn test_from_notional() {
        assert_eq!(LongOrShort::from_notional(dec!(100)), LongOrShort::Long);
        assert_eq!(LongOrShort::from_notional(Decimal::ZERO), LongOrShort::Long);
        assert_eq!(LongOrShort::from_notional(dec!(-0.5)), LongOrShort::Short);
    }

    #[test]
    fn test_fixed_leg_sign() {
        assert_eq!(PayOrReceive::Pay.fixed_leg_sign(), Decimal::ONE);
        assert_eq!(PayOrReceive::Receive.fixed_leg_sign(), dec!(-1));
    }
}
