//! A single fixed amount paid on one date.

use rust_decimal::Decimal;

use tenor_core::types::{Currency, Date};

use crate::direction::LongOrShort;
use crate::error::ProductResult;
use crate::record::{Record, RecordReader, RecordWriter};

/// A bullet cashflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletCashflow {
    termination_date: Date,
    currency: Currency,
    notional: Decimal,
    long_or_short: LongOrShort,
    payment_date: Date,
}

impl BulletCashflow {
    /// Type token.
    pub const PRODUCT_TYPE: &'static str = "PRODUCT_BULLET_CASHFLOW";
    /// Schema version.
    pub const VERSION: u32 = 1;

    /// Creates a bullet cashflow; payment defaults to the termination date.
    #[must_use]
    pub fn new(
        termination_date: Date,
        currency: Currency,
        notional: Decimal,
        long_or_short: LongOrShort,
        payment_date: Option<Date>,
    ) -> Self {
        Self {
            termination_date,
            currency,
            notional,
            long_or_short,
            payment_date: payment_date.unwrap_or(termination_date),
        }
    }

    /// Date the amount is fixed.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination_date
    }

    /// Date the amount is paid.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Amount.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Direction as given at construction.
    #[must_use]
    pub fn long_or_short(&self) -> LongOrShort {
        self.long_or_short
    }

    /// Same as the termination date.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.termination_date
    }

    /// Same as the termination date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        self.termination_date
    }

    /// Record form.
    #[must_use]
    pub fn serialize(&self) -> Record {
        RecordWriter::new(Self::PRODUCT_TYPE, Self::VERSION)
            .text("TERMINATION_DATE", self.termination_date)
            .text("CURRENCY", self.currency.code())
            .decimal("NOTIONAL", self.notional)
            .text("LONG_OR_SHORT", self.long_or_short)
            .text("PAYMENT_DATE", self.payment_date)
            .finish()
    }

    /// Rebuilds from a record.
    pub fn from_record(record: &Record) -> ProductResult<Self> {
        let r = RecordReader::new(record);
        Ok(Self::new(
            r.parse("TERMINATION_DATE")?,
            r.parse("CURRENCY")?,
            r.decimal("NOTIONAL")?,
            r.parse("LONG_OR_SHORT")?,
            r.parse_opt("PAYMENT_DATE")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_payment_defaults_to_termination() {
        let cf = BulletCashflow::new(d(2025, 6, 30), Currency::USD, dec!(1000), LongOrShort::Long, None);
        assert_eq!(cf.payment_date(), d(2025, 6, 30));
        assert_eq!(cf.first_date(), cf.last_date());
    }

    #[test]
    fn test_record_round_trip() {
        let cf = BulletCashflow::new(
            d(2025, 6, 30),
            Currency::GBP,
            dec!(-250.5),
            LongOrShort::Short,
            Some(d(2025, 7, 2)),
        );
        let record = cf.serialize();
        assert_eq!(record["CURRENCY"], "GBP");
        assert_eq!(record["LONG_OR_SHORT"], "SHORT");
        assert_eq!(BulletCashflow::from_record(&record).unwrap(), cf);
    }
}
