//! A cashflow accruing an overnight index over one period.

use log::debug;
use rust_decimal::Decimal;

use tenor_core::types::{Currency, Date, TermOrDate};
use tenor_market::{CompoundingMethod, OvernightIndex};

use crate::context::ProductContext;
use crate::direction::LongOrShort;
use crate::error::ProductResult;
use crate::record::{Record, RecordReader, RecordWriter};

/// Overnight index coupon from effective to termination.
///
/// A term is resolved into a termination date on the index fixing calendar
/// with the index roll convention. Currency comes from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvernightIndexCashflow {
    effective_date: Date,
    termination_date: Date,
    payment_date: Date,
    index: OvernightIndex,
    compounding_method: CompoundingMethod,
    spread: Decimal,
    notional: Decimal,
}

impl OvernightIndexCashflow {
    /// Type token.
    pub const PRODUCT_TYPE: &'static str = "PRODUCT_OVERNIGHT_INDEX_CASHFLOW";
    /// Schema version.
    pub const VERSION: u32 = 1;

    /// Creates the cashflow; payment defaults to the termination date.
    ///
    /// # Errors
    ///
    /// Returns an error if a term cannot be advanced on the index calendar.
    pub fn new(
        effective_date: Date,
        term_or_termination: TermOrDate,
        index: OvernightIndex,
        compounding_method: CompoundingMethod,
        spread: Decimal,
        notional: Decimal,
        payment_date: Option<Date>,
    ) -> ProductResult<Self> {
        let termination_date = index.resolve_termination(effective_date, term_or_termination)?;
        debug!(
            "{} cashflow {} -> {} ({})",
            index.name(),
            effective_date,
            termination_date,
            term_or_termination
        );
        Ok(Self {
            effective_date,
            termination_date,
            payment_date: payment_date.unwrap_or(termination_date),
            index,
            compounding_method,
            spread,
            notional,
        })
    }

    /// Accrual start.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective_date
    }

    /// Accrual end.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination_date
    }

    /// Payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// The overnight index.
    #[must_use]
    pub fn index(&self) -> &OvernightIndex {
        &self.index
    }

    /// How daily fixings combine.
    #[must_use]
    pub fn compounding_method(&self) -> CompoundingMethod {
        self.compounding_method
    }

    /// Spread over the index.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        self.spread
    }

    /// Signed notional.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.index.currency()
    }

    /// Direction implied by the notional sign.
    #[must_use]
    pub fn long_or_short(&self) -> LongOrShort {
        LongOrShort::from_notional(self.notional)
    }

    /// The effective date.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.effective_date
    }

    /// The termination date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        self.termination_date
    }

    /// Record form; the termination is always written as a date.
    #[must_use]
    pub fn serialize(&self) -> Record {
        RecordWriter::new(Self::PRODUCT_TYPE, Self::VERSION)
            .text("EFFECTIVE_DATE", self.effective_date)
            .text("TERMINATION_DATE", self.termination_date)
            .text("PAYMENT_DATE", self.payment_date)
            .text("ON_INDEX", self.index.name())
            .decimal("SPREAD", self.spread)
            .text("COMPOUNDING_METHOD", self.compounding_method)
            .decimal("NOTIONAL", self.notional)
            .finish()
    }

    /// Rebuilds from a record, resolving the index through the context.
    pub fn from_record(record: &Record, ctx: &ProductContext) -> ProductResult<Self> {
        let r = RecordReader::new(record);
        let index = ctx.index(r.text("ON_INDEX")?)?;
        Self::new(
            r.parse("EFFECTIVE_DATE")?,
            r.parse("TERMINATION_DATE")?,
            index,
            r.parse_opt::<CompoundingMethod>("COMPOUNDING_METHOD")?
                .unwrap_or_default(),
            r.decimal_opt("SPREAD")?.unwrap_or_default(),
            r.decimal("NOTIONAL")?,
            r.parse_opt("PAYMENT_DATE")?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tenor_core::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
    use tenor_core::types::Period;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn sonia() -> OvernightIndex {
        OvernightIndex::new(
            "SONIA",
            Currency::GBP,
            HolidayConvention::Lon,
            BusinessDayConvention::ModifiedFollowing,
            AccrualBasis::Act365Fixed,
            0,
        )
    }

    #[test]
    fn test_term_resolves_on_index_calendar() {
        // 2024-02-26 + 3M = 2024-05-26 (Sunday); Monday 05-27 is a London bank holiday
        let cf = OvernightIndexCashflow::new(
            d(2024, 2, 26),
            TermOrDate::Term(Period::months(3)),
            sonia(),
            CompoundingMethod::Compound,
            Decimal::ZERO,
            dec!(-1_000_000),
            None,
        )
        .unwrap();
        assert_eq!(cf.termination_date(), d(2024, 5, 28));
        assert_eq!(cf.payment_date(), d(2024, 5, 28));
        assert_eq!(cf.currency(), Currency::GBP);
        assert_eq!(cf.long_or_short(), LongOrShort::Short);
    }

    #[test]
    fn test_explicit_termination_kept() {
        let cf = OvernightIndexCashflow::new(
            d(2024, 1, 2),
            TermOrDate::Date(d(2024, 4, 2)),
            sonia(),
            CompoundingMethod::Arithmetic,
            dec!(0.001),
            dec!(100),
            Some(d(2024, 4, 4)),
        )
        .unwrap();
        assert_eq!(cf.first_date(), d(2024, 1, 2));
        assert_eq!(cf.last_date(), d(2024, 4, 2));
        assert_eq!(cf.payment_date(), d(2024, 4, 4));

        let record = cf.serialize();
        assert_eq!(record["ON_INDEX"], "SONIA");
        assert_eq!(record["COMPOUNDING_METHOD"], "ARITHMETIC");
        assert_eq!(record["SPREAD"], serde_json::json!(0.001));
    }
}
