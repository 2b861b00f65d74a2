//! RFR futures.

use log::debug;
use rust_decimal::Decimal;

use tenor_core::types::{Currency, Date, TermOrDate};
use tenor_market::{OvernightIndex, RfrFutureConvention};

use crate::context::ProductContext;
use crate::direction::LongOrShort;
use crate::error::{ProductError, ProductResult};
use crate::record::{Record, RecordReader, RecordWriter};

/// A futures position on an overnight index over a reference period.
///
/// The notional is `amount * contractual_notional * basis_point` and is not
/// signed by the direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfrFuture {
    effective_date: Date,
    termination_date: Date,
    convention: RfrFutureConvention,
    index: OvernightIndex,
    long_or_short: LongOrShort,
    amount: Decimal,
    strike: Decimal,
    notional: Decimal,
}

impl RfrFuture {
    /// Type token.
    pub const PRODUCT_TYPE: &'static str = "PRODUCT_RFR_FUTURE";
    /// Schema version.
    pub const VERSION: u32 = 1;

    /// Creates a future.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::Configuration` if `index` is not the
    /// convention's index, or a date error if the term cannot be resolved.
    pub fn new(
        effective_date: Date,
        term_or_termination: TermOrDate,
        convention: RfrFutureConvention,
        index: OvernightIndex,
        long_or_short: LongOrShort,
        amount: Decimal,
        strike: Decimal,
    ) -> ProductResult<Self> {
        if convention.index() != index.name() {
            return Err(ProductError::configuration(format!(
                "future convention {} references index {}, got {}",
                convention.name(),
                convention.index(),
                index.name()
            )));
        }
        let termination_date = index.resolve_termination(effective_date, term_or_termination)?;
        let notional = amount * convention.contractual_notional() * convention.basis_point();
        debug!(
            "{} future {} -> {}, notional {}",
            convention.name(),
            effective_date,
            termination_date,
            notional
        );
        Ok(Self {
            effective_date,
            termination_date,
            convention,
            index,
            long_or_short,
            amount,
            strike,
            notional,
        })
    }

    /// Resolves the convention and its index through the context.
    pub fn from_convention_name(
        effective_date: Date,
        term_or_termination: TermOrDate,
        convention_name: &str,
        long_or_short: LongOrShort,
        amount: Decimal,
        strike: Decimal,
        ctx: &ProductContext,
    ) -> ProductResult<Self> {
        let convention = ctx.future_convention(convention_name)?;
        let index = ctx.index(convention.index())?;
        Self::new(
            effective_date,
            term_or_termination,
            convention,
            index,
            long_or_short,
            amount,
            strike,
        )
    }

    /// Start of the reference period.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective_date
    }

    /// End of the reference period.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination_date
    }

    /// Contract convention.
    #[must_use]
    pub fn convention(&self) -> &RfrFutureConvention {
        &self.convention
    }

    /// Underlying index.
    #[must_use]
    pub fn index(&self) -> &OvernightIndex {
        &self.index
    }

    /// Number of contracts.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Strike (defaults to zero).
    #[must_use]
    pub fn strike(&self) -> Decimal {
        self.strike
    }

    /// Face amount of one contract.
    #[must_use]
    pub fn contractual_notional(&self) -> Decimal {
        self.convention.contractual_notional()
    }

    /// Size of one basis point.
    #[must_use]
    pub fn basis_point(&self) -> Decimal {
        self.convention.basis_point()
    }

    /// `amount * contractual_notional * basis_point`.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Direction as given.
    #[must_use]
    pub fn long_or_short(&self) -> LongOrShort {
        self.long_or_short
    }

    /// Index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.index.currency()
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

    /// Record form.
    #[must_use]
    pub fn serialize(&self) -> Record {
        RecordWriter::new(Self::PRODUCT_TYPE, Self::VERSION)
            .text("EFFECTIVE_DATE", self.effective_date)
            .text("TERMINATION_DATE", self.termination_date)
            .text("FUTURE_CONVENTION", self.convention.name())
            .text("LONG_OR_SHORT", self.long_or_short)
            .decimal("AMOUNT", self.amount)
            .decimal("STRIKE", self.strike)
            .finish()
    }

    /// Rebuilds from a record.
    pub fn from_record(record: &Record, ctx: &ProductContext) -> ProductResult<Self> {
        let r = RecordReader::new(record);
        Self::from_convention_name(
            r.parse("EFFECTIVE_DATE")?,
            r.parse("TERMINATION_DATE")?,
            r.text("FUTURE_CONVENTION")?,
            r.parse("LONG_OR_SHORT")?,
            r.decimal("AMOUNT")?,
            r.decimal_opt("STRIKE")?.unwrap_or_default(),
            ctx,
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

    fn sofr() -> OvernightIndex {
        OvernightIndex::new(
            "SOFR",
            Currency::USD,
            HolidayConvention::Usgs,
            BusinessDayConvention::ModifiedFollowing,
            AccrualBasis::Act360,
            0,
        )
    }

    fn sofr_3m() -> RfrFutureConvention {
        RfrFutureConvention::new("SOFR-3M-FUTURE", "SOFR", Period::months(3), dec!(1000000), dec!(0.0001))
    }

    #[test]
    fn test_notional() {
        let future = RfrFuture::new(
            d(2024, 3, 20),
            TermOrDate::Term(Period::months(3)),
            sofr_3m(),
            sofr(),
            LongOrShort::Short,
            dec!(10),
            dec!(95.25),
        )
        .unwrap();
        assert_eq!(future.notional(), dec!(1000));
        assert_eq!(future.termination_date(), d(2024, 6, 20));
        assert_eq!(future.long_or_short(), LongOrShort::Short);
        assert_eq!(future.currency(), Currency::USD);
    }

    #[test]
    fn test_index_mismatch() {
        let sonia = OvernightIndex::new(
            "SONIA",
            Currency::GBP,
            HolidayConvention::Lon,
            BusinessDayConvention::ModifiedFollowing,
            AccrualBasis::Act365Fixed,
            0,
        );
        let err = RfrFuture::new(
            d(2024, 3, 20),
            TermOrDate::Term(Period::months(3)),
            sofr_3m(),
            sonia,
            LongOrShort::Long,
            dec!(1),
            Decimal::ZERO,
        )
        .unwrap_err();
        assert!(matches!(err, ProductError::Configuration { .. }));
    }
}
