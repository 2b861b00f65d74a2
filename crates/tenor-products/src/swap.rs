//! Fixed versus overnight index swaps.
//!
//! The fixed leg notional carries the sign of the pay/receive flag (`+` for
//! pay, `-` for receive) and the floating leg the opposite sign. Both legs
//! share effective and termination dates and pay on the swap's payment
//! conventions. The floating leg accrues on the index fixing calendar with the
//! payment roll convention and fixes in arrear; the fixed leg accrues on the
//! payment calendar.

use log::debug;
use rust_decimal::Decimal;

use tenor_core::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
use tenor_core::types::{Currency, Date, Period, TermOrDate};
use tenor_market::{CompoundingMethod, OvernightIndex};

use crate::context::ProductContext;
use crate::direction::{LongOrShort, PayOrReceive};
use crate::error::{ProductError, ProductResult};
use crate::product::Product;
use crate::record::{Record, RecordReader, RecordWriter};
use crate::stream::InterestRateStream;

/// An overnight index swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfrSwap {
    effective_date: Date,
    term_or_termination_date: TermOrDate,
    termination_date: Date,
    payment_offset: Period,
    index: OvernightIndex,
    fixed_rate: Decimal,
    pay_or_receive: PayOrReceive,
    notional: Decimal,
    accrual_period: Period,
    floating_leg_accrual_period: Period,
    accrual_basis: AccrualBasis,
    pay_business_day_convention: BusinessDayConvention,
    pay_holiday_convention: HolidayConvention,
    spread: Decimal,
    compounding_method: CompoundingMethod,
    fixed_leg: InterestRateStream,
    floating_leg: InterestRateStream,
}

impl RfrSwap {
    /// Type token.
    pub const PRODUCT_TYPE: &'static str = "PRODUCT_RFR_SWAP";
    /// Schema version.
    pub const VERSION: u32 = 1;

    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RfrSwapBuilder {
        RfrSwapBuilder::new()
    }

    /// Fixed leg cashflow `i`.
    pub fn fixed_leg_cashflow(&self, i: usize) -> ProductResult<&Product> {
        self.fixed_leg.cashflow(i)
    }

    /// Floating leg cashflow `i`.
    pub fn floating_leg_cashflow(&self, i: usize) -> ProductResult<&Product> {
        self.floating_leg.cashflow(i)
    }

    /// Fixed leg.
    #[must_use]
    pub fn fixed_leg(&self) -> &InterestRateStream {
        &self.fixed_leg
    }

    /// Floating leg.
    #[must_use]
    pub fn floating_leg(&self) -> &InterestRateStream {
        &self.floating_leg
    }

    /// Start date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective_date
    }

    /// Resolved end date.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination_date
    }

    /// Term or end date as given.
    #[must_use]
    pub fn term_or_termination_date(&self) -> TermOrDate {
        self.term_or_termination_date
    }

    /// Payment offset from each period end.
    #[must_use]
    pub fn payment_offset(&self) -> Period {
        self.payment_offset
    }

    /// Floating index.
    #[must_use]
    pub fn index(&self) -> &OvernightIndex {
        &self.index
    }

    /// Fixed rate.
    #[must_use]
    pub fn fixed_rate(&self) -> Decimal {
        self.fixed_rate
    }

    /// Pay or receive fixed.
    #[must_use]
    pub fn pay_or_receive(&self) -> PayOrReceive {
        self.pay_or_receive
    }

    /// Notional as given.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Fixed leg tenor.
    #[must_use]
    pub fn accrual_period(&self) -> Period {
        self.accrual_period
    }

    /// Floating leg tenor.
    #[must_use]
    pub fn floating_leg_accrual_period(&self) -> Period {
        self.floating_leg_accrual_period
    }

    /// Day count of both legs.
    #[must_use]
    pub fn accrual_basis(&self) -> AccrualBasis {
        self.accrual_basis
    }

    /// Payment roll convention.
    #[must_use]
    pub fn pay_business_day_convention(&self) -> BusinessDayConvention {
        self.pay_business_day_convention
    }

    /// Payment calendar.
    #[must_use]
    pub fn pay_holiday_convention(&self) -> HolidayConvention {
        self.pay_holiday_convention
    }

    /// Floating spread.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        self.spread
    }

    /// Floating compounding.
    #[must_use]
    pub fn compounding_method(&self) -> CompoundingMethod {
        self.compounding_method
    }

    /// Index currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.index.currency()
    }

    /// Long for a positive notional; a zero notional counts as short.
    #[must_use]
    pub fn long_or_short(&self) -> LongOrShort {
        if self.notional > Decimal::ZERO {
            LongOrShort::Long
        } else {
            LongOrShort::Short
        }
    }

    /// The effective date.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.effective_date
    }

    /// The resolved termination date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        self.termination_date
    }

    /// Record form; a term is written as a term.
    #[must_use]
    pub fn serialize(&self) -> Record {
        RecordWriter::new(Self::PRODUCT_TYPE, Self::VERSION)
            .text("EFFECTIVE_DATE", self.effective_date)
            .text("TERM_OR_TERMINATION_DATE", self.term_or_termination_date)
            .text("PAYMENT_OFFSET", self.payment_offset)
            .text("ON_INDEX", self.index.name())
            .decimal("FIXED_RATE", self.fixed_rate)
            .text("PAY_OR_REC", self.pay_or_receive)
            .decimal("NOTIONAL", self.notional)
            .text("ACCRUAL_PERIOD", self.accrual_period)
            .text("FLOATING_LEG_ACCRUAL_PERIOD", self.floating_leg_accrual_period)
            .text("ACCRUAL_BASIS", self.accrual_basis)
            .text("PAY_BUSINESS_DAY_CONVENTION", self.pay_business_day_convention)
            .text("PAY_HOLIDAY_CONVENTION", self.pay_holiday_convention)
            .decimal("SPREAD", self.spread)
            .text("COMPOUNDING_METHOD", self.compounding_method)
            .finish()
    }

    /// Rebuilds from a record, resolving the index through the context.
    pub fn from_record(record: &Record, ctx: &ProductContext) -> ProductResult<Self> {
        let r = RecordReader::new(record);
        let mut builder = RfrSwap::builder()
            .effective_date(r.parse("EFFECTIVE_DATE")?)
            .term_or_termination_date(r.parse("TERM_OR_TERMINATION_DATE")?)
            .index(ctx.index(r.text("ON_INDEX")?)?)
            .fixed_rate(r.decimal("FIXED_RATE")?)
            .pay_or_receive(r.parse("PAY_OR_REC")?)
            .notional(r.decimal("NOTIONAL")?)
            .accrual_period(r.parse("ACCRUAL_PERIOD")?)
            .accrual_basis(r.parse("ACCRUAL_BASIS")?);
        if let Some(offset) = r.parse_opt::<Period>("PAYMENT_OFFSET")? {
            builder = builder.payment_offset(offset);
        }
        if let Some(period) = r.parse_opt::<Period>("FLOATING_LEG_ACCRUAL_PERIOD")? {
            builder = builder.floating_leg_accrual_period(period);
        }
        if let Some(convention) = r.parse_opt::<BusinessDayConvention>("PAY_BUSINESS_DAY_CONVENTION")? {
            builder = builder.pay_business_day_convention(convention);
        }
        if let Some(holidays) = r.parse_opt::<HolidayConvention>("PAY_HOLIDAY_CONVENTION")? {
            builder = builder.pay_holiday_convention(holidays);
        }
        if let Some(spread) = r.decimal_opt("SPREAD")? {
            builder = builder.spread(spread);
        }
        if let Some(method) = r.parse_opt::<CompoundingMethod>("COMPOUNDING_METHOD")? {
            builder = builder.compounding_method(method);
        }
        builder.build()
    }
}

/// Builder for [`RfrSwap`].
#[derive(Debug, Clone)]
pub struct RfrSwapBuilder {
    effective_date: Option<Date>,
    term_or_termination_date: Option<TermOrDate>,
    payment_offset: Period,
    index: Option<OvernightIndex>,
    fixed_rate: Option<Decimal>,
    pay_or_receive: Option<PayOrReceive>,
    notional: Option<Decimal>,
    accrual_period: Option<Period>,
    floating_leg_accrual_period: Option<Period>,
    accrual_basis: Option<AccrualBasis>,
    pay_business_day_convention: BusinessDayConvention,
    pay_holiday_convention: HolidayConvention,
    spread: Decimal,
    compounding_method: CompoundingMethod,
}

impl Default for RfrSwapBuilder {
    fn default() -> Self {
        Self {
            effective_date: None,
            term_or_termination_date: None,
            payment_offset: Period::days(0),
            index: None,
            fixed_rate: None,
            pay_or_receive: None,
            notional: None,
            accrual_period: None,
            floating_leg_accrual_period: None,
            accrual_basis: None,
            pay_business_day_convention: BusinessDayConvention::Following,
            pay_holiday_convention: HolidayConvention::Usgs,
            spread: Decimal::ZERO,
            compounding_method: CompoundingMethod::Compound,
        }
    }
}

impl RfrSwapBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date.
    #[must_use]
    pub fn effective_date(mut self, date: Date) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// Sets the end as a term or a date.
    #[must_use]
    pub fn term_or_termination_date(mut self, value: TermOrDate) -> Self {
        self.term_or_termination_date = Some(value);
        self
    }

    /// Sets the payment offset (default `0D`).
    #[must_use]
    pub fn payment_offset(mut self, offset: Period) -> Self {
        self.payment_offset = offset;
        self
    }

    /// Sets the floating index.
    #[must_use]
    pub fn index(mut self, index: OvernightIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Resolves the floating index by name.
    pub fn index_name(self, name: &str, ctx: &ProductContext) -> ProductResult<Self> {
        Ok(self.index(ctx.index(name)?))
    }

    /// Sets the fixed rate.
    #[must_use]
    pub fn fixed_rate(mut self, rate: Decimal) -> Self {
        self.fixed_rate = Some(rate);
        self
    }

    /// Sets pay or receive fixed.
    #[must_use]
    pub fn pay_or_receive(mut self, flag: PayOrReceive) -> Self {
        self.pay_or_receive = Some(flag);
        self
    }

    /// Sets the notional.
    #[must_use]
    pub fn notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the fixed leg tenor.
    #[must_use]
    pub fn accrual_period(mut self, period: Period) -> Self {
        self.accrual_period = Some(period);
        self
    }

    /// Sets the floating leg tenor (defaults to the fixed leg tenor).
    #[must_use]
    pub fn floating_leg_accrual_period(mut self, period: Period) -> Self {
        self.floating_leg_accrual_period = Some(period);
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn accrual_basis(mut self, basis: AccrualBasis) -> Self {
        self.accrual_basis = Some(basis);
        self
    }

    /// Sets the payment roll convention (default `F`).
    #[must_use]
    pub fn pay_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.pay_business_day_convention = convention;
        self
    }

    /// Sets the payment calendar (default `USGS`).
    #[must_use]
    pub fn pay_holiday_convention(mut self, holidays: HolidayConvention) -> Self {
        self.pay_holiday_convention = holidays;
        self
    }

    /// Sets the floating spread.
    #[must_use]
    pub fn spread(mut self, spread: Decimal) -> Self {
        self.spread = spread;
        self
    }

    /// Sets the floating compounding (default `COMPOUND`).
    #[must_use]
    pub fn compounding_method(mut self, method: CompoundingMethod) -> Self {
        self.compounding_method = method;
        self
    }

    /// Resolves the termination date and builds both legs.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::MissingField` for unset required inputs, or a
    /// schedule error from either leg.
    pub fn build(self) -> ProductResult<RfrSwap> {
        let effective_date = self
            .effective_date
            .ok_or_else(|| ProductError::missing_field("effective_date"))?;
        let term_or_termination_date = self
            .term_or_termination_date
            .ok_or_else(|| ProductError::missing_field("term_or_termination_date"))?;
        let index = self
            .index
            .ok_or_else(|| ProductError::missing_field("index"))?;
        let fixed_rate = self
            .fixed_rate
            .ok_or_else(|| ProductError::missing_field("fixed_rate"))?;
        let pay_or_receive = self
            .pay_or_receive
            .ok_or_else(|| ProductError::missing_field("pay_or_receive"))?;
        let notional = self
            .notional
            .ok_or_else(|| ProductError::missing_field("notional"))?;
        let accrual_period = self
            .accrual_period
            .ok_or_else(|| ProductError::missing_field("accrual_period"))?;
        let accrual_basis = self
            .accrual_basis
            .ok_or_else(|| ProductError::missing_field("accrual_basis"))?;
        let floating_leg_accrual_period = self.floating_leg_accrual_period.unwrap_or(accrual_period);

        let termination_date = index.resolve_termination(effective_date, term_or_termination_date)?;
        let fixed_notional = notional * pay_or_receive.fixed_leg_sign();

        let floating_leg = InterestRateStream::builder()
            .effective_date(effective_date)
            .termination_date(termination_date)
            .accrual_period(floating_leg_accrual_period)
            .notional(-fixed_notional)
            .currency(index.currency())
            .accrual_basis(accrual_basis)
            .business_day_convention(self.pay_business_day_convention)
            .holiday_convention(index.fixing_calendar())
            .floating_index(index.clone())
            .compounding_method(self.compounding_method)
            .spread(self.spread)
            .fix_in_arrear(true)
            .payment_offset(Some(self.payment_offset))
            .payment_conventions(self.pay_business_day_convention, self.pay_holiday_convention)
            .build()?;

        let fixed_leg = InterestRateStream::builder()
            .effective_date(effective_date)
            .termination_date(termination_date)
            .accrual_period(accrual_period)
            .notional(fixed_notional)
            .currency(index.currency())
            .accrual_basis(accrual_basis)
            .business_day_convention(self.pay_business_day_convention)
            .holiday_convention(self.pay_holiday_convention)
            .fixed_rate(fixed_rate)
            .payment_offset(Some(self.payment_offset))
            .payment_conventions(self.pay_business_day_convention, self.pay_holiday_convention)
            .build()?;

        debug!(
            "{} {} swap {} -> {}: {} fixed / {} floating cashflows",
            pay_or_receive,
            index.name(),
            effective_date,
            termination_date,
            fixed_leg.num_cashflows(),
            floating_leg.num_cashflows()
        );

        Ok(RfrSwap {
            effective_date,
            term_or_termination_date,
            termination_date,
            payment_offset: self.payment_offset,
            index,
            fixed_rate,
            pay_or_receive,
            notional,
            accrual_period,
            floating_leg_accrual_period,
            accrual_basis,
            pay_business_day_convention: self.pay_business_day_convention,
            pay_holiday_convention: self.pay_holiday_convention,
            spread: self.spread,
            compounding_method: self.compounding_method,
            fixed_leg,
            floating_leg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

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

    fn one_year(flag: PayOrReceive) -> RfrSwap {
        RfrSwap::builder()
            .effective_date(d(2024, 1, 16))
            .term_or_termination_date(TermOrDate::Term(Period::years(1)))
            .index(sofr())
            .fixed_rate(dec!(0.0425))
            .pay_or_receive(flag)
            .notional(dec!(100))
            .accrual_period(Period::months(3))
            .accrual_basis(AccrualBasis::Act360)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pay_fixed_signs() {
        let swap = one_year(PayOrReceive::Pay);
        assert_eq!(swap.termination_date(), d(2025, 1, 16));
        assert_eq!(swap.fixed_leg().num_cashflows(), 4);
        assert_eq!(swap.floating_leg().num_cashflows(), 4);

        for cf in swap.fixed_leg().cashflows() {
            assert_eq!(cf.notional(), dec!(100));
        }
        for cf in swap.floating_leg().cashflows() {
            assert_eq!(cf.notional(), dec!(-100));
        }
    }

    #[test]
    fn test_receive_fixed_signs() {
        let swap = one_year(PayOrReceive::Receive);
        assert_eq!(swap.fixed_leg_cashflow(0).unwrap().notional(), dec!(-100));
        assert_eq!(swap.floating_leg_cashflow(0).unwrap().notional(), dec!(100));
    }

    #[test]
    fn test_direction_follows_notional() {
        assert_eq!(one_year(PayOrReceive::Pay).long_or_short(), LongOrShort::Long);

        let build = |notional: Decimal| {
            RfrSwap::builder()
                .effective_date(d(2024, 1, 16))
                .term_or_termination_date(TermOrDate::Term(Period::years(1)))
                .index(sofr())
                .fixed_rate(dec!(0.0425))
                .pay_or_receive(PayOrReceive::Receive)
                .notional(notional)
                .accrual_period(Period::months(3))
                .accrual_basis(AccrualBasis::Act360)
                .build()
                .unwrap()
        };
        assert_eq!(build(dec!(-5)).long_or_short(), LongOrShort::Short);
        assert_eq!(build(Decimal::ZERO).long_or_short(), LongOrShort::Short);
    }

    #[test]
    fn test_out_of_range_cashflow() {
        let swap = one_year(PayOrReceive::Pay);
        assert!(swap.fixed_leg_cashflow(4).is_err());
        assert!(swap.floating_leg_cashflow(99).is_err());
    }

    #[test]
    fn test_floating_period_override() {
        let swap = RfrSwap::builder()
            .effective_date(d(2024, 1, 16))
            .term_or_termination_date(TermOrDate::Term(Period::years(1)))
            .index(sofr())
            .fixed_rate(dec!(0.04))
            .pay_or_receive(PayOrReceive::Pay)
            .notional(dec!(1_000_000))
            .accrual_period(Period::years(1))
            .floating_leg_accrual_period(Period::months(3))
            .accrual_basis(AccrualBasis::Act360)
            .build()
            .unwrap();
        assert_eq!(swap.fixed_leg().num_cashflows(), 1);
        assert_eq!(swap.floating_leg().num_cashflows(), 4);
        assert!(swap.floating_leg().is_floating());
    }

    #[test]
    fn test_term_serialized_as_term() {
        let record = one_year(PayOrReceive::Pay).serialize();
        assert_eq!(record["TERM_OR_TERMINATION_DATE"], "1Y");
        assert_eq!(record["PAY_OR_REC"], "PAY");
        assert_eq!(record["FLOATING_LEG_ACCRUAL_PERIOD"], "3M");
        assert_eq!(record["PAY_HOLIDAY_CONVENTION"], "USGS");
    }

    #[test]
    fn test_missing_index() {
        let err = RfrSwap::builder()
            .effective_date(d(2024, 1, 16))
            .term_or_termination_date(TermOrDate::Term(Period::years(1)))
            .build()
            .unwrap_err();
        assert_eq!(err, ProductError::missing_field("index"));
    }
}
