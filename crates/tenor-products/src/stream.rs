//! Interest rate legs: one cashflow per schedule row.

use log::debug;
use rust_decimal::Decimal;

use tenor_core::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
use tenor_core::schedule::{DateGenerationRule, Schedule, ScheduleConfig};
use tenor_core::types::{Currency, Date, Period, TermOrDate};
use tenor_market::{CompoundingMethod, OvernightIndex};

use crate::cashflows::{FixedAccruedCashflow, OvernightIndexCashflow};
use crate::error::{ProductError, ProductResult};
use crate::portfolio::Portfolio;
use crate::product::Product;

/// A leg of homogeneous cashflows built from one schedule, each with weight 1.
///
/// A floating leg holds [`OvernightIndexCashflow`]s, a fixed leg
/// [`FixedAccruedCashflow`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestRateStream {
    schedule: Schedule,
    portfolio: Portfolio,
    floating_index: Option<OvernightIndex>,
    fixed_rate: Option<Decimal>,
}

impl InterestRateStream {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> InterestRateStreamBuilder {
        InterestRateStreamBuilder::new()
    }

    /// Cashflow `i`.
    pub fn cashflow(&self, i: usize) -> ProductResult<&Product> {
        self.portfolio.element(i).map_err(|_| {
            ProductError::index_out_of_range("cashflow", i, self.portfolio.num_elements())
        })
    }

    /// Number of cashflows.
    #[must_use]
    pub fn num_cashflows(&self) -> usize {
        self.portfolio.num_elements()
    }

    /// All cashflows.
    #[must_use]
    pub fn cashflows(&self) -> &[Product] {
        self.portfolio.elements()
    }

    /// The underlying portfolio.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// The generating schedule.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Floating index, for a floating leg.
    #[must_use]
    pub fn floating_index(&self) -> Option<&OvernightIndex> {
        self.floating_index.as_ref()
    }

    /// Fixed rate, for a fixed leg.
    #[must_use]
    pub fn fixed_rate(&self) -> Option<Decimal> {
        self.fixed_rate
    }

    /// True for a floating leg.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.floating_index.is_some()
    }
}

/// Builder for [`InterestRateStream`].
#[derive(Debug, Clone)]
pub struct InterestRateStreamBuilder {
    effective_date: Option<Date>,
    termination_date: Option<Date>,
    accrual_period: Option<Period>,
    notional: Option<Decimal>,
    currency: Option<Currency>,
    accrual_basis: Option<AccrualBasis>,
    business_day_convention: BusinessDayConvention,
    holiday_convention: HolidayConvention,
    floating_index: Option<OvernightIndex>,
    fixed_rate: Option<Decimal>,
    compounding_method: CompoundingMethod,
    spread: Decimal,
    fix_in_arrear: bool,
    payment_offset: Option<Period>,
    payment_business_day_convention: BusinessDayConvention,
    payment_holiday_convention: HolidayConvention,
    rule: DateGenerationRule,
    end_of_month: bool,
}

impl Default for InterestRateStreamBuilder {
    fn default() -> Self {
        Self {
            effective_date: None,
            termination_date: None,
            accrual_period: None,
            notional: None,
            currency: None,
            accrual_basis: None,
            business_day_convention: BusinessDayConvention::ModifiedFollowing,
            holiday_convention: HolidayConvention::Usgs,
            floating_index: None,
            fixed_rate: None,
            compounding_method: CompoundingMethod::Compound,
            spread: Decimal::ZERO,
            fix_in_arrear: true,
            payment_offset: Some(Period::days(0)),
            payment_business_day_convention: BusinessDayConvention::Following,
            payment_holiday_convention: HolidayConvention::Usgs,
            rule: DateGenerationRule::Backward,
            end_of_month: false,
        }
    }
}

impl InterestRateStreamBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the accrual start.
    #[must_use]
    pub fn effective_date(mut self, date: Date) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// Sets the accrual end.
    #[must_use]
    pub fn termination_date(mut self, date: Date) -> Self {
        self.termination_date = Some(date);
        self
    }

    /// Sets the accrual tenor.
    #[must_use]
    pub fn accrual_period(mut self, period: Period) -> Self {
        self.accrual_period = Some(period);
        self
    }

    /// Sets the signed notional of every cashflow.
    #[must_use]
    pub fn notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the currency of fixed cashflows.
    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn accrual_basis(mut self, basis: AccrualBasis) -> Self {
        self.accrual_basis = Some(basis);
        self
    }

    /// Sets the accrual roll convention (default `MF`).
    #[must_use]
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Sets the accrual calendar (default `USGS`).
    #[must_use]
    pub fn holiday_convention(mut self, holidays: HolidayConvention) -> Self {
        self.holiday_convention = holidays;
        self
    }

    /// Makes this a floating leg on `index`.
    #[must_use]
    pub fn floating_index(mut self, index: OvernightIndex) -> Self {
        self.floating_index = Some(index);
        self
    }

    /// Makes this a fixed leg at `rate`.
    #[must_use]
    pub fn fixed_rate(mut self, rate: Decimal) -> Self {
        self.fixed_rate = Some(rate);
        self
    }

    /// Sets the compounding of floating cashflows (default `COMPOUND`).
    #[must_use]
    pub fn compounding_method(mut self, method: CompoundingMethod) -> Self {
        self.compounding_method = method;
        self
    }

    /// Sets the spread of floating cashflows.
    #[must_use]
    pub fn spread(mut self, spread: Decimal) -> Self {
        self.spread = spread;
        self
    }

    /// Fix at period end (default) or start.
    #[must_use]
    pub fn fix_in_arrear(mut self, arrear: bool) -> Self {
        self.fix_in_arrear = arrear;
        self
    }

    /// Sets the payment offset from the period end (default `0D`).
    #[must_use]
    pub fn payment_offset(mut self, offset: Option<Period>) -> Self {
        self.payment_offset = offset;
        self
    }

    /// Sets the payment roll convention and calendar (default `F` / `USGS`).
    #[must_use]
    pub fn payment_conventions(
        mut self,
        convention: BusinessDayConvention,
        holidays: HolidayConvention,
    ) -> Self {
        self.payment_business_day_convention = convention;
        self.payment_holiday_convention = holidays;
        self
    }

    /// Sets the generation rule (default backward).
    #[must_use]
    pub fn rule(mut self, rule: DateGenerationRule) -> Self {
        self.rule = rule;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }

    /// Generates the schedule and one cashflow per row.
    ///
    /// # Errors
    ///
    /// - `ProductError::Configuration` unless exactly one of floating index
    ///   and fixed rate is set
    /// - `ProductError::MissingField` for unset required inputs
    /// - schedule errors from the generator
    pub fn build(self) -> ProductResult<InterestRateStream> {
        match (&self.floating_index, self.fixed_rate) {
            (None, None) => {
                return Err(ProductError::configuration(
                    "stream needs a floating index or a fixed rate",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ProductError::configuration(
                    "stream cannot have both a floating index and a fixed rate",
                ))
            }
            _ => {}
        }
        let effective_date = self
            .effective_date
            .ok_or_else(|| ProductError::missing_field("effective_date"))?;
        let termination_date = self
            .termination_date
            .ok_or_else(|| ProductError::missing_field("termination_date"))?;
        let accrual_period = self
            .accrual_period
            .ok_or_else(|| ProductError::missing_field("accrual_period"))?;
        let notional = self
            .notional
            .ok_or_else(|| ProductError::missing_field("notional"))?;
        let accrual_basis = self
            .accrual_basis
            .ok_or_else(|| ProductError::missing_field("accrual_basis"))?;
        let currency = match (&self.floating_index, self.currency) {
            (_, Some(currency)) => currency,
            (Some(index), None) => index.currency(),
            (None, None) => return Err(ProductError::missing_field("currency")),
        };

        let config = ScheduleConfig::new(
            effective_date,
            termination_date,
            accrual_period,
            self.holiday_convention,
            self.business_day_convention,
            accrual_basis,
        )
        .with_rule(self.rule)
        .with_end_of_month(self.end_of_month)
        .with_fix_in_arrear(self.fix_in_arrear)
        .with_payment_offset(self.payment_offset)
        .with_payment_conventions(
            self.payment_business_day_convention,
            self.payment_holiday_convention,
        );
        let schedule = Schedule::generate(&config)?;

        let mut cashflows = Vec::with_capacity(schedule.len());
        for row in &schedule {
            let cashflow: Product = match &self.floating_index {
                Some(index) => OvernightIndexCashflow::new(
                    row.start_date,
                    TermOrDate::Date(row.end_date),
                    index.clone(),
                    self.compounding_method,
                    self.spread,
                    notional,
                    Some(row.payment_date),
                )?
                .into(),
                None => FixedAccruedCashflow::new(
                    row.start_date,
                    row.end_date,
                    currency,
                    notional,
                    accrual_basis,
                )
                .with_payment_date(row.payment_date)
                .with_conventions(self.business_day_convention, self.holiday_convention)
                .into(),
            };
            cashflows.push(cashflow);
        }
        debug!(
            "{} stream with {} cashflows",
            if self.floating_index.is_some() { "floating" } else { "fixed" },
            cashflows.len()
        );

        Ok(InterestRateStream {
            schedule,
            portfolio: Portfolio::new(cashflows, None)?,
            floating_index: self.floating_index,
            fixed_rate: self.fixed_rate,
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

    fn base() -> InterestRateStreamBuilder {
        InterestRateStream::builder()
            .effective_date(d(2024, 1, 15))
            .termination_date(d(2024, 7, 15))
            .accrual_period(Period::months(3))
            .notional(dec!(100))
            .accrual_basis(AccrualBasis::Act360)
    }

    #[test]
    fn test_neither_index_nor_rate() {
        let err = base().currency(Currency::USD).build().unwrap_err();
        assert!(matches!(err, ProductError::Configuration { .. }));
    }

    #[test]
    fn test_both_index_and_rate() {
        let err = base()
            .floating_index(sofr())
            .fixed_rate(dec!(0.04))
            .build()
            .unwrap_err();
        assert!(matches!(err, ProductError::Configuration { .. }));
    }

    #[test]
    fn test_fixed_leg() {
        let leg = base()
            .currency(Currency::USD)
            .fixed_rate(dec!(0.04))
            .build()
            .unwrap();
        assert_eq!(leg.num_cashflows(), 2);
        assert!(!leg.is_floating());
        assert!(leg.portfolio().weights().iter().all(|w| *w == Decimal::ONE));

        match leg.cashflow(0).unwrap() {
            Product::FixedAccrued(cf) => {
                assert_eq!(cf.effective_date(), d(2024, 1, 16));
                assert_eq!(cf.termination_date(), d(2024, 4, 15));
                assert_eq!(cf.accrued(), dec!(90) / dec!(360));
            }
            other => panic!("unexpected cashflow {}", other.product_type()),
        }
        assert!(leg.cashflow(2).is_err());
    }

    #[test]
    fn test_floating_leg() {
        let leg = base().floating_index(sofr()).build().unwrap();
        assert_eq!(leg.num_cashflows(), 2);
        assert_eq!(leg.portfolio().notional(), dec!(200));

        match leg.cashflow(1).unwrap() {
            Product::OvernightIndexCashflow(cf) => {
                assert_eq!(cf.effective_date(), d(2024, 4, 15));
                assert_eq!(cf.termination_date(), d(2024, 7, 15));
                assert_eq!(cf.payment_date(), d(2024, 7, 15));
                assert_eq!(cf.currency(), Currency::USD);
            }
            other => panic!("unexpected cashflow {}", other.product_type()),
        }
    }

    #[test]
    fn test_missing_notional() {
        let err = InterestRateStream::builder()
            .effective_date(d(2024, 1, 15))
            .termination_date(d(2024, 7, 15))
            .accrual_period(Period::months(3))
            .accrual_basis(AccrualBasis::Act360)
            .fixed_rate(dec!(0.04))
            .currency(Currency::USD)
            .build()
            .unwrap_err();
        assert_eq!(err, ProductError::missing_field("notional"));
    }
}
