//! A fixed cashflow accruing over one period.

use rust_decimal::Decimal;

use tenor_core::conventions::{AccrualBasis, BusinessDayConvention, HolidayConvention};
use tenor_core::dates;
use tenor_core::types::{Currency, Date};

use crate::direction::LongOrShort;
use crate::error::ProductResult;
use crate::record::{Record, RecordReader, RecordWriter};

/// Notional accruing from effective to termination under a day count.
///
/// The accrual fraction is measured to the termination date rolled with the
/// cashflow's own business-day convention and calendar (`F` / `USGS` unless
/// set). The direction follows the sign of the notional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAccruedCashflow {
    effective_date: Date,
    termination_date: Date,
    currency: Currency,
    notional: Decimal,
    accrual_basis: AccrualBasis,
    payment_date: Date,
    business_day_convention: BusinessDayConvention,
    holiday_convention: HolidayConvention,
    accrued: Decimal,
}

impl FixedAccruedCashflow {
    /// Type token.
    pub const PRODUCT_TYPE: &'static str = "PRODUCT_FIXED_ACCRUED";
    /// Schema version.
    pub const VERSION: u32 = 1;

    /// Creates the cashflow with payment on the termination date and `F` /
    /// `USGS` adjustment.
    #[must_use]
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        currency: Currency,
        notional: Decimal,
        accrual_basis: AccrualBasis,
    ) -> Self {
        let mut cashflow = Self {
            effective_date,
            termination_date,
            currency,
            notional,
            accrual_basis,
            payment_date: termination_date,
            business_day_convention: BusinessDayConvention::Following,
            holiday_convention: HolidayConvention::Usgs,
            accrued: Decimal::ZERO,
        };
        cashflow.accrued = cashflow.compute_accrued();
        cashflow
    }

    /// Sets the payment date.
    #[must_use]
    pub fn with_payment_date(mut self, payment_date: Date) -> Self {
        self.payment_date = payment_date;
        self
    }

    /// Sets the adjustment conventions for the accrual end.
    #[must_use]
    pub fn with_conventions(
        mut self,
        business_day_convention: BusinessDayConvention,
        holiday_convention: HolidayConvention,
    ) -> Self {
        self.business_day_convention = business_day_convention;
        self.holiday_convention = holiday_convention;
        self.accrued = self.compute_accrued();
        self
    }

    fn compute_accrued(&self) -> Decimal {
        dates::accrued(
            self.effective_date,
            self.termination_date,
            self.accrual_basis,
            self.business_day_convention,
            self.holiday_convention,
        )
    }

    /// Accrual start.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective_date
    }

    /// Accrual end (unadjusted).
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination_date
    }

    /// Payment date.
    #[must_use]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Signed notional.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Day count basis.
    #[must_use]
    pub fn accrual_basis(&self) -> AccrualBasis {
        self.accrual_basis
    }

    /// Roll convention for the accrual end.
    #[must_use]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.business_day_convention
    }

    /// Calendar for the accrual end.
    #[must_use]
    pub fn holiday_convention(&self) -> HolidayConvention {
        self.holiday_convention
    }

    /// Accrual year fraction.
    #[must_use]
    pub fn accrued(&self) -> Decimal {
        self.accrued
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

    /// Record form.
    #[must_use]
    pub fn serialize(&self) -> Record {
        RecordWriter::new(Self::PRODUCT_TYPE, Self::VERSION)
            .text("EFFECTIVE_DATE", self.effective_date)
            .text("TERMINATION_DATE", self.termination_date)
            .text("CURRENCY", self.currency.code())
            .decimal("NOTIONAL", self.notional)
            .text("ACCRUAL_BASIS", self.accrual_basis)
            .text("PAYMENT_DATE", self.payment_date)
            .text("BUSINESS_DAY_CONVENTION", self.business_day_convention)
            .text("HOLIDAY_CONVENTION", self.holiday_convention)
            .finish()
    }

    /// Rebuilds from a record; missing conventions take their defaults.
    pub fn from_record(record: &Record) -> ProductResult<Self> {
        let r = RecordReader::new(record);
        let mut cashflow = Self::new(
            r.parse("EFFECTIVE_DATE")?,
            r.parse("TERMINATION_DATE")?,
            r.parse("CURRENCY")?,
            r.decimal("NOTIONAL")?,
            r.parse("ACCRUAL_BASIS")?,
        )
        .with_conventions(
            r.parse_opt("BUSINESS_DAY_CONVENTION")?
                .unwrap_or(BusinessDayConvention::Following),
            r.parse_opt("HOLIDAY_CONVENTION")?
                .unwrap_or(HolidayConvention::Usgs),
        );
        if let Some(payment_date) = r.parse_opt::<Date>("PAYMENT_DATE")? {
            cashflow = cashflow.with_payment_date(payment_date);
        }
        Ok(cashflow)
    }
}
