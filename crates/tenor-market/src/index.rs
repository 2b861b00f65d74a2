//! Overnight indices and their registry kind.

use serde::{Deserialize, Serialize};

use tenor_core::conventions::{AccrualBasis, BusinessDayConvention, Currency, HolidayConvention};
use tenor_core::error::CoreResult;
use tenor_core::types::{Date, TermOrDate};

use crate::error::{MarketError, MarketResult};
use crate::registry::{Registry, RegistryKind};

/// An overnight rate index (SOFR, ESTR, SONIA, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OvernightIndex {
    name: String,
    currency: Currency,
    fixing_calendar: HolidayConvention,
    business_day_convention: BusinessDayConvention,
    accrual_basis: AccrualBasis,
    fixing_days: u32,
}

impl OvernightIndex {
    /// Creates an index. The name is upper-cased.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        currency: Currency,
        fixing_calendar: HolidayConvention,
        business_day_convention: BusinessDayConvention,
        accrual_basis: AccrualBasis,
        fixing_days: u32,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            currency,
            fixing_calendar,
            business_day_convention,
            accrual_basis,
            fixing_days,
        }
    }

    /// Index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currency of the index.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Calendar the index fixes on.
    #[must_use]
    pub fn fixing_calendar(&self) -> HolidayConvention {
        self.fixing_calendar
    }

    /// Roll convention of the index.
    #[must_use]
    pub fn business_day_convention(&self) -> BusinessDayConvention {
        self.business_day_convention
    }

    /// Day count of the index.
    #[must_use]
    pub fn accrual_basis(&self) -> AccrualBasis {
        self.accrual_basis
    }

    /// Publication lag in business days.
    #[must_use]
    pub fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    /// Resolves a term into a date by advancing `effective` on the fixing
    /// calendar with the index roll convention. Dates pass through.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if the advanced date is out of range.
    pub fn resolve_termination(&self, effective: Date, term_or_date: TermOrDate) -> CoreResult<Date> {
        match term_or_date {
            TermOrDate::Date(date) => Ok(date),
            TermOrDate::Term(term) => self.fixing_calendar.calendar().advance(
                effective,
                term,
                self.business_day_convention,
                false,
            ),
        }
    }
}

/// Bootstrap record; the name comes from the key.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndexRecord {
    currency: String,
    fixing_calendar: HolidayConvention,
    #[serde(default)]
    business_day_convention: BusinessDayConvention,
    accrual_basis: AccrualBasis,
    #[serde(default)]
    fixing_days: u32,
}

/// Registry kind for overnight indices, bootstrapped from `indices.json`.
#[derive(Debug, Clone, Copy)]
pub struct IndexKind;

impl RegistryKind for IndexKind {
    const NAME: &'static str = "IndexRegistry";
    const FILE_NAME: Option<&'static str> = Some("indices");
    type Value = OvernightIndex;

    fn decode(key: &str, record: &serde_json::Value) -> MarketResult<OvernightIndex> {
        let raw = IndexRecord::deserialize(record)
            .map_err(|e| MarketError::invalid_entry(Self::NAME, key, e.to_string()))?;
        let currency = raw.currency.parse::<Currency>()?;
        Ok(OvernightIndex::new(
            key,
            currency,
            raw.fixing_calendar,
            raw.business_day_convention,
            raw.accrual_basis,
            raw.fixing_days,
        ))
    }
}

/// Overnight index registry.
pub type IndexRegistry = Registry<IndexKind>;
