//! Instrument conventions keyed by a unique name.
//!
//! A bootstrap record carries a `type` tag selecting the convention variant;
//! the remaining fields are that variant's content.
//!
//! ```json
//! "SOFR-3M-FUTURE": {
//!   "type": "RFR_FUTURE",
//!   "index": "SOFR",
//!   "accrual_period": "3M",
//!   "contractual_notional": 1000000,
//!   "basis_point": 0.0001
//! }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

use tenor_core::types::Period;

use crate::error::{MarketError, MarketResult};
use crate::registry::{Registry, RegistryKind};

/// Contract terms of an RFR future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfrFutureConvention {
    name: String,
    index: String,
    accrual_period: Period,
    contractual_notional: Decimal,
    basis_point: Decimal,
}

impl RfrFutureConvention {
    /// Creates the convention. Name and index are upper-cased.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        index: impl Into<String>,
        accrual_period: Period,
        contractual_notional: Decimal,
        basis_point: Decimal,
    ) -> Self {
        Self {
            name: name.into().to_uppercase(),
            index: index.into().to_uppercase(),
            accrual_period,
            contractual_notional,
            basis_point,
        }
    }

    /// Unique convention name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the underlying overnight index.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Reference period of the contract.
    #[must_use]
    pub fn accrual_period(&self) -> Period {
        self.accrual_period
    }

    /// Face amount of one contract.
    #[must_use]
    pub fn contractual_notional(&self) -> Decimal {
        self.contractual_notional
    }

    /// Size of one basis point.
    #[must_use]
    pub fn basis_point(&self) -> Decimal {
        self.basis_point
    }
}

/// A named instrument convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataConvention {
    /// `RFR_FUTURE`.
    RfrFuture(RfrFutureConvention),
}

impl DataConvention {
    /// Unique convention name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            DataConvention::RfrFuture(c) => c.name(),
        }
    }

    /// Type tag.
    #[must_use]
    pub fn convention_type(&self) -> &'static str {
        match self {
            DataConvention::RfrFuture(_) => "RFR_FUTURE",
        }
    }

    /// The RFR future terms, if this is one.
    #[must_use]
    pub fn as_rfr_future(&self) -> Option<&RfrFutureConvention> {
        match self {
            DataConvention::RfrFuture(c) => Some(c),
        }
    }

    /// Field name/value pairs in declaration order.
    #[must_use]
    pub fn display(&self) -> Vec<(String, String)> {
        match self {
            DataConvention::RfrFuture(c) => vec![
                ("INDEX".to_string(), c.index.clone()),
                ("ACCRUAL_PERIOD".to_string(), c.accrual_period.to_string()),
                (
                    "CONTRACTUAL_NOTIONAL".to_string(),
                    c.contractual_notional.to_string(),
                ),
                ("BASIS_POINT".to_string(), c.basis_point.to_string()),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ConventionRecord {
    #[serde(rename = "RFR_FUTURE", alias = "rfr_future")]
    RfrFuture {
        index: String,
        accrual_period: Period,
        contractual_notional: Decimal,
        basis_point: Decimal,
    },
}

/// Registry kind for instrument conventions, bootstrapped from
/// `data_conventions.json`.
#[derive(Debug, Clone, Copy)]
pub struct DataConventionKind;

impl RegistryKind for DataConventionKind {
    const NAME: &'static str = "DataConventionRegistry";
    const FILE_NAME: Option<&'static str> = Some("data_conventions");
    type Value = DataConvention;

    fn decode(key: &str, record: &serde_json::Value) -> MarketResult<DataConvention> {
        let raw = ConventionRecord::deserialize(record)
            .map_err(|e| MarketError::invalid_entry(Self::NAME, key, e.to_string()))?;
        let convention = match raw {
            ConventionRecord::RfrFuture {
                index,
                accrual_period,
                contractual_notional,
                basis_point,
            } => DataConvention::RfrFuture(RfrFutureConvention::new(
                key,
                index,
                accrual_period,
                contractual_notional,
                basis_point,
            )),
        };
        Ok(convention)
    }
}

/// Instrument convention registry.
pub type DataConventionRegistry = Registry<DataConventionKind>;

impl Registry<DataConventionKind> {
    /// (name, type) for every convention, in key order.
    #[must_use]
    pub fn display_all(&self) -> Vec<(String, String)> {
        self.entries()
            .into_iter()
            .map(|(key, convention)| (key, convention.convention_type().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_decode_rfr_future() {
        let record = json!({
            "type": "RFR_FUTURE",
            "index": "sofr",
            "accrual_period": "3M",
            "contractual_notional": 1000000,
            "basis_point": 0.0001
        });
        let conv = DataConventionKind::decode("SOFR-3M-FUTURE", &record).unwrap();
        assert_eq!(conv.name(), "SOFR-3M-FUTURE");
        assert_eq!(conv.convention_type(), "RFR_FUTURE");

        let future = conv.as_rfr_future().unwrap();
        assert_eq!(future.index(), "SOFR");
        assert_eq!(future.accrual_period(), Period::months(3));
        assert_eq!(future.contractual_notional(), dec!(1000000));
        assert_eq!(future.basis_point(), dec!(0.0001));
    }

    #[test]
    fn test_decode_unknown_type() {
        let record = json!({ "type": "BOND_FUTURE", "index": "SOFR" });
        let err = DataConventionKind::decode("X", &record).unwrap_err();
        assert!(matches!(err, MarketError::InvalidEntry { .. }));
    }

    #[test]
    fn test_display_pairs() {
        let conv = DataConvention::RfrFuture(RfrFutureConvention::new(
            "sonia-3m-future",
            "sonia",
            Period::months(3),
            dec!(500000),
            dec!(0.0001),
        ));
        let pairs = conv.display();
        assert_eq!(pairs[0], ("INDEX".to_string(), "SONIA".to_string()));
        assert_eq!(pairs[1], ("ACCRUAL_PERIOD".to_string(), "3M".to_string()));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_display_all() {
        let registry = DataConventionRegistry::new();
        registry
            .register(
                "b-future",
                DataConvention::RfrFuture(RfrFutureConvention::new(
                    "b-future",
                    "SOFR",
                    Period::months(1),
                    dec!(5000000),
                    dec!(0.0001),
                )),
            )
            .unwrap();
        assert_eq!(
            registry.display_all(),
            vec![("B-FUTURE".to_string(), "RFR_FUTURE".to_string())]
        );
    }
}
