//! Weighted collections of products.

use std::collections::BTreeSet;

use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use tenor_core::types::{Currency, Date};

use crate::context::ProductContext;
use crate::direction::LongOrShort;
use crate::error::{ProductError, ProductResult};
use crate::product::Product;
use crate::record::{decimal_to_value, Record, RecordReader, RecordWriter};

/// Ordered (product, weight) pairs.
///
/// - Never empty; one weight per element (all `1` when omitted)
/// - Notional is the weighted sum of element notionals
/// - First/last date are the min/max over the elements
/// - Currencies are the distinct element currencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    elements: Vec<Product>,
    weights: Vec<Decimal>,
    first_date: Date,
    last_date: Date,
    notional: Decimal,
    currencies: BTreeSet<Currency>,
    long_or_short: Vec<LongOrShort>,
}

impl Portfolio {
    /// Type token.
    pub const PRODUCT_TYPE: &'static str = "PRODUCT_PORTFOLIO";
    /// Schema version.
    pub const VERSION: u32 = 1;

    /// Creates a portfolio.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::InvariantViolation` if `products` is empty or
    /// the weights do not match the product count.
    pub fn new(products: Vec<Product>, weights: Option<Vec<Decimal>>) -> ProductResult<Self> {
        let (first, last) = match (products.first(), products.last()) {
            (Some(first), Some(last)) => (first.first_date(), last.last_date()),
            _ => return Err(ProductError::invariant("portfolio must not be empty")),
        };
        let weights = weights.unwrap_or_else(|| vec![Decimal::ONE; products.len()]);
        if weights.len() != products.len() {
            return Err(ProductError::invariant(format!(
                "{} weights for {} products",
                weights.len(),
                products.len()
            )));
        }

        let first_date = products.iter().map(Product::first_date).fold(first, Date::min);
        let last_date = products.iter().map(Product::last_date).fold(last, Date::max);
        let notional = products
            .iter()
            .zip(&weights)
            .map(|(p, w)| p.notional() * w)
            .sum();
        let currencies = products.iter().flat_map(Product::currencies).collect();
        let long_or_short = products.iter().flat_map(Product::long_or_short).collect();

        debug!(
            "portfolio of {} products, {} -> {}",
            products.len(),
            first_date,
            last_date
        );
        Ok(Self {
            elements: products,
            weights,
            first_date,
            last_date,
            notional,
            currencies,
            long_or_short,
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Element `i`.
    pub fn element(&self, i: usize) -> ProductResult<&Product> {
        self.elements
            .get(i)
            .ok_or_else(|| ProductError::index_out_of_range("element", i, self.elements.len()))
    }

    /// Weight of element `i`.
    pub fn weight(&self, i: usize) -> ProductResult<Decimal> {
        self.weights
            .get(i)
            .copied()
            .ok_or_else(|| ProductError::index_out_of_range("weight", i, self.weights.len()))
    }

    /// All elements.
    #[must_use]
    pub fn elements(&self) -> &[Product] {
        &self.elements
    }

    /// All weights.
    #[must_use]
    pub fn weights(&self) -> &[Decimal] {
        &self.weights
    }

    /// (product, weight) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Product, Decimal)> {
        self.elements.iter().zip(self.weights.iter().copied())
    }

    /// Earliest element first date.
    #[must_use]
    pub fn first_date(&self) -> Date {
        self.first_date
    }

    /// Latest element last date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        self.last_date
    }

    /// Weighted notional.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.notional
    }

    /// Distinct element currencies.
    #[must_use]
    pub fn currencies(&self) -> &BTreeSet<Currency> {
        &self.currencies
    }

    /// Element directions, flattened in element order.
    #[must_use]
    pub fn long_or_short(&self) -> &[LongOrShort] {
        &self.long_or_short
    }

    /// Record form with `PRODUCT_0..PRODUCT_{n-1}` and `WEIGHTS`.
    #[must_use]
    pub fn serialize(&self) -> Record {
        let mut writer = RecordWriter::new(Self::PRODUCT_TYPE, Self::VERSION);
        for (i, element) in self.elements.iter().enumerate() {
            writer = writer.value(&format!("PRODUCT_{i}"), Value::Object(element.serialize()));
        }
        let weights = self.weights.iter().copied().map(decimal_to_value).collect();
        writer.value("WEIGHTS", Value::Array(weights)).finish()
    }

    /// Rebuilds from a record, dispatching each element on its `TYPE`.
    pub fn from_record(record: &Record, ctx: &ProductContext) -> ProductResult<Self> {
        let r = RecordReader::new(record);
        let mut products = Vec::new();
        loop {
            let key = format!("PRODUCT_{}", products.len());
            if !r.has(&key) {
                break;
            }
            products.push(ctx.deserialize(r.nested(&key)?)?);
        }
        let weights = if r.has("WEIGHTS") {
            Some(r.decimals("WEIGHTS")?)
        } else {
            None
        };
        Self::new(products, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflows::BulletCashflow;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn bullet(date: Date, ccy: Currency, notional: Decimal) -> Product {
        let dir = LongOrShort::from_notional(notional);
        BulletCashflow::new(date, ccy, notional, dir, None).into()
    }

    #[test]
    fn test_empty_fails() {
        let err = Portfolio::new(Vec::new(), None).unwrap_err();
        assert!(matches!(err, ProductError::InvariantViolation { .. }));
    }

    #[test]
    fn test_weight_mismatch_fails() {
        let products = vec![bullet(d(2025, 1, 2), Currency::USD, dec!(100))];
        let err = Portfolio::new(products, Some(vec![dec!(1), dec!(2)])).unwrap_err();
        assert!(matches!(err, ProductError::InvariantViolation { .. }));
    }

    #[test]
    fn test_aggregates() {
        let products = vec![
            bullet(d(2025, 6, 2), Currency::USD, dec!(100)),
            bullet(d(2025, 1, 2), Currency::EUR, dec!(-40)),
            bullet(d(2026, 1, 2), Currency::USD, dec!(10)),
        ];
        let portfolio =
            Portfolio::new(products, Some(vec![dec!(1), dec!(0.5), dec!(2)])).unwrap();

        assert_eq!(portfolio.notional(), dec!(100));
        assert_eq!(portfolio.first_date(), d(2025, 1, 2));
        assert_eq!(portfolio.last_date(), d(2026, 1, 2));
        assert_eq!(
            portfolio.currencies().iter().copied().collect::<Vec<_>>(),
            vec![Currency::USD, Currency::EUR]
        );
        assert_eq!(
            portfolio.long_or_short(),
            &[LongOrShort::Long, LongOrShort::Short, LongOrShort::Long]
        );
    }

    #[test]
    fn test_default_weights() {
        let products = vec![
            bullet(d(2025, 1, 2), Currency::USD, dec!(1)),
            bullet(d(2025, 1, 2), Currency::USD, dec!(2)),
        ];
        let portfolio = Portfolio::new(products, None).unwrap();
        assert_eq!(portfolio.weights(), &[dec!(1), dec!(1)]);
        assert_eq!(portfolio.notional(), dec!(3));
        // equal dates are indistinguishable, so ties do not matter
        assert_eq!(portfolio.first_date(), portfolio.last_date());
    }

    #[test]
    fn test_out_of_range() {
        let portfolio =
            Portfolio::new(vec![bullet(d(2025, 1, 2), Currency::USD, dec!(1))], None).unwrap();
        assert!(portfolio.element(0).is_ok());
        assert!(portfolio.element(1).is_err());
        assert!(portfolio.weight(1).is_err());
    }

    #[test]
    fn test_serialize_layout() {
        let portfolio = Portfolio::new(
            vec![
                bullet(d(2025, 1, 2), Currency::USD, dec!(1)),
                bullet(d(2025, 2, 3), Currency::USD, dec!(2)),
            ],
            Some(vec![dec!(1), dec!(0.25)]),
        )
        .unwrap();
        let record = portfolio.serialize();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["VERSION", "TYPE", "PRODUCT_0", "PRODUCT_1", "WEIGHTS"]);
        assert_eq!(record["WEIGHTS"], serde_json::json!([1, 0.25]));
        assert_eq!(record["PRODUCT_1"]["TYPE"], "PRODUCT_BULLET_CASHFLOW");
    }
}
