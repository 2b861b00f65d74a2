//! The closed set of product variants.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use tenor_core::types::{Currency, Date};

use crate::cashflows::{BulletCashflow, FixedAccruedCashflow, OvernightIndexCashflow};
use crate::context::ProductContext;
use crate::direction::LongOrShort;
use crate::error::ProductResult;
use crate::future::RfrFuture;
use crate::portfolio::Portfolio;
use crate::record::Record;
use crate::swap::RfrSwap;
use crate::visitor::ProductVisitor;

/// Any product the workspace can build, serialize and visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Product {
    /// A single fixed amount.
    BulletCashflow(BulletCashflow),
    /// A notional times a year fraction.
    FixedAccrued(FixedAccruedCashflow),
    /// One compounded overnight period.
    OvernightIndexCashflow(OvernightIndexCashflow),
    /// An overnight rate future.
    RfrFuture(RfrFuture),
    /// A fixed versus overnight swap.
    RfrSwap(RfrSwap),
    /// A weighted collection of products.
    Portfolio(Portfolio),
}

impl Product {
    /// Type token written to the record's `TYPE` key.
    #[must_use]
    pub fn product_type(&self) -> &'static str {
        match self {
            Product::BulletCashflow(_) => BulletCashflow::PRODUCT_TYPE,
            Product::FixedAccrued(_) => FixedAccruedCashflow::PRODUCT_TYPE,
            Product::OvernightIndexCashflow(_) => OvernightIndexCashflow::PRODUCT_TYPE,
            Product::RfrFuture(_) => RfrFuture::PRODUCT_TYPE,
            Product::RfrSwap(_) => RfrSwap::PRODUCT_TYPE,
            Product::Portfolio(_) => Portfolio::PRODUCT_TYPE,
        }
    }

    /// Schema version written to the record's `VERSION` key.
    #[must_use]
    pub fn version(&self) -> u32 {
        match self {
            Product::BulletCashflow(_) => BulletCashflow::VERSION,
            Product::FixedAccrued(_) => FixedAccruedCashflow::VERSION,
            Product::OvernightIndexCashflow(_) => OvernightIndexCashflow::VERSION,
            Product::RfrFuture(_) => RfrFuture::VERSION,
            Product::RfrSwap(_) => RfrSwap::VERSION,
            Product::Portfolio(_) => Portfolio::VERSION,
        }
    }

    /// Earliest relevant date.
    #[must_use]
    pub fn first_date(&self) -> Date {
        match self {
            Product::BulletCashflow(p) => p.first_date(),
            Product::FixedAccrued(p) => p.first_date(),
            Product::OvernightIndexCashflow(p) => p.first_date(),
            Product::RfrFuture(p) => p.first_date(),
            Product::RfrSwap(p) => p.first_date(),
            Product::Portfolio(p) => p.first_date(),
        }
    }

    /// Latest relevant date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        match self {
            Product::BulletCashflow(p) => p.last_date(),
            Product::FixedAccrued(p) => p.last_date(),
            Product::OvernightIndexCashflow(p) => p.last_date(),
            Product::RfrFuture(p) => p.last_date(),
            Product::RfrSwap(p) => p.last_date(),
            Product::Portfolio(p) => p.last_date(),
        }
    }

    /// Signed notional; weighted sum for a portfolio.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        match self {
            Product::BulletCashflow(p) => p.notional(),
            Product::FixedAccrued(p) => p.notional(),
            Product::OvernightIndexCashflow(p) => p.notional(),
            Product::RfrFuture(p) => p.notional(),
            Product::RfrSwap(p) => p.notional(),
            Product::Portfolio(p) => p.notional(),
        }
    }

    /// Directions; one per leaf, flattened for a portfolio.
    #[must_use]
    pub fn long_or_short(&self) -> Vec<LongOrShort> {
        match self {
            Product::BulletCashflow(p) => vec![p.long_or_short()],
            Product::FixedAccrued(p) => vec![p.long_or_short()],
            Product::OvernightIndexCashflow(p) => vec![p.long_or_short()],
            Product::RfrFuture(p) => vec![p.long_or_short()],
            Product::RfrSwap(p) => vec![p.long_or_short()],
            Product::Portfolio(p) => p.long_or_short().to_vec(),
        }
    }

    /// Currencies involved.
    #[must_use]
    pub fn currencies(&self) -> BTreeSet<Currency> {
        match self {
            Product::BulletCashflow(p) => BTreeSet::from([p.currency()]),
            Product::FixedAccrued(p) => BTreeSet::from([p.currency()]),
            Product::OvernightIndexCashflow(p) => BTreeSet::from([p.currency()]),
            Product::RfrFuture(p) => BTreeSet::from([p.currency()]),
            Product::RfrSwap(p) => BTreeSet::from([p.currency()]),
            Product::Portfolio(p) => p.currencies().clone(),
        }
    }

    /// Dispatches to the visitor method for this variant.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NoVisitor` if the visitor does not handle the
    /// variant, or whatever the visitor returns.
    pub fn accept<V>(&self, visitor: &mut V) -> ProductResult<V::Output>
    where
        V: ProductVisitor + ?Sized,
    {
        match self {
            Product::BulletCashflow(p) => visitor.visit_bullet_cashflow(p),
            Product::FixedAccrued(p) => visitor.visit_fixed_accrued(p),
            Product::OvernightIndexCashflow(p) => visitor.visit_overnight_index_cashflow(p),
            Product::RfrFuture(p) => visitor.visit_rfr_future(p),
            Product::RfrSwap(p) => visitor.visit_rfr_swap(p),
            Product::Portfolio(p) => visitor.visit_portfolio(p),
        }
    }

    /// Record form, tagged with `VERSION` and `TYPE`.
    #[must_use]
    pub fn serialize(&self) -> Record {
        match self {
            Product::BulletCashflow(p) => p.serialize(),
            Product::FixedAccrued(p) => p.serialize(),
            Product::OvernightIndexCashflow(p) => p.serialize(),
            Product::RfrFuture(p) => p.serialize(),
            Product::RfrSwap(p) => p.serialize(),
            Product::Portfolio(p) => p.serialize(),
        }
    }

    /// Rebuilds a product through the context's builder registry.
    pub fn deserialize(record: &Record, ctx: &ProductContext) -> ProductResult<Self> {
        ctx.deserialize(record)
    }
}

macro_rules! product_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Product {
                fn from(value: $ty) -> Self {
                    Product::$variant(value)
                }
            }
        )*
    };
}

product_from!(
    BulletCashflow(BulletCashflow),
    FixedAccrued(FixedAccruedCashflow),
    OvernightIndexCashflow(OvernightIndexCashflow),
    RfrFuture(RfrFuture),
    RfrSwap(RfrSwap),
    Portfolio(Portfolio),
);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tenor_core::conventions::AccrualBasis;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_leaf_accessors() {
        let product: Product = FixedAccruedCashflow::new(
            d(2024, 1, 16),
            d(2024, 4, 16),
            Currency::USD,
            dec!(-50),
            AccrualBasis::Act360,
        )
        .into();
        assert_eq!(product.product_type(), "PRODUCT_FIXED_ACCRUED");
        assert_eq!(product.version(), 1);
        assert_eq!(product.first_date(), d(2024, 1, 16));
        assert_eq!(product.last_date(), d(2024, 4, 16));
        assert_eq!(product.long_or_short(), vec![LongOrShort::Short]);
        assert_eq!(product.currencies(), BTreeSet::from([Currency::USD]));
    }

    #[test]
    fn test_serialize_tags_type() {
        let product: Product =
            BulletCashflow::new(d(2025, 3, 3), Currency::EUR, dec!(10), LongOrShort::Long, None).into();
        let record = product.serialize();
        assert_eq!(record["TYPE"], "PRODUCT_BULLET_CASHFLOW");
        assert_eq!(record["VERSION"], 1);
    }
}
