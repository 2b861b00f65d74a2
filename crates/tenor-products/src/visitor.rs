//! Typed visitors over [`Product`] variants.
//!
//! Each variant has its own method on [`ProductVisitor`]. Methods a visitor
//! does not override fail with `ProductError::NoVisitor`, so a visitor only
//! implements the variants it understands.

use crate::cashflows::{BulletCashflow, FixedAccruedCashflow, OvernightIndexCashflow};
use crate::error::{ProductError, ProductResult};
use crate::future::RfrFuture;
use crate::portfolio::Portfolio;
use crate::product::Product;
use crate::swap::RfrSwap;

/// A read-only operation dispatched on the product variant.
pub trait ProductVisitor {
    /// Result of visiting one product.
    type Output;

    /// Visits a bullet cashflow.
    fn visit_bullet_cashflow(&mut self, _product: &BulletCashflow) -> ProductResult<Self::Output> {
        Err(ProductError::no_visitor(BulletCashflow::PRODUCT_TYPE))
    }

    /// Visits a fixed accrued cashflow.
    fn visit_fixed_accrued(&mut self, _product: &FixedAccruedCashflow) -> ProductResult<Self::Output> {
        Err(ProductError::no_visitor(FixedAccruedCashflow::PRODUCT_TYPE))
    }

    /// Visits an overnight index cashflow.
    fn visit_overnight_index_cashflow(
        &mut self,
        _product: &OvernightIndexCashflow,
    ) -> ProductResult<Self::Output> {
        Err(ProductError::no_visitor(OvernightIndexCashflow::PRODUCT_TYPE))
    }

    /// Visits an RFR future.
    fn visit_rfr_future(&mut self, _product: &RfrFuture) -> ProductResult<Self::Output> {
        Err(ProductError::no_visitor(RfrFuture::PRODUCT_TYPE))
    }

    /// Visits an RFR swap.
    fn visit_rfr_swap(&mut self, _product: &RfrSwap) -> ProductResult<Self::Output> {
        Err(ProductError::no_visitor(RfrSwap::PRODUCT_TYPE))
    }

    /// Visits a portfolio.
    fn visit_portfolio(&mut self, _product: &Portfolio) -> ProductResult<Self::Output> {
        Err(ProductError::no_visitor(Portfolio::PRODUCT_TYPE))
    }
}

/// Ordered `(name, value)` pairs describing a product.
pub type NameValuePairs = Vec<(String, String)>;

/// Projects any product onto flat name/value pairs.
///
/// Portfolios list each element's type and weight rather than recursing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisplayVisitor;

impl DisplayVisitor {
    /// Creates the visitor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn pair(name: &str, value: impl ToString) -> (String, String) {
    (name.to_string(), value.to_string())
}

impl ProductVisitor for DisplayVisitor {
    type Output = NameValuePairs;

    fn visit_bullet_cashflow(&mut self, p: &BulletCashflow) -> ProductResult<NameValuePairs> {
        Ok(vec![
            pair("TYPE", BulletCashflow::PRODUCT_TYPE),
            pair("TERMINATION_DATE", p.termination_date()),
            pair("PAYMENT_DATE", p.payment_date()),
            pair("CURRENCY", p.currency()),
            pair("NOTIONAL", p.notional()),
            pair("LONG_OR_SHORT", p.long_or_short()),
        ])
    }

    fn visit_fixed_accrued(&mut self, p: &FixedAccruedCashflow) -> ProductResult<NameValuePairs> {
        Ok(vec![
            pair("TYPE", FixedAccruedCashflow::PRODUCT_TYPE),
            pair("EFFECTIVE_DATE", p.effective_date()),
            pair("TERMINATION_DATE", p.termination_date()),
            pair("PAYMENT_DATE", p.payment_date()),
            pair("CURRENCY", p.currency()),
            pair("NOTIONAL", p.notional()),
            pair("ACCRUAL_BASIS", p.accrual_basis()),
            pair("ACCRUED", p.accrued()),
        ])
    }

    fn visit_overnight_index_cashflow(
        &mut self,
        p: &OvernightIndexCashflow,
    ) -> ProductResult<NameValuePairs> {
        Ok(vec![
            pair("TYPE", OvernightIndexCashflow::PRODUCT_TYPE),
            pair("EFFECTIVE_DATE", p.effective_date()),
            pair("TERMINATION_DATE", p.termination_date()),
            pair("PAYMENT_DATE", p.payment_date()),
            pair("ON_INDEX", p.index().name()),
            pair("COMPOUNDING_METHOD", p.compounding_method()),
            pair("SPREAD", p.spread()),
            pair("NOTIONAL", p.notional()),
        ])
    }

    fn visit_rfr_future(&mut self, p: &RfrFuture) -> ProductResult<NameValuePairs> {
        Ok(vec![
            pair("TYPE", RfrFuture::PRODUCT_TYPE),
            pair("EFFECTIVE_DATE", p.effective_date()),
            pair("TERMINATION_DATE", p.termination_date()),
            pair("FUTURE_CONVENTION", p.convention().name()),
            pair("ON_INDEX", p.index().name()),
            pair("LONG_OR_SHORT", p.long_or_short()),
            pair("AMOUNT", p.amount()),
            pair("STRIKE", p.strike()),
            pair("NOTIONAL", p.notional()),
        ])
    }

    fn visit_rfr_swap(&mut self, p: &RfrSwap) -> ProductResult<NameValuePairs> {
        Ok(vec![
            pair("TYPE", RfrSwap::PRODUCT_TYPE),
            pair("EFFECTIVE_DATE", p.effective_date()),
            pair("TERMINATION_DATE", p.termination_date()),
            pair("ON_INDEX", p.index().name()),
            pair("FIXED_RATE", p.fixed_rate()),
            pair("PAY_OR_REC", p.pay_or_receive()),
            pair("NOTIONAL", p.notional()),
            pair("ACCRUAL_PERIOD", p.accrual_period()),
            pair("FLOATING_LEG_ACCRUAL_PERIOD", p.floating_leg_accrual_period()),
            pair("ACCRUAL_BASIS", p.accrual_basis()),
            pair("FIXED_LEG_CASHFLOWS", p.fixed_leg().num_cashflows()),
            pair("FLOATING_LEG_CASHFLOWS", p.floating_leg().num_cashflows()),
        ])
    }

    fn visit_portfolio(&mut self, p: &Portfolio) -> ProductResult<NameValuePairs> {
        let mut pairs = vec![
            pair("TYPE", Portfolio::PRODUCT_TYPE),
            pair("FIRST_DATE", p.first_date()),
            pair("LAST_DATE", p.last_date()),
            pair("NOTIONAL", p.notional()),
            pair("NUM_ELEMENTS", p.num_elements()),
        ];
        for (i, (element, weight)) in p.iter().enumerate() {
            pairs.push(pair(&format!("PRODUCT_{i}"), element.product_type()));
            pairs.push(pair(&format!("WEIGHT_{i}"), weight));
        }
        Ok(pairs)
    }
}

/// Name/value projection of `product`.
pub fn display_product(product: &Product) -> ProductResult<NameValuePairs> {
    product.accept(&mut DisplayVisitor::new())
}
