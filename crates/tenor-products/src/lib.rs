//! # Tenor Products
//!
//! Fixed income products built on Tenor schedules and registries.
//!
//! - **Cashflows**: bullet, fixed accrued and overnight index cashflows
//! - **Instruments**: RFR futures and fixed versus overnight swaps
//! - **Composition**: weighted portfolios and interest rate streams
//! - **Serialization**: versioned, `TYPE`-tagged records rebuilt through a
//!   builder registry, plus JSON file persistence
//! - **Visitors**: typed per-variant dispatch with a display projection
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tenor_products::prelude::*;
//!
//! let ctx = ProductContext::global().unwrap();
//! let swap = RfrSwap::builder()
//!     .effective_date(Date::from_ymd(2024, 1, 16).unwrap())
//!     .term_or_termination_date("1Y".parse().unwrap())
//!     .index_name("SOFR", &ctx)
//!     .unwrap()
//!     .fixed_rate(Decimal::new(425, 4))
//!     .pay_or_receive(PayOrReceive::Pay)
//!     .notional(Decimal::from(1_000_000))
//!     .accrual_period("3M".parse().unwrap())
//!     .accrual_basis("ACT/360".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let product = Product::from(swap);
//! let restored = ctx.deserialize(&product.serialize()).unwrap();
//! assert_eq!(restored, product);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]

pub mod builder;
pub mod cashflows;
pub mod context;
pub mod direction;
pub mod error;
pub mod future;
pub mod persist;
pub mod portfolio;
pub mod product;
pub mod record;
pub mod stream;
pub mod swap;
pub mod visitor;

pub use builder::{register_builtin_builders, BuilderKind, BuilderRegistry, ProductBuilder};
pub use context::ProductContext;
pub use error::{ProductError, ProductResult};
pub use persist::{read_product_from_file, write_product_to_file};
pub use product::Product;
pub use record::Record;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{BulletCashflow, FixedAccruedCashflow, OvernightIndexCashflow};
    pub use crate::context::ProductContext;
    pub use crate::direction::{LongOrShort, PayOrReceive};
    pub use crate::error::{ProductError, ProductResult};
    pub use crate::future::RfrFuture;
    pub use crate::persist::{read_product_from_file, write_product_to_file};
    pub use crate::portfolio::Portfolio;
    pub use crate::product::Product;
    pub use crate::record::Record;
    pub use crate::stream::{InterestRateStream, InterestRateStreamBuilder};
    pub use crate::swap::{RfrSwap, RfrSwapBuilder};
    pub use crate::visitor::{display_product, DisplayVisitor, ProductVisitor};

    pub use tenor_core::prelude::*;
    pub use tenor_market::prelude::*;
}
