//! Type token to reconstruction function dispatch.
//!
//! Every product type registers a [`ProductBuilder`] under its `TYPE` token.
//! The six built-in builders are seeded when the hub first creates the
//! registry; callers may erase or add builders afterwards.

use log::debug;

use tenor_market::{MarketError, MarketResult, Registry, RegistryKind};

use crate::cashflows::{BulletCashflow, FixedAccruedCashflow, OvernightIndexCashflow};
use crate::context::ProductContext;
use crate::error::{ProductError, ProductResult};
use crate::future::RfrFuture;
use crate::portfolio::Portfolio;
use crate::product::Product;
use crate::record::{Record, RecordReader};
use crate::swap::RfrSwap;

/// Reconstruction function for one product type.
pub type BuildFn = fn(&Record, &ProductContext) -> ProductResult<Product>;

/// A versioned reconstruction function.
#[derive(Clone, Copy)]
pub struct ProductBuilder {
    version: u32,
    build: BuildFn,
}

impl std::fmt::Debug for ProductBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductBuilder")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl ProductBuilder {
    /// Creates a builder reading records up to `version`.
    #[must_use]
    pub const fn new(version: u32, build: BuildFn) -> Self {
        Self { version, build }
    }

    /// Highest supported record version.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Checks the record version and rebuilds the product.
    pub fn build(&self, record: &Record, ctx: &ProductContext) -> ProductResult<Product> {
        let reader = RecordReader::new(record);
        let version = reader.version()?;
        if version > u64::from(self.version) {
            return Err(ProductError::UnsupportedVersion {
                product_type: reader.product_type()?.to_string(),
                version,
                supported: self.version,
            });
        }
        (self.build)(record, ctx)
    }
}

/// Registry kind for product builders. Starts from code, not from a file.
#[derive(Debug, Clone, Copy)]
pub struct BuilderKind;

impl RegistryKind for BuilderKind {
    const NAME: &'static str = "ProductBuilderRegistry";
    const FILE_NAME: Option<&'static str> = None;
    type Value = ProductBuilder;

    fn decode(key: &str, _record: &serde_json::Value) -> MarketResult<ProductBuilder> {
        Err(MarketError::invalid_entry(
            Self::NAME,
            key,
            "builders are registered in code",
        ))
    }

    fn seed(registry: &Registry<Self>) -> MarketResult<()> {
        register_builtin_builders(registry)
    }
}

/// Product builder registry.
pub type BuilderRegistry = Registry<BuilderKind>;

/// Registers the builders for every built-in product type.
///
/// # Errors
///
/// Returns `MarketError::DuplicateKey` if one is already registered.
pub fn register_builtin_builders(registry: &BuilderRegistry) -> MarketResult<()> {
    let builtins: [(&str, ProductBuilder); 6] = [
        (
            BulletCashflow::PRODUCT_TYPE,
            ProductBuilder::new(BulletCashflow::VERSION, build_bullet_cashflow),
        ),
        (
            FixedAccruedCashflow::PRODUCT_TYPE,
            ProductBuilder::new(FixedAccruedCashflow::VERSION, build_fixed_accrued),
        ),
        (
            OvernightIndexCashflow::PRODUCT_TYPE,
            ProductBuilder::new(OvernightIndexCashflow::VERSION, build_overnight_index_cashflow),
        ),
        (
            RfrFuture::PRODUCT_TYPE,
            ProductBuilder::new(RfrFuture::VERSION, build_rfr_future),
        ),
        (
            RfrSwap::PRODUCT_TYPE,
            ProductBuilder::new(RfrSwap::VERSION, build_rfr_swap),
        ),
        (
            Portfolio::PRODUCT_TYPE,
            ProductBuilder::new(Portfolio::VERSION, build_portfolio),
        ),
    ];
    for (product_type, builder) in builtins {
        registry.register(product_type, builder)?;
    }
    debug!("registered {} product builders", registry.len());
    Ok(())
}

fn build_bullet_cashflow(record: &Record, _ctx: &ProductContext) -> ProductResult<Product> {
    BulletCashflow::from_record(record).map(Product::BulletCashflow)
}

fn build_fixed_accrued(record: &Record, _ctx: &ProductContext) -> ProductResult<Product> {
    FixedAccruedCashflow::from_record(record).map(Product::FixedAccrued)
}

fn build_overnight_index_cashflow(record: &Record, ctx: &ProductContext) -> ProductResult<Product> {
    OvernightIndexCashflow::from_record(record, ctx).map(Product::OvernightIndexCashflow)
}

fn build_rfr_future(record: &Record, ctx: &ProductContext) -> ProductResult<Product> {
    RfrFuture::from_record(record, ctx).map(Product::RfrFuture)
}

fn build_rfr_swap(record: &Record, ctx: &ProductContext) -> ProductResult<Product> {
    RfrSwap::from_record(record, ctx).map(Product::RfrSwap)
}

fn build_portfolio(record: &Record, ctx: &ProductContext) -> ProductResult<Product> {
    Portfolio::from_record(record, ctx).map(Product::Portfolio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordWriter;
    use tenor_market::{RegistryConfig, RegistryHub};

    fn context() -> ProductContext {
        ProductContext::from_hub(&RegistryHub::with_config(RegistryConfig::default())).unwrap()
    }

    #[test]
    fn test_builtins_seeded() {
        let ctx = context();
        assert_eq!(ctx.builders().len(), 6);
        assert!(ctx.builders().exists("product_rfr_swap"));
    }

    #[test]
    fn test_unknown_type() {
        let record = RecordWriter::new("PRODUCT_CAPFLOOR", 1).finish();
        let err = context().deserialize(&record).unwrap_err();
        assert_eq!(
            err,
            ProductError::Market(MarketError::not_found("ProductBuilderRegistry", "PRODUCT_CAPFLOOR"))
        );
    }

    #[test]
    fn test_newer_version_rejected() {
        let record = RecordWriter::new(BulletCashflow::PRODUCT_TYPE, 2).finish();
        let err = context().deserialize(&record).unwrap_err();
        assert!(matches!(
            err,
            ProductError::UnsupportedVersion { version: 2, supported: 1, .. }
        ));
    }

    #[test]
    fn test_missing_type() {
        let mut record = RecordWriter::new(BulletCashflow::PRODUCT_TYPE, 1).finish();
        record.remove("TYPE");
        assert_eq!(
            context().deserialize(&record).unwrap_err(),
            ProductError::missing_field("TYPE")
        );
    }

    #[test]
    fn test_erased_builder() {
        let ctx = context();
        ctx.builders().erase(BulletCashflow::PRODUCT_TYPE).unwrap();
        let record = RecordWriter::new(BulletCashflow::PRODUCT_TYPE, 1).finish();
        assert!(matches!(
            ctx.deserialize(&record),
            Err(ProductError::Market(MarketError::NotFound { .. }))
        ));
    }
}
