//! Registries a product needs to resolve names and rebuild records.

use std::sync::Arc;

use tenor_market::{
    DataConventionKind, DataConventionRegistry, IndexKind, IndexRegistry, OvernightIndex,
    RegistryHub, RfrFutureConvention,
};

use crate::builder::{BuilderKind, BuilderRegistry};
use crate::error::{ProductError, ProductResult};
use crate::product::Product;
use crate::record::{Record, RecordReader};

/// Shared handles to the index, data convention and builder registries.
///
/// Cloning is cheap; clones see the same registries.
#[derive(Debug, Clone)]
pub struct ProductContext {
    indices: Arc<IndexRegistry>,
    conventions: Arc<DataConventionRegistry>,
    builders: Arc<BuilderRegistry>,
}

impl ProductContext {
    /// Takes the registries from a hub, creating them if needed.
    ///
    /// # Errors
    ///
    /// Returns a bootstrap error if a registry file is malformed.
    pub fn from_hub(hub: &RegistryHub) -> ProductResult<Self> {
        Ok(Self {
            indices: hub.registry::<IndexKind>()?,
            conventions: hub.registry::<DataConventionKind>()?,
            builders: hub.registry::<BuilderKind>()?,
        })
    }

    /// Context over the process-wide hub.
    pub fn global() -> ProductResult<Self> {
        Self::from_hub(RegistryHub::global())
    }

    /// Index registry.
    #[must_use]
    pub fn indices(&self) -> &IndexRegistry {
        &self.indices
    }

    /// Data convention registry.
    #[must_use]
    pub fn conventions(&self) -> &DataConventionRegistry {
        &self.conventions
    }

    /// Builder registry.
    #[must_use]
    pub fn builders(&self) -> &BuilderRegistry {
        &self.builders
    }

    /// Looks up an overnight index.
    pub fn index(&self, name: &str) -> ProductResult<OvernightIndex> {
        Ok(self.indices.get(name)?)
    }

    /// Looks up an RFR future convention.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown name and
    /// `ProductError::Configuration` if the convention is of another type.
    pub fn future_convention(&self, name: &str) -> ProductResult<RfrFutureConvention> {
        let convention = self.conventions.get(name)?;
        convention.as_rfr_future().cloned().ok_or_else(|| {
            ProductError::configuration(format!(
                "{} is a {} convention, not RFR_FUTURE",
                convention.name(),
                convention.convention_type()
            ))
        })
    }

    /// Rebuilds a product by dispatching on the record's `TYPE`.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unregistered type,
    /// `ProductError::UnsupportedVersion` for a record newer than its
    /// builder, or the builder's own error.
    pub fn deserialize(&self, record: &Record) -> ProductResult<Product> {
        let product_type = RecordReader::new(record).product_type()?;
        let builder = self.builders.get(product_type)?;
        builder.build(record, self)
    }
}
