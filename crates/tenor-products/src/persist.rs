//! Reading and writing products as JSON files.

use std::fs;
use std::path::Path;

use log::info;

use crate::context::ProductContext;
use crate::error::{ProductError, ProductResult};
use crate::product::Product;
use crate::record::Record;

/// Writes the product's record to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns `ProductError::Io` if the file cannot be written.
pub fn write_product_to_file(product: &Product, path: impl AsRef<Path>) -> ProductResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&product.serialize())
        .map_err(|e| ProductError::io(path.display().to_string(), e.to_string()))?;
    fs::write(path, json).map_err(|e| ProductError::io(path.display().to_string(), e.to_string()))?;
    info!("wrote {} to {}", product.product_type(), path.display());
    Ok(())
}

/// Reads a product record from `path` and rebuilds it through the builder registry.
///
/// # Errors
///
/// Returns `ProductError::Io` if the file cannot be read or is not a JSON
/// object, or any deserialization error.
pub fn read_product_from_file(path: impl AsRef<Path>, ctx: &ProductContext) -> ProductResult<Product> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|e| ProductError::io(path.display().to_string(), e.to_string()))?;
    let record: Record = serde_json::from_str(&content)
        .map_err(|e| ProductError::io(path.display().to_string(), e.to_string()))?;
    ctx.deserialize(&record)
}
