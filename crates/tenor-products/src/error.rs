//! Error types for product construction and serialization.

use thiserror::Error;

use tenor_core::error::CoreError;
use tenor_market::MarketError;

/// A specialized Result type for product operations.
pub type ProductResult<T> = Result<T, ProductError>;

/// Errors raised while building, serializing or reading products.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Inconsistent construction inputs.
    #[error("Invalid configuration: {reason}")]
    Configuration {
        /// What is inconsistent.
        reason: String,
    },

    /// A structural rule was broken (empty portfolio, bad index, ...).
    #[error("Invariant violated: {reason}")]
    InvariantViolation {
        /// Which rule.
        reason: String,
    },

    /// A record lacks a required field.
    #[error("Missing field: {field}")]
    MissingField {
        /// The field name.
        field: String,
    },

    /// A record field has the wrong shape or an unparseable value.
    #[error("Invalid field {field}: {reason}")]
    InvalidField {
        /// The field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A record is newer than its builder understands.
    #[error("Unsupported version {version} for {product_type} (max {supported})")]
    UnsupportedVersion {
        /// Type token of the record.
        product_type: String,
        /// Version found in the record.
        version: u64,
        /// Highest version the builder reads.
        supported: u32,
    },

    /// A visitor has no handler for a product type.
    #[error("No visitor registered for {product_type}")]
    NoVisitor {
        /// Type token of the product.
        product_type: &'static str,
    },

    /// Reading or writing a product file failed.
    #[error("I/O error on {path}: {reason}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        reason: String,
    },

    /// Convention or date error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Registry error.
    #[error(transparent)]
    Market(#[from] MarketError),
}

impl ProductError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an invariant violation.
    #[must_use]
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing visitor error.
    #[must_use]
    pub fn no_visitor(product_type: &'static str) -> Self {
        Self::NoVisitor { product_type }
    }

    /// Out-of-range element access.
    #[must_use]
    pub fn index_out_of_range(what: &str, index: usize, len: usize) -> Self {
        Self::invariant(format!("{what} index {index} out of range (len {len})"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ProductError::missing_field("NOTIONAL").to_string(),
            "Missing field: NOTIONAL"
        );
        assert_eq!(
            ProductError::index_out_of_range("cashflow", 4, 2).to_string(),
            "Invariant violated: cashflow index 4 out of range (len 2)"
        );
    }

    #[test]
    fn test_from_market() {
        let err: ProductError = MarketError::not_found("IndexRegistry", "FOO").into();
        assert!(matches!(err, ProductError::Market(MarketError::NotFound { .. })));
    }
}
