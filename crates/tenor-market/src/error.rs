//! Error types for registry operations.

use thiserror::Error;

use tenor_core::error::CoreError;

/// A specialized Result type for registry operations.
pub type MarketResult<T> = Result<T, MarketError>;

/// Errors raised by the registries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// A key was registered twice; the first value is kept.
    #[error("Duplicate key in {registry}: {key}")]
    DuplicateKey {
        /// Registry kind name.
        registry: &'static str,
        /// The offending key (upper-cased).
        key: String,
    },

    /// Lookup or erase of a key that is not registered.
    #[error("No entry in {registry} for key: {key}")]
    NotFound {
        /// Registry kind name.
        registry: &'static str,
        /// The requested key.
        key: String,
    },

    /// A bootstrap file could not be read or decoded.
    #[error("Failed to bootstrap from {file}: {reason}")]
    Bootstrap {
        /// Path of the bootstrap file.
        file: String,
        /// What went wrong.
        reason: String,
    },

    /// A single entry failed to decode.
    #[error("Invalid {registry} entry '{key}': {reason}")]
    InvalidEntry {
        /// Registry kind name.
        registry: &'static str,
        /// The entry key.
        key: String,
        /// What went wrong.
        reason: String,
    },

    /// Two registry kinds share a name but not a value type.
    #[error("Registry kind '{registry}' is already held with a different value type")]
    KindConflict {
        /// Registry kind name.
        registry: &'static str,
    },

    /// A convention token or date failed to resolve.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MarketError {
    /// Creates a duplicate key error.
    #[must_use]
    pub fn duplicate_key(registry: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            registry,
            key: key.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(registry: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            registry,
            key: key.into(),
        }
    }

    /// Creates a bootstrap error.
    #[must_use]
    pub fn bootstrap(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Bootstrap {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid entry error.
    #[must_use]
    pub fn invalid_entry(
        registry: &'static str,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEntry {
            registry,
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::not_found("IndexRegistry", "FOO");
        assert_eq!(err.to_string(), "No entry in IndexRegistry for key: FOO");

        let err = MarketError::duplicate_key("IndexRegistry", "SOFR");
        assert!(err.to_string().contains("SOFR"));
    }

    #[test]
    fn test_core_error_converts() {
        let core = CoreError::unknown_convention("currency", "XXX");
        let err: MarketError = core.clone().into();
        assert_eq!(err, MarketError::Core(core));
        assert_eq!(err.to_string(), "Unknown currency token: 'XXX'");
    }
}
