//! # Tenor Market
//!
//! Keyed registries for market reference data.
//!
//! - **Registry**: generic case-insensitive store, one lock per instance
//! - **RegistryHub**: one lazily bootstrapped registry per kind
//! - **Indices**: overnight indices (`SOFR`, `ESTR`, `SONIA`, `TONA`, `AONIA`)
//! - **Data conventions**: instrument conventions such as RFR futures
//!
//! Bootstrap files live in `static/` next to this crate unless
//! `TENOR_STATIC_DIR` points elsewhere.
//!
//! ## Example
//!
//! ```rust
//! use tenor_market::prelude::*;
//!
//! let hub = RegistryHub::new();
//! let conventions = hub.registry::<DataConventionKind>().unwrap();
//! let future = conventions.get("SOFR-3M-FUTURE").unwrap();
//! assert_eq!(future.convention_type(), "RFR_FUTURE");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod compounding;
pub mod config;
pub mod data_convention;
pub mod error;
pub mod index;
pub mod registry;

pub use compounding::CompoundingMethod;
pub use config::{RegistryConfig, STATIC_DIR_ENV};
pub use data_convention::{
    DataConvention, DataConventionKind, DataConventionRegistry, RfrFutureConvention,
};
pub use error::{MarketError, MarketResult};
pub use index::{IndexKind, IndexRegistry, OvernightIndex};
pub use registry::{Registry, RegistryHub, RegistryKind};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::CompoundingMethod;
    pub use crate::config::RegistryConfig;
    pub use crate::data_convention::{
        DataConvention, DataConventionKind, DataConventionRegistry, RfrFutureConvention,
    };
    pub use crate::error::{MarketError, MarketResult};
    pub use crate::index::{IndexKind, IndexRegistry, OvernightIndex};
    pub use crate::registry::{Registry, RegistryHub, RegistryKind};
}
