//! Generic keyed registries and the hub that owns one instance per kind.
//!
//! A [`Registry`] is a case-insensitive map from an upper-cased key to a
//! value, guarded by its own lock. A [`RegistryKind`] names the registry,
//! fixes the value type and says how a bootstrap record decodes.
//!
//! A [`RegistryHub`] hands out one shared instance per kind. The instance is
//! created on first access, bootstrapped once from
//! `<static_dir>/<file_name>.json` and seeded by its kind, and lives until the
//! hub is reset.
//!
//! # Example
//!
//! ```rust
//! use tenor_market::{IndexKind, RegistryHub};
//!
//! let hub = RegistryHub::new();
//! let indices = hub.registry::<IndexKind>().unwrap();
//!
//! let sofr = indices.get("sofr").unwrap();
//! assert_eq!(sofr.name(), "SOFR");
//! ```

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use log::{debug, warn};
use parking_lot::{Mutex, RwLock};

use crate::config::RegistryConfig;
use crate::error::{MarketError, MarketResult};

// =============================================================================
// REGISTRY KIND
// =============================================================================

/// Describes one kind of registry.
pub trait RegistryKind: 'static {
    /// Name used in errors and as the hub key.
    const NAME: &'static str;

    /// Bootstrap file name without extension; `None` starts empty.
    const FILE_NAME: Option<&'static str>;

    /// Stored value.
    type Value: Clone + Send + Sync + 'static;

    /// Decodes one bootstrap record stored under `key`.
    fn decode(key: &str, record: &serde_json::Value) -> MarketResult<Self::Value>;

    /// Adds entries defined in code, after the bootstrap file is read.
    fn seed(_registry: &Registry<Self>) -> MarketResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Keyed store for one registry kind.
///
/// Keys are upper-cased on every operation, so `"sofr"` and `"SOFR"` name the
/// same entry.
pub struct Registry<K: RegistryKind> {
    entries: RwLock<BTreeMap<String, K::Value>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: RegistryKind> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RegistryKind> std::fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &K::NAME)
            .field("keys", &self.keys())
            .finish()
    }
}

impl<K: RegistryKind> Registry<K> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            _kind: PhantomData,
        }
    }

    /// Registry kind name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        K::NAME
    }

    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::DuplicateKey` if the key is present; the existing
    /// value is left in place.
    pub fn register(&self, key: &str, value: K::Value) -> MarketResult<()> {
        let key = normalize(key);
        let mut entries = self.entries.write();
        if entries.contains_key(&key) {
            return Err(MarketError::duplicate_key(K::NAME, key));
        }
        debug!("{}: registered {}", K::NAME, key);
        entries.insert(key, value);
        Ok(())
    }

    /// Decodes a raw record and adds it.
    ///
    /// # Errors
    ///
    /// Returns the decode error, or `MarketError::DuplicateKey`.
    pub fn register_record(&self, key: &str, record: &serde_json::Value) -> MarketResult<()> {
        let value = K::decode(&normalize(key), record)?;
        self.register(key, value)
    }

    /// Looks up an entry.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` carrying the requested key.
    pub fn get(&self, key: &str) -> MarketResult<K::Value> {
        self.entries
            .read()
            .get(&normalize(key))
            .cloned()
            .ok_or_else(|| MarketError::not_found(K::NAME, key))
    }

    /// True if the key is registered.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.entries.read().contains_key(&normalize(key))
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NotFound` if the key is absent.
    pub fn erase(&self, key: &str) -> MarketResult<()> {
        match self.entries.write().remove(&normalize(key)) {
            Some(_) => Ok(()),
            None => Err(MarketError::not_found(K::NAME, key)),
        }
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Registered keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Key/value pairs in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, K::Value)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Loads every record of a JSON object file.
    ///
    /// A missing file is not an error: the registry stays as it is.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Bootstrap` naming the file (and the key, for a
    /// bad entry) if the file cannot be read or decoded.
    pub fn bootstrap(&self, path: &Path) -> MarketResult<usize> {
        let file = path.display().to_string();
        if !path.exists() {
            warn!("{}: bootstrap file {} not found, starting empty", K::NAME, file);
            return Ok(0);
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| MarketError::bootstrap(&file, e.to_string()))?;
        let records: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| MarketError::bootstrap(&file, e.to_string()))?;

        for (key, record) in &records {
            self.register_record(key, record)
                .map_err(|e| MarketError::bootstrap(&file, format!("{key}: {e}")))?;
        }
        debug!("{}: loaded {} entries from {}", K::NAME, records.len(), file);
        Ok(records.len())
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_uppercase()
}

// =============================================================================
// REGISTRY HUB
// =============================================================================

static GLOBAL_HUB: OnceLock<RegistryHub> = OnceLock::new();

/// Owns one registry instance per kind.
pub struct RegistryHub {
    config: RegistryConfig,
    kinds: Mutex<HashMap<&'static str, Arc<dyn Any + Send + Sync>>>,
}

impl Default for RegistryHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegistryHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&'static str> = self.kinds.lock().keys().copied().collect();
        kinds.sort_unstable();
        f.debug_struct("RegistryHub")
            .field("config", &self.config)
            .field("kinds", &kinds)
            .finish()
    }
}

impl RegistryHub {
    /// Creates a hub configured from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::from_env())
    }

    /// Creates a hub with an explicit configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            kinds: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide hub, created on first use.
    pub fn global() -> &'static Self {
        GLOBAL_HUB.get_or_init(Self::new)
    }

    /// Bootstrap configuration.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The registry of kind `K`, created and bootstrapped on first access.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Bootstrap` if the bootstrap file is malformed.
    /// Nothing is cached in that case, so the next access tries again.
    pub fn registry<K: RegistryKind>(&self) -> MarketResult<Arc<Registry<K>>> {
        let mut kinds = self.kinds.lock();
        if let Some(existing) = kinds.get(K::NAME) {
            return Arc::clone(existing)
                .downcast::<Registry<K>>()
                .map_err(|_| MarketError::KindConflict { registry: K::NAME });
        }

        let registry = Registry::<K>::new();
        if let Some(file_name) = K::FILE_NAME {
            registry.bootstrap(&self.config.path_for(file_name))?;
        }
        K::seed(&registry)?;
        debug!("{}: created with {} entries", K::NAME, registry.len());

        let registry = Arc::new(registry);
        let shared: Arc<dyn Any + Send + Sync> = registry.clone();
        kinds.insert(K::NAME, shared);
        Ok(registry)
    }

    /// True if the registry of kind `K` has been created.
    #[must_use]
    pub fn is_loaded<K: RegistryKind>(&self) -> bool {
        self.kinds.lock().contains_key(K::NAME)
    }

    /// Drops every registry; the next access bootstraps afresh.
    pub fn reset(&self) {
        self.kinds.lock().clear();
    }

    /// Drops the registry of kind `K`.
    pub fn reset_kind<K: RegistryKind>(&self) {
        self.kinds.lock().remove(K::NAME);
    }
}
