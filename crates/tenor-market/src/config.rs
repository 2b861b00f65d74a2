//! Where registries look for their bootstrap files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the bootstrap directory.
pub const STATIC_DIR_ENV: &str = "TENOR_STATIC_DIR";

/// Bootstrap file location for a [`RegistryHub`](crate::RegistryHub).
///
/// A registry kind with file name `indices` reads
/// `<static_dir>/indices.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding the bootstrap files.
    pub static_dir: PathBuf,
    /// File extension, without the dot.
    pub extension: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            static_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("static"),
            extension: "json".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Default configuration with `TENOR_STATIC_DIR` applied when set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os(STATIC_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::default().with_static_dir(dir),
            _ => Self::default(),
        }
    }

    /// Replaces the bootstrap directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Full path of a bootstrap file.
    #[must_use]
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.static_dir
            .join(format!("{file_name}.{}", self.extension))
    }
}
