//! Versioned configuration registry with an atomically published active
//! version.
//!
//! The registry is a plain value owned by the caller (no process-wide
//! global). Historical versions are retained for audit and diffing and are
//! never deleted. The active configuration is stored as an `Arc` behind a
//! lock and swapped whole, so concurrent scoring calls either see the old
//! snapshot or the new one, never a torn mix of threshold fields.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::ConfigVersionId;
use crate::config::scoring::{ConfigDiffEntry, ScoringConfig};
use crate::error::{EngineError, EngineResult};

/// Metadata for one stored configuration version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigVersionInfo {
    pub id: ConfigVersionId,
    pub name: String,
    pub fingerprint: String,
    pub active: bool,
}

struct StoredVersion {
    id: ConfigVersionId,
    name: String,
    fingerprint: String,
    config: Arc<ScoringConfig>,
}

struct RegistryInner {
    versions: Vec<StoredVersion>,
    active: Option<ConfigVersionId>,
    next_id: u32,
}

/// Caller-owned store of named, immutable [`ScoringConfig`] versions.
pub struct ConfigRegistry {
    inner: RwLock<RegistryInner>,
}

impl ConfigRegistry {
    /// An empty registry. Calling [`ConfigRegistry::active`] before any
    /// version is registered is an initialization error and panics.
    pub fn new() -> Self {
        ConfigRegistry {
            inner: RwLock::new(RegistryInner {
                versions: Vec::new(),
                active: None,
                next_id: 1,
            }),
        }
    }

    /// A registry seeded with the stock defaults as version 1, active.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register("default", ScoringConfig::default());
        registry
    }

    /// Store a new named version. The first registered version becomes
    /// active automatically.
    pub fn register(&self, name: impl Into<String>, config: ScoringConfig) -> ConfigVersionId {
        let mut inner = self.inner.write();
        let id = ConfigVersionId(inner.next_id);
        inner.next_id += 1;
        inner.versions.push(StoredVersion {
            id,
            name: name.into(),
            fingerprint: config.fingerprint(),
            config: Arc::new(config),
        });
        if inner.active.is_none() {
            inner.active = Some(id);
        }
        id
    }

    /// Create a derived version by deep-merging partial overrides over an
    /// existing one. The base version is left untouched.
    pub fn derive(
        &self,
        base: ConfigVersionId,
        name: impl Into<String>,
        overrides: &serde_json::Value,
    ) -> EngineResult<ConfigVersionId> {
        let base_config = self.get(base)?;
        let derived = base_config.apply_overrides(overrides)?;
        Ok(self.register(name, derived))
    }

    /// Flip the active pointer to an existing version (atomic publish).
    pub fn set_active(&self, id: ConfigVersionId) -> EngineResult<()> {
        let mut inner = self.inner.write();
        if !inner.versions.iter().any(|v| v.id == id) {
            return Err(EngineError::config(format!(
                "unknown scoring config version {}",
                id
            )));
        }
        inner.active = Some(id);
        Ok(())
    }

    /// Snapshot of the active configuration.
    ///
    /// # Panics
    ///
    /// Panics if no version has ever been registered; every scoring call
    /// depends on an active config, so running without one is a programming
    /// error that must fail loudly at first use.
    pub fn active(&self) -> Arc<ScoringConfig> {
        let inner = self.inner.read();
        let id = inner
            .active
            .expect("no active scoring config: registry was never initialized");
        inner
            .versions
            .iter()
            .find(|v| v.id == id)
            .map(|v| Arc::clone(&v.config))
            .expect("active scoring config id missing from registry")
    }

    /// Fetch a stored version's configuration.
    pub fn get(&self, id: ConfigVersionId) -> EngineResult<Arc<ScoringConfig>> {
        let inner = self.inner.read();
        inner
            .versions
            .iter()
            .find(|v| v.id == id)
            .map(|v| Arc::clone(&v.config))
            .ok_or_else(|| EngineError::config(format!("unknown scoring config version {}", id)))
    }

    /// Metadata for every stored version, in registration order.
    pub fn versions(&self) -> Vec<ConfigVersionInfo> {
        let inner = self.inner.read();
        inner
            .versions
            .iter()
            .map(|v| ConfigVersionInfo {
                id: v.id,
                name: v.name.clone(),
                fingerprint: v.fingerprint.clone(),
                active: inner.active == Some(v.id),
            })
            .collect()
    }

    /// Leaf-level diff between two stored versions.
    pub fn diff(
        &self,
        base: ConfigVersionId,
        updated: ConfigVersionId,
    ) -> EngineResult<Vec<ConfigDiffEntry>> {
        let base_config = self.get(base)?;
        let updated_config = self.get(updated)?;
        base_config.diff(&updated_config)
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
