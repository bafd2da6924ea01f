//! Engine registry

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::engine::SlotEngine;

/// Explicitly constructed set of engines available to a verification session
pub struct EngineRegistry {
    engines: BTreeMap<String, Box<dyn SlotEngine>>,
    bundle_version: String,
    checksum: String,
}

impl EngineRegistry {
    /// Create an empty registry tagged with this crate's version
    pub fn new() -> Self {
        Self::with_version(env!("CARGO_PKG_VERSION"))
    }

    pub fn with_version(bundle_version: impl Into<String>) -> Self {
        let mut registry = Self {
            engines: BTreeMap::new(),
            bundle_version: bundle_version.into(),
            checksum: String::new(),
        };
        registry.refresh_checksum();
        registry
    }

    /// Register an engine under its own ID, replacing any engine with that ID
    pub fn register(&mut self, engine: Box<dyn SlotEngine>) {
        let id = engine.id().to_string();
        if self.engines.insert(id.clone(), engine).is_some() {
            log::warn!("Engine {} registered twice, keeping the latest", id);
        }
        self.refresh_checksum();
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_engine(mut self, engine: Box<dyn SlotEngine>) -> Self {
        self.register(engine);
        self
    }

    /// Registered engine IDs in sorted order
    pub fn engine_ids(&self) -> Vec<String> {
        self.engines.keys().cloned().collect()
    }

    pub fn engine_mut(&mut self, id: &str) -> Option<&mut (dyn SlotEngine + 'static)> {
        self.engines.get_mut(id).map(|engine| engine.as_mut())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.engines.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Version of the engine bundle
    pub fn bundle_version(&self) -> &str {
        &self.bundle_version
    }

    /// SHA-256 (hex) over every registered engine's ID and serialized state
    pub fn last_checksum(&self) -> &str {
        &self.checksum
    }

    fn refresh_checksum(&mut self) {
        let mut hasher = Sha256::new();
        for (id, engine) in &self.engines {
            hasher.update(id.as_bytes());
            hasher.update([0u8]);
            hasher.update(engine.serialized_state().as_bytes());
            hasher.update([0u8]);
        }
        self.checksum = hex::encode(hasher.finalize());
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
