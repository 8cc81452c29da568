//! Registry of successfully loaded mods.
//!
//! Append-only: entries are pushed by load tasks as each load completes and
//! are never removed or reordered, so registry order is load-completion
//! order. Dispatch reads a snapshot, so an append finishing mid-dispatch is
//! observed by the next dispatch, never halfway through the current one.

use std::sync::Arc;

use modhost_sdk::Extension;
use parking_lot::RwLock;

/// Shared handle to a loaded mod.
///
/// The per-mod lock lets hooks take `&mut self` while the registry itself
/// stays read-shared.
pub type DynExtension = Arc<RwLock<Box<dyn Extension>>>;

/// Ordered collection of loaded mods.
pub struct ModRegistry {
    mods: RwLock<Vec<DynExtension>>,
}

impl ModRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            mods: RwLock::new(Vec::new()),
        }
    }

    /// Append a loaded mod. Called by the loaded unit itself once its load
    /// completes; the host never registers on a mod's behalf.
    pub fn register(&self, extension: Box<dyn Extension>) {
        self.mods.write().push(Arc::new(RwLock::new(extension)));
    }

    /// Snapshot of all mods in registry order.
    pub fn snapshot(&self) -> Vec<DynExtension> {
        self.mods.read().clone()
    }

    /// Number of loaded mods.
    pub fn count(&self) -> usize {
        self.mods.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.read().is_empty()
    }
}

impl Default for ModRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modhost_sdk::{Capability, Extension};

    struct Named(&'static str);

    impl Extension for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn capabilities(&self) -> &[Capability] {
            &[]
        }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = ModRegistry::new();
        assert_eq!(registry.count(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registration_preserves_order() {
        let registry = ModRegistry::new();
        registry.register(Box::new(Named("first")));
        registry.register(Box::new(Named("second")));
        registry.register(Box::new(Named("third")));

        let names: Vec<String> = registry
            .snapshot()
            .iter()
            .map(|m| m.read().name().to_string())
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
