//! Registry of named cache groups
//!
//! An application owns one registry and threads it to wherever groups are
//! created or looked up; there is no process-global map. Lookups take a
//! read lock and run concurrently, registration takes the write lock.

use super::Group;
use crate::config::GroupConfig;
use crate::traits::Loader;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps group names to live [`Group`] instances.
#[derive(Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, Group>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a group under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered; group names identify a
    /// namespace for the lifetime of the registry.
    pub fn create_group(
        &self,
        name: impl Into<String>,
        config: GroupConfig,
        loader: Arc<dyn Loader>,
    ) -> Group {
        let name = name.into();
        let mut groups = self.groups.write();
        if groups.contains_key(&name) {
            panic!("group '{name}' is already registered");
        }
        let group = Group::new(name.clone(), config, loader);
        groups.insert(name, group.clone());
        group
    }

    /// Look up a previously registered group
    pub fn lookup(&self, name: &str) -> Option<Group> {
        self.groups.read().get(name).cloned()
    }

    /// Number of registered groups
    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

impl std::fmt::Debug for GroupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupRegistry")
            .field("groups", &self.len())
            .finish()
    }
}
