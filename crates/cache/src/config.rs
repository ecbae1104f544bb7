//! Group configuration

use serde::{Deserialize, Serialize};

/// Capacity applied when none is configured
pub const DEFAULT_MAX_BYTES: u64 = 64 * 1024 * 1024; // 64MB

/// Configuration for one cache group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Maximum bytes of cached entries, keys included; 0 disables eviction
    pub max_bytes: u64,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl GroupConfig {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Set the capacity ceiling
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}
