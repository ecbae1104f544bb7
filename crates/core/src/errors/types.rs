//! Core error type definitions

use std::sync::Arc;

/// Result type alias for meshcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type accepted from caller-supplied capabilities (loaders and peer
/// transports), before it is wrapped into [`Error`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Core error type for meshcache operations using thiserror
///
/// The enum is `Clone` because a single failure may be delivered to every
/// caller waiting on the same coalesced load; nested causes are therefore
/// held behind `Arc` rather than `Box`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Rejected cache key
    InvalidKey { key: String, reason: String },

    /// The caller-supplied source loader failed for a key
    SourceUnavailable {
        group: String,
        key: String,
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// A remote peer fetch failed
    Transport {
        group: String,
        key: String,
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors
    Configuration { message: String },
}
