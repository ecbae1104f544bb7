//! Builder methods for creating errors with context

use super::types::{BoxError, Error};
use std::sync::Arc;

// Helper methods for creating errors with context
impl Error {
    /// Create an invalid key error
    #[must_use]
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a source loader error, preserving the loader's own failure
    #[must_use]
    pub fn source_unavailable(
        group: impl Into<String>,
        key: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Error::SourceUnavailable {
            group: group.into(),
            key: key.into(),
            cause: Arc::from(cause.into()),
        }
    }

    /// Create a peer transport error, preserving the transport's own failure
    #[must_use]
    pub fn transport(
        group: impl Into<String>,
        key: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Error::Transport {
            group: group.into(),
            key: key.into(),
            cause: Arc::from(cause.into()),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
