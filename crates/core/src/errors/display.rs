//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey { key, reason } => {
                write!(f, "invalid cache key '{key}': {reason}")
            }
            Error::SourceUnavailable { group, key, cause } => {
                write!(
                    f,
                    "source load failed for key '{key}' in group '{group}': {cause}"
                )
            }
            Error::Transport { group, key, cause } => {
                write!(
                    f,
                    "peer fetch failed for key '{key}' in group '{group}': {cause}"
                )
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
        }
    }
}
