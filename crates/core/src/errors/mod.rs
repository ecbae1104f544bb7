//! Error types and result alias for meshcache operations

mod builders;
mod display;
mod types;

pub use types::{BoxError, Error, Result};
