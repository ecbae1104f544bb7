//! Core domain types and errors for the `meshcache` cache library.
//!
//! This crate establishes the foundational error handling used throughout
//! the workspace. It aims to provide clear, type-safe, and consistent
//! building blocks.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.

pub mod errors;

pub use self::errors::{BoxError, Error, Result};
