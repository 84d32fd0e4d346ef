//! Common types and utilities shared across the crate.
//!
//! This module holds the unified error type, the book metadata record, length
//! units used by style values, and XML text helpers.

// Submodule declarations
pub mod error;
pub mod metadata;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use metadata::Metadata;
pub use unit::{Length, LengthUnit};
