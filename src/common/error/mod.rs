//! Unified error types for quire.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are split
//! into fatal load errors, fatal structural errors and everything else; text
//! quality problems are never errors, they are repaired and recorded in the
//! document tree instead.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
