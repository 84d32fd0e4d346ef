//! OpenDocument Format support.
//!
//! - [`core`]: zip package access, manifest, document properties and a
//!   small owned XML tree
//! - [`elements`]: tag classification, style records and the style table
//! - [`odt`]: text documents and their conversion into document nodes

pub mod constants;
pub mod core;
pub mod elements;
pub mod odt;

pub use odt::Document;
