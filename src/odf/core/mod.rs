//! Core ODF package access.
//!
//! This module provides the fundamental building blocks for reading an
//! OpenDocument package: the ZIP container with its entry index, a
//! mixed-content XML tree for the parts, the manifest, and the document
//! properties from meta.xml.

/// ODF manifest parsing
mod manifest;
/// ODF metadata parsing
mod metadata;
/// ODF package handling
mod package;
/// Mixed-content XML tree
mod xml;

#[cfg(test)]
pub(crate) mod fixture;

// Re-export main types for convenience
pub use manifest::{Manifest, ManifestEntry};
pub use metadata::{BOOK_AUTHOR, BOOK_AUTHOR_FIRST, BOOK_AUTHOR_LAST, OdfMetadata, PUBLISH_YEAR};
pub use package::Package;
pub use xml::{XmlDocument, XmlElement, XmlNode};
