//! Quire - ODT manuscript ingestion for self-publishing pipelines
//!
//! This library reads an OpenDocument Text package (a zip of XML parts) and
//! produces a normalized, typed document tree ready for rendering into
//! publishing formats.
//!
//! # Features
//!
//! - **Package reader**: zip container access with mandatory part checks
//! - **Style table**: style records with memoized parent inheritance
//! - **Structural parser**: closed tag dispatch into paragraphs, spans,
//!   side bars and images
//! - **Text normalizer**: quote, dash and whitespace repair with every
//!   correction recorded in the tree
//! - **Metadata**: book properties from `meta.xml`
//! - **HTML check output** (feature `html`)
//!
//! # Example - Converting a manuscript
//!
//! ```no_run
//! use quire::odf::Document;
//! use quire::normalize::ConvertOptions;
//!
//! # fn main() -> quire::Result<()> {
//! let doc = Document::open("manuscript.odt")?;
//! let nodes = doc.convert(&ConvertOptions::default())?;
//!
//! # #[cfg(feature = "html")]
//! let html = quire::render::to_html(Some(&doc.metadata()), &nodes)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Normalizing text directly
//!
//! ```
//! use quire::model::StyleRef;
//! use quire::normalize::NormalizerState;
//!
//! let mut state = NormalizerState::new();
//! state.feed_text("It's  \"fine\" - really", &StyleRef::text(), None);
//! let text: String = state.finish().iter().map(|s| s.text()).collect();
//! assert_eq!(text, "It\u{2019}s \u{201C}fine\u{201D}\u{A0}\u{2013} really");
//! ```

/// Shared error type, metadata record, units and XML helpers
pub mod common;

/// Generic document model: blocks, inline spans, style references
pub mod model;

/// Typographic normalization of paragraph text
pub mod normalize;

/// OpenDocument package, styles and text document parsing
pub mod odf;

/// Writers over the cleaned tree
pub mod render;

pub use common::{Error, Metadata, Result};
pub use odf::Document;
