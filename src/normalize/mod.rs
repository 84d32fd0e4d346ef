//! Typographic text normalization.
//!
//! Manuscripts arrive with straight quotes, spaced hyphens standing in for
//! dashes, stray double spaces and misplaced quote spacing. The normalizer
//! rewrites each paragraph into canonical units and records every repair
//! as a [`Correction`](crate::model::SpanKind::Correction) span carrying
//! the original text, so nothing is silently lost.
//!
//! # Examples
//!
//! ```rust
//! use quire::model::{Div, Span, StyleRef};
//! use quire::normalize::{Cleaner, NormalizeOptions};
//!
//! let para = Div::paragraph(StyleRef::block(), None)
//!     .with_span(Span::text_run("He said \"hi\" - twice", StyleRef::text(), None));
//! let cleaner = Cleaner::new(NormalizeOptions::new().with_expect_leading_tab(false));
//! let cleaned = cleaner.clean_paragraph(para).unwrap();
//! assert_eq!(cleaned.text(), "He said \u{201C}hi\u{201D}\u{A0}\u{2013} twice");
//! ```

pub mod chars;
mod cleaner;
mod config;
mod state;

pub use cleaner::Cleaner;
pub use config::{ConvertOptions, DEFAULT_CHAPTER_PATTERN, NormalizeOptions};
pub use state::{NormalizerState, strip_trailing_whitespace};
