//! OpenDocument Text (.odt) ingestion.
//!
//! [`Document`] loads a package and its style table; [`TreeParser`] turns
//! the `office:text` body into document nodes; [`ChapterSplitter`] groups
//! them at `Chapter N` marker paragraphs before the normalizer cleans them.
//!
//! # Pipeline
//!
//! 1. `Package`: zip container, mandatory parts checked on open
//! 2. `StyleTable`: styles.xml, then content.xml automatic styles
//! 3. `TreeParser`: raw node tree with style names attached
//! 4. `ChapterSplitter`: optional chapter grouping
//! 5. `Cleaner`: typographic normalization, empty paragraphs pruned

mod chapters;
mod document;
mod parser;

pub use chapters::{ChapterSplitter, Chapters, renumber};
pub use document::Document;
pub use parser::{Parsed, TreeParser};
