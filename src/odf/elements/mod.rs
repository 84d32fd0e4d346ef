//! ODF style and tag vocabulary.
//!
//! - [`tag_matcher`]: closed classification of content and style elements
//! - [`attr_parser`]: typed style attribute values
//! - [`style`]: style records and font faces
//! - [`style_table`]: the per-document registry with cascade resolution

pub mod attr_parser;
pub mod style;
pub mod style_table;
pub mod tag_matcher;

pub use attr_parser::{AttrType, StyleValue, ValueKind};
pub use style::{BlockKey, FontFace, Style, StyleFamily, TextKey};
pub use style_table::StyleTable;
pub use tag_matcher::{StyleTag, TagKind, match_style_tag, match_tag};
