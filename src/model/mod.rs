//! Generic document model.
//!
//! The tree the ODT parser produces and the normalizer cleans: block nodes
//! ([`Div`]) own their children exclusively, inline nodes ([`Span`]) carry
//! text, special characters, correction records and images. Every node
//! carries a [`StyleRef`] and an optional [`Source`] for diagnostics. The
//! tree has no back-pointers and no cycles.

mod media;
mod node;
mod style;

pub use media::Image;
pub use node::{Chapter, Div, DivKind, Node, Source, Span, SpanKind, SpecialCharacter, Table, TableRow};
pub use style::{StyleKind, StyleRef};
