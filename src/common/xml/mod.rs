//! XML text helpers shared by the package reader and the HTML writer.

pub mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
