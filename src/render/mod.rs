//! Output writers over the cleaned document tree.

#[cfg(feature = "html")]
mod html;

#[cfg(feature = "html")]
pub use html::{HtmlWriter, ImageSink, to_html};
