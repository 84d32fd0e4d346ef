//! Book metadata handed to renderers alongside the cleaned document tree.
//!
//! The fields are what a publishing writer needs for a title page and the
//! package descriptors of an ebook; they are filled from the document
//! properties by `crate::odf::core::OdfMetadata`.

use crate::common::Result;
use serde::{Deserialize, Serialize};

/// Language assumed when the document does not declare one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Book metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Book title
    pub title: String,
    /// Author first name, including middle names or initials
    pub author_first: String,
    /// Author last name
    pub author_last: String,
    /// Publication year
    pub year: String,
    /// Free-text description
    pub description: String,
    /// ISBN-10
    pub isbn_10: String,
    /// ISBN-13
    pub isbn_13: String,
    /// Language code
    pub language: String,
    /// Subtitle lines
    pub subtitles: Vec<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            author_first: String::new(),
            author_last: String::new(),
            year: String::new(),
            description: String::new(),
            isbn_10: String::new(),
            isbn_13: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            subtitles: Vec::new(),
        }
    }
}

impl Metadata {
    /// Full author name, first name first.
    pub fn author(&self) -> String {
        match (self.author_first.is_empty(), self.author_last.is_empty()) {
            (false, false) => format!("{} {}", self.author_first, self.author_last),
            (true, _) => self.author_last.clone(),
            (false, true) => self.author_first.clone(),
        }
    }

    /// Check if the metadata contains any actual data.
    ///
    /// The language alone does not count, since it always has a default.
    pub fn has_data(&self) -> bool {
        !self.title.is_empty()
            || !self.author_first.is_empty()
            || !self.author_last.is_empty()
            || !self.year.is_empty()
            || !self.description.is_empty()
            || !self.isbn_10.is_empty()
            || !self.isbn_13.is_empty()
            || !self.subtitles.is_empty()
    }

    /// Convert metadata to YAML front matter format.
    ///
    /// Returns a string containing the YAML front matter block,
    /// or an empty string if no metadata is available.
    pub fn to_yaml_front_matter(&self) -> Result<String> {
        if !self.has_data() {
            return Ok(String::new());
        }

        let yaml_string = serde_saphyr::to_string(self).map_err(|e| {
            crate::common::Error::Other(format!("Failed to serialize metadata to YAML: {}", e))
        })?;

        Ok(format!("---\n{}---\n\n", yaml_string))
    }
}
