//! ODF metadata parsing functionality.
//!
//! meta.xml is read into a flat property map: Dublin Core children of
//! `office:meta` keep their local name (`dc:title` becomes `title`), user
//! defined fields are keyed by their `meta:name`, other `meta:` children keep
//! their local name. Document statistics are ignored. The map is then folded
//! into the [`Metadata`] record a publishing writer needs.

use super::xml::{XmlDocument, XmlElement};
use crate::common::{Metadata, Result};
use std::collections::BTreeMap;

/// User-defined property holding the full author name.
pub const BOOK_AUTHOR: &str = "Book Author";
/// User-defined property overriding the author's first name.
pub const BOOK_AUTHOR_FIRST: &str = "Book Author First";
/// User-defined property overriding the author's last name.
pub const BOOK_AUTHOR_LAST: &str = "Book Author Last";
/// User-defined property holding the publication year.
pub const PUBLISH_YEAR: &str = "Publish Year";

/// Raw document properties from meta.xml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OdfMetadata {
    properties: BTreeMap<String, String>,
}

impl OdfMetadata {
    /// Parse metadata from meta.xml content
    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_document(&XmlDocument::from_bytes(bytes)?))
    }

    /// Collect properties from an already parsed meta.xml.
    pub fn from_document(doc: &XmlDocument) -> Self {
        let mut properties = BTreeMap::new();
        let mut sets = doc.root().descendants_named("office:meta");
        if doc.root().name() == "office:meta" {
            sets.insert(0, doc.root());
        }

        for set in sets {
            for child in set.child_elements() {
                let key = match (child.prefix(), child.name()) {
                    ("dc", _) => child.local_name().to_string(),
                    (_, "meta:user-defined") => match child.attribute("meta:name") {
                        Some(name) => name.to_string(),
                        None => continue,
                    },
                    (_, "meta:document-statistic") => continue,
                    ("meta", _) => child.local_name().to_string(),
                    _ => continue,
                };
                properties.insert(key, Self::direct_text(child));
            }
        }

        Self { properties }
    }

    /// Only the element's own character data; nested elements are skipped.
    fn direct_text(element: &XmlElement) -> String {
        element
            .children()
            .iter()
            .filter_map(|c| c.as_text())
            .collect()
    }

    /// Look up a property.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All properties, sorted by key.
    #[inline]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Fold the properties into a book metadata record.
    ///
    /// `Book Author First`/`Book Author Last` win over the split of
    /// `Book Author`, whose last word is the last name and the rest the first.
    pub fn to_metadata(&self) -> Metadata {
        let mut ret = Metadata::default();
        let split_author: Option<(String, String)> = self.get(BOOK_AUTHOR).map(|full| {
            let names: Vec<&str> = full.split_whitespace().collect();
            match names.split_last() {
                Some((last, first)) => (first.join(" "), (*last).to_string()),
                None => (String::new(), String::new()),
            }
        });

        if let Some(first) = self.get(BOOK_AUTHOR_FIRST) {
            ret.author_first = first.to_string();
        } else if let Some((first, _)) = &split_author {
            ret.author_first = first.clone();
        }
        if let Some(last) = self.get(BOOK_AUTHOR_LAST) {
            ret.author_last = last.to_string();
        } else if let Some((_, last)) = &split_author {
            ret.author_last = last.clone();
        }

        let copy = |key: &str, field: &mut String| {
            if let Some(value) = self.get(key) {
                *field = value.to_string();
            }
        };
        copy(PUBLISH_YEAR, &mut ret.year);
        copy("title", &mut ret.title);
        copy("description", &mut ret.description);
        copy("ISBN-10", &mut ret.isbn_10);
        copy("ISBN-13", &mut ret.isbn_13);
        copy("language", &mut ret.language);
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(children: &str) -> OdfMetadata {
        let xml = format!(
            r#"<office:document-meta xmlns:office="o" xmlns:meta="m" xmlns:dc="d"><office:meta>{}</office:meta></office:document-meta>"#,
            children
        );
        OdfMetadata::from_xml(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_property_keys() {
        let md = meta(concat!(
            "<dc:title>The Book</dc:title>",
            "<meta:generator>Writer</meta:generator>",
            r#"<meta:user-defined meta:name="Publish Year">2012</meta:user-defined>"#,
            r#"<meta:document-statistic meta:page-count="3"/>"#,
            "<dc:description>An <x>ignored</x>story</dc:description>",
        ));
        assert_eq!(md.get("title"), Some("The Book"));
        assert_eq!(md.get("generator"), Some("Writer"));
        assert_eq!(md.get("Publish Year"), Some("2012"));
        assert_eq!(md.get("document-statistic"), None);
        assert_eq!(md.get("description"), Some("An story"));
    }

    #[test]
    fn test_author_split() {
        let md = meta(r#"<meta:user-defined meta:name="Book Author">Jane Q. Public</meta:user-defined>"#);
        let m = md.to_metadata();
        assert_eq!(m.author_first, "Jane Q.");
        assert_eq!(m.author_last, "Public");
        assert_eq!(m.language, "en");
    }

    #[test]
    fn test_author_override() {
        let md = meta(concat!(
            r#"<meta:user-defined meta:name="Book Author">Jane Public</meta:user-defined>"#,
            r#"<meta:user-defined meta:name="Book Author Last">Doe</meta:user-defined>"#,
            "<dc:language>fr</dc:language>",
            r#"<meta:user-defined meta:name="ISBN-13">978-0-00-000000-0</meta:user-defined>"#,
        ));
        let m = md.to_metadata();
        assert_eq!(m.author_first, "Jane");
        assert_eq!(m.author_last, "Doe");
        assert_eq!(m.language, "fr");
        assert_eq!(m.isbn_13, "978-0-00-000000-0");
        assert!(m.isbn_10.is_empty());
    }

    #[test]
    fn test_empty_author() {
        let md = meta(r#"<meta:user-defined meta:name="Book Author">  </meta:user-defined>"#);
        let m = md.to_metadata();
        assert!(m.author_first.is_empty());
        assert!(m.author_last.is_empty());
        assert!(!m.has_data());
    }
}
