//! ODF manifest parsing functionality.
//!
//! The manifest.xml file lists the files in the package together with their
//! media types. Images embedded in a manuscript take their MIME type from here.

use super::xml::XmlDocument;
use crate::common::Result;
use std::collections::HashMap;

/// ODF manifest (META-INF/manifest.xml)
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Media type of the package root entry (`/`)
    pub mimetype: Option<String>,
    pub entries: HashMap<String, ManifestEntry>,
}

/// Entry in the ODF manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub full_path: String,
    pub media_type: String,
    pub size: Option<u64>,
}

impl Manifest {
    /// Parse manifest XML content
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let doc = XmlDocument::from_bytes(bytes)?;
        let mut entries = HashMap::new();

        for e in doc.root().descendants_named("manifest:file-entry") {
            let Some(full_path) = e.attribute("manifest:full-path").filter(|p| !p.is_empty())
            else {
                continue;
            };
            let entry = ManifestEntry {
                full_path: full_path.to_string(),
                media_type: e.attribute("manifest:media-type").unwrap_or_default().to_string(),
                size: e.attribute("manifest:size").and_then(|s| s.parse().ok()),
            };
            entries.insert(entry.full_path.clone(), entry);
        }

        let mimetype = entries
            .get("/")
            .map(|entry| entry.media_type.clone())
            .filter(|m| !m.is_empty());

        Ok(Self { mimetype, entries })
    }

    /// Media type recorded for a package path, if any.
    pub fn media_type(&self, path: &str) -> Option<&str> {
        self.entries
            .get(path)
            .map(|entry| entry.media_type.as_str())
            .filter(|m| !m.is_empty())
    }
}
