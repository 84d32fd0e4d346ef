//! In-memory ODT packages for unit tests.

use super::Package;
use crate::odf::constants::{ODF_CONTENT, ODF_MANIFEST, ODF_META, ODF_MIMETYPE, ODF_STYLES, ODF_TEXT};
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const NAMESPACES: &str = concat!(
    r#"xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
    r#"xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" "#,
    r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" "#,
    r#"xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" "#,
    r#"xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" "#,
    r#"xmlns:svg="urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0" "#,
    r#"xmlns:xlink="http://www.w3.org/1999/xlink" "#,
    r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
    r#"xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0""#,
);

/// Builds a zip container file by file.
pub(crate) struct PackageBuilder {
    files: Vec<(String, Vec<u8>)>,
}

impl PackageBuilder {
    /// A valid, empty text document.
    pub(crate) fn odt() -> Self {
        Self { files: Vec::new() }
            .file(ODF_MIMETYPE, ODF_TEXT.as_bytes().to_vec())
            .file(ODF_MANIFEST, manifest_xml().into_bytes())
            .meta("")
            .content("", "")
    }

    /// Add or replace an entry.
    pub(crate) fn file(mut self, path: &str, bytes: Vec<u8>) -> Self {
        self.files.retain(|(p, _)| p != path);
        self.files.push((path.to_string(), bytes));
        self
    }

    /// Remove an entry.
    pub(crate) fn without(mut self, path: &str) -> Self {
        self.files.retain(|(p, _)| p != path);
        self
    }

    /// Replace content.xml with the given automatic styles and `office:text` body.
    pub(crate) fn content(self, automatic_styles: &str, body: &str) -> Self {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content {NAMESPACES} office:version="1.2"><office:font-face-decls><style:font-face style:name="Liberation Serif" svg:font-family="'Liberation Serif'" style:font-family-generic="roman"/></office:font-face-decls><office:automatic-styles>{automatic_styles}</office:automatic-styles><office:body><office:text>{body}</office:text></office:body></office:document-content>"#
        );
        self.file(ODF_CONTENT, xml.into_bytes())
    }

    /// Add styles.xml with the given shared styles.
    pub(crate) fn styles(self, styles: &str) -> Self {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><office:document-styles {NAMESPACES} office:version="1.2"><office:styles>{styles}</office:styles></office:document-styles>"#
        );
        self.file(ODF_STYLES, xml.into_bytes())
    }

    /// Replace meta.xml with the given `office:meta` children.
    pub(crate) fn meta(self, children: &str) -> Self {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><office:document-meta {NAMESPACES} office:version="1.2"><office:meta>{children}</office:meta></office:document-meta>"#
        );
        self.file(ODF_META, xml.into_bytes())
    }

    /// Zip the entries.
    pub(crate) fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (path, bytes) in &self.files {
            zip.start_file(path.as_str(), stored).unwrap();
            zip.write_all(bytes).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    /// Zip the entries and open the result.
    pub(crate) fn package(self) -> Arc<Package> {
        Arc::new(Package::from_bytes(self.build()).unwrap())
    }
}

fn manifest_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2"><manifest:file-entry manifest:full-path="/" manifest:media-type="{ODF_TEXT}"/><manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/><manifest:file-entry manifest:full-path="meta.xml" manifest:media-type="text/xml"/><manifest:file-entry manifest:full-path="Pictures/cover.gif" manifest:media-type="image/gif"/></manifest:manifest>"#
    )
}
