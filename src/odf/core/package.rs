//! ODF package (ZIP archive) handling functionality.
//!
//! The package is read fully into memory and indexed once. All reads are
//! repeatable: asking for the same entry twice yields the same bytes. The
//! archive handle sits behind a lock so a `Package` can be shared through an
//! `Arc` by image nodes that extract their bytes on demand.

use super::manifest::Manifest;
use super::xml::XmlDocument;
use crate::common::{Error, Result};
use crate::odf::constants::{MANDATORY_PARTS, ODF_MANIFEST, ODF_MIMETYPE};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// An ODF package (ZIP file containing XML documents)
pub struct Package {
    archive: Mutex<ZipArchive<Cursor<Vec<u8>>>>,
    entries: BTreeSet<String>,
    manifest: Manifest,
    mimetype: Option<String>,
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Package")
            .field("entries", &self.entries)
            .field("mimetype", &self.mimetype)
            .finish_non_exhaustive()
    }
}

impl Package {
    /// Open a package from a file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Open a package from any reader; the whole stream is buffered.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes)
    }

    /// Open a package from its raw bytes.
    ///
    /// Fails with [`Error::MissingPart`] when any of the mandatory parts
    /// (manifest, content, metadata) is absent.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let entries: BTreeSet<String> = archive.file_names().map(str::to_string).collect();

        for part in MANDATORY_PARTS {
            if !entries.contains(part) {
                return Err(Error::MissingPart(part.to_string()));
            }
        }

        let manifest = Manifest::parse(&Self::read_entry(&mut archive, ODF_MANIFEST)?)?;
        let mimetype = if entries.contains(ODF_MIMETYPE) {
            let raw = Self::read_entry(&mut archive, ODF_MIMETYPE)?;
            Some(String::from_utf8_lossy(&raw).trim().to_string())
        } else {
            manifest.mimetype.clone()
        };

        Ok(Self {
            archive: Mutex::new(archive),
            entries,
            manifest,
            mimetype,
        })
    }

    fn read_entry(archive: &mut ZipArchive<Cursor<Vec<u8>>>, path: &str) -> Result<Vec<u8>> {
        let mut file = archive.by_name(path)?;
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Check if an entry exists in the package
    #[inline]
    pub fn has_entry(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    /// All entry paths, sorted.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Read an entry's bytes.
    pub fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        if !self.has_entry(path) {
            return Err(Error::MissingResource(path.to_string()));
        }
        let mut archive = self.archive.lock();
        Self::read_entry(&mut archive, path)
    }

    /// Read and parse an XML entry.
    pub fn read_xml(&self, path: &str) -> Result<XmlDocument> {
        let bytes = self.read_bytes(path)?;
        XmlDocument::from_bytes(&bytes).map_err(|e| match e {
            Error::Xml(msg) => Error::Xml(format!("{}: {}", path, msg)),
            other => other,
        })
    }

    /// MIME type of the package: the `mimetype` entry, else the manifest root.
    #[inline]
    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    /// Get the manifest
    #[inline]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Media type of an entry: the manifest's, else guessed from the
    /// extension as `image/<ext>`.
    pub fn media_type(&self, path: &str) -> String {
        if let Some(media_type) = self.manifest.media_type(path) {
            return media_type.to_string();
        }
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg".to_string(),
            "svg" => "image/svg+xml".to_string(),
            "" => "application/octet-stream".to_string(),
            other => format!("image/{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::constants::{ODF_CONTENT, ODF_META, ODF_TEXT};
    use crate::odf::core::fixture::PackageBuilder;
    use std::io::Write;

    #[test]
    fn test_open_minimal() {
        let package = PackageBuilder::odt().package();
        assert!(package.has_entry(ODF_CONTENT));
        assert!(package.has_entry(ODF_META));
        assert!(!package.has_entry("styles.xml"));
        assert_eq!(package.mimetype(), Some(ODF_TEXT));
    }

    #[test]
    fn test_missing_mandatory_part() {
        for part in MANDATORY_PARTS {
            let bytes = PackageBuilder::odt().without(part).build();
            match Package::from_bytes(bytes) {
                Err(Error::MissingPart(p)) => assert_eq!(p, part),
                other => panic!("expected MissingPart for {}, got {:?}", part, other),
            }
        }
    }

    #[test]
    fn test_not_a_zip() {
        let err = Package::from_bytes(b"plain text".to_vec()).unwrap_err();
        assert!(err.is_fatal_load());
    }

    #[test]
    fn test_reads_are_repeatable() {
        let package = PackageBuilder::odt()
            .file("Pictures/a.png", b"\x89PNG-bytes".to_vec())
            .package();
        let first = package.read_bytes("Pictures/a.png").unwrap();
        let second = package.read_bytes("Pictures/a.png").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"\x89PNG-bytes");
        assert!(matches!(
            package.read_bytes("Pictures/b.png"),
            Err(Error::MissingResource(_))
        ));
    }

    #[test]
    fn test_read_xml() {
        let package = PackageBuilder::odt().package();
        let doc = package.read_xml(ODF_CONTENT).unwrap();
        assert_eq!(doc.root().name(), "office:document-content");
    }

    #[test]
    fn test_media_type_fallback() {
        let package = PackageBuilder::odt()
            .file("Pictures/a.png", vec![1, 2, 3])
            .file("Pictures/b.JPG", vec![4])
            .package();
        assert_eq!(package.media_type("Pictures/a.png"), "image/png");
        assert_eq!(package.media_type("Pictures/b.JPG"), "image/jpeg");
    }

    #[test]
    fn test_open_from_path() {
        let bytes = PackageBuilder::odt().build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let package = Package::open(file.path()).unwrap();
        assert!(package.entries().any(|e| e == ODF_META));
        assert!(Package::open(file.path().with_extension("missing")).is_err());
    }
}
