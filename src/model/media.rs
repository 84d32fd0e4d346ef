//! Media references into the source package.

use crate::common::{Error, Result};
use crate::odf::core::Package;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// An image stored inside the package.
///
/// The bytes are not copied at parse time; the image keeps a shared handle
/// to the package and reads them when a writer asks.
#[derive(Clone)]
pub struct Image {
    path: String,
    package: Arc<Package>,
}

impl Image {
    /// Bind a package path. Fails if the package has no such entry.
    pub fn new(path: impl Into<String>, package: Arc<Package>) -> Result<Self> {
        let path = path.into();
        if !package.has_entry(&path) {
            return Err(Error::MissingResource(path));
        }
        Ok(Self { path, package })
    }

    /// Path inside the package, e.g. `Pictures/10000000000001.png`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Extension after the last dot, empty if there is none.
    pub fn ext(&self) -> &str {
        self.file_name().rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
    }

    /// MIME type from the manifest, else derived from the extension.
    pub fn mimetype(&self) -> String {
        self.package.media_type(&self.path)
    }

    /// Read the image bytes.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        self.package.read_bytes(&self.path)
    }

    /// Copy the image bytes into `dest`.
    pub fn save_to<W: Write>(&self, dest: &mut W) -> Result<()> {
        dest.write_all(&self.bytes()?)?;
        Ok(())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image").field("path", &self.path).finish()
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && Arc::ptr_eq(&self.package, &other.package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::core::fixture::PackageBuilder;

    #[test]
    fn test_image_binding() {
        let package = PackageBuilder::odt()
            .file("Pictures/cover.gif", b"GIF89a".to_vec())
            .file("Pictures/plain.webp", b"RIFF".to_vec())
            .package();
        let image = Image::new("Pictures/cover.gif", Arc::clone(&package)).unwrap();
        assert_eq!(image.file_name(), "cover.gif");
        assert_eq!(image.ext(), "gif");
        assert_eq!(image.mimetype(), "image/gif");

        let mut out = Vec::new();
        image.save_to(&mut out).unwrap();
        assert_eq!(out, b"GIF89a");

        let other = Image::new("Pictures/plain.webp", Arc::clone(&package)).unwrap();
        assert_eq!(other.mimetype(), "image/webp");
        assert_ne!(image, other);
    }

    #[test]
    fn test_missing_image() {
        let package = PackageBuilder::odt().package();
        match Image::new("Pictures/none.png", package) {
            Err(Error::MissingResource(path)) => assert_eq!(path, "Pictures/none.png"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
