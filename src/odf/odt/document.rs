//! OpenDocument Text document: the entry point of a conversion.

use super::chapters::{ChapterSplitter, renumber};
use super::parser::TreeParser;
use crate::common::{Error, Metadata, Result};
use crate::model::Node;
use crate::normalize::{Cleaner, ConvertOptions, DEFAULT_CHAPTER_PATTERN};
use crate::odf::constants::{ODF_CONTENT, ODF_META, ODF_TEXT, ODF_TEXT_TEMPLATE};
use crate::odf::core::{OdfMetadata, Package, XmlDocument};
use crate::odf::elements::StyleTable;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// An OpenDocument text document (.odt).
///
/// Loading opens the package, reads the style table (shared styles, then
/// the content part's automatic styles) and the document properties. The
/// content tree is built on demand by [`convert`](Self::convert).
///
/// # Examples
///
/// ```no_run
/// use quire::odf::Document;
/// use quire::normalize::ConvertOptions;
///
/// # fn main() -> quire::Result<()> {
/// let doc = Document::open("manuscript.odt")?;
///
/// let metadata = doc.metadata();
/// println!("{} by {}", metadata.title, metadata.author());
///
/// for node in doc.convert(&ConvertOptions::default())? {
///     println!("{}", node.text());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Document {
    /// Shared with every image node the conversion produces
    package: Arc<Package>,
    styles: StyleTable,
    content: XmlDocument,
    properties: OdfMetadata,
}

impl Document {
    /// Open an ODT document from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not a valid ZIP archive
    /// - A mandatory part (manifest, content, meta) is missing
    /// - The declared MIME type is not a text document
    /// - The content or style XML is malformed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_package(Arc::new(Package::open(path)?))
    }

    /// Create a Document from a byte buffer.
    ///
    /// ```no_run
    /// use quire::odf::Document;
    ///
    /// # fn main() -> quire::Result<()> {
    /// let bytes = std::fs::read("manuscript.odt")?;
    /// let doc = Document::from_bytes(bytes)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_package(Arc::new(Package::from_bytes(bytes)?))
    }

    /// Create a Document from any reader. The whole stream is read.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_package(Arc::new(Package::from_reader(reader)?))
    }

    /// Create a Document from an already opened package.
    pub fn from_package(package: Arc<Package>) -> Result<Self> {
        match package.mimetype() {
            Some(ODF_TEXT | ODF_TEXT_TEMPLATE) => {},
            Some(other) => {
                return Err(Error::InvalidValue(format!(
                    "Not an ODT file: MIME type is {}",
                    other
                )));
            },
            None => log::warn!("package declares no MIME type, assuming a text document"),
        }

        let styles = StyleTable::load(&package)?;
        let content = package.read_xml(ODF_CONTENT)?;
        let properties = OdfMetadata::from_document(&package.read_xml(ODF_META)?);
        log::debug!(
            "loaded document: {} styles, {} properties",
            styles.len(),
            properties.properties().len()
        );

        Ok(Self {
            package,
            styles,
            content,
            properties,
        })
    }

    #[inline]
    pub fn package(&self) -> &Arc<Package> {
        &self.package
    }

    /// The style table, with inheritance resolvable by name.
    #[inline]
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Raw document properties from meta.xml.
    #[inline]
    pub fn properties(&self) -> &OdfMetadata {
        &self.properties
    }

    /// Book metadata derived from the document properties.
    pub fn metadata(&self) -> Metadata {
        self.properties.to_metadata()
    }

    /// The structural tree before any text normalization.
    pub fn raw_nodes(&self) -> Result<Vec<Node>> {
        TreeParser::new(&self.styles, Arc::clone(&self.package)).convert(&self.content)
    }

    /// Full conversion: parse, group into chapters, normalize, renumber.
    ///
    /// Chapters are formed before cleaning so that marker paragraphs are
    /// matched on their raw text, and every chapter is then cleaned as a
    /// container.
    pub fn convert(&self, options: &ConvertOptions) -> Result<Vec<Node>> {
        let mut nodes = self.raw_nodes()?;

        if let Some(pattern) = &options.chapter_pattern {
            let splitter = if pattern == DEFAULT_CHAPTER_PATTERN {
                ChapterSplitter::default()
            } else {
                ChapterSplitter::new(pattern)?
            };
            let split = splitter.split(nodes)?;
            log::debug!(
                "{} front matter nodes, {} chapters",
                split.front_matter.len(),
                split.chapters.len()
            );
            nodes = split.into_nodes();
        }

        let mut nodes = Cleaner::new(options.normalize.clone()).clean_all(nodes)?;
        if options.renumber_chapters {
            renumber(&mut nodes, 1);
        }
        Ok(nodes)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("package", &self.package)
            .field("styles", &self.styles.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Div, DivKind, SpanKind};
    use crate::normalize::NormalizeOptions;
    use crate::odf::constants::ODF_MIMETYPE;
    use crate::odf::core::fixture::PackageBuilder;

    const AUTO_STYLES: &str = r#"<style:style style:name="P1" style:family="paragraph" style:parent-style-name="Body"><style:paragraph-properties fo:text-indent="0.5in"/></style:style>"#;
    const SHARED_STYLES: &str = r#"<style:style style:name="Body" style:family="paragraph"><style:paragraph-properties fo:margin-left="1cm"/><style:text-properties fo:font-size="12pt"/></style:style>"#;

    const BODY: &str = concat!(
        r#"<text:p text:style-name="P1">My Book</text:p>"#,
        r#"<text:h text:style-name="P1">Chapter 1</text:h>"#,
        r#"<text:p text:style-name="P1"><text:tab/>He said "hi"  to her - twice.</text:p>"#,
        r#"<text:p text:style-name="P1"> *** </text:p>"#,
        r#"<text:p text:style-name="P1">   </text:p>"#,
        r#"<text:p text:style-name="P1"><text:tab/>Next<text:s/>part.</text:p>"#,
        r#"<text:h>Chapter 2</text:h>"#,
        r#"<text:p><draw:frame draw:style-name="fr1"><draw:image xlink:href="Pictures/cover.gif"/></draw:frame></text:p>"#,
    );

    fn document() -> Document {
        let bytes = PackageBuilder::odt()
            .styles(SHARED_STYLES)
            .content(AUTO_STYLES, BODY)
            .meta("<dc:title>My Book</dc:title><meta:user-defined meta:name=\"Book Author\">Jane Q Public</meta:user-defined>")
            .file("Pictures/cover.gif", b"GIF89a".to_vec())
            .build();
        Document::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_metadata() {
        let doc = document();
        let metadata = doc.metadata();
        assert_eq!(metadata.title, "My Book");
        assert_eq!(metadata.author_first, "Jane Q");
        assert_eq!(metadata.author_last, "Public");
        assert_eq!(doc.properties().get("title"), Some("My Book"));
    }

    #[test]
    fn test_style_cascade_through_document() {
        let doc = document();
        let nodes = doc.raw_nodes().unwrap();
        let style = nodes[0].as_div().unwrap().style.resolve(doc.styles()).unwrap();
        assert_eq!(style.name(), "P1");
        assert!(style.block_mm(crate::odf::elements::BlockKey::Left).is_some());
        assert_eq!(style.font_size(), "12pt");
    }

    #[test]
    fn test_convert_pipeline() {
        let doc = document();
        let nodes = doc.convert(&ConvertOptions::default()).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].text(), "My Book");

        let one = nodes[1].as_div().and_then(Div::as_chapter).unwrap();
        assert_eq!((one.index, one.name.as_str()), (1, "Chapter 1"));
        // The blank paragraph is gone, the stars became a separator line
        assert_eq!(one.children.len(), 3);
        assert_eq!(
            one.children[0].text(),
            "\tHe said \u{201C}hi\u{201D} to her\u{A0}\u{2013} twice."
        );
        assert!(one.children[1].as_div().unwrap().is_separator());
        assert_eq!(one.children[2].text(), "\tNextpart.");

        let two = nodes[2].as_div().and_then(Div::as_chapter).unwrap();
        assert_eq!(two.index, 2);
        // The empty paragraphs split off around the frame are dropped
        assert_eq!(two.children.len(), 1);
        let frame = two.children[0].as_div().unwrap();
        match &frame.kind {
            DivKind::SideBar(children) => match &children[0].as_span().unwrap().kind {
                SpanKind::Image(image) => assert_eq!(image.mimetype(), "image/gif"),
                other => panic!("expected image, got {:?}", other),
            },
            other => panic!("expected side bar, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_chapter_numbering() {
        let bytes = PackageBuilder::odt()
            .content(
                "",
                "<text:p>Chapter 1</text:p><text:p>a</text:p><text:p>Chapter 2</text:p><text:p>Chapter 3</text:p><text:p>b</text:p>",
            )
            .build();
        let doc = Document::from_bytes(bytes).unwrap();
        let indexes = |nodes: &[Node]| -> Vec<(usize, String)> {
            nodes
                .iter()
                .filter_map(|n| n.as_div().and_then(Div::as_chapter))
                .map(|c| (c.index, c.name.clone()))
                .collect()
        };

        let kept = doc
            .convert(&ConvertOptions::new().with_renumber_chapters(false))
            .unwrap();
        assert_eq!(
            indexes(&kept),
            [(1, "Chapter 1".to_string()), (3, "Chapter 3".to_string())]
        );

        let renumbered = doc.convert(&ConvertOptions::default()).unwrap();
        assert_eq!(
            indexes(&renumbered),
            [(1, "Chapter 1".to_string()), (2, "Chapter 3".to_string())]
        );
    }

    #[test]
    fn test_convert_without_chapters() {
        let doc = document();
        let options = ConvertOptions::new()
            .with_chapter_pattern(None)
            .with_normalize(NormalizeOptions::new().with_expect_leading_tab(false));
        let nodes = doc.convert(&options).unwrap();
        assert!(nodes.iter().all(|n| n.as_div().is_some_and(|d| d.as_chapter().is_none())));
        assert_eq!(nodes[1].text(), "Chapter 1");
    }

    #[test]
    fn test_rejects_other_mimetypes() {
        let bytes = PackageBuilder::odt()
            .file(ODF_MIMETYPE, b"application/vnd.oasis.opendocument.spreadsheet".to_vec())
            .build();
        assert!(matches!(Document::from_bytes(bytes), Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_unknown_element_aborts_conversion() {
        let bytes = PackageBuilder::odt()
            .content("", "<text:p>a<text:note/></text:p>")
            .build();
        let doc = Document::from_bytes(bytes).unwrap();
        assert!(doc.convert(&ConvertOptions::default()).unwrap_err().is_structural());
    }
}
