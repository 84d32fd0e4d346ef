//! ODF constants: package part paths, MIME types and well-known names.

// ============================================================================
// MIME TYPES
// ============================================================================

/// MIME type for OpenDocument Text (.odt)
pub const ODF_TEXT: &str = "application/vnd.oasis.opendocument.text";

/// MIME type for OpenDocument Text Template (.ott)
pub const ODF_TEXT_TEMPLATE: &str = "application/vnd.oasis.opendocument.text-template";

// ============================================================================
// STANDARD ODF PARTS PATHS
// ============================================================================

/// Path to the mimetype entry (optional for our purposes)
pub const ODF_MIMETYPE: &str = "mimetype";

/// Path to content.xml (main document content)
pub const ODF_CONTENT: &str = "content.xml";

/// Path to meta.xml (document metadata)
pub const ODF_META: &str = "meta.xml";

/// Path to styles.xml (document styles)
pub const ODF_STYLES: &str = "styles.xml";

/// Path to manifest.xml (package manifest)
pub const ODF_MANIFEST: &str = "META-INF/manifest.xml";

/// Parts a package must carry to be ingested at all.
pub const MANDATORY_PARTS: [&str; 3] = [ODF_MANIFEST, ODF_CONTENT, ODF_META];

// ============================================================================
// STYLE NAMES
// ============================================================================

/// Name of the document root paragraph style. A parent reference to it
/// carries no attributes of interest and is treated as "no parent".
pub const DEFAULT_PARENT_STYLE: &str = "Standard";

/// Font size assumed when no style in the chain sets one.
pub const DEFAULT_FONT_SIZE: &str = "11pt";
