//! ODF XML tag classification using compile-time perfect hash maps.
//!
//! The structural parser dispatches on a closed [`TagKind`] enumeration
//! rather than on tag strings, so every element class has exactly one rule
//! and anything outside the table lands in the single [`TagKind::Unknown`]
//! arm. Style elements are classified separately by [`StyleTag`].
use phf::{Map, phf_map};

// ============================================================================
// TAG TYPE ENUMERATION
// ============================================================================

/// Element classes the structural parser knows how to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    /// `text:list`, `text:list-header`: must wrap exactly one node
    ListContainer,
    /// `text:p`, `text:h`
    Paragraph,
    /// `text:span`
    Span,
    /// `text:tab`
    Tab,
    /// `text:s`, `text:soft-page-break`: an empty text run
    WhitespaceSpan,
    /// `text:line-break`: starts a new (empty) paragraph
    LineBreak,
    /// `text:sequence-decls`, `office:forms`: carry no prose
    Control,
    /// `text:user-defined`, `text:title`, `text:description`: field wrappers
    Data,
    /// `draw:frame`
    MediaContainer,
    /// `draw:image`
    Image,
    /// Unknown/unsupported tag
    Unknown,
}

impl TagKind {
    /// Whether this element is a field wrapper that is unwrapped to its first
    /// child inside paragraphs and spans.
    #[inline]
    pub fn is_data(self) -> bool {
        self == TagKind::Data
    }
}

/// Elements the style table registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// `style:style`
    Style,
    /// `style:default-style`
    DefaultStyle,
    /// `style:page-layout`
    PageLayout,
    /// `style:master-page`
    MasterPage,
    /// `style:font-face`
    FontFace,
}

// ============================================================================
// COMPILE-TIME TAG MAPPING
// ============================================================================

static TAG_MAP: Map<&'static str, TagKind> = phf_map! {
    "text:list" => TagKind::ListContainer,
    "text:list-header" => TagKind::ListContainer,
    "text:p" => TagKind::Paragraph,
    "text:h" => TagKind::Paragraph,
    "text:span" => TagKind::Span,
    "text:tab" => TagKind::Tab,
    "text:s" => TagKind::WhitespaceSpan,
    "text:soft-page-break" => TagKind::WhitespaceSpan,
    "text:line-break" => TagKind::LineBreak,
    "text:sequence-decls" => TagKind::Control,
    "office:forms" => TagKind::Control,
    "text:user-defined" => TagKind::Data,
    "text:title" => TagKind::Data,
    "text:description" => TagKind::Data,
    "draw:frame" => TagKind::MediaContainer,
    "draw:image" => TagKind::Image,
};

static STYLE_TAG_MAP: Map<&'static str, StyleTag> = phf_map! {
    "style:style" => StyleTag::Style,
    "style:default-style" => StyleTag::DefaultStyle,
    "style:page-layout" => StyleTag::PageLayout,
    "style:master-page" => StyleTag::MasterPage,
    "style:font-face" => StyleTag::FontFace,
};

// ============================================================================
// TAG MATCHING API
// ============================================================================

/// Match a qualified tag name to its [`TagKind`].
///
/// # Examples
///
/// ```
/// # use quire::odf::elements::tag_matcher::{match_tag, TagKind};
/// assert_eq!(match_tag("text:p"), TagKind::Paragraph);
/// assert_eq!(match_tag("draw:frame"), TagKind::MediaContainer);
/// assert_eq!(match_tag("table:table"), TagKind::Unknown);
/// ```
#[inline(always)]
pub fn match_tag(tag: &str) -> TagKind {
    TAG_MAP.get(tag).copied().unwrap_or(TagKind::Unknown)
}

/// Match a qualified tag name to the style element it declares, if any.
#[inline(always)]
pub fn match_style_tag(tag: &str) -> Option<StyleTag> {
    STYLE_TAG_MAP.get(tag).copied()
}

// ============================================================================
// TESTS
// ============================================================================
