//! Style elements for ODF documents.
//!
//! A [`Style`] is the record registered for one `style:style` (or default
//! style, page layout, master page) element: its identity, its parent
//! reference, and the typed attributes read from its paragraph and text
//! property elements. Only attributes listed in the two fixed tables below
//! are read; nothing is defaulted at this layer.

use super::attr_parser::{AttrType, StyleValue};
use super::style_table::StyleTable;
use crate::odf::constants::{DEFAULT_FONT_SIZE, DEFAULT_PARENT_STYLE};
use crate::odf::core::XmlElement;
use phf::{Map, phf_map};
use std::collections::BTreeMap;

/// Style family types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    /// Paragraph styles
    Paragraph,
    /// Text/character styles
    Text,
    /// Section styles
    Section,
    /// Table styles
    Table,
    /// Table column styles
    TableColumn,
    /// Table row styles
    TableRow,
    /// Table cell styles
    TableCell,
    /// Graphic (frame) styles
    Graphic,
    /// Page layouts and anything linked to one
    Page,
}

impl StyleFamily {
    /// Parse style family from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paragraph" => Some(Self::Paragraph),
            "text" => Some(Self::Text),
            "section" => Some(Self::Section),
            "table" => Some(Self::Table),
            "table-column" => Some(Self::TableColumn),
            "table-row" => Some(Self::TableRow),
            "table-cell" => Some(Self::TableCell),
            "graphic" => Some(Self::Graphic),
            "page" => Some(Self::Page),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Text => "text",
            Self::Section => "section",
            Self::Table => "table",
            Self::TableColumn => "table-column",
            Self::TableRow => "table-row",
            Self::TableCell => "table-cell",
            Self::Graphic => "graphic",
            Self::Page => "page",
        }
    }
}

/// Semantic keys read from `style:paragraph-properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockKey {
    Left,
    Right,
    Height,
    Indent,
    AutoIndent,
    Autospace,
    PageStyleName,
    PageLayoutName,
}

impl BlockKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Height => "height",
            Self::Indent => "indent",
            Self::AutoIndent => "auto-indent",
            Self::Autospace => "autospace",
            Self::PageStyleName => "page-style-name",
            Self::PageLayoutName => "page-layout-name",
        }
    }
}

/// Semantic keys read from `style:text-properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextKey {
    FontName,
    FontSize,
    FontNameAsian,
    FontSizeAsian,
    FontNameComplex,
    FontSizeComplex,
    FontStyle,
    FontStyleAsian,
    FontStyleComplex,
    Language,
    Country,
    FontWeight,
    FontWeightAsian,
    FontWeightComplex,
}

impl TextKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FontName => "font-name",
            Self::FontSize => "font-size",
            Self::FontNameAsian => "font-name-asian",
            Self::FontSizeAsian => "font-size-asian",
            Self::FontNameComplex => "font-name-complex",
            Self::FontSizeComplex => "font-size-complex",
            Self::FontStyle => "font-style",
            Self::FontStyleAsian => "font-style-asian",
            Self::FontStyleComplex => "font-style-complex",
            Self::Language => "language",
            Self::Country => "country",
            Self::FontWeight => "font-weight",
            Self::FontWeightAsian => "font-weight-asian",
            Self::FontWeightComplex => "font-weight-complex",
        }
    }
}

// ============================================================================
// ATTRIBUTE TABLES
// ============================================================================

static BLOCK_ATTRIBUTES: Map<&'static str, (BlockKey, AttrType)> = phf_map! {
    "fo:margin-left" => (BlockKey::Left, AttrType::Length),
    "fo:margin-right" => (BlockKey::Right, AttrType::Length),
    "fo:line-height" => (BlockKey::Height, AttrType::LengthOrPercent),
    "fo:text-indent" => (BlockKey::Indent, AttrType::Length),
    "style:auto-text-indent" => (BlockKey::AutoIndent, AttrType::Boolean),
    "style:text-autospace" => (BlockKey::Autospace, AttrType::Keyword),
    "style:master-page-name" => (BlockKey::PageStyleName, AttrType::Text),
    "style:page-layout-name" => (BlockKey::PageLayoutName, AttrType::Text),
};

static TEXT_ATTRIBUTES: Map<&'static str, (TextKey, AttrType)> = phf_map! {
    "style:font-name" => (TextKey::FontName, AttrType::Text),
    "fo:font-size" => (TextKey::FontSize, AttrType::LengthOrPercent),
    "style:font-name-asian" => (TextKey::FontNameAsian, AttrType::Text),
    "style:font-size-asian" => (TextKey::FontSizeAsian, AttrType::LengthOrPercent),
    "style:font-name-complex" => (TextKey::FontNameComplex, AttrType::Text),
    "style:font-size-complex" => (TextKey::FontSizeComplex, AttrType::LengthOrPercent),
    "fo:font-style" => (TextKey::FontStyle, AttrType::Keyword),
    "style:font-style-asian" => (TextKey::FontStyleAsian, AttrType::Keyword),
    "style:font-style-complex" => (TextKey::FontStyleComplex, AttrType::Keyword),
    "fo:language" => (TextKey::Language, AttrType::Text),
    "fo:country" => (TextKey::Country, AttrType::Text),
    "fo:font-weight" => (TextKey::FontWeight, AttrType::Keyword),
    "style:font-weight-asian" => (TextKey::FontWeightAsian, AttrType::Keyword),
    "style:font-weight-complex" => (TextKey::FontWeightComplex, AttrType::Keyword),
};

/// A registered style record.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    name: String,
    family: Option<StyleFamily>,
    display_name: Option<String>,
    parent: Option<String>,
    block: BTreeMap<BlockKey, StyleValue>,
    text: BTreeMap<TextKey, StyleValue>,
}

impl Style {
    /// Read a style element.
    ///
    /// A parent named `Standard`, an empty parent name, or a parent equal to
    /// the style's own name all mean "no parent".
    pub fn from_element(element: &XmlElement) -> Self {
        let name = element.attribute("style:name").unwrap_or_default().to_string();
        let parent = element
            .attribute("style:parent-style-name")
            .filter(|p| !p.is_empty() && *p != DEFAULT_PARENT_STYLE && *p != name)
            .map(str::to_string);

        let mut family = element.attribute("style:family").and_then(StyleFamily::parse);
        if element.attribute("style:page-layout-name").is_some() {
            family = Some(StyleFamily::Page);
        }

        let mut block = BTreeMap::new();
        for props in element.descendants_named("style:paragraph-properties") {
            for (attr, value) in props.attributes() {
                if value.is_empty() {
                    continue;
                }
                if let Some(&(key, attr_type)) = BLOCK_ATTRIBUTES.get(attr.as_str()) {
                    block.insert(key, StyleValue::parse(value, attr_type));
                }
            }
        }
        // The page linkage normally sits on the style element itself.
        for attr in ["style:master-page-name", "style:page-layout-name"] {
            if let (Some(value), Some(&(key, attr_type))) =
                (element.attribute(attr), BLOCK_ATTRIBUTES.get(attr))
                && !value.is_empty()
            {
                block.entry(key).or_insert_with(|| StyleValue::parse(value, attr_type));
            }
        }

        let mut text = BTreeMap::new();
        for props in element.descendants_named("style:text-properties") {
            for (attr, value) in props.attributes() {
                if let Some(&(key, attr_type)) = TEXT_ATTRIBUTES.get(attr.as_str()) {
                    text.insert(key, StyleValue::parse(value, attr_type));
                }
            }
        }

        Self {
            name,
            family,
            display_name: element.attribute("style:display-name").map(str::to_string),
            parent,
            block,
            text,
        }
    }

    /// Style name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Style family, if declared
    #[inline]
    pub fn family(&self) -> Option<StyleFamily> {
        self.family
    }

    /// Human-readable name, if different from the internal one
    #[inline]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Parent style name after normalization
    #[inline]
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// A block (paragraph) attribute
    #[inline]
    pub fn block(&self, key: BlockKey) -> Option<&StyleValue> {
        self.block.get(&key)
    }

    /// A text attribute
    #[inline]
    pub fn text(&self, key: TextKey) -> Option<&StyleValue> {
        self.text.get(&key)
    }

    /// All block attributes
    #[inline]
    pub fn block_properties(&self) -> impl Iterator<Item = (BlockKey, &StyleValue)> {
        self.block.iter().map(|(k, v)| (*k, v))
    }

    /// All text attributes
    #[inline]
    pub fn text_properties(&self) -> impl Iterator<Item = (TextKey, &StyleValue)> {
        self.text.iter().map(|(k, v)| (*k, v))
    }

    /// A block length attribute in millimetres.
    pub fn block_mm(&self, key: BlockKey) -> Option<f64> {
        self.block(key).and_then(StyleValue::to_millimeters)
    }

    /// Copy of this style with every attribute it lacks taken from `parent`.
    pub(crate) fn merged_with_parent(&self, parent: &Style) -> Style {
        let mut merged = self.clone();
        for (key, value) in &parent.block {
            merged.block.entry(*key).or_insert_with(|| value.clone());
        }
        for (key, value) in &parent.text {
            merged.text.entry(*key).or_insert_with(|| value.clone());
        }
        merged
    }

    #[inline]
    pub fn is_paragraph(&self) -> bool {
        self.family == Some(StyleFamily::Paragraph)
    }

    #[inline]
    pub fn is_inner_text(&self) -> bool {
        self.family == Some(StyleFamily::Text)
    }

    /// Font size as written, `11pt` when unset.
    pub fn font_size(&self) -> &str {
        self.text(TextKey::FontSize)
            .map(StyleValue::raw)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn is_italic(&self) -> bool {
        matches!(
            self.text(TextKey::FontStyle).map(StyleValue::raw),
            Some("italic" | "italics")
        )
    }

    pub fn is_bold(&self) -> bool {
        matches!(self.text(TextKey::FontWeight).map(StyleValue::raw), Some("bold"))
    }

    /// The font face this style names, if the table declares it.
    pub fn font<'t>(&self, table: &'t StyleTable) -> Option<&'t FontFace> {
        self.text(TextKey::FontName)
            .and_then(|name| table.font(name.raw()))
    }
}

/// A `style:font-face` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub name: String,
    /// `svg:font-family`, usually quoted when it contains spaces
    pub family: String,
    /// `style:font-family-generic` (`roman`, `swiss`, `modern`, ...)
    pub generic_family: String,
}

impl FontFace {
    pub fn from_element(element: &XmlElement) -> Self {
        let attr = |name: &str| element.attribute(name).unwrap_or_default().to_string();
        Self {
            name: attr("style:name"),
            family: attr("svg:font-family"),
            generic_family: attr("style:font-family-generic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::core::XmlDocument;

    fn style(xml: &str) -> Style {
        let doc = XmlDocument::from_bytes(xml.as_bytes()).unwrap();
        Style::from_element(doc.root())
    }

    #[test]
    fn test_attribute_tables() {
        let s = style(concat!(
            r#"<style:style style:name="P1" style:family="paragraph" style:parent-style-name="Body">"#,
            r#"<style:paragraph-properties fo:margin-left="0.5in" fo:line-height="150%" fo:text-indent="" fo:text-align="center"/>"#,
            r#"<style:text-properties fo:font-size="12pt" fo:font-style="italic" fo:font-weight="bold" style:font-name="Liberation Serif"/>"#,
            "</style:style>"
        ));
        assert_eq!(s.name(), "P1");
        assert!(s.is_paragraph());
        assert_eq!(s.parent_name(), Some("Body"));
        assert!((s.block_mm(BlockKey::Left).unwrap() - 12.7).abs() < 1e-9);
        assert!((s.block(BlockKey::Height).unwrap().as_percent().unwrap() - 1.5).abs() < 1e-9);
        // Empty paragraph attributes and attributes outside the table are skipped.
        assert!(s.block(BlockKey::Indent).is_none());
        assert_eq!(s.block_properties().count(), 2);
        assert_eq!(s.font_size(), "12pt");
        assert!(s.is_italic());
        assert!(s.is_bold());
    }

    #[test]
    fn test_no_parent_cases() {
        for parent in ["Standard", "", "Self"] {
            let s = style(&format!(
                r#"<style:style style:name="Self" style:family="text" style:parent-style-name="{}"/>"#,
                parent
            ));
            assert_eq!(s.parent_name(), None, "parent {:?}", parent);
            assert!(s.is_inner_text());
        }
    }

    #[test]
    fn test_page_family() {
        let s = style(r#"<style:master-page style:name="Standard" style:page-layout-name="pm1"/>"#);
        assert_eq!(s.family(), Some(StyleFamily::Page));
        assert_eq!(s.block(BlockKey::PageLayoutName).map(StyleValue::raw), Some("pm1"));
    }

    #[test]
    fn test_defaults_not_injected() {
        let s = style(r#"<style:style style:name="T1" style:family="text"/>"#);
        assert_eq!(s.text_properties().count(), 0);
        assert_eq!(s.font_size(), "11pt");
        assert!(!s.is_italic());
        assert!(!s.is_bold());
    }

    #[test]
    fn test_merge_child_wins() {
        let parent = style(
            r#"<style:style style:name="A"><style:text-properties fo:font-size="14pt" fo:font-weight="bold"/></style:style>"#,
        );
        let child = style(
            r#"<style:style style:name="B" style:parent-style-name="A"><style:text-properties fo:font-size="10pt"/></style:style>"#,
        );
        let merged = child.merged_with_parent(&parent);
        assert_eq!(merged.font_size(), "10pt");
        assert!(merged.is_bold());
        assert_eq!(merged.name(), "B");
    }
}
