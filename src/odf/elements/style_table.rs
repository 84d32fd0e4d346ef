//! Named style records with on-demand cascade resolution.
//!
//! The table is filled in two passes, shared styles (styles.xml) first and
//! then the content part's automatic styles, so a later definition of a
//! name replaces an earlier one. After loading it is only read; each
//! entry memoizes its resolved form in a thread-safe `OnceCell`.

use super::style::{FontFace, Style, StyleFamily};
use super::tag_matcher::{StyleTag, match_style_tag};
use crate::common::Result;
use crate::odf::constants::{ODF_CONTENT, ODF_STYLES};
use crate::odf::core::{Package, XmlDocument, XmlElement};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug)]
struct Entry {
    style: Style,
    resolved: OnceCell<Arc<Style>>,
}

/// Style registry for one document.
#[derive(Debug, Default)]
pub struct StyleTable {
    styles: HashMap<String, Entry>,
    defaults: HashMap<StyleFamily, Style>,
    fonts: HashMap<String, FontFace>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load styles.xml (when present) and then content.xml from a package.
    pub fn load(package: &Package) -> Result<Self> {
        let mut table = Self::new();
        if package.has_entry(ODF_STYLES) {
            table.load_document(&package.read_xml(ODF_STYLES)?);
        }
        table.load_document(&package.read_xml(ODF_CONTENT)?);
        Ok(table)
    }

    /// Register every style and font face declared anywhere in `doc`, in
    /// document order.
    pub fn load_document(&mut self, doc: &XmlDocument) {
        let mut stack = vec![doc.root()];
        while let Some(element) = stack.pop() {
            if self.register(element) {
                // Style definitions do not nest.
                continue;
            }
            let before = stack.len();
            stack.extend(element.child_elements());
            stack[before..].reverse();
        }
        log::debug!(
            "style table: {} styles, {} defaults, {} fonts",
            self.styles.len(),
            self.defaults.len(),
            self.fonts.len()
        );
    }

    /// Register one element if it declares a style or a font face.
    ///
    /// Returns `false` for any other element. Named styles replace an
    /// earlier registration of the same name; default styles are kept per
    /// family.
    pub fn register(&mut self, element: &XmlElement) -> bool {
        let Some(tag) = match_style_tag(element.name()) else {
            return false;
        };
        match tag {
            StyleTag::FontFace => {
                let font = FontFace::from_element(element);
                self.fonts.insert(font.name.clone(), font);
            },
            StyleTag::DefaultStyle => {
                let style = Style::from_element(element);
                match style.family() {
                    Some(family) => {
                        self.defaults.insert(family, style);
                    },
                    None => log::debug!("default style without a known family ignored"),
                }
            },
            StyleTag::Style | StyleTag::PageLayout | StyleTag::MasterPage => {
                let style = Style::from_element(element);
                self.styles.insert(
                    style.name().to_string(),
                    Entry {
                        style,
                        resolved: OnceCell::new(),
                    },
                );
            },
        }
        true
    }

    /// Whether a style of this name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// The style as registered, without inheritance.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name).map(|e| &e.style)
    }

    /// The default style of a family.
    #[inline]
    pub fn default_style(&self, family: StyleFamily) -> Option<&Style> {
        self.defaults.get(&family)
    }

    /// A declared font face.
    #[inline]
    pub fn font(&self, name: &str) -> Option<&FontFace> {
        self.fonts.get(name)
    }

    /// Registered style names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The named style with its parent chain merged in, computed once.
    ///
    /// An unregistered name is `None`. An unregistered parent ends the
    /// chain. A circular chain is cut where it closes: the style met a
    /// second time contributes its own attributes only.
    pub fn resolve(&self, name: &str) -> Option<Arc<Style>> {
        let mut visiting = Vec::new();
        self.resolve_guarded(name, &mut visiting)
    }

    fn resolve_guarded<'a>(&'a self, name: &'a str, visiting: &mut Vec<&'a str>) -> Option<Arc<Style>> {
        let entry = self.styles.get(name)?;
        if let Some(resolved) = entry.resolved.get() {
            return Some(Arc::clone(resolved));
        }
        if visiting.contains(&name) {
            log::warn!("circular parent chain through style '{}', cutting it here", name);
            return Some(Arc::new(entry.style.clone()));
        }

        visiting.push(name);
        let resolved = match entry.style.parent_name() {
            Some(parent) => match self.resolve_guarded(parent, visiting) {
                Some(parent) => entry.style.merged_with_parent(&parent),
                None => entry.style.clone(),
            },
            None => entry.style.clone(),
        };
        visiting.pop();

        Some(Arc::clone(entry.resolved.get_or_init(|| Arc::new(resolved))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::core::fixture::PackageBuilder;
    use crate::odf::elements::style::{BlockKey, TextKey};

    fn table(styles: &str) -> StyleTable {
        let xml = format!(
            r#"<office:document-styles><office:styles>{}</office:styles></office:document-styles>"#,
            styles
        );
        let mut table = StyleTable::new();
        table.load_document(&XmlDocument::from_bytes(xml.as_bytes()).unwrap());
        table
    }

    #[test]
    fn test_merge_precedence() {
        let t = table(concat!(
            r#"<style:style style:name="P" style:family="paragraph">"#,
            r#"<style:paragraph-properties fo:margin-left="1cm" fo:margin-right="2cm"/>"#,
            r#"<style:text-properties fo:font-size="14pt"/></style:style>"#,
            r#"<style:style style:name="C" style:family="paragraph" style:parent-style-name="P">"#,
            r#"<style:paragraph-properties fo:margin-left="3cm"/></style:style>"#,
        ));
        let c = t.resolve("C").unwrap();
        assert!((c.block_mm(BlockKey::Left).unwrap() - 30.0).abs() < 1e-9);
        assert!((c.block_mm(BlockKey::Right).unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(c.font_size(), "14pt");
        // The registered record itself is untouched.
        assert!(t.get("C").unwrap().block(BlockKey::Right).is_none());
    }

    #[test]
    fn test_memoized() {
        let t = table(r#"<style:style style:name="A"><style:text-properties fo:font-weight="bold"/></style:style>"#);
        let first = t.resolve("A").unwrap();
        let second = t.resolve("A").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unregistered() {
        let t = table(r#"<style:style style:name="A" style:parent-style-name="Missing"><style:text-properties fo:font-weight="bold"/></style:style>"#);
        assert!(t.resolve("Nope").is_none());
        assert!(t.resolve("A").unwrap().is_bold());
    }

    #[test]
    fn test_cycle_is_cut() {
        let t = table(concat!(
            r#"<style:style style:name="A" style:parent-style-name="B"><style:text-properties fo:font-size="9pt"/></style:style>"#,
            r#"<style:style style:name="B" style:parent-style-name="A"><style:text-properties fo:font-weight="bold"/></style:style>"#,
        ));
        let a = t.resolve("A").unwrap();
        assert_eq!(a.font_size(), "9pt");
        assert!(a.is_bold());
        let b = t.resolve("B").unwrap();
        assert!(b.is_bold());
    }

    #[test]
    fn test_last_writer_wins_across_parts() {
        let package = PackageBuilder::odt()
            .styles(r#"<style:style style:name="X" style:family="text"><style:text-properties fo:font-size="20pt"/></style:style>"#)
            .content(
                r#"<style:style style:name="X" style:family="text"><style:text-properties fo:font-size="8pt"/></style:style>"#,
                "",
            )
            .package();
        let t = StyleTable::load(&package).unwrap();
        assert_eq!(t.resolve("X").unwrap().font_size(), "8pt");
    }

    #[test]
    fn test_defaults_and_fonts() {
        let package = PackageBuilder::odt()
            .styles(concat!(
                r#"<style:default-style style:family="paragraph"><style:text-properties fo:language="en" fo:country="US"/></style:default-style>"#,
                r#"<style:style style:name="T" style:family="text"><style:text-properties style:font-name="Liberation Serif"/></style:style>"#,
            ))
            .package();
        let t = StyleTable::load(&package).unwrap();
        let default = t.default_style(StyleFamily::Paragraph).unwrap();
        assert_eq!(default.text(TextKey::Language).map(|v| v.raw()), Some("en"));
        let font = t.resolve("T").unwrap().font(&t).cloned().unwrap();
        assert_eq!(font.generic_family, "roman");
        assert_eq!(font.family, "'Liberation Serif'");
    }
}
