//! Structural conversion of `office:text` content into document nodes.
//!
//! Each element is classified once by [`match_tag`] and handled by exactly
//! one arm; [`TagKind::Unknown`] is the only way out for markup the model
//! cannot represent. An ancestor chain of style names (innermost last) is
//! threaded through the recursion so every node can take the closest
//! non-empty style name above it.

use crate::common::{Error, Result};
use crate::model::{Div, Image, Node, Source, Span, StyleRef};
use crate::odf::core::{Package, XmlDocument, XmlElement, XmlNode};
use crate::odf::elements::{StyleTable, TagKind, match_tag};
use std::sync::Arc;

/// Attribute naming a content element's style.
const STYLE_NAME_ATTR: &str = "text:style-name";
/// Attribute naming a frame's graphic style.
const FRAME_STYLE_ATTR: &str = "draw:style-name";
/// Attribute carrying an image's package path.
const HREF_ATTR: &str = "xlink:href";

/// Result of parsing one element: zero, one, or several nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Empty,
    Single(Node),
    Multiple(Vec<Node>),
}

impl Parsed {
    /// Flatten into a node list.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Parsed::Empty => Vec::new(),
            Parsed::Single(node) => vec![node],
            Parsed::Multiple(nodes) => nodes,
        }
    }
}

/// Converts content elements into document nodes.
pub struct TreeParser<'a> {
    styles: &'a StyleTable,
    package: Arc<Package>,
}

impl<'a> TreeParser<'a> {
    pub fn new(styles: &'a StyleTable, package: Arc<Package>) -> Self {
        Self { styles, package }
    }

    /// Walk every `office:text` section of a content document.
    ///
    /// Element children in the `text` and `draw` namespaces are parsed;
    /// anything else at this level is reported and skipped.
    pub fn convert(&self, content: &XmlDocument) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut sections = content.root().descendants_named("office:text");
        if content.root().name() == "office:text" {
            sections.insert(0, content.root());
        }
        for section in sections {
            for child in section.child_elements() {
                match child.prefix() {
                    "text" | "draw" => nodes.extend(self.parse(child, &[])?.into_nodes()),
                    _ => log::warn!("skipping top-level element <{}>", child.name()),
                }
            }
        }
        Ok(nodes)
    }

    /// Parse one element under the given ancestor style chain.
    pub fn parse(&self, element: &XmlElement, ancestors: &[Option<&str>]) -> Result<Parsed> {
        let tag = match_tag(element.name());
        log::trace!("parsing <{}> as {:?}", element.name(), tag);

        let mut chain: Vec<Option<&str>> = ancestors.to_vec();
        chain.push(self.registered_style(element, STYLE_NAME_ATTR));

        match tag {
            TagKind::ListContainer => self.parse_list(element, &chain),
            TagKind::Paragraph => self.parse_paragraph(element, &chain),
            TagKind::Span => self.parse_span(element, &chain).map(Parsed::Multiple),
            TagKind::Tab => Ok(Parsed::Single(
                Span::text_run("\t", text_style(&chain), source_of(element)).into(),
            )),
            TagKind::WhitespaceSpan => Ok(Parsed::Single(
                Span::text_run("", text_style(&chain), source_of(element)).into(),
            )),
            TagKind::LineBreak | TagKind::Control => Ok(Parsed::Single(
                Div::paragraph(block_style(&chain), source_of(element)).into(),
            )),
            TagKind::Data => {
                log::warn!("unexpected data element <{}> at top level, dropped", element.name());
                Ok(Parsed::Empty)
            },
            TagKind::MediaContainer => self.parse_frame(element, ancestors),
            TagKind::Image => self.parse_image(element, ancestors),
            TagKind::Unknown => Err(Error::UnknownElement(element.name().to_string())),
        }
    }

    /// The element's style name, if the table knows it.
    fn registered_style<'e>(&self, element: &'e XmlElement, attr: &str) -> Option<&'e str> {
        element
            .attribute(attr)
            .filter(|name| self.styles.contains(name))
    }

    fn parse_list(&self, element: &XmlElement, chain: &[Option<&str>]) -> Result<Parsed> {
        let mut results = Vec::new();
        for child in element.children() {
            match child {
                XmlNode::Element(e) => results.push(self.parse(e, chain)?),
                XmlNode::Text(t) if t.trim().is_empty() => {},
                XmlNode::Text(_) => {
                    return Err(Error::Structure(format!(
                        "character data inside <{}>",
                        element.name()
                    )));
                },
            }
        }
        if results.len() != 1 {
            return Err(Error::Structure(format!(
                "<{}> must hold exactly one element, found {}",
                element.name(),
                results.len()
            )));
        }
        Ok(results.remove(0))
    }

    /// A data wrapper stands for its first child.
    fn unwrap_data<'e>(child: &'e XmlNode) -> Option<&'e XmlNode> {
        match child {
            XmlNode::Element(e) if match_tag(e.name()).is_data() => {
                let first = e.children().first();
                if first.is_none() {
                    log::debug!("empty <{}> skipped", e.name());
                }
                first
            },
            other => Some(other),
        }
    }

    fn parse_paragraph(&self, element: &XmlElement, chain: &[Option<&str>]) -> Result<Parsed> {
        let style = block_style(chain);
        let source = source_of(element);
        let mut out: Vec<Node> = Vec::new();
        let mut current = Div::paragraph(style.clone(), source.clone());

        for child in element.children() {
            let Some(child) = Self::unwrap_data(child) else {
                continue;
            };
            match child {
                XmlNode::Element(e) => {
                    for node in self.parse(e, chain)?.into_nodes() {
                        match node {
                            Node::Span(span) => current = current.with_span(span),
                            Node::Div(div) => {
                                // Block content inside a paragraph splits it.
                                let finished = std::mem::replace(
                                    &mut current,
                                    Div::paragraph(style.clone(), source.clone()),
                                );
                                out.push(finished.into());
                                out.push(div.into());
                            },
                        }
                    }
                },
                XmlNode::Text(t) => {
                    current = current.with_span(Span::text_run(t.as_str(), text_style(chain), source.clone()));
                },
            }
        }
        out.push(current.into());
        Ok(Parsed::Multiple(out))
    }

    fn parse_span(&self, element: &XmlElement, chain: &[Option<&str>]) -> Result<Vec<Node>> {
        let source = source_of(element);
        let mut out = Vec::new();
        for child in element.children() {
            let Some(child) = Self::unwrap_data(child) else {
                continue;
            };
            match child {
                XmlNode::Element(e) => out.extend(self.parse(e, chain)?.into_nodes()),
                XmlNode::Text(t) => {
                    out.push(Span::text_run(t.as_str(), text_style(chain), source.clone()).into())
                },
            }
        }
        Ok(out)
    }

    /// A frame becomes a side bar.
    ///
    /// The frame's own style goes on a separate chain that only the side
    /// bar's block style is taken from; children see the ancestors alone.
    fn parse_frame(&self, element: &XmlElement, ancestors: &[Option<&str>]) -> Result<Parsed> {
        let mut frame_chain: Vec<Option<&str>> = ancestors.to_vec();
        frame_chain.push(
            self.registered_style(element, FRAME_STYLE_ATTR)
                .or_else(|| self.registered_style(element, STYLE_NAME_ATTR)),
        );

        let mut children = Vec::new();
        for child in element.children() {
            match child {
                XmlNode::Element(e) => children.extend(self.parse(e, ancestors)?.into_nodes()),
                XmlNode::Text(t) if t.trim().is_empty() => {},
                XmlNode::Text(_) => {
                    return Err(Error::Structure(format!(
                        "character data inside <{}>",
                        element.name()
                    )));
                },
            }
        }
        let side_bar = Div::side_bar(children, block_style(&frame_chain), source_of(element));
        Ok(Parsed::Single(side_bar.into()))
    }

    /// An image is a media block: its style is a block style taken from
    /// the ancestors, never from its own text style.
    fn parse_image(&self, element: &XmlElement, ancestors: &[Option<&str>]) -> Result<Parsed> {
        let href = element.attribute(HREF_ATTR).ok_or_else(|| Error::MissingAttribute {
            element: element.name().to_string(),
            attribute: HREF_ATTR.to_string(),
        })?;
        let image = Image::new(href, Arc::clone(&self.package))?;
        Ok(Parsed::Single(
            Span::image(image, block_style(ancestors), source_of(element)).into(),
        ))
    }
}

fn source_of(element: &XmlElement) -> Option<Source> {
    Some(Source::new(element.name(), element.ordinal()))
}

fn block_style(chain: &[Option<&str>]) -> StyleRef {
    let mut style = StyleRef::block();
    style.inherit_from(chain);
    style
}

fn text_style(chain: &[Option<&str>]) -> StyleRef {
    let mut style = StyleRef::text();
    style.inherit_from(chain);
    style
}
