//! Mixed-content XML tree for ODF parts.
//!
//! The structural parser needs character data and child elements in their
//! original interleaved order (`text:p` is mixed content), so parts are read
//! into a small owned tree rather than a flat event stream. The tree is built
//! with a single quick-xml pass and an explicit element stack.

use crate::common::xml::{resolve_entity, unescape_xml};
use crate::common::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A child of an element: either a nested element or a run of character data.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    /// The element, if this node is one.
    #[inline]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        }
    }

    /// The character data, if this node is text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlNode::Text(t) => Some(t),
            XmlNode::Element(_) => None,
        }
    }
}

/// An element with its qualified name, attributes in document order, and
/// mixed children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    ordinal: usize,
}

impl XmlElement {
    /// Create a detached element. Used when building trees by hand.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            ordinal: 0,
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child element (builder style).
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Append character data (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Qualified name, e.g. `text:p`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix of the qualified name, empty when unprefixed.
    #[inline]
    pub fn prefix(&self) -> &str {
        match memchr::memchr(b':', self.name.as_bytes()) {
            Some(pos) => &self.name[..pos],
            None => "",
        }
    }

    /// Local part of the qualified name.
    #[inline]
    pub fn local_name(&self) -> &str {
        match memchr::memchr(b':', self.name.as_bytes()) {
            Some(pos) => &self.name[pos + 1..],
            None => &self.name,
        }
    }

    /// Position of the element in document order (root is 0).
    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Look up an attribute value by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Mixed children in document order.
    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Element children only.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First element child with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.name == name)
    }

    /// All descendants (excluding `self`) with the given qualified name, in
    /// document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        let mut stack: Vec<&XmlElement> = self.child_elements().collect();
        stack.reverse();
        while let Some(element) = stack.pop() {
            if element.name == name {
                found.push(element);
            }
            let before = stack.len();
            stack.extend(element.child_elements());
            stack[before..].reverse();
        }
        found
    }

    /// Concatenated character data of this element and all descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }
}

/// A parsed XML part.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parse a complete XML document.
    ///
    /// Whitespace is preserved exactly; entity and character references are
    /// resolved into the surrounding text. Comments, processing instructions
    /// and the declaration are discarded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut ordinal = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let element = Self::open_element(e, ordinal)?;
                    ordinal += 1;
                    stack.push(element);
                },
                Ok(Event::Empty(ref e)) => {
                    let element = Self::open_element(e, ordinal)?;
                    ordinal += 1;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Xml("Unbalanced end tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Ok(Event::Text(ref e)) => {
                    Self::push_text(&mut stack, &String::from_utf8_lossy(e.as_ref()));
                },
                Ok(Event::CData(e)) => {
                    Self::push_text(&mut stack, &String::from_utf8_lossy(&e.into_inner()));
                },
                Ok(Event::GeneralRef(ref e)) => {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    match resolve_entity(&entity) {
                        Some(resolved) => Self::push_text(&mut stack, &resolved),
                        None => Self::push_text(&mut stack, &format!("&{};", entity)),
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Parse error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::Xml(format!("Unclosed element <{}>", stack[stack.len() - 1].name)));
        }
        root.map(|root| Self { root })
            .ok_or_else(|| Error::Xml("Document has no root element".to_string()))
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    fn open_element(e: &BytesStart, ordinal: usize) -> Result<XmlElement> {
        let name = String::from_utf8(e.name().as_ref().to_vec())?;
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = String::from_utf8(attr.key.as_ref().to_vec())?;
            let raw = String::from_utf8_lossy(&attr.value);
            attributes.push((key, unescape_xml(&raw)));
        }
        Ok(XmlElement {
            name,
            attributes,
            children: Vec::new(),
            ordinal,
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(XmlNode::Element(element)),
            None if root.is_none() => *root = Some(element),
            None => return Err(Error::Xml("Multiple root elements".to_string())),
        }
        Ok(())
    }

    fn push_text(stack: &mut [XmlElement], text: &str) {
        // Text outside the root (whitespace around it) has nowhere to go.
        let Some(parent) = stack.last_mut() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = parent.children.last_mut() {
            last.push_str(text);
        } else {
            parent.children.push(XmlNode::Text(text.to_string()));
        }
    }
}
