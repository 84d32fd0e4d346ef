//! Block and inline nodes of the generic document tree.

use super::media::Image;
use super::style::StyleRef;
use std::fmt;

/// Where a node came from: the originating element's tag and its position
/// in document order. Used for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    tag: String,
    ordinal: usize,
}

impl Source {
    pub fn new(tag: impl Into<String>, ordinal: usize) -> Self {
        Self {
            tag: tag.into(),
            ordinal,
        }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> #{}", self.tag, self.ordinal)
    }
}

/// Either a block or an inline node.
///
/// Containers hold `Node`s because a frame holds its image directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Div(Div),
    Span(Span),
}

impl Node {
    #[inline]
    pub fn as_div(&self) -> Option<&Div> {
        match self {
            Node::Div(d) => Some(d),
            Node::Span(_) => None,
        }
    }

    #[inline]
    pub fn as_span(&self) -> Option<&Span> {
        match self {
            Node::Span(s) => Some(s),
            Node::Div(_) => None,
        }
    }

    #[inline]
    pub fn is_div(&self) -> bool {
        matches!(self, Node::Div(_))
    }

    /// Visible text of the node and everything below it.
    pub fn text(&self) -> String {
        match self {
            Node::Div(d) => d.text(),
            Node::Span(s) => s.text().to_string(),
        }
    }

    pub fn source(&self) -> Option<&Source> {
        match self {
            Node::Div(d) => d.source.as_ref(),
            Node::Span(s) => s.source.as_ref(),
        }
    }
}

impl From<Div> for Node {
    fn from(div: Div) -> Self {
        Node::Div(div)
    }
}

impl From<Span> for Node {
    fn from(span: Span) -> Self {
        Node::Span(span)
    }
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq)]
pub struct Div {
    pub kind: DivKind,
    pub style: StyleRef,
    pub source: Option<Source>,
}

/// The block node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum DivKind {
    /// Ordered inline content
    Paragraph(Vec<Span>),
    /// A frame or other media container
    SideBar(Vec<Node>),
    /// A scene break
    SeparatorLine,
    Table(Table),
    TableRow(TableRow),
    Chapter(Chapter),
}

/// Table body with an optional header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub header: Option<TableRow>,
    pub rows: Vec<TableRow>,
}

/// One row; each cell is a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<Div>,
}

/// A numbered chapter and its content.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub index: usize,
    pub name: String,
    pub children: Vec<Node>,
}

impl Div {
    /// Empty paragraph.
    pub fn paragraph(style: StyleRef, source: Option<Source>) -> Self {
        Self {
            kind: DivKind::Paragraph(Vec::new()),
            style,
            source,
        }
    }

    pub fn side_bar(children: Vec<Node>, style: StyleRef, source: Option<Source>) -> Self {
        Self {
            kind: DivKind::SideBar(children),
            style,
            source,
        }
    }

    pub fn separator_line(source: Option<Source>) -> Self {
        Self {
            kind: DivKind::SeparatorLine,
            style: StyleRef::block(),
            source,
        }
    }

    pub fn chapter(index: usize, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: DivKind::Chapter(Chapter {
                index,
                name: name.into(),
                children,
            }),
            style: StyleRef::block(),
            source: None,
        }
    }

    /// Builder: append a span to a paragraph. Other kinds ignore it.
    pub fn with_span(mut self, span: Span) -> Self {
        if let DivKind::Paragraph(spans) = &mut self.kind {
            spans.push(span);
        }
        self
    }

    /// Spans, if this is a paragraph.
    #[inline]
    pub fn spans(&self) -> Option<&[Span]> {
        match &self.kind {
            DivKind::Paragraph(spans) => Some(spans),
            _ => None,
        }
    }

    /// Children, if this is a side bar or chapter.
    #[inline]
    pub fn children(&self) -> Option<&[Node]> {
        match &self.kind {
            DivKind::SideBar(children) => Some(children),
            DivKind::Chapter(chapter) => Some(&chapter.children),
            _ => None,
        }
    }

    #[inline]
    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, DivKind::Paragraph(_))
    }

    #[inline]
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, DivKind::SeparatorLine)
    }

    #[inline]
    pub fn as_chapter(&self) -> Option<&Chapter> {
        match &self.kind {
            DivKind::Chapter(chapter) => Some(chapter),
            _ => None,
        }
    }

    /// Visible text: concatenated text of all spans below this block.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            DivKind::Paragraph(spans) => spans.iter().for_each(|s| out.push_str(s.text())),
            DivKind::SideBar(children) => children.iter().for_each(|c| match c {
                Node::Div(d) => d.collect_text(out),
                Node::Span(s) => out.push_str(s.text()),
            }),
            DivKind::Chapter(chapter) => chapter.children.iter().for_each(|c| match c {
                Node::Div(d) => d.collect_text(out),
                Node::Span(s) => out.push_str(s.text()),
            }),
            DivKind::SeparatorLine => {},
            DivKind::Table(table) => {
                for row in table.header.iter().chain(&table.rows) {
                    row.cells.iter().for_each(|c| c.collect_text(out));
                }
            },
            DivKind::TableRow(row) => row.cells.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// Inline node.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub kind: SpanKind,
    pub style: StyleRef,
    pub source: Option<Source>,
}

/// The inline node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanKind {
    Text(String),
    Special(SpecialCharacter),
    /// The text originally found where a repair was made. Renders as nothing.
    Correction(String),
    Image(Image),
}

/// A text unit with a ready-made escaped rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCharacter {
    pub text: String,
    /// HTML rendering, e.g. `&ldquo;`
    pub html: String,
    /// Whether the unit stands for deliberate whitespace (a tab)
    pub is_whitespace: bool,
}

impl Span {
    pub fn text_run(text: impl Into<String>, style: StyleRef, source: Option<Source>) -> Self {
        Self {
            kind: SpanKind::Text(text.into()),
            style,
            source,
        }
    }

    pub fn special(
        text: impl Into<String>,
        html: impl Into<String>,
        is_whitespace: bool,
        style: StyleRef,
        source: Option<Source>,
    ) -> Self {
        Self {
            kind: SpanKind::Special(SpecialCharacter {
                text: text.into(),
                html: html.into(),
                is_whitespace,
            }),
            style,
            source,
        }
    }

    pub fn correction(original: impl Into<String>, style: StyleRef, source: Option<Source>) -> Self {
        Self {
            kind: SpanKind::Correction(original.into()),
            style,
            source,
        }
    }

    pub fn image(image: Image, style: StyleRef, source: Option<Source>) -> Self {
        Self {
            kind: SpanKind::Image(image),
            style,
            source,
        }
    }

    /// Renderable text. Corrections and images have none.
    pub fn text(&self) -> &str {
        match &self.kind {
            SpanKind::Text(t) => t,
            SpanKind::Special(s) => &s.text,
            SpanKind::Correction(_) | SpanKind::Image(_) => "",
        }
    }

    #[inline]
    pub fn is_correction(&self) -> bool {
        matches!(self.kind, SpanKind::Correction(_))
    }

    #[inline]
    pub fn as_special(&self) -> Option<&SpecialCharacter> {
        match &self.kind {
            SpanKind::Special(s) => Some(s),
            _ => None,
        }
    }
}
