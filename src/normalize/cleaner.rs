//! Tree-level cleaning: runs the normalizer over every paragraph and
//! prunes what ends up empty.
//!
//! Only paragraphs prune themselves. Containers (chapters and side bars)
//! keep their place even when every child is dropped.

use super::config::NormalizeOptions;
use super::state::NormalizerState;
use crate::common::{Error, Result};
use crate::model::{Chapter, Div, DivKind, Node, Span, SpanKind};

/// Applies the text normalizer across a document tree.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    options: NormalizeOptions,
}

impl Cleaner {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Clean a list of nodes, dropping the ones that clean to nothing.
    pub fn clean_all(&self, nodes: Vec<Node>) -> Result<Vec<Node>> {
        let mut kept = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(node) = self.clean_section(node)? {
                kept.push(node);
            }
        }
        Ok(kept)
    }

    /// Clean one node. `None` means the node is dropped.
    ///
    /// A bare text run standing where a block is expected must clean into
    /// a single span; anything more is a [`Error::Consistency`] error.
    pub fn clean_section(&self, node: Node) -> Result<Option<Node>> {
        match node {
            Node::Div(div) => self.clean_div(div).map(|div| div.map(Node::Div)),
            Node::Span(span) if matches!(span.kind, SpanKind::Text(_)) => {
                let source = span.source.clone();
                let mut kids = self.clean_text(span);
                match kids.len() {
                    0 => Ok(None),
                    1 => Ok(kids.pop().map(Node::Span)),
                    n => Err(Error::Consistency(format!(
                        "bare text{} was cleaned into {} parts",
                        source.map(|s| format!(" at {}", s)).unwrap_or_default(),
                        n
                    ))),
                }
            },
            Node::Span(span) => Ok(Some(Node::Span(span))),
        }
    }

    fn clean_div(&self, div: Div) -> Result<Option<Div>> {
        let Div { kind, style, source } = div;
        let kind = match kind {
            DivKind::Paragraph(spans) => {
                return Ok(self.clean_paragraph(Div {
                    kind: DivKind::Paragraph(spans),
                    style,
                    source,
                }));
            },
            DivKind::SideBar(children) => DivKind::SideBar(self.clean_all(children)?),
            DivKind::Chapter(chapter) => DivKind::Chapter(Chapter {
                children: self.clean_all(chapter.children)?,
                ..chapter
            }),
            other => other,
        };
        Ok(Some(Div { kind, style, source }))
    }

    /// Normalize a paragraph's text.
    ///
    /// Returns `None` when nothing visible is left, or a separator line
    /// when all that is left is the separator character. Non-paragraph
    /// divs are returned unchanged.
    pub fn clean_paragraph(&self, div: Div) -> Option<Div> {
        let Div { kind, style, source } = div;
        let spans = match kind {
            DivKind::Paragraph(spans) => spans,
            other => return Some(Div { kind: other, style, source }),
        };

        let mut state =
            NormalizerState::new().with_collapse_whitespace(self.options.collapse_whitespace);
        let mut check_tab = self.options.expect_leading_tab;
        for span in spans {
            match span.kind {
                SpanKind::Text(text) => {
                    if check_tab {
                        check_tab = false;
                        if !text.is_empty() && !text.starts_with('\t') {
                            log::debug!("paragraph does not start with a tab: {:?}", text);
                        }
                    }
                    state.feed_text(&text, &span.style, span.source.as_ref());
                },
                kind => state.pass_through(Span {
                    kind,
                    style: span.style,
                    source: span.source,
                }),
            }
        }

        self.finish_paragraph(Div {
            kind: DivKind::Paragraph(state.finish()),
            style,
            source,
        })
    }

    fn finish_paragraph(&self, para: Div) -> Option<Div> {
        let has_image = para
            .spans()
            .is_some_and(|spans| spans.iter().any(|s| matches!(s.kind, SpanKind::Image(_))));
        if has_image {
            return Some(para);
        }

        let text = para.text();
        let contents = text.trim();
        if contents.is_empty() {
            return None;
        }
        if contents.chars().all(|c| c == self.options.separator_char) {
            log::debug!("turned [{}] into a separator line", contents);
            return Some(Div::separator_line(para.source));
        }
        Some(para)
    }

    /// Normalize a single text run on its own.
    pub fn clean_text(&self, span: Span) -> Vec<Span> {
        let mut state =
            NormalizerState::new().with_collapse_whitespace(self.options.collapse_whitespace);
        if let SpanKind::Text(text) = &span.kind {
            state.feed_text(text, &span.style, span.source.as_ref());
        }
        state.finish()
    }
}
