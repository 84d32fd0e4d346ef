//! Grouping a flat node list into chapters.
//!
//! A manuscript marks chapter starts with a paragraph that reads just
//! `Chapter 7`. Everything up to the next marker belongs to that chapter;
//! the marker paragraph itself is consumed.

use crate::common::{Error, Result};
use crate::model::{Chapter, Div, DivKind, Node};
use crate::normalize::DEFAULT_CHAPTER_PATTERN;
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_CHAPTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_CHAPTER_PATTERN).unwrap());

/// Nodes split into front matter and chapters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chapters {
    /// Nodes before the first chapter marker (title page and the like)
    pub front_matter: Vec<Node>,
    /// `Chapter` divs, in order
    pub chapters: Vec<Node>,
}

impl Chapters {
    /// Front matter followed by the chapters.
    pub fn into_nodes(self) -> Vec<Node> {
        let mut nodes = self.front_matter;
        nodes.extend(self.chapters);
        nodes
    }
}

/// Splits nodes at chapter marker paragraphs.
#[derive(Debug, Clone)]
pub struct ChapterSplitter {
    pattern: Regex,
}

impl Default for ChapterSplitter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_CHAPTER_RE.clone(),
        }
    }
}

impl ChapterSplitter {
    /// Use a custom marker pattern. The first capture group, if any, names
    /// the chapter.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// The chapter name a paragraph text stands for, if it is a marker.
    pub fn marker_name(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        Some(match caps.get(1) {
            Some(number) => format!("Chapter {}", number.as_str().trim()),
            None => caps.get(0).map_or("", |m| m.as_str()).trim().to_string(),
        })
    }

    /// Group `nodes` into chapters.
    ///
    /// Every marker advances the index, so a chapter's index is its marker's
    /// position among all markers. A marker with nothing before the next
    /// marker yields no chapter. Input that already holds chapters is
    /// rejected.
    pub fn split(&self, nodes: Vec<Node>) -> Result<Chapters> {
        let mut out = Chapters::default();
        let mut open: Option<(usize, String, Vec<Node>)> = None;
        let mut index = 0;

        for node in nodes {
            if let Node::Div(div) = &node {
                if div.as_chapter().is_some() {
                    return Err(Error::Structure(
                        "chapter found in a document that is being split into chapters".to_string(),
                    ));
                }
                if let Some(name) = self.marker(div) {
                    log::debug!("chapter marker: {}", name);
                    if let Some((index, name, children)) = open.take() {
                        push_chapter(&mut out.chapters, index, name, children);
                    }
                    index += 1;
                    open = Some((index, name, Vec::new()));
                    continue;
                }
            }
            match &mut open {
                Some((_, _, children)) => children.push(node),
                None => out.front_matter.push(node),
            }
        }
        if let Some((index, name, children)) = open {
            push_chapter(&mut out.chapters, index, name, children);
        }
        Ok(out)
    }

    fn marker(&self, div: &Div) -> Option<String> {
        if !div.is_paragraph() {
            return None;
        }
        self.marker_name(&div.text())
    }
}

fn push_chapter(chapters: &mut Vec<Node>, index: usize, name: String, children: Vec<Node>) {
    if children.is_empty() {
        log::debug!("{} has no content, skipped", name);
        return;
    }
    chapters.push(Div::chapter(index, name, children).into());
}

fn as_chapter_mut(node: &mut Node) -> Option<&mut Chapter> {
    match node {
        Node::Div(Div {
            kind: DivKind::Chapter(chapter),
            ..
        }) => Some(chapter),
        _ => None,
    }
}

/// Number chapters with one running index starting at `start`.
///
/// Each chapter takes the next index, then its directly nested chapters
/// take the ones after it. Returns the next free index.
pub fn renumber(nodes: &mut [Node], start: usize) -> usize {
    let mut next = start;
    for chapter in nodes.iter_mut().filter_map(as_chapter_mut) {
        chapter.index = next;
        next += 1;
        for inner in chapter.children.iter_mut().filter_map(as_chapter_mut) {
            inner.index = next;
            next += 1;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Span, StyleRef};

    fn para(text: &str) -> Node {
        Div::paragraph(StyleRef::block(), None)
            .with_span(Span::text_run(text, StyleRef::text(), None))
            .into()
    }

    fn chapter(node: &Node) -> &crate::model::Chapter {
        node.as_div().and_then(Div::as_chapter).unwrap()
    }

    #[test]
    fn test_marker_name() {
        let splitter = ChapterSplitter::default();
        assert_eq!(splitter.marker_name("\tchapter  12 "), Some("Chapter 12".to_string()));
        assert_eq!(splitter.marker_name("Chapter 12 begins"), None);
        assert_eq!(splitter.marker_name("Chapter one"), None);

        let custom = ChapterSplitter::new(r"^Part [IVX]+$").unwrap();
        assert_eq!(custom.marker_name("Part IV"), Some("Part IV".to_string()));
    }

    #[test]
    fn test_split() {
        let nodes = vec![
            para("My Book"),
            para("Chapter 1"),
            para("It began."),
            para("It went on."),
            para("Chapter 2"),
            para("Chapter 3"),
            para("The end."),
        ];
        let split = ChapterSplitter::default().split(nodes).unwrap();
        assert_eq!(split.front_matter.len(), 1);
        assert_eq!(split.front_matter[0].text(), "My Book");
        assert_eq!(split.chapters.len(), 2);

        let first = chapter(&split.chapters[0]);
        assert_eq!((first.index, first.name.as_str()), (1, "Chapter 1"));
        assert_eq!(first.children.len(), 2);
        // The empty "Chapter 2" still used up index 2
        let second = chapter(&split.chapters[1]);
        assert_eq!((second.index, second.name.as_str()), (3, "Chapter 3"));
        assert_eq!(split.into_nodes().len(), 3);
    }

    #[test]
    fn test_split_rejects_chapters() {
        let nodes = vec![Div::chapter(1, "Chapter 1", vec![]).into()];
        let err = ChapterSplitter::default().split(nodes).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_bad_pattern() {
        assert!(ChapterSplitter::new("(unclosed").is_err());
    }

    #[test]
    fn test_renumber_running_index() {
        let inner = vec![
            Div::chapter(7, "a", vec![]).into(),
            para("between"),
            Div::chapter(9, "b", vec![]).into(),
        ];
        let mut nodes = vec![
            para("front"),
            Div::chapter(5, "One", inner).into(),
            Div::chapter(5, "Two", vec![]).into(),
        ];
        assert_eq!(renumber(&mut nodes, 1), 5);
        let one = chapter(&nodes[1]);
        assert_eq!(one.index, 1);
        assert_eq!(chapter(&one.children[0]).index, 2);
        assert_eq!(chapter(&one.children[2]).index, 3);
        assert_eq!(chapter(&nodes[2]).index, 4);

        // Continues from where a previous batch stopped
        assert_eq!(renumber(&mut nodes[2..], 10), 11);
        assert_eq!(chapter(&nodes[2]).index, 10);
    }
}
