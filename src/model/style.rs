//! Style identity carried by document nodes.
//!
//! Nodes only know the *name* of their style; attribute values come from
//! the [`StyleTable`] when a writer asks for them.

use crate::odf::elements::{Style, StyleTable};
use std::sync::Arc;

/// Whether a style applies to a block or to inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Block,
    Text,
}

/// A node's style: its kind and, once parsed, a style name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleRef {
    kind: StyleKind,
    name: Option<String>,
}

impl StyleRef {
    /// An unnamed block style.
    #[inline]
    pub fn block() -> Self {
        Self {
            kind: StyleKind::Block,
            name: None,
        }
    }

    /// An unnamed text style.
    #[inline]
    pub fn text() -> Self {
        Self {
            kind: StyleKind::Text,
            name: None,
        }
    }

    /// Builder: set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> StyleKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Take the first non-empty name walking `ancestors` from innermost
    /// (last) to outermost. Leaves the name untouched if there is none.
    pub fn inherit_from(&mut self, ancestors: &[Option<&str>]) {
        if let Some(name) = ancestors
            .iter()
            .rev()
            .flatten()
            .find(|name| !name.is_empty())
        {
            self.name = Some((*name).to_string());
        }
    }

    /// Look the style up, cascade applied. Unnamed or unregistered styles
    /// resolve to `None`.
    pub fn resolve(&self, table: &StyleTable) -> Option<Arc<Style>> {
        self.name.as_deref().and_then(|name| table.resolve(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherit_innermost_first() {
        let mut style = StyleRef::text();
        style.inherit_from(&[Some("Outer"), None, Some("Inner"), Some("")]);
        assert_eq!(style.name(), Some("Inner"));
        assert_eq!(style.kind(), StyleKind::Text);
    }

    #[test]
    fn test_inherit_nothing() {
        let mut style = StyleRef::block().with_name("Kept");
        style.inherit_from(&[None, Some("")]);
        assert_eq!(style.name(), Some("Kept"));

        let mut style = StyleRef::block();
        style.inherit_from(&[]);
        assert_eq!(style.name(), None);
    }
}
