//! Configuration types for text normalization and document conversion.
//!
//! Both option structs follow the same builder pattern: start from
//! `new()` (the defaults) and chain `with_*` calls.

use serde::{Deserialize, Serialize};

/// Pattern marking a chapter heading paragraph, e.g. `Chapter 12`.
pub const DEFAULT_CHAPTER_PATTERN: &str = r"(?i)^\s*Chapter\s+(\d+)\s*$";

/// Options controlling the text normalizer.
///
/// # Examples
///
/// ```rust
/// use quire::normalize::NormalizeOptions;
///
/// let options = NormalizeOptions::new()
///     .with_expect_leading_tab(false)
///     .with_separator_char('#');
/// assert_eq!(options.separator_char, '#');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Report paragraphs whose first text run does not start with a tab
    pub expect_leading_tab: bool,
    /// Character whose repetition alone makes a separator line
    pub separator_char: char,
    /// Collapse whitespace runs into one plain space
    pub collapse_whitespace: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            expect_leading_tab: true,
            separator_char: '*',
            collapse_whitespace: true,
        }
    }
}

impl NormalizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a missing leading tab is reported.
    ///
    /// Manuscripts conventionally indent every body paragraph with a tab;
    /// paragraphs that don't are logged at debug level.
    #[inline]
    pub fn with_expect_leading_tab(mut self, expect: bool) -> Self {
        self.expect_leading_tab = expect;
        self
    }

    /// Set the separator character.
    #[inline]
    pub fn with_separator_char(mut self, ch: char) -> Self {
        self.separator_char = ch;
        self
    }

    /// Set whether whitespace runs are collapsed.
    ///
    /// When disabled, whitespace characters are kept verbatim.
    #[inline]
    pub fn with_collapse_whitespace(mut self, collapse: bool) -> Self {
        self.collapse_whitespace = collapse;
        self
    }
}

/// Options for a whole document conversion.
///
/// # Examples
///
/// ```rust
/// use quire::normalize::{ConvertOptions, NormalizeOptions};
///
/// // Keep the flat node list, no chapter grouping
/// let options = ConvertOptions::new()
///     .with_normalize(NormalizeOptions::new().with_expect_leading_tab(false))
///     .with_chapter_pattern(None);
/// assert!(options.chapter_pattern.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Text normalizer settings
    pub normalize: NormalizeOptions,
    /// Regex matching a chapter heading; `None` disables chapter grouping
    pub chapter_pattern: Option<String>,
    /// Give the emitted chapters one running index from 1 instead of their
    /// marker positions
    pub renumber_chapters: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            chapter_pattern: Some(DEFAULT_CHAPTER_PATTERN.to_string()),
            renumber_chapters: true,
        }
    }
}

impl ConvertOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the chapter heading pattern.
    ///
    /// The first capture group, if any, is taken as the chapter number.
    #[inline]
    pub fn with_chapter_pattern(mut self, pattern: Option<String>) -> Self {
        self.chapter_pattern = pattern;
        self
    }

    /// Set whether chapters are renumbered after grouping.
    ///
    /// When disabled, a chapter keeps the position of its marker, so a
    /// skipped empty chapter leaves a gap.
    #[inline]
    pub fn with_renumber_chapters(mut self, renumber: bool) -> Self {
        self.renumber_chapters = renumber;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_options_default() {
        let options = NormalizeOptions::default();
        assert!(options.expect_leading_tab);
        assert_eq!(options.separator_char, '*');
        assert!(options.collapse_whitespace);
    }

    #[test]
    fn test_builders() {
        let options = ConvertOptions::new()
            .with_normalize(
                NormalizeOptions::new()
                    .with_expect_leading_tab(false)
                    .with_collapse_whitespace(false),
            )
            .with_chapter_pattern(Some(r"^Part (\d+)$".to_string()))
            .with_renumber_chapters(false);
        assert!(!options.renumber_chapters);
        assert!(ConvertOptions::default().renumber_chapters);
        assert!(!options.normalize.expect_leading_tab);
        assert!(!options.normalize.collapse_whitespace);
        assert_eq!(options.chapter_pattern.as_deref(), Some(r"^Part (\d+)$"));
        assert_eq!(
            ConvertOptions::default().chapter_pattern.as_deref(),
            Some(DEFAULT_CHAPTER_PATTERN)
        );
    }

    #[test]
    fn test_options_from_yaml() {
        let options: ConvertOptions =
            serde_saphyr::from_str("normalize:\n  separator_char: '#'\n").unwrap();
        assert_eq!(options.normalize.separator_char, '#');
        // Unset fields keep their defaults
        assert!(options.normalize.expect_leading_tab);
        assert_eq!(options.chapter_pattern.as_deref(), Some(DEFAULT_CHAPTER_PATTERN));
    }
}
