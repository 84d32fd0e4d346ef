//! The per-paragraph normalizer state machine.
//!
//! [`NormalizerState`] holds the two accumulators a paragraph threads
//! through every text run: `parsed`, a canonical rendering of everything
//! seen so far (quotes reduced to `"`/`'` markers, whitespace collapsed),
//! and the spans emitted so far. Quote and dash decisions look only at
//! `parsed`, so they carry across span boundaries but never across
//! paragraphs.

use super::chars::{
    CLOSE_DOUBLE, CLOSE_SINGLE, DOUBLE_MARKER, EN_DASH, HTML_CLOSE_DOUBLE, HTML_CLOSE_SINGLE,
    HTML_EN_DASH, HTML_OPEN_DOUBLE, HTML_OPEN_SINGLE, HTML_SPACED_DASH, HTML_TAB, HYPHEN, NBSP,
    OPEN_DOUBLE, OPEN_SINGLE, SINGLE_MARKER, TAB, UNICODE_SPACES, is_dash, is_double_quote,
    is_single_quote, is_space, trim_end_spaces,
};
use crate::model::{Source, Span, SpanKind, SpecialCharacter, StyleRef};

/// A text run being scanned: its pending, not yet emitted text and the
/// style and source every span cut from it inherits.
struct Run<'a> {
    pending: String,
    style: &'a StyleRef,
    source: Option<&'a Source>,
}

impl<'a> Run<'a> {
    fn new(style: &'a StyleRef, source: Option<&'a Source>) -> Self {
        Self {
            pending: String::new(),
            style,
            source,
        }
    }

    fn text(&self, text: String) -> Span {
        Span::text_run(text, self.style.clone(), self.source.cloned())
    }

    fn special(&self, text: impl Into<String>, html: &str, is_whitespace: bool) -> Span {
        Span::special(text, html, is_whitespace, self.style.clone(), self.source.cloned())
    }

    fn correction(&self, original: impl Into<String>) -> Span {
        Span::correction(original, self.style.clone(), self.source.cloned())
    }
}

/// Running state of one paragraph.
#[derive(Debug, Clone, Default)]
pub struct NormalizerState {
    parsed: String,
    spans: Vec<Span>,
    double_quotes: usize,
    keep_whitespace: bool,
}

impl NormalizerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: whether whitespace runs are collapsed (the default).
    pub fn with_collapse_whitespace(mut self, collapse: bool) -> Self {
        self.keep_whitespace = !collapse;
        self
    }

    /// Canonical text seen so far.
    #[inline]
    pub fn parsed(&self) -> &str {
        &self.parsed
    }

    /// Spans emitted so far.
    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Double quote markers recorded so far.
    #[inline]
    pub fn quote_count(&self) -> usize {
        self.double_quotes
    }

    /// Scan one text run, emitting its spans.
    ///
    /// Every emitted span clones `style` and `source`.
    pub fn feed_text(&mut self, text: &str, style: &StyleRef, source: Option<&Source>) {
        if text.is_empty() {
            return;
        }
        let mut run = Run::new(style, source);
        for ch in text.chars() {
            self.step(&mut run, ch);
        }
        self.flush(&mut run);
    }

    /// Keep a span that is not a text run.
    ///
    /// Special characters left by an earlier pass record the same markers
    /// their source characters did, so normalizing twice is a no-op.
    pub fn pass_through(&mut self, span: Span) {
        if let SpanKind::Special(special) = &span.kind {
            self.record_special(special);
        }
        self.spans.push(span);
    }

    /// Final trailing whitespace repair; yields the paragraph's spans.
    pub fn finish(mut self) -> Vec<Span> {
        strip_trailing_whitespace(&mut self.spans, "");
        self.spans
    }

    fn step(&mut self, run: &mut Run<'_>, ch: char) {
        if ch == TAB {
            self.tab(run);
        } else if is_dash(ch) {
            self.dash(run, ch);
        } else if is_double_quote(ch) {
            self.double_quote(run, ch);
        } else if is_single_quote(ch) {
            self.single_quote(run, ch);
        } else if is_space(ch) && !self.keep_whitespace {
            if self.parsed.is_empty() || self.parsed.ends_with(' ') {
                return;
            }
            self.append(run, ' ');
        } else {
            self.append(run, ch);
        }
    }

    fn append(&mut self, run: &mut Run<'_>, ch: char) {
        self.parsed.push(ch);
        run.pending.push(ch);
    }

    fn flush(&mut self, run: &mut Run<'_>) {
        if !run.pending.is_empty() {
            let text = std::mem::take(&mut run.pending);
            self.spans.push(run.text(text));
        }
    }

    /// Strip whitespace before the next unit, both from the pending text
    /// and, if that is all whitespace, from the spans already emitted.
    fn strip_before(&mut self, run: &mut Run<'_>) {
        run.pending = strip_trailing_whitespace(&mut self.spans, &run.pending);
    }

    fn tab(&mut self, run: &mut Run<'_>) {
        self.strip_before(run);
        self.flush(run);
        self.spans.push(run.special(TAB, HTML_TAB, true));
        self.settle_space();
    }

    fn dash(&mut self, run: &mut Run<'_>, ch: char) {
        if self.parsed.ends_with(' ') {
            // A dash set off by a space is a long dash glued to the word
            // before it by a non-breaking space.
            self.strip_before(run);
            self.trim_parsed();
            self.parsed.push_str(" -");
            self.flush(run);
            self.spans.push(run.special(spaced_dash(), HTML_SPACED_DASH, false));
        } else if ch == EN_DASH {
            self.flush(run);
            self.spans.push(run.special(EN_DASH, HTML_EN_DASH, false));
            self.parsed.push(HYPHEN);
        } else {
            self.flush(run);
            self.spans.push(run.special(HYPHEN, "-", false));
            self.parsed.push(HYPHEN);
        }
    }

    fn double_quote(&mut self, run: &mut Run<'_>, ch: char) {
        self.flush(run);
        if self.double_quotes % 2 == 1 {
            // A tab before the quote is deliberate and stays; only text
            // whitespace is removed.
            if self.has_trailing_whitespace() && strip_trailing_spans(&mut self.spans) {
                log::debug!("removing whitespace before closing quote");
                self.trim_parsed();
                self.spans.push(run.correction(format!(" {ch}")));
            } else if ch != CLOSE_DOUBLE {
                self.spans.push(run.correction(ch));
            }
            self.spans.push(run.special(CLOSE_DOUBLE, HTML_CLOSE_DOUBLE, false));
        } else {
            if !self.has_trailing_whitespace() || ch != OPEN_DOUBLE {
                self.spans.push(run.correction(ch));
            }
            self.spans.push(run.special(OPEN_DOUBLE, HTML_OPEN_DOUBLE, false));
        }
        self.mark_double();
    }

    fn single_quote(&mut self, run: &mut Run<'_>, ch: char) {
        self.flush(run);
        let (canonical, html) = if self.has_trailing_whitespace() {
            (OPEN_SINGLE, HTML_OPEN_SINGLE)
        } else {
            (CLOSE_SINGLE, HTML_CLOSE_SINGLE)
        };
        if ch != canonical {
            self.spans.push(run.correction(ch));
        }
        self.spans.push(run.special(canonical, html, false));
        self.parsed.push(SINGLE_MARKER);
    }

    fn record_special(&mut self, special: &SpecialCharacter) {
        if special.is_whitespace {
            self.settle_space();
            return;
        }
        let mut chars = special.text.chars();
        match (chars.next(), chars.next()) {
            (Some(OPEN_DOUBLE | CLOSE_DOUBLE), None) => self.mark_double(),
            (Some(OPEN_SINGLE | CLOSE_SINGLE), None) => self.parsed.push(SINGLE_MARKER),
            (Some(EN_DASH | HYPHEN), None) => self.parsed.push(HYPHEN),
            (Some(NBSP), Some(EN_DASH)) => {
                self.trim_parsed();
                self.parsed.push_str(" -");
            },
            _ => self.parsed.push_str(&special.text),
        }
    }

    fn mark_double(&mut self) {
        self.parsed.push(DOUBLE_MARKER);
        self.double_quotes += 1;
    }

    /// `parsed` ends in exactly one space.
    fn settle_space(&mut self) {
        self.trim_parsed();
        self.parsed.push(' ');
    }

    fn trim_parsed(&mut self) {
        let len = trim_end_spaces(&self.parsed).len();
        self.parsed.truncate(len);
    }

    /// An empty paragraph counts as preceded by whitespace.
    fn has_trailing_whitespace(&self) -> bool {
        self.parsed
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || UNICODE_SPACES.contains(&c))
    }
}

fn spaced_dash() -> String {
    [NBSP, EN_DASH].iter().collect()
}

/// Remove trailing whitespace from `val`; if nothing else is left, strip
/// it from the end of `spans` as well.
///
/// The backward walk deletes spans that become empty and stops at the
/// first span that keeps text, at a whitespace special (a tab is meant),
/// or at an image. Corrections are stepped over and kept.
pub fn strip_trailing_whitespace(spans: &mut Vec<Span>, val: &str) -> String {
    let kept = trim_end_spaces(val);
    if kept.is_empty() {
        strip_trailing_spans(spans);
    }
    kept.to_string()
}

/// The backward walk of [`strip_trailing_whitespace`]. Returns whether any
/// whitespace was actually removed.
fn strip_trailing_spans(spans: &mut Vec<Span>) -> bool {
    let mut removed = false;
    let mut i = spans.len();
    while i > 0 {
        i -= 1;
        let emptied = match &mut spans[i].kind {
            SpanKind::Correction(_) => continue,
            SpanKind::Text(text) => {
                let len = trim_end_spaces(text).len();
                removed |= len < text.len();
                text.truncate(len);
                text.is_empty()
            },
            SpanKind::Special(_) | SpanKind::Image(_) => break,
        };
        if !emptied {
            break;
        }
        spans.remove(i);
    }
    removed
}
