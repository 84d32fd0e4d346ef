//! Characters the normalizer recognizes and the canonical units it emits.

pub const HYPHEN: char = '-';
pub const EN_DASH: char = '\u{2013}';
pub const NBSP: char = '\u{00A0}';
pub const TAB: char = '\t';

pub const STRAIGHT_DOUBLE: char = '"';
pub const OPEN_DOUBLE: char = '\u{201C}';
pub const CLOSE_DOUBLE: char = '\u{201D}';

pub const STRAIGHT_SINGLE: char = '\'';
pub const OPEN_SINGLE: char = '\u{2018}';
pub const CLOSE_SINGLE: char = '\u{2019}';

/// Marker recorded in the running text for every double quote.
pub const DOUBLE_MARKER: char = '"';
/// Marker recorded in the running text for every single quote.
pub const SINGLE_MARKER: char = '\'';

pub const HTML_OPEN_DOUBLE: &str = "&ldquo;";
pub const HTML_CLOSE_DOUBLE: &str = "&rdquo;";
pub const HTML_OPEN_SINGLE: &str = "&lsquo;";
pub const HTML_CLOSE_SINGLE: &str = "&rsquo;";
pub const HTML_EN_DASH: &str = "&ndash;";
pub const HTML_SPACED_DASH: &str = "&nbsp;&ndash;";
pub const HTML_TAB: &str = "&nbsp;";

/// Space characters beyond what `char::is_whitespace` covers.
///
/// Zero-width spaces are not whitespace to the standard library but are
/// still stray spacing in a manuscript.
pub const UNICODE_SPACES: [char; 20] = [
    '\u{0020}', '\u{00A0}', '\u{1680}', '\u{180E}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}',
    '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{200B}',
    '\u{202F}', '\u{205F}', '\u{3000}', '\u{FEFF}',
];

#[inline]
pub fn is_double_quote(ch: char) -> bool {
    matches!(ch, STRAIGHT_DOUBLE | OPEN_DOUBLE | CLOSE_DOUBLE)
}

#[inline]
pub fn is_single_quote(ch: char) -> bool {
    matches!(ch, STRAIGHT_SINGLE | OPEN_SINGLE | CLOSE_SINGLE)
}

#[inline]
pub fn is_dash(ch: char) -> bool {
    ch == HYPHEN || ch == EN_DASH
}

/// Collapsible whitespace. Tabs are significant and excluded.
#[inline]
pub fn is_space(ch: char) -> bool {
    ch != TAB && (ch.is_whitespace() || UNICODE_SPACES.contains(&ch))
}

/// Strip trailing collapsible whitespace, including the zero-width kinds.
pub fn trim_end_spaces(s: &str) -> &str {
    s.trim_end_matches(|c: char| c.is_whitespace() || UNICODE_SPACES.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_classes() {
        assert!(is_space(' '));
        assert!(is_space(NBSP));
        assert!(is_space('\u{200B}'));
        assert!(is_space('\n'));
        assert!(!is_space(TAB));
        assert!(!is_space('a'));
        assert_eq!(trim_end_spaces("ab \u{200B}\t"), "ab");
    }

    #[test]
    fn test_quote_classes() {
        assert!(is_double_quote('"'));
        assert!(is_double_quote(OPEN_DOUBLE));
        assert!(!is_double_quote(OPEN_SINGLE));
        assert!(is_single_quote('\''));
        assert!(is_dash(EN_DASH));
        assert!(!is_dash('\u{2014}'));
    }
}
