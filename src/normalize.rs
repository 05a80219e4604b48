//! Text unit normalization.
//!
//! A unit goes through, in order:
//! 1. the information separators U+001C to U+001F become spaces,
//!    other control characters (general category `Cc`) that are not whitespace are removed,
//! 1. NFKC normalization (optional, on by default),
//! 1. whitespace collapsing: every run of Unicode whitespace becomes a single space,
//!    leading and trailing whitespace is dropped.
//!
//! The result has no newline, no doubled space, no edge whitespace,
//! and normalizing it again returns it unchanged.
use unic_ucd::GeneralCategory;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    nfkc: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { nfkc: true }
    }
}

impl Normalizer {
    pub fn new(nfkc: bool) -> Self {
        Self { nfkc }
    }

    pub fn nfkc(&self) -> bool {
        self.nfkc
    }

    /// Normalize a text unit. May return an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let stripped = text.chars().filter_map(|c| {
            if is_separator(c) {
                Some(' ')
            } else if c.is_whitespace() || !is_control(c) {
                Some(c)
            } else {
                None
            }
        });
        if self.nfkc {
            collapse_whitespace(stripped.nfkc(), text.len())
        } else {
            collapse_whitespace(stripped, text.len())
        }
    }
}

/// Normalize with default settings.
pub fn normalize_text(text: &str) -> String {
    Normalizer::default().normalize(text)
}

#[inline]
fn is_control(c: char) -> bool {
    GeneralCategory::of(c) == GeneralCategory::Control
}

/// File, group, record and unit separators. Not Unicode whitespace, but spacing for us.
#[inline]
fn is_separator(c: char) -> bool {
    ('\u{001C}'..='\u{001F}').contains(&c)
}

/// `true` if `c` would not survive normalization as visible content.
#[inline]
pub(crate) fn is_blank(c: char) -> bool {
    c.is_whitespace() || is_control(c)
}

fn collapse_whitespace<I: Iterator<Item = char>>(chars: I, capacity: usize) -> String {
    let mut out = String::with_capacity(capacity);
    let mut pending_space = false;
    for c in chars {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_clean(s: &str) {
        assert!(!s.contains("  "), "doubled space in {:?}", s);
        assert_eq!(s.trim(), s);
        assert!(!s.contains('\n'));
    }

    #[test]
    fn hello_there() {
        assert_eq!(normalize_text("  Hello   there!  "), "Hello there!");
    }

    #[test]
    fn all_whitespace_kinds() {
        let n = normalize_text("\ta\r\n\u{00A0}b\u{2003}\u{3000}c\u{0085}\n");
        assert_eq!(n, "a b c");
    }

    #[test]
    fn empty_results() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t "), "");
        assert_eq!(normalize_text("\u{0007}\u{0000}"), "");
    }

    #[test]
    fn control_chars_removed() {
        assert_eq!(normalize_text("be\u{0007}ll\u{001B}[0m"), "bell[0m");
        assert_eq!(normalize_text("a \u{0000} b"), "a b");
    }

    #[test]
    fn separators_become_spaces() {
        assert_eq!(normalize_text("a\u{001F}b"), "a b");
        assert_eq!(normalize_text("\u{001C}a\u{001D}\u{001E} b\u{001F}"), "a b");
        assert!(is_blank('\u{001E}'));
        assert!(is_blank('\u{0007}'));
        assert!(!is_blank('a'));
    }

    #[test]
    fn nfkc() {
        assert_eq!(normalize_text("ｆｕｌｌ　ｗｉｄｔｈ"), "full width");
        assert_eq!(normalize_text("e\u{0301}"), "\u{00E9}");
        assert_eq!(normalize_text("ﬁne"), "fine");
    }

    #[test]
    fn nfkc_off() {
        let n = Normalizer::new(false);
        assert_eq!(n.normalize("ｆｕｌｌ  ﬁne "), "ｆｕｌｌ ﬁne");
    }

    #[test]
    fn non_latin_scripts_kept() {
        assert_eq!(normalize_text(" 你好，  世界 "), "你好, 世界");
        assert_eq!(normalize_text("Привет   мир"), "Привет мир");
        assert_eq!(normalize_text("مرحبا \t بالعالم"), "مرحبا بالعالم");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "  Hello   there!  ",
            "e\u{0007}\u{0301}",
            "\u{00A0}x\u{0085}y ",
            "ｆｕｌｌ　ｗｉｄｔｈ",
            " \u{0301}a",
            "tabs\tand\nnewlines\r\n",
            "unit\u{001F}separated\u{0007}",
        ];
        for input in inputs.iter() {
            for n in [Normalizer::new(true), Normalizer::new(false)].iter() {
                let once = n.normalize(input);
                assert_clean(&once);
                assert_eq!(n.normalize(&once), once);
            }
        }
    }
}
