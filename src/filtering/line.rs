//! line-level filtering
use super::Filter;

/// Keeps lines that hold at least one character.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonEmpty;

impl Filter<&str> for NonEmpty {
    fn detect(&self, line: &str) -> bool {
        !line.is_empty()
    }
}

/// Simple length filter.
/// Returns `false` if provided line is less than [Length::min_chars] unicode codepoints.
///
/// [Length::min_chars] is 1 by default.
#[derive(Debug, Clone, Copy)]
pub struct Length {
    min_chars: usize,
}

impl Length {
    /// specify a minimum length
    pub fn with_min_chars(min_chars: usize) -> Self {
        Self { min_chars }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Default for Length {
    fn default() -> Self {
        Length { min_chars: 1 }
    }
}

impl Filter<&str> for Length {
    fn detect(&self, line: &str) -> bool {
        // a line has at least as many bytes as chars
        line.len() >= self.min_chars && line.chars().count() >= self.min_chars
    }
}
