/*! Filtering utilities

Filters operate on normalized lines, right before they are written.

Filters implement [filter::Filter], [filter::FilterMut] or both:
- [filter::Filter] is implemented for filters that do not have state (see [line::Length] for example)
- [filter::FilterMut] is implemented for filters that do have state (see [dedup::Unique]).

[LineFilter] chains them in the order used when building a corpus.
! */
mod dedup;
mod filter;
mod line;

pub use dedup::Unique;
pub use filter::Filter;
pub use filter::FilterMut;
pub use line::{Length, NonEmpty};

/// Outcome of [LineFilter::check].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Empty,
    TooShort,
    Duplicate,
}

/// Empty lines are always rejected, then short ones, then (if enabled) duplicates.
#[derive(Default)]
pub struct LineFilter {
    non_empty: NonEmpty,
    length: Length,
    unique: Option<Unique>,
}

impl LineFilter {
    pub fn new(min_chars: usize, dedup: bool) -> Self {
        Self {
            non_empty: NonEmpty,
            length: Length::with_min_chars(min_chars),
            unique: if dedup { Some(Unique::default()) } else { None },
        }
    }

    pub fn check(&mut self, line: &str) -> Verdict {
        if !self.non_empty.detect(line) {
            Verdict::Empty
        } else if !self.length.detect(line) {
            Verdict::TooShort
        } else {
            match self.unique.as_mut().map(|unique| unique.detect_mut(line)) {
                Some(false) => Verdict::Duplicate,
                _ => Verdict::Keep,
            }
        }
    }
}
