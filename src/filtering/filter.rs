//! Line filtering traits.
//!
//! Filters answer a single question: should this normalized line end up in the corpus?

/// Stateless filter: the same line always gets the same answer.
/// Returns `true` when the line is kept.
pub trait Filter<T>: Default {
    fn detect(&self, item: T) -> bool;
}

/// Filter that remembers what it has seen during a run (see [super::Unique]).
///
/// Kept separate from [Filter] so that a filter can implement both.
pub trait FilterMut<T>: Default {
    fn detect_mut(&mut self, item: T) -> bool;
}
