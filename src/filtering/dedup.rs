/*! Exact deduplication

This only uses [runiq](https://github.com/whitfin/runiq) to check for identical lines.
Memory grows with the number of unique lines (one digest per line).
!*/
use runiq::filters::{DigestFilter, Filter as _};

use super::FilterMut;

/// Keeps the first occurrence of each line.
#[derive(Default)]
pub struct Unique {
    seen: DigestFilter,
    duplicates: u64,
}

impl Unique {
    /// Number of lines rejected so far.
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }
}

impl FilterMut<&str> for Unique {
    fn detect_mut(&mut self, line: &str) -> bool {
        let unique = self.seen.detect(line.as_bytes());
        if !unique {
            self.duplicates += 1;
        }
        unique
    }
}
