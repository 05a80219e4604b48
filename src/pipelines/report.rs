//! Run reports.
use std::path::PathBuf;

use serde::Serialize;

use crate::filtering::Verdict;

/// Counters for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    pub name: String,
    /// Records read (malformed ones excluded).
    pub records: u64,
    /// Records skipped because they are malformed.
    pub malformed: u64,
    /// Records without any recognized field.
    pub no_field: u64,
    /// Text units extracted.
    pub units: u64,
    pub lines_written: u64,
    pub empty: u64,
    pub too_short: u64,
    pub duplicates: u64,
    /// Set when the dataset could not be read to the end.
    pub error: Option<String>,
}

impl DatasetReport {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn count(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Keep => self.lines_written += 1,
            Verdict::Empty => self.empty += 1,
            Verdict::TooShort => self.too_short += 1,
            Verdict::Duplicate => self.duplicates += 1,
        }
    }

    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Counters for a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub output: PathBuf,
    pub datasets: Vec<DatasetReport>,
    pub nb_lines: u64,
    pub nb_bytes: u64,
}

impl RunReport {
    pub fn failed_datasets(&self) -> impl Iterator<Item = &DatasetReport> {
        self.datasets.iter().filter(|d| d.failed())
    }
}
