//! Local JSON Lines datasets.
//!
//! A dataset named `name` under `root` resolves to, in order of preference:
//! 1. `root/name.jsonl`,
//! 1. `root/name.jsonl.gz`,
//! 1. every `*.jsonl` and `*.jsonl.gz` file below `root/name/`, sorted by path.
//!
//! A dataset with an explicit `path` uses that file, or the files below that directory.
use std::path::{Path, PathBuf};

use glob::Pattern;
use itertools::Either;
use log::{debug, info};

use super::{DatasetSource, Records};
use crate::config::DatasetSpec;
use crate::error::Error;
use crate::io::JsonlReader;

const EXTENSIONS: [&str; 2] = ["jsonl", "jsonl.gz"];

pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the files backing `spec`.
    pub fn resolve(&self, spec: &DatasetSpec) -> Result<Vec<PathBuf>, Error> {
        if let Some(path) = &spec.path {
            return if path.is_file() {
                Ok(vec![path.clone()])
            } else {
                non_empty(spec, files_below(path)?)
            };
        }

        for ext in EXTENSIONS.iter() {
            let candidate = self.root.join(format!("{}.{}", spec.name, ext));
            if candidate.is_file() {
                return Ok(vec![candidate]);
            }
        }

        non_empty(spec, files_below(&self.root.join(&spec.name))?)
    }
}

fn non_empty(spec: &DatasetSpec, files: Vec<PathBuf>) -> Result<Vec<PathBuf>, Error> {
    if files.is_empty() {
        Err(Error::DatasetNotFound(format!(
            "{}: no .jsonl or .jsonl.gz file found",
            spec.name
        )))
    } else {
        Ok(files)
    }
}

/// Every JSON Lines file below `dir`, sorted.
fn files_below(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let base = Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();
    for ext in EXTENSIONS.iter() {
        let pattern = format!("{}/**/*.{}", base, ext);
        debug!("looking for {}", pattern);
        for entry in glob::glob(&pattern)? {
            files.push(entry?);
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

impl DatasetSource for LocalSource {
    fn records<'a>(&'a self, spec: &DatasetSpec) -> Result<Records<'a>, Error> {
        let files = self.resolve(spec)?;
        info!("[{}] reading {} file(s)", spec.name, files.len());

        // open files lazily, an unreadable file yields its error in place
        let records = files
            .into_iter()
            .flat_map(|path| match JsonlReader::from_path(&path) {
                Ok(reader) => Either::Left(reader),
                Err(e) => Either::Right(std::iter::once(Err(e))),
            });
        Ok(Box::new(records))
    }
}
