//! Corpus file writer.
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Appends lines to the corpus file.
///
/// The file is created (or truncated) on [CorpusWriter::create], parent directories included.
/// Writes are buffered: call [CorpusWriter::finish] to flush and sync.
/// A writer dropped without `finish` still flushes its buffer, ignoring errors.
pub struct CorpusWriter {
    path: PathBuf,
    out: BufWriter<File>,
    nb_lines: u64,
    nb_bytes: u64,
}

/// What a finished [CorpusWriter] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CorpusStats {
    pub nb_lines: u64,
    pub nb_bytes: u64,
}

impl CorpusWriter {
    pub fn create(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("creating {:?}", parent);
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("creating {:?}", path);
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            nb_lines: 0,
            nb_bytes: 0,
        })
    }

    /// Write `line` followed by a newline.
    ///
    /// `line` must not hold a line break.
    pub fn write_line(&mut self, line: &str) -> Result<(), Error> {
        if line.contains(|c: char| c == '\n' || c == '\r') {
            return Err(Error::Custom(format!(
                "refusing to write a line break into {:?}",
                self.path
            )));
        }
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.nb_lines += 1;
        self.nb_bytes += line.len() as u64 + 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn nb_lines(&self) -> u64 {
        self.nb_lines
    }

    /// Flush, sync and close the file.
    pub fn finish(mut self) -> Result<CorpusStats, Error> {
        self.out.flush()?;
        self.out.get_ref().sync_all()?;
        debug!(
            "closed {:?} ({} lines, {} bytes)",
            self.path, self.nb_lines, self.nb_bytes
        );
        Ok(CorpusStats {
            nb_lines: self.nb_lines,
            nb_bytes: self.nb_bytes,
        })
    }
}

/// Run `f` with a writer on `path`, closing it whatever `f` returns.
///
/// An error from `f` takes precedence over an error while closing.
pub fn with_corpus<T, F>(path: &Path, f: F) -> Result<(T, CorpusStats), Error>
where
    F: FnOnce(&mut CorpusWriter) -> Result<T, Error>,
{
    let mut writer = CorpusWriter::create(path)?;
    match f(&mut writer) {
        Ok(value) => {
            let stats = writer.finish()?;
            Ok((value, stats))
        }
        Err(e) => {
            if let Err(close_err) = writer.finish() {
                debug!("error closing {:?} after failure: {}", path, close_err);
            }
            Err(e)
        }
    }
}
