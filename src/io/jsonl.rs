//! JSON Lines record reader, plain or gzipped.
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::Error;
use crate::record::DatasetRecord;

/// Iterates over the records of a JSON Lines file.
///
/// Blank lines are skipped. A line that is not a JSON object yields
/// [Error::MalformedRecord], I/O errors yield [Error::Io].
pub struct JsonlReader<R> {
    path: PathBuf,
    lines: Lines<R>,
    line_nb: usize,
}

impl JsonlReader<BufReader<Box<dyn Read>>> {
    /// Open `path`, decompressing it if its extension is `gz`.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let is_gzip = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("gz"));

        // gzipped json lines may be multipart (concatenated members).
        let inner: Box<dyn Read> = if is_gzip {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Ok(Self::new(path, BufReader::new(inner)))
    }
}

impl<R: BufRead> JsonlReader<R> {
    pub fn new(path: &Path, reader: R) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: reader.lines(),
            line_nb: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = Result<DatasetRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_nb += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(DatasetRecord::from_json_str(&line).map_err(|e| match e {
                Error::MalformedRecord(reason) => Error::MalformedRecord(format!(
                    "{:?} line {}: {}",
                    self.path, self.line_nb, reason
                )),
                e => e,
            }));
        }
    }
}
