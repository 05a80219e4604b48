//! Corpus building pipeline
//!
//! A single sequential pass over the configured datasets:
//!
//! 1. the source resolves the dataset into records,
//! 1. each record goes through the [FieldExtractor], records without text are skipped,
//! 1. each text unit is normalized and filtered,
//! 1. kept lines are appended to the corpus file, in dataset-then-record order.
//!
//! A dataset that fails is reported and the run moves on to the next one.
//! A write failure aborts the run.
use log::{debug, error, info, warn};

use super::report::{DatasetReport, RunReport};
use super::Pipeline;
use crate::config::{Config, DatasetSpec};
use crate::error::Error;
use crate::extract::FieldExtractor;
use crate::filtering::{LineFilter, Verdict};
use crate::io::{with_corpus, CorpusWriter};
use crate::normalize::Normalizer;
use crate::sources::DatasetSource;

pub struct CorpusBuilder<S> {
    config: Config,
    source: S,
}

impl<S: DatasetSource> CorpusBuilder<S> {
    pub fn new(config: Config, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process a dataset, writing its lines.
    ///
    /// Only write errors are returned, dataset errors end up in the report.
    fn process_dataset(
        &self,
        spec: &DatasetSpec,
        normalizer: &Normalizer,
        filter: &mut LineFilter,
        writer: &mut CorpusWriter,
    ) -> Result<DatasetReport, Error> {
        info!("[{}] loading", spec);
        let mut report = DatasetReport::new(&spec.name);

        let selection = self.config.selection_for(spec);
        debug!("[{}] using fields {:?}", spec, selection);
        let extractor = FieldExtractor::new(selection);

        let records = match self.source.records(spec) {
            Ok(records) => records,
            Err(e) => {
                error!("[{}] failed to load: {}", spec, e);
                report.error = Some(e.to_string());
                return Ok(report);
            }
        };
        // malformed rows do not count towards the limit
        let max_rows = self.config.max_rows_for(spec).unwrap_or(usize::MAX);
        let mut records = records.enumerate();

        while report.records < max_rows as u64 {
            let (idx, record) = match records.next() {
                Some(next) => next,
                None => break,
            };
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_record_level() => {
                    warn!("[{}] skipping record {}: {}", spec, idx, e);
                    report.malformed += 1;
                    continue;
                }
                Err(e) => {
                    error!("[{}] failed after {} records: {}", spec, idx, e);
                    report.error = Some(e.to_string());
                    break;
                }
            };
            report.records += 1;

            let extracted = match extractor.extract(&record) {
                Some(extracted) => extracted,
                None => {
                    debug!(
                        "[{}] record {} has no recognized field (keys: {:?})",
                        spec,
                        idx,
                        record.keys().collect::<Vec<_>>()
                    );
                    report.no_field += 1;
                    continue;
                }
            };

            for unit in extracted.units {
                report.units += 1;
                let line = normalizer.normalize(&unit);
                let verdict = filter.check(&line);
                if verdict == Verdict::Keep {
                    writer.write_line(&line)?;
                }
                report.count(verdict);
            }
        }

        if report.no_field > 0 {
            info!(
                "[{}] {} records without a recognized field",
                spec, report.no_field
            );
        }
        info!(
            "[{}] {} lines from {} records ({} lines total so far)",
            spec,
            report.lines_written,
            report.records,
            writer.nb_lines()
        );
        Ok(report)
    }
}

impl<S: DatasetSource> Pipeline<RunReport> for CorpusBuilder<S> {
    fn run(&self) -> Result<RunReport, Error> {
        if self.config.datasets.is_empty() {
            return Err(Error::Custom("no dataset to process".to_string()));
        }

        let normalizer = Normalizer::new(self.config.nfkc);
        let mut filter = LineFilter::new(self.config.min_chars, self.config.dedup);

        let (datasets, stats) = with_corpus(&self.config.output, |writer| {
            let mut reports = Vec::with_capacity(self.config.datasets.len());
            for spec in &self.config.datasets {
                reports.push(self.process_dataset(spec, &normalizer, &mut filter, writer)?);
            }
            Ok(reports)
        })?;

        let report = RunReport {
            output: self.config.output.clone(),
            datasets,
            nb_lines: stats.nb_lines,
            nb_bytes: stats.nb_bytes,
        };

        for failed in report.failed_datasets() {
            warn!("dataset {} did not complete", failed.name);
        }
        info!(
            "final corpus size: {} lines ({} bytes) in {:?}",
            report.nb_lines, report.nb_bytes, report.output
        );
        Ok(report)
    }
}
