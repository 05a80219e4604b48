//! Dataset inspection: shows which fields would be extracted from the first records of a dataset.
use log::warn;
use serde::Serialize;

use crate::config::{Config, DatasetSpec};
use crate::error::Error;
use crate::extract::FieldExtractor;
use crate::normalize::Normalizer;
use crate::sources::DatasetSource;

/// What extraction gives for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub index: usize,
    pub keys: Vec<String>,
    /// Fields that yielded text, empty if none did.
    pub fields: Vec<String>,
    pub nb_units: usize,
    /// First unit, normalized.
    pub preview: Option<String>,
}

/// Summarize the first `nb_records` records of `spec`.
///
/// Malformed records are skipped, other errors are returned.
pub fn inspect<S: DatasetSource>(
    source: &S,
    config: &Config,
    spec: &DatasetSpec,
    nb_records: usize,
) -> Result<Vec<RecordSummary>, Error> {
    let extractor = FieldExtractor::new(config.selection_for(spec));
    let normalizer = Normalizer::new(config.nfkc);

    let mut summaries = Vec::with_capacity(nb_records);
    for (index, record) in source.records(spec)?.take(nb_records).enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_record_level() => {
                warn!("skipping record {}: {}", index, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let keys = record.keys().map(String::from).collect();
        let summary = match extractor.extract(&record) {
            Some(extracted) => RecordSummary {
                index,
                keys,
                nb_units: extracted.units.len(),
                preview: extracted.units.first().map(|u| normalizer.normalize(u)),
                fields: extracted.fields,
            },
            None => RecordSummary {
                index,
                keys,
                fields: Vec::new(),
                nb_units: 0,
                preview: None,
            },
        };
        summaries.push(summary);
    }
    Ok(summaries)
}
