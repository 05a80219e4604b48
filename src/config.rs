//! Run configuration.
//!
//! A configuration file is a JSON object, every key being optional:
//!
//! ```json
//! {
//!     "output": "corpus.txt",
//!     "datasets": ["daily_dialog", {"name": "persona_chat", "splits": ["train"]}],
//!     "fields": ["text", "utterance", "dialog"],
//!     "mode": "first",
//!     "auto_detect": true,
//!     "min_chars": 1,
//!     "dedup": false,
//!     "nfkc": true,
//!     "max_rows": null,
//!     "endpoint": "https://datasets-server.huggingface.co",
//!     "local_dir": null
//! }
//! ```
//!
//! A dataset is either a `name[:config[:split]]` string or an object with
//! `name`, `config`, `splits`, `path`, `fields` (a field selection) and `max_rows`.
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::error::Error;
use crate::extract::{profiles, FieldPath, FieldSelection, Mode};
use crate::sources::hub::DEFAULT_ENDPOINT;

pub const DEFAULT_OUTPUT: &str = "corpus.txt";

/// One dataset to read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "DatasetEntry")]
pub struct DatasetSpec {
    /// Dataset identifier (`daily_dialog`, `org/name`).
    pub name: String,
    /// datasets-server config. The first listed one if unset.
    pub config: Option<String>,
    /// Splits to read. Every split of the config if unset.
    pub splits: Option<Vec<String>>,
    /// Local file or directory holding the dataset.
    pub path: Option<PathBuf>,
    /// Overrides every other field selection.
    pub fields: Option<FieldSelection>,
    /// Maximum number of rows read.
    pub max_rows: Option<usize>,
}

impl DatasetSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            config: None,
            splits: None,
            path: None,
            fields: None,
            max_rows: None,
        }
    }
}

/// `name[:config[:split]]`
impl FromStr for DatasetSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, ':');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(Error::Custom(format!("invalid dataset: {:?}", s)));
        }

        let mut spec = DatasetSpec::new(name);
        spec.config = parts.next().filter(|c| !c.is_empty()).map(String::from);
        spec.splits = parts
            .next()
            .filter(|c| !c.is_empty())
            .map(|split| vec![split.to_string()]);
        Ok(spec)
    }
}

impl fmt::Display for DatasetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(config) = &self.config {
            write!(f, ":{}", config)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetEntry {
    Name(String),
    Table(RawDatasetSpec),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatasetSpec {
    name: String,
    #[serde(default)]
    config: Option<String>,
    #[serde(default)]
    splits: Option<Vec<String>>,
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    fields: Option<FieldSelection>,
    #[serde(default)]
    max_rows: Option<usize>,
}

impl TryFrom<DatasetEntry> for DatasetSpec {
    type Error = Error;

    fn try_from(entry: DatasetEntry) -> Result<Self, Self::Error> {
        match entry {
            DatasetEntry::Name(s) => s.parse(),
            DatasetEntry::Table(raw) => {
                if raw.name.trim().is_empty() {
                    return Err(Error::Custom("dataset name is empty".to_string()));
                }
                Ok(DatasetSpec {
                    name: raw.name,
                    config: raw.config,
                    splits: raw.splits,
                    path: raw.path,
                    fields: raw.fields,
                    max_rows: raw.max_rows,
                })
            }
        }
    }
}

/// Everything a corpus build needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: PathBuf,
    pub datasets: Vec<DatasetSpec>,
    /// Candidate fields for every dataset without its own `fields`.
    /// Profiles and default candidates are used if unset.
    pub fields: Option<Vec<FieldPath>>,
    /// Mode for `fields`.
    pub mode: Mode,
    pub auto_detect: bool,
    pub min_chars: usize,
    /// Drop lines already written during the run.
    pub dedup: bool,
    pub nfkc: bool,
    /// Row limit for datasets without their own `max_rows`.
    pub max_rows: Option<usize>,
    pub endpoint: String,
    /// Read every dataset from this directory instead of the hub.
    pub local_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            datasets: Vec::new(),
            fields: None,
            mode: Mode::First,
            auto_detect: true,
            min_chars: 1,
            dedup: false,
            nfkc: true,
            max_rows: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            local_dir: None,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        debug!("reading configuration from {:?}", path);
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Field selection for `spec`.
    ///
    /// In order: the dataset's own `fields`, the global `fields`,
    /// the dataset profile, the default candidates.
    /// Global `auto_detect` applies to the last three.
    pub fn selection_for(&self, spec: &DatasetSpec) -> FieldSelection {
        if let Some(selection) = &spec.fields {
            return selection.clone();
        }

        let selection = match &self.fields {
            Some(fields) => FieldSelection::new(fields.clone(), self.mode),
            None => profiles::selection_for(&spec.name),
        };
        selection.with_auto_detect(self.auto_detect)
    }

    pub fn max_rows_for(&self, spec: &DatasetSpec) -> Option<usize> {
        spec.max_rows.or(self.max_rows)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_spec_string() {
        let s: DatasetSpec = "org/chat:en:train".parse().unwrap();
        assert_eq!(s.name, "org/chat");
        assert_eq!(s.config.as_deref(), Some("en"));
        assert_eq!(s.splits, Some(vec!["train".to_string()]));
        assert_eq!(s.to_string(), "org/chat:en");

        let s: DatasetSpec = "daily_dialog".parse().unwrap();
        assert_eq!(s, DatasetSpec::new("daily_dialog"));

        let s: DatasetSpec = "chat::test".parse().unwrap();
        assert_eq!(s.config, None);
        assert_eq!(s.splits, Some(vec!["test".to_string()]));

        assert!("".parse::<DatasetSpec>().is_err());
        assert!(":x".parse::<DatasetSpec>().is_err());
    }

    #[test]
    fn defaults() {
        let c: Config = serde_json::from_value(json!({})).unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.output, PathBuf::from("corpus.txt"));
        assert!(c.nfkc);
        assert!(!c.dedup);
    }

    #[test]
    fn full_file() {
        let c: Config = serde_json::from_value(json!({
            "output": "out/c.txt",
            "datasets": [
                "daily_dialog",
                {"name": "persona_chat", "splits": ["train"], "max_rows": 10},
                {"name": "mine", "path": "data/mine.jsonl",
                 "fields": {"candidates": ["msg.body"], "mode": "all", "auto_detect": false}}
            ],
            "fields": ["text", "utterance"],
            "mode": "all",
            "dedup": true,
            "min_chars": 2,
            "max_rows": 1000
        }))
        .unwrap();

        assert_eq!(c.datasets.len(), 3);
        assert_eq!(c.datasets[1].splits, Some(vec!["train".to_string()]));
        assert_eq!(c.max_rows_for(&c.datasets[0]), Some(1000));
        assert_eq!(c.max_rows_for(&c.datasets[1]), Some(10));

        let own = c.selection_for(&c.datasets[2]);
        assert_eq!(own.candidates[0].to_string(), "msg.body");
        assert!(!own.auto_detect);

        let global = c.selection_for(&c.datasets[0]);
        assert_eq!(global.mode, Mode::All);
        assert_eq!(global.candidates.len(), 2);
    }

    #[test]
    fn profile_when_no_fields() {
        let mut c = Config::default();
        c.auto_detect = false;
        let s = c.selection_for(&"persona_chat".parse().unwrap());
        assert_eq!(s.mode, Mode::All);
        assert!(!s.auto_detect);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(serde_json::from_value::<Config>(json!({"ouptut": "x"})).is_err());
        assert!(serde_json::from_value::<Config>(json!({"datasets": [{"nam": "x"}]})).is_err());
    }
}
