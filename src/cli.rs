//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use crate::config::{Config, DatasetSpec};
use crate::error::Error;
use crate::extract::{FieldPath, Mode};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "corpusprep",
    about = "builds a flat text corpus from conversational datasets."
)]
/// Holds every command that is callable by the `corpusprep` command.
pub enum Corpusprep {
    #[structopt(about = "Build a corpus")]
    Build(Build),
    #[structopt(about = "Show which fields would be extracted from a dataset")]
    Inspect(Inspect),
}

#[derive(Debug, StructOpt)]
/// Build command and parameters.
///
/// ```sh
/// corpusprep-build 0.1.0
/// Build a corpus
///
/// USAGE:
///     corpusprep build [FLAGS] [OPTIONS] [datasets]...
///
/// FLAGS:
///         --dedup             drop lines already written during the run
///     -h, --help              Prints help information
///         --no-auto-detect    do not guess textual fields when no candidate matches
///         --no-nfkc           do not apply NFKC normalization
///
/// OPTIONS:
///     -c, --config <config>          JSON configuration file
///         --endpoint <endpoint>      datasets-server endpoint
///     -f, --field <fields>...        candidate field, by priority (repeatable)
///         --local-dir <local-dir>    read datasets from this directory instead of the hub
///         --max-rows <max-rows>      maximum number of rows read per dataset
///         --min-chars <min-chars>    minimum line length in characters
///         --mode <mode>              candidate fields mode: first or all
///     -o, --output <output>          corpus destination (default: corpus.txt)
///         --report <report>          write a JSON run report there
///
/// ARGS:
///     <datasets>...    datasets, as name[:config[:split]]
/// ```
pub struct Build {
    #[structopt(help = "datasets, as name[:config[:split]]")]
    pub datasets: Vec<DatasetSpec>,
    #[structopt(
        parse(from_os_str),
        short = "o",
        long = "output",
        help = "corpus destination (default: corpus.txt)"
    )]
    pub output: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "config",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        short = "f",
        long = "field",
        number_of_values = 1,
        help = "candidate field, by priority (repeatable)"
    )]
    pub fields: Vec<FieldPath>,
    #[structopt(long = "mode", help = "candidate fields mode: first or all")]
    pub mode: Option<Mode>,
    #[structopt(
        long = "no-auto-detect",
        help = "do not guess textual fields when no candidate matches"
    )]
    pub no_auto_detect: bool,
    #[structopt(long = "min-chars", help = "minimum line length in characters")]
    pub min_chars: Option<usize>,
    #[structopt(long = "dedup", help = "drop lines already written during the run")]
    pub dedup: bool,
    #[structopt(long = "no-nfkc", help = "do not apply NFKC normalization")]
    pub no_nfkc: bool,
    #[structopt(long = "max-rows", help = "maximum number of rows read per dataset")]
    pub max_rows: Option<usize>,
    #[structopt(long = "endpoint", help = "datasets-server endpoint")]
    pub endpoint: Option<String>,
    #[structopt(
        parse(from_os_str),
        long = "local-dir",
        help = "read datasets from this directory instead of the hub"
    )]
    pub local_dir: Option<PathBuf>,
    #[structopt(
        parse(from_os_str),
        long = "report",
        help = "write a JSON run report there"
    )]
    pub report: Option<PathBuf>,
}

impl Build {
    /// Load the configuration file if any, then apply command line values on top of it.
    /// Datasets given on the command line are appended to the file ones.
    pub fn to_config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };

        config.datasets.extend(self.datasets.iter().cloned());
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if !self.fields.is_empty() {
            config.fields = Some(self.fields.clone());
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.no_auto_detect {
            config.auto_detect = false;
        }
        if let Some(min_chars) = self.min_chars {
            config.min_chars = min_chars;
        }
        if self.dedup {
            config.dedup = true;
        }
        if self.no_nfkc {
            config.nfkc = false;
        }
        if let Some(max_rows) = self.max_rows {
            config.max_rows = Some(max_rows);
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(local_dir) = &self.local_dir {
            config.local_dir = Some(local_dir.clone());
        }
        Ok(config)
    }
}

#[derive(Debug, StructOpt)]
/// Inspect command and parameters.
pub struct Inspect {
    #[structopt(help = "dataset, as name[:config[:split]]")]
    pub dataset: DatasetSpec,
    #[structopt(
        short = "n",
        default_value = "5",
        help = "number of records to inspect"
    )]
    pub nb_records: usize,
    #[structopt(
        parse(from_os_str),
        short = "c",
        long = "config",
        help = "JSON configuration file, as given to build"
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        short = "f",
        long = "field",
        number_of_values = 1,
        help = "candidate field, by priority (repeatable)"
    )]
    pub fields: Vec<FieldPath>,
    #[structopt(long = "mode", help = "candidate fields mode: first or all")]
    pub mode: Option<Mode>,
    #[structopt(long = "no-nfkc", help = "skip NFKC normalization in previews")]
    pub no_nfkc: bool,
    #[structopt(long = "endpoint", help = "datasets-server endpoint")]
    pub endpoint: Option<String>,
    #[structopt(
        parse(from_os_str),
        long = "local-dir",
        help = "read datasets from this directory instead of the hub"
    )]
    pub local_dir: Option<PathBuf>,
}

impl Inspect {
    /// Same layering as [Build::to_config], without datasets.
    pub fn to_config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)?,
            None => Config::default(),
        };
        if !self.fields.is_empty() {
            config.fields = Some(self.fields.clone());
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.no_nfkc {
            config.nfkc = false;
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(local_dir) = &self.local_dir {
            config.local_dir = Some(local_dir.clone());
        }
        Ok(config)
    }
}
