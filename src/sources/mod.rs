/*! Dataset access

A [DatasetSource] resolves a [DatasetSpec] into a lazy sequence of [DatasetRecord]s.

- [hub::HubSource] reads from the Hugging Face datasets-server,
- [local::LocalSource] reads JSON Lines files from disk,
- [SourceRouter] picks one of them for each dataset.

Errors inside the sequence follow [Error::is_record_level]:
malformed records can be skipped, anything else ends the dataset.
!*/
pub mod hub;
pub mod local;

use std::path::Path;

use log::warn;

use crate::config::{Config, DatasetSpec};
use crate::error::Error;
use crate::record::DatasetRecord;
pub use hub::HubSource;
pub use local::LocalSource;

pub type Records<'a> = Box<dyn Iterator<Item = Result<DatasetRecord, Error>> + 'a>;

pub trait DatasetSource {
    /// Fails if the dataset cannot be resolved.
    fn records<'a>(&'a self, spec: &DatasetSpec) -> Result<Records<'a>, Error>;
}

/// Datasets with a `path`, or every dataset when a local directory is configured, are read from disk.
/// The others come from the hub.
pub struct SourceRouter {
    hub: HubSource,
    local: Option<LocalSource>,
    by_path: LocalSource,
}

impl SourceRouter {
    pub fn new(hub: HubSource, local: Option<LocalSource>) -> Self {
        Self {
            hub,
            local,
            by_path: LocalSource::new(Path::new(".")),
        }
    }

    /// Build from a [Config], `token` being the (optional) hub token.
    pub fn from_config(config: &Config, token: Option<String>) -> Result<Self, Error> {
        if token.is_some() && config.local_dir.is_some() {
            warn!("a hub token is set but datasets are read from a local directory");
        }
        let hub = HubSource::new(&config.endpoint, token)?;
        let local = config.local_dir.as_deref().map(LocalSource::new);
        Ok(Self::new(hub, local))
    }
}

impl DatasetSource for SourceRouter {
    fn records<'a>(&'a self, spec: &DatasetSpec) -> Result<Records<'a>, Error> {
        if spec.path.is_some() {
            self.by_path.records(spec)
        } else if let Some(local) = &self.local {
            local.records(spec)
        } else {
            self.hub.records(spec)
        }
    }
}
