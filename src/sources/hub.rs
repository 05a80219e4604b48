//! Hugging Face datasets-server source.
//!
//! Uses two endpoints of the datasets-server HTTP API:
//! - `GET {endpoint}/splits?dataset=` lists the configs and splits of a dataset,
//! - `GET {endpoint}/rows?dataset=&config=&split=&offset=&length=` returns a page of rows.
//!
//! Rows are fetched lazily, one page at a time.
use std::collections::VecDeque;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{DatasetSource, Records};
use crate::config::DatasetSpec;
use crate::error::Error;
use crate::record::DatasetRecord;

pub const DEFAULT_ENDPOINT: &str = "https://datasets-server.huggingface.co";

/// Maximum page length accepted by the rows endpoint.
const PAGE_SIZE: usize = 100;

/// A (dataset, config, split) triple, as listed by the splits endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SplitRef {
    pub dataset: String,
    pub config: String,
    pub split: String,
}

#[derive(Debug, Deserialize)]
struct SplitsResponse {
    splits: Vec<SplitRef>,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    #[serde(default)]
    row_idx: Option<usize>,
    #[serde(default)]
    row: Value,
}

#[derive(Debug, Deserialize)]
struct RowsPage {
    rows: Vec<RowEntry>,
    #[serde(default)]
    num_rows_total: Option<usize>,
}

/// holds the endpoint to query and
/// the http client that will make the requests.
pub struct HubSource {
    endpoint: String,
    client: Client,
    token: Option<String>,
}

impl HubSource {
    /// `token` is sent as a bearer token when present.
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self, Error> {
        // fail early on a bad endpoint
        Url::parse(endpoint)?;
        debug!("datasets-server endpoint: {}", endpoint);
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: Client::new(),
            token,
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = Url::parse_with_params(&format!("{}/{}", self.endpoint, route), params)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send()?;

        let status = response.status();
        let body = response.text()?;
        if status == StatusCode::NOT_FOUND {
            return Err(Error::DatasetNotFound(format!("{} ({})", url, body.trim())));
        }
        if !status.is_success() {
            return Err(Error::Custom(format!(
                "datasets-server returned {} for {}: {}",
                status,
                url,
                body.trim()
            )));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// List every config/split of `dataset`.
    pub fn splits(&self, dataset: &str) -> Result<Vec<SplitRef>, Error> {
        let response: SplitsResponse =
            self.get_json("splits", &[("dataset", dataset.to_string())])?;
        Ok(response.splits)
    }

    fn rows_page(&self, split: &SplitRef, offset: usize) -> Result<RowsPage, Error> {
        self.get_json(
            "rows",
            &[
                ("dataset", split.dataset.clone()),
                ("config", split.config.clone()),
                ("split", split.split.clone()),
                ("offset", offset.to_string()),
                ("length", PAGE_SIZE.to_string()),
            ],
        )
    }
}

/// Pick the splits to read.
///
/// Without a config, the first listed config is used.
/// Without splits, every split of the config is read, in listed order.
/// Requested splits are read in the requested order.
pub fn select_splits(spec: &DatasetSpec, listed: Vec<SplitRef>) -> Result<Vec<SplitRef>, Error> {
    let config = match &spec.config {
        Some(config) => config.clone(),
        None => listed
            .first()
            .map(|s| s.config.clone())
            .ok_or_else(|| Error::DatasetNotFound(format!("{}: no splits listed", spec.name)))?,
    };

    let in_config: Vec<SplitRef> = listed.into_iter().filter(|s| s.config == config).collect();
    if in_config.is_empty() {
        return Err(Error::DatasetNotFound(format!(
            "{}: no config named {:?}",
            spec.name, config
        )));
    }

    match &spec.splits {
        None => Ok(in_config),
        Some(wanted) => wanted
            .iter()
            .map(|name| {
                in_config
                    .iter()
                    .find(|s| &s.split == name)
                    .cloned()
                    .ok_or_else(|| {
                        Error::DatasetNotFound(format!(
                            "{}: no split {:?} in config {:?}",
                            spec.name, name, config
                        ))
                    })
            })
            .collect(),
    }
}

impl DatasetSource for HubSource {
    fn records<'a>(&'a self, spec: &DatasetSpec) -> Result<Records<'a>, Error> {
        let splits = select_splits(spec, self.splits(&spec.name)?)?;
        info!(
            "[{}] reading splits {:?}",
            spec.name,
            splits.iter().map(|s| s.split.as_str()).collect::<Vec<_>>()
        );
        Ok(Box::new(HubRows::new(self, splits)))
    }
}

/// Paging state of the split being read.
struct Cursor {
    split: SplitRef,
    offset: usize,
    total: Option<usize>,
}

/// Lazy iterator over the rows of a list of splits.
///
/// Stops after the first request error, which is yielded.
struct HubRows<'a> {
    source: &'a HubSource,
    pending: VecDeque<SplitRef>,
    current: Option<Cursor>,
    buffer: VecDeque<RowEntry>,
    failed: bool,
}

impl<'a> HubRows<'a> {
    fn new(source: &'a HubSource, splits: Vec<SplitRef>) -> Self {
        Self {
            source,
            pending: splits.into(),
            current: None,
            buffer: VecDeque::new(),
            failed: false,
        }
    }
}

fn row_to_record(entry: RowEntry) -> Result<DatasetRecord, Error> {
    DatasetRecord::try_from(entry.row).map_err(|e| match e {
        Error::MalformedRecord(reason) => {
            Error::MalformedRecord(format!("row {:?}: {}", entry.row_idx, reason))
        }
        e => e,
    })
}

impl<'a> Iterator for HubRows<'a> {
    type Item = Result<DatasetRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Some(row_to_record(entry));
            }
            if self.failed {
                return None;
            }

            let mut cursor = match self.current.take() {
                Some(cursor) => cursor,
                None => {
                    let split = self.pending.pop_front()?;
                    info!("[{}] reading {}/{}", split.dataset, split.config, split.split);
                    Cursor {
                        split,
                        offset: 0,
                        total: None,
                    }
                }
            };

            if matches!(cursor.total, Some(total) if cursor.offset >= total) {
                continue;
            }

            let page = match self.source.rows_page(&cursor.split, cursor.offset) {
                Ok(page) => page,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            };

            if page.rows.is_empty() {
                continue;
            }

            cursor.offset += page.rows.len();
            cursor.total = page.num_rows_total.or(cursor.total);
            self.buffer.extend(page.rows);
            self.current = Some(cursor);
        }
    }
}
