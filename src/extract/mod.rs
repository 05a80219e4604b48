/*! Field extraction

Locates the conversational text inside a [DatasetRecord].

A [FieldExtractor] holds a [FieldSelection]: a prioritized list of [FieldPath]s and a [Mode].
- [Mode::First] returns the units of the first path that yields text (this is the default).
- [Mode::All] concatenates the units of every path, in path order.

When nothing matched and auto-detection is on, every key of the record that looks textual
(containing `text`, `utter` or `dialog`) contributes its units, in record order.

Known datasets get a built-in selection, see [profiles].
!*/
mod path;
pub mod profiles;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::record::DatasetRecord;
pub use path::FieldPath;

/// A single extracted utterance or turn, before normalization.
pub type TextUnit = String;

/// Key fragments that mark a field as textual during auto-detection.
const TEXTUAL_KEY_HINTS: [&str; 3] = ["text", "utter", "dialog"];

/// How candidates of a [FieldSelection] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    First,
    All,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::First
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(Mode::First),
            "all" => Ok(Mode::All),
            other => Err(Error::Custom(format!(
                "unknown extraction mode {:?} (expected first or all)",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::First => write!(f, "first"),
            Mode::All => write!(f, "all"),
        }
    }
}

/// Prioritized candidate fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub candidates: Vec<FieldPath>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_auto_detect")]
    pub auto_detect: bool,
}

fn default_auto_detect() -> bool {
    true
}

impl FieldSelection {
    pub fn new(candidates: Vec<FieldPath>, mode: Mode) -> Self {
        Self {
            candidates,
            mode,
            auto_detect: true,
        }
    }

    /// Build a selection from field path strings.
    pub fn from_names<S: AsRef<str>>(names: &[S], mode: Mode) -> Result<Self, Error> {
        let candidates = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<FieldPath>, Error>>()?;
        Ok(Self::new(candidates, mode))
    }

    pub fn with_auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        profiles::default_selection()
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Fields that contributed, in order.
    pub fields: Vec<String>,
    /// Non-blank text units, in order.
    pub units: Vec<TextUnit>,
}

/// Extracts [TextUnit]s from records.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    selection: FieldSelection,
}

impl FieldExtractor {
    pub fn new(selection: FieldSelection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Get the text units of a record.
    ///
    /// Returns [None] when no candidate (nor, if enabled, auto-detected field) yields
    /// a string with visible content.
    pub fn extract(&self, record: &DatasetRecord) -> Option<Extracted> {
        let mut fields = Vec::new();
        let mut units = Vec::new();

        for candidate in &self.selection.candidates {
            let before = units.len();
            candidate.collect_texts(record, &mut units);
            if units.len() > before {
                fields.push(candidate.to_string());
                if self.selection.mode == Mode::First {
                    break;
                }
            }
        }

        if units.is_empty() && self.selection.auto_detect {
            for (key, found) in Self::auto_detect(record) {
                debug!("auto-detected textual field {:?}", key);
                fields.push(key.to_string());
                units.extend(found);
            }
        }

        if units.is_empty() {
            None
        } else {
            Some(Extracted { fields, units })
        }
    }

    /// Every key that looks textual and holds text, in record order.
    fn auto_detect(record: &DatasetRecord) -> Vec<(&str, Vec<TextUnit>)> {
        record
            .keys()
            .filter(|key| {
                let key = key.to_lowercase();
                TEXTUAL_KEY_HINTS.iter().any(|hint| key.contains(hint))
            })
            .filter_map(|key| {
                let texts = FieldPath::from_str(key).ok()?.texts(record);
                if texts.is_empty() {
                    None
                } else {
                    Some((key, texts))
                }
            })
            .collect()
    }
}
