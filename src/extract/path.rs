//! Dotted field paths.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::normalize::is_blank;
use crate::record::DatasetRecord;

/// Path to a value inside a record, e.g. `utterances.candidates`.
///
/// Each segment is a key lookup in an object. When a list is met before the
/// last segment, the rest of the path is applied to every element, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Collect the non-blank strings addressed by this path, in order.
    pub fn collect_texts(&self, record: &DatasetRecord, out: &mut Vec<String>) {
        if let Some(root) = record.get(&self.segments[0]) {
            walk(root, &self.segments[1..], out);
        }
    }

    /// Convenience wrapper around [FieldPath::collect_texts].
    pub fn texts(&self, record: &DatasetRecord) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(record, &mut out);
        out
    }
}

fn walk(value: &Value, rest: &[String], out: &mut Vec<String>) {
    let (head, tail) = match rest.split_first() {
        Some(split) => split,
        None => return flatten(value, out),
    };

    match value {
        Value::Object(map) => {
            if let Some(v) = map.get(head) {
                walk(v, tail, out);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| walk(item, rest, out)),
        _ => (),
    }
}

/// Strings are kept if they hold something normalization keeps,
/// lists are flattened, anything else is ignored.
fn flatten(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) if has_text(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| flatten(item, out)),
        _ => (),
    }
}

pub(crate) fn has_text(s: &str) -> bool {
    s.chars().any(|c| !is_blank(c))
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.trim().split('.').map(String::from).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::Custom(format!("invalid field path: {:?}", s)));
        }
        Ok(Self { segments })
    }
}

impl TryFrom<String> for FieldPath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldPath> for String {
    fn from(p: FieldPath) -> String {
        p.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {

    use serde_json::json;

    use super::*;

    fn record(v: Value) -> DatasetRecord {
        DatasetRecord::try_from(v).unwrap()
    }

    #[test]
    fn parse() {
        let p: FieldPath = "utterances.candidates".parse().unwrap();
        assert_eq!(p.to_string(), "utterances.candidates");
        assert!("".parse::<FieldPath>().is_err());
        assert!("a..b".parse::<FieldPath>().is_err());
        assert!(".a".parse::<FieldPath>().is_err());
    }

    #[test]
    fn plain_string() {
        let p: FieldPath = "text".parse().unwrap();
        let r = record(json!({"text": "  Hello  "}));
        assert_eq!(p.texts(&r), vec!["  Hello  "]);
    }

    #[test]
    fn blank_and_non_strings_ignored() {
        let p: FieldPath = "text".parse().unwrap();
        assert!(p.texts(&record(json!({"text": "   "}))).is_empty());
        assert!(p.texts(&record(json!({"text": 42}))).is_empty());
        assert!(p.texts(&record(json!({"text": null}))).is_empty());
        assert!(p.texts(&record(json!({"text": {"a": "b"}}))).is_empty());
    }

    #[test]
    fn control_only_strings_ignored() {
        let p: FieldPath = "dialog".parse().unwrap();
        let r = record(json!({"dialog": ["\u{0007}", "\u{0000} \u{001F}", "Hi"]}));
        assert_eq!(p.texts(&r), vec!["Hi"]);
    }

    #[test]
    fn nested_lists_flattened_in_order() {
        let p: FieldPath = "dialog".parse().unwrap();
        let r = record(json!({"dialog": [["a", "b"], "c", [1, ["d"]], ""]}));
        assert_eq!(p.texts(&r), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn path_through_list_of_objects() {
        let p: FieldPath = "utterances.candidates".parse().unwrap();
        let r = record(json!({
            "utterances": [
                {"candidates": ["c1", "c2"], "history": ["h1"]},
                {"candidates": ["c3"]},
                {"other": "x"},
            ]
        }));
        assert_eq!(p.texts(&r), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn missing_field() {
        let p: FieldPath = "a.b".parse().unwrap();
        assert!(p.texts(&record(json!({"a": "flat"}))).is_empty());
        assert!(p.texts(&record(json!({"b": "x"}))).is_empty());
    }

    #[test]
    fn serde_as_string() {
        let p: FieldPath = serde_json::from_value(json!("a.b")).unwrap();
        assert_eq!(serde_json::to_value(&p).unwrap(), json!("a.b"));
        assert!(serde_json::from_value::<FieldPath>(json!("a.")).is_err());
    }
}
