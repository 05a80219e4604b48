//! Built-in field selections for known conversational datasets.
use super::{FieldPath, FieldSelection, Mode};

/// Candidates used for datasets without a profile.
pub const DEFAULT_CANDIDATES: [&str; 7] = [
    "text",
    "utterance",
    "utterances",
    "dialog",
    "dialogue",
    "conversation",
    "content",
];

/// (dataset name, mode, candidates)
const PROFILES: [(&str, Mode, &[&str]); 3] = [
    ("daily_dialog", Mode::First, &["dialog"]),
    (
        "persona_chat",
        Mode::All,
        &["utterances.candidates", "history"],
    ),
    (
        "blended_skill_talk",
        Mode::All,
        &["previous_utterance", "free_messages", "guided_messages"],
    ),
];

fn selection(mode: Mode, names: &[&str]) -> FieldSelection {
    // profile names are static and valid
    let candidates = names
        .iter()
        .filter_map(|name| name.parse::<FieldPath>().ok())
        .collect();
    FieldSelection::new(candidates, mode)
}

pub fn default_selection() -> FieldSelection {
    selection(Mode::First, &DEFAULT_CANDIDATES)
}

/// Strips the owner part of a hub identifier: `org/daily_dialog` -> `daily_dialog`.
fn short_name(dataset: &str) -> &str {
    dataset.rsplit('/').next().unwrap_or(dataset)
}

/// Get the built-in selection for `dataset`, if there is one.
pub fn profile_for(dataset: &str) -> Option<FieldSelection> {
    let name = short_name(dataset);
    PROFILES
        .iter()
        .find(|(profile, _, _)| profile.eq_ignore_ascii_case(name))
        .map(|(_, mode, names)| selection(*mode, names))
}

/// Built-in selection for `dataset`, falling back to [default_selection].
pub fn selection_for(dataset: &str) -> FieldSelection {
    profile_for(dataset).unwrap_or_else(default_selection)
}
