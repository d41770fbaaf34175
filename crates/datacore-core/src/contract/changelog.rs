//! Project changelog entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Release,
    Milestone,
    Feature,
    Fix,
    Note,
    BreakingChange,
}

impl EntryType {
    pub fn all() -> &'static [EntryType] {
        &[
            EntryType::Release,
            EntryType::Milestone,
            EntryType::Feature,
            EntryType::Fix,
            EntryType::Note,
            EntryType::BreakingChange,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Release => "release",
            EntryType::Milestone => "milestone",
            EntryType::Feature => "feature",
            EntryType::Fix => "fix",
            EntryType::Note => "note",
            EntryType::BreakingChange => "breaking_change",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Release => "Release",
            EntryType::Milestone => "Milestone",
            EntryType::Feature => "Feature",
            EntryType::Fix => "Fix",
            EntryType::Note => "Note",
            EntryType::BreakingChange => "Breaking Change",
        }
    }

    pub fn parse(value: &str) -> Option<EntryType> {
        Self::all().iter().copied().find(|t| t.as_str() == value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub id: u64,
    pub entry_type: EntryType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub entry_date: NaiveDate,
}

/// Form payload for add/update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogDraft {
    pub entry_type: EntryType,
    pub title: String,
    pub description: Option<String>,
    pub version: Option<String>,
    pub entry_date: NaiveDate,
}

impl ChangelogDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "Title is required"));
        }
        if self.entry_type == EntryType::Release
            && self.version.as_deref().is_none_or(|v| v.trim().is_empty())
        {
            return Err(ValidationError::new("version", "Releases need a version"));
        }
        Ok(())
    }
}

impl From<&ChangelogEntry> for ChangelogDraft {
    fn from(entry: &ChangelogEntry) -> Self {
        Self {
            entry_type: entry.entry_type,
            title: entry.title.clone(),
            description: entry.description.clone(),
            version: entry.version.clone(),
            entry_date: entry.entry_date,
        }
    }
}

/// Entries of `filter` type (or all), newest first. Same-day entries keep
/// the higher id first.
pub fn filter_entries(entries: &[ChangelogEntry], filter: Option<EntryType>) -> Vec<&ChangelogEntry> {
    let mut matched: Vec<&ChangelogEntry> = entries
        .iter()
        .filter(|e| filter.is_none_or(|t| e.entry_type == t))
        .collect();
    matched.sort_by(|a, b| b.entry_date.cmp(&a.entry_date).then(b.id.cmp(&a.id)));
    matched
}

/// Group already-sorted entries by month label, e.g. `October 2026`.
pub fn group_by_month<'a>(sorted: &[&'a ChangelogEntry]) -> Vec<(String, Vec<&'a ChangelogEntry>)> {
    let mut groups: Vec<(String, Vec<&'a ChangelogEntry>)> = Vec::new();
    for &entry in sorted {
        let label = entry.entry_date.format("%B %Y").to_string();
        match groups.last_mut() {
            Some((last, items)) if *last == label => items.push(entry),
            _ => groups.push((label, vec![entry])),
        }
    }
    groups
}
