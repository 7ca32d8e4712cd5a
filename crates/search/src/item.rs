//! Filterable items and filter criteria

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A search result / filterable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Category, e.g. "internship" or "full-time"
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Item {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: None,
            kind: None,
            status: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Lowercased searchable text
    fn haystack(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}

/// Which filter input a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Term,
    Kind,
    Status,
}

/// Current values of all filter inputs
///
/// Empty kind/status means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub term: String,
    pub kind: Option<String>,
    pub status: Option<String>,
}

impl FilterCriteria {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Store the settled value of one input
    pub fn apply(&mut self, field: FilterField, value: String) {
        match field {
            FilterField::Term => self.term = value,
            FilterField::Kind => self.kind = non_empty(value),
            FilterField::Status => self.status = non_empty(value),
        }
    }

    /// Case-insensitive substring on title + description, exact kind/status
    pub fn matches(&self, item: &Item) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = item.haystack().contains(&term);
        let matches_kind = matches_exact(self.kind.as_deref(), item.kind.as_deref());
        let matches_status = matches_exact(self.status.as_deref(), item.status.as_deref());

        matches_term && matches_kind && matches_status
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn matches_exact(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None | Some("") => true,
        Some(wanted) => actual == Some(wanted),
    }
}

/// In-memory item list
#[derive(Debug, Clone, Default)]
pub struct LocalIndex {
    items: Vec<Item>,
}

impl LocalIndex {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Parse a JSON array of items
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json).context("Invalid item list")?;
        Ok(Self::new(items))
    }

    /// Load a JSON array of items from a file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read items from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Items matching `criteria`, in list order
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| criteria.matches(item))
            .collect()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
