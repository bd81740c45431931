//! Bounded history of processed documents.
//!
//! Most-recent-first, capacity [`HISTORY_CAPACITY`]. Results are shared
//! (`Arc`) with the caller's "last result" and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;

use crate::types::{Mode, ResultShape};

/// Entries retained.
pub const HISTORY_CAPACITY: usize = 3;

/// Characters of the input shown in a history listing.
const EXCERPT_CHARS: usize = 90;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to read history file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse history JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: String,
    pub mode: Mode,
    pub result: Arc<ResultShape>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time.
    pub fn new(input: impl Into<String>, mode: Mode, result: Arc<ResultShape>) -> Self {
        Self {
            input: input.into(),
            mode,
            result,
            timestamp: Utc::now(),
        }
    }

    /// Short preview of the input for listings.
    pub fn excerpt(&self) -> String {
        if self.input.chars().count() <= EXCERPT_CHARS {
            return self.input.clone();
        }
        let mut out: String = self.input.chars().take(EXCERPT_CHARS).collect();
        out.push('…');
        out
    }
}

/// Most-recent-first list of processed documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, evicting the oldest entry beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Entry by position (0 is the most recent).
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a history list. Entries beyond capacity are dropped.
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        let mut history: History = serde_json::from_str(json)?;
        history.entries.truncate(HISTORY_CAPACITY);
        Ok(history)
    }

    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file; a missing file is an empty history.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, HistoryError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), HistoryError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
