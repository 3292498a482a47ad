//! # Version History Types
//!
//! A note's history has two kinds of entries, and the types keep them apart:
//!
//! - [`Version`]: a stored snapshot. Immutable once created; it only exposes
//!   read accessors and the store has no update operation for it.
//! - [`CurrentVersion`]: the synthesized "you are here" entry built from the
//!   live note on every read. It is never persisted.
//!
//! [`HistoryEntry`] is the union handed to callers.
//!
//! ## Numbering
//!
//! Stored numbers start at 1 and strictly increase per note. The synthesized
//! entry always takes the next free number: `max(stored) + 1`, or 1 when the
//! note has no stored history.

use crate::memento::NoteMemento;
use crate::model::{Note, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    note_id: Uuid,
    number: u32,
    title: String,
    content: String,
    readers: BTreeSet<UserId>,
    writers: BTreeSet<UserId>,
    edited_by: UserId,
    note_creator_id: UserId,
    created_at: DateTime<Utc>,
    original_created_at: DateTime<Utc>,
    original_updated_at: DateTime<Utc>,
}

impl Version {
    /// Builds a snapshot from a captured memento. Consumes the memento so the
    /// snapshot owns its collections outright.
    pub fn from_memento(note_id: Uuid, number: u32, memento: NoteMemento, editor: UserId) -> Self {
        let parts = memento.into_parts();
        Self {
            note_id,
            number,
            title: parts.title,
            content: parts.content,
            readers: parts.readers,
            writers: parts.writers,
            edited_by: editor,
            note_creator_id: parts.creator_id,
            created_at: parts.captured_at,
            original_created_at: parts.created_at,
            original_updated_at: parts.updated_at,
        }
    }

    pub fn note_id(&self) -> Uuid {
        self.note_id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn readers(&self) -> &BTreeSet<UserId> {
        &self.readers
    }

    pub fn writers(&self) -> &BTreeSet<UserId> {
        &self.writers
    }

    pub fn edited_by(&self) -> UserId {
        self.edited_by
    }

    pub fn note_creator_id(&self) -> UserId {
        self.note_creator_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn original_created_at(&self) -> DateTime<Utc> {
        self.original_created_at
    }

    pub fn original_updated_at(&self) -> DateTime<Utc> {
        self.original_updated_at
    }

    /// Same title and content, compared exactly.
    pub fn matches_text(&self, title: &str, content: &str) -> bool {
        self.title == title && self.content == content
    }
}

/// The live note presented as the newest history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentVersion {
    view: Version,
    restored_from: Option<u32>,
}

impl CurrentVersion {
    pub fn version(&self) -> &Version {
        &self.view
    }

    pub fn number(&self) -> u32 {
        self.view.number
    }

    /// Number of the stored snapshot whose title and content the live note
    /// currently matches, if any.
    pub fn restored_from(&self) -> Option<u32> {
        self.restored_from
    }

    pub fn is_restored(&self) -> bool {
        self.restored_from.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Current(CurrentVersion),
    Stored(Version),
}

impl HistoryEntry {
    pub fn version(&self) -> &Version {
        match self {
            HistoryEntry::Current(current) => current.version(),
            HistoryEntry::Stored(version) => version,
        }
    }

    pub fn number(&self) -> u32 {
        self.version().number()
    }

    pub fn is_current(&self) -> bool {
        matches!(self, HistoryEntry::Current(_))
    }

    pub fn restored_from(&self) -> Option<u32> {
        match self {
            HistoryEntry::Current(current) => current.restored_from(),
            HistoryEntry::Stored(_) => None,
        }
    }
}

/// Number the next stored snapshot (and the synthesized entry) takes.
pub fn next_version_number(stored: &[Version]) -> u32 {
    stored.iter().map(Version::number).max().map_or(1, |max| max + 1)
}

/// Derives the synthesized current entry from the live note and its stored
/// history. Matching searches newest first, so the most recent identical
/// snapshot wins.
pub fn current_entry(note: &Note, stored: &[Version]) -> CurrentVersion {
    let mut by_newest: Vec<&Version> = stored.iter().collect();
    by_newest.sort_by(|a, b| b.number.cmp(&a.number));
    let restored_from = by_newest
        .iter()
        .find(|v| v.matches_text(&note.title, &note.content))
        .map(|v| v.number);

    let mut readers = note.readers.clone();
    let mut writers = note.writers.clone();
    if !note.creator_id.is_none() {
        readers.insert(note.creator_id);
        writers.insert(note.creator_id);
    }

    CurrentVersion {
        view: Version {
            note_id: note.id,
            number: next_version_number(stored),
            title: note.title.clone(),
            content: note.content.clone(),
            readers,
            writers,
            edited_by: note.creator_id,
            note_creator_id: note.creator_id,
            created_at: note.updated_at,
            original_created_at: note.created_at,
            original_updated_at: note.updated_at,
        },
        restored_from,
    }
}
