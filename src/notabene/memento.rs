//! Captured note state handed from a live note to the version caretaker.
//!
//! A [`NoteMemento`] owns copies of everything it records, so nothing done to
//! the live [`Note`] afterwards can reach a snapshot built from it.

use crate::model::{Note, UserId};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMemento {
    title: String,
    content: String,
    creator_id: UserId,
    readers: BTreeSet<UserId>,
    writers: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    captured_at: DateTime<Utc>,
}

impl NoteMemento {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn creator_id(&self) -> UserId {
        self.creator_id
    }

    pub fn readers(&self) -> &BTreeSet<UserId> {
        &self.readers
    }

    pub fn writers(&self) -> &BTreeSet<UserId> {
        &self.writers
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub(crate) fn into_parts(self) -> MementoParts {
        MementoParts {
            title: self.title,
            content: self.content,
            creator_id: self.creator_id,
            readers: self.readers,
            writers: self.writers,
            created_at: self.created_at,
            updated_at: self.updated_at,
            captured_at: self.captured_at,
        }
    }
}

pub(crate) struct MementoParts {
    pub title: String,
    pub content: String,
    pub creator_id: UserId,
    pub readers: BTreeSet<UserId>,
    pub writers: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub captured_at: DateTime<Utc>,
}

impl Note {
    /// Captures the note's current state. The creator is always part of both
    /// permission sets in the captured copy.
    pub fn create_memento(&self) -> NoteMemento {
        let mut readers = self.readers.clone();
        let mut writers = self.writers.clone();
        if !self.creator_id.is_none() {
            readers.insert(self.creator_id);
            writers.insert(self.creator_id);
        }
        NoteMemento {
            title: self.title.clone(),
            content: self.content.clone(),
            creator_id: self.creator_id,
            readers,
            writers,
            created_at: self.created_at,
            updated_at: self.updated_at,
            captured_at: Utc::now(),
        }
    }
}
