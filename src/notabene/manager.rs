//! # Version Caretaker
//!
//! [`VersionManager`] turns a live note into a stored [`Version`]. It owns the
//! retention cap and is the only place snapshots are created or evicted, apart
//! from the cascade when a note is deleted.
//!
//! Creating a version:
//!
//! 1. Reject a nil note id or a missing editor before touching the store.
//! 2. If the note is at or above the cap, delete the oldest snapshots so that
//!    exactly `cap - 1` remain.
//! 3. Number the new snapshot one past the highest number ever kept. Numbers
//!    are never reused, even after eviction.
//! 4. Capture a memento of the note and store the snapshot built from it.
//!
//! Steps 2 and 4 are separate store writes. Callers that need them coupled with
//! the live-note update run the whole thing inside
//! [`DataStore::transaction`](crate::store::DataStore::transaction).

use crate::error::{NotabeneError, Result};
use crate::model::{Note, UserId};
use crate::store::{DataStore, Order};
use crate::version::{next_version_number, Version};
use tracing::{debug, info};

pub const DEFAULT_MAX_VERSIONS: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct VersionManager {
    max_versions: usize,
}

impl Default for VersionManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VERSIONS)
    }
}

impl VersionManager {
    /// A cap of zero is raised to one.
    pub fn new(max_versions: usize) -> Self {
        Self {
            max_versions: max_versions.max(1),
        }
    }

    pub fn max_versions(&self) -> usize {
        self.max_versions
    }

    pub fn create_version<S: DataStore>(
        &self,
        store: &mut S,
        note: &Note,
        editor: UserId,
    ) -> Result<Version> {
        if note.id.is_nil() {
            return Err(NotabeneError::Validation(
                "Cannot version a note without an id".to_string(),
            ));
        }
        if editor.is_none() {
            return Err(NotabeneError::Validation(
                "An editor is required to create a version".to_string(),
            ));
        }

        let stored = store
            .list_versions(&note.id, Order::Ascending)
            .map_err(storage_failure)?;
        let number = next_version_number(&stored);

        if stored.len() >= self.max_versions {
            let excess = stored.len() - self.max_versions + 1;
            let evicted: Vec<u32> = stored.iter().take(excess).map(Version::number).collect();
            store
                .delete_versions(&note.id, &evicted)
                .map_err(storage_failure)?;
            debug!(note = %note.id, ?evicted, "evicted oldest versions");
        }

        let version = Version::from_memento(note.id, number, note.create_memento(), editor);
        store.insert_version(&version).map_err(storage_failure)?;

        info!(note = %note.id, version = number, editor = %editor, "version created");
        Ok(version)
    }
}

/// Any failure reading or writing snapshots is reported as `Store`.
fn storage_failure(e: NotabeneError) -> NotabeneError {
    match e {
        e @ NotabeneError::Store(_) => e,
        other => NotabeneError::Store(other.to_string()),
    }
}
