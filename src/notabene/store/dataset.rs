//! The unit a backend loads and saves, and the record operations over it.

use super::Order;
use crate::error::{NotabeneError, Result};
use crate::model::Note;
use crate::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub generation: u64,
    #[serde(default)]
    pub notes: BTreeMap<Uuid, Note>,
    /// Kept sorted ascending by number.
    #[serde(default)]
    pub versions: BTreeMap<Uuid, Vec<Version>>,
}

impl Dataset {
    pub fn save_note(&mut self, note: &Note) -> Result<u64> {
        if let Some(stored) = self.notes.get(&note.id) {
            if stored.revision != note.revision {
                return Err(NotabeneError::Conflict(format!(
                    "note {} was modified (revision {} expected, found {})",
                    note.id, note.revision, stored.revision
                )));
            }
        }
        let mut saved = note.clone();
        saved.revision = note.revision + 1;
        let revision = saved.revision;
        self.notes.insert(note.id, saved);
        Ok(revision)
    }

    pub fn get_note(&self, id: &Uuid) -> Option<Note> {
        self.notes.get(id).cloned()
    }

    pub fn list_notes(&self) -> Vec<Note> {
        self.notes.values().cloned().collect()
    }

    pub fn delete_note(&mut self, id: &Uuid) -> bool {
        self.notes.remove(id).is_some()
    }

    pub fn insert_version(&mut self, version: &Version) -> Result<()> {
        let list = self.versions.entry(version.note_id()).or_default();
        match list.binary_search_by_key(&version.number(), Version::number) {
            Ok(_) => Err(NotabeneError::Store(format!(
                "version {} already exists for note {}",
                version.number(),
                version.note_id()
            ))),
            Err(pos) => {
                list.insert(pos, version.clone());
                Ok(())
            }
        }
    }

    pub fn find_version(&self, note_id: &Uuid, number: u32) -> Option<Version> {
        self.versions
            .get(note_id)?
            .iter()
            .find(|v| v.number() == number)
            .cloned()
    }

    pub fn list_versions(&self, note_id: &Uuid, order: Order) -> Vec<Version> {
        let mut list = self.versions.get(note_id).cloned().unwrap_or_default();
        if order == Order::Descending {
            list.reverse();
        }
        list
    }

    pub fn count_versions(&self, note_id: &Uuid) -> usize {
        self.versions.get(note_id).map_or(0, Vec::len)
    }

    pub fn delete_versions(&mut self, note_id: &Uuid, numbers: &[u32]) -> usize {
        let Some(list) = self.versions.get_mut(note_id) else {
            return 0;
        };
        let before = list.len();
        list.retain(|v| !numbers.contains(&v.number()));
        let removed = before - list.len();
        if list.is_empty() {
            self.versions.remove(note_id);
        }
        removed
    }

    pub fn delete_all_versions(&mut self, note_id: &Uuid) -> usize {
        self.versions.remove(note_id).map_or(0, |list| list.len())
    }
}
