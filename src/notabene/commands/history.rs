use super::helpers::load_note;
use crate::error::{NotabeneError, Result};
use crate::store::{DataStore, Order};
use crate::version::{current_entry, HistoryEntry};
use uuid::Uuid;

/// The synthesized current entry followed by stored versions, newest first.
pub fn version_history<S: DataStore>(store: &S, note_id: &Uuid) -> Result<Vec<HistoryEntry>> {
    let note = load_note(store, note_id)?;
    let stored = store.list_versions(note_id, Order::Descending)?;

    let mut entries = Vec::with_capacity(stored.len() + 1);
    entries.push(HistoryEntry::Current(current_entry(&note, &stored)));
    entries.extend(stored.into_iter().map(HistoryEntry::Stored));
    Ok(entries)
}

/// A stored version by number, or the synthesized current entry when `number`
/// is the next free one.
pub fn get_version<S: DataStore>(store: &S, note_id: &Uuid, number: u32) -> Result<HistoryEntry> {
    let note = load_note(store, note_id)?;
    if let Some(version) = store.find_version(note_id, number)? {
        return Ok(HistoryEntry::Stored(version));
    }

    let stored = store.list_versions(note_id, Order::Descending)?;
    let current = current_entry(&note, &stored);
    if current.number() == number {
        Ok(HistoryEntry::Current(current))
    } else {
        Err(NotabeneError::VersionNotFound {
            note_id: *note_id,
            number,
        })
    }
}
