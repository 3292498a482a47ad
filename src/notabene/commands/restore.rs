use super::helpers::load_writable;
use super::Settings;
use crate::error::{NotabeneError, Result};
use crate::model::{Note, UserId};
use crate::store::DataStore;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

/// Reverts a note to a stored version.
///
/// The current state is always stored first, even when it already equals the
/// target, so a restore costs one history slot and can itself be undone.
/// Title, content and access lists come from the target; the creator keeps
/// full access regardless.
pub fn run<S: DataStore>(
    store: &mut S,
    settings: &Settings,
    note_id: &Uuid,
    number: u32,
    editor: UserId,
) -> Result<Note> {
    let note = load_writable(store, note_id, editor)?;
    let target = store.find_version(note_id, number)?.ok_or_else(|| {
        debug!(note = %note_id, version = number, "restore target not found");
        NotabeneError::VersionNotFound {
            note_id: *note_id,
            number,
        }
    })?;

    let restored = store.transaction(|s| {
        let kept = settings.versions.create_version(s, &note, editor)?;

        let mut restored = note.clone();
        restored.title = target.title().to_string();
        restored.content = target.content().to_string();
        restored.readers = target.readers().clone();
        restored.writers = target.writers().clone();
        restored.ensure_creator_access();
        restored.current_version = None;
        restored.updated_at = Utc::now();
        restored.revision = s.save_note(&restored)?;

        debug!(note = %note_id, kept = kept.number(), "pre-restore state stored");
        Ok(restored)
    })?;

    info!(note = %note_id, version = number, editor = %editor, "note restored");
    Ok(restored)
}
