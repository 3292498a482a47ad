use crate::error::{NotabeneError, Result};
use crate::model::{Note, UserId};
use crate::store::DataStore;
use tracing::{debug, warn};
use uuid::Uuid;

pub fn load_note<S: DataStore>(store: &S, note_id: &Uuid) -> Result<Note> {
    store.get_note(note_id)?.ok_or_else(|| {
        debug!(note = %note_id, "note not found");
        NotabeneError::NoteNotFound(*note_id)
    })
}

fn forbidden(note: &Note, user: UserId, action: &str) -> NotabeneError {
    warn!(note = %note.id, user = %user, action, "permission denied");
    NotabeneError::Forbidden {
        note_id: note.id,
        user,
    }
}

pub fn ensure_can_read(note: &Note, user: UserId) -> Result<()> {
    if note.can_read(user) {
        Ok(())
    } else {
        Err(forbidden(note, user, "read"))
    }
}

pub fn ensure_can_write(note: &Note, user: UserId) -> Result<()> {
    if note.can_write(user) {
        Ok(())
    } else {
        Err(forbidden(note, user, "write"))
    }
}

pub fn ensure_creator(note: &Note, user: UserId) -> Result<()> {
    if note.is_creator(user) {
        Ok(())
    } else {
        Err(forbidden(note, user, "manage"))
    }
}

/// Loads a note and checks the user may write to it.
pub fn load_writable<S: DataStore>(store: &S, note_id: &Uuid, user: UserId) -> Result<Note> {
    let note = load_note(store, note_id)?;
    ensure_can_write(&note, user)?;
    Ok(note)
}

pub fn load_readable<S: DataStore>(store: &S, note_id: &Uuid, user: UserId) -> Result<Note> {
    let note = load_note(store, note_id)?;
    ensure_can_read(&note, user)?;
    Ok(note)
}

/// Resolves a full UUID or a unique prefix of one to a stored note id.
pub fn resolve_note_id<S: DataStore>(store: &S, input: &str) -> Result<Uuid> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Err(NotabeneError::Validation("Note id cannot be empty".into()));
    }
    if let Ok(id) = Uuid::parse_str(&needle) {
        return Ok(id);
    }

    let matches: Vec<Uuid> = store
        .list_notes()?
        .into_iter()
        .map(|note| note.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(NotabeneError::Validation(format!(
            "No note id starts with '{}'",
            input
        ))),
        _ => Err(NotabeneError::Validation(format!(
            "'{}' matches {} notes, use a longer prefix",
            input,
            matches.len()
        ))),
    }
}
