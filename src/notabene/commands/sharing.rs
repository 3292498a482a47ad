//! Granting and revoking access. Only the creator may change who can read or
//! write a note, and the creator's own access is fixed.
//!
//! Sharing touches the live note only and creates no version. The next
//! snapshot records whatever access the note has at that time.

use super::helpers::{ensure_creator, load_note};
use crate::error::{NotabeneError, Result};
use crate::model::{Note, UserId};
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
        }
    }
}

/// Writers are always readers too.
pub fn grant<S: DataStore>(
    store: &mut S,
    note_id: &Uuid,
    owner: UserId,
    target: UserId,
    access: Access,
) -> Result<Note> {
    if target.is_none() {
        return Err(NotabeneError::Validation("Cannot share with no user".into()));
    }
    let mut note = load_note(store, note_id)?;
    ensure_creator(&note, owner)?;

    let changed = match access {
        Access::Read => note.add_reader(target),
        Access::Write => note.add_writer(target),
    };
    if changed {
        note.revision = store.save_note(&note)?;
        info!(note = %note_id, user = %target, %access, "access granted");
    }
    Ok(note)
}

/// Revoking read also revokes write.
pub fn revoke<S: DataStore>(
    store: &mut S,
    note_id: &Uuid,
    owner: UserId,
    target: UserId,
    access: Access,
) -> Result<Note> {
    let mut note = load_note(store, note_id)?;
    ensure_creator(&note, owner)?;

    let changed = match access {
        Access::Read => note.remove_reader(target)?,
        Access::Write => note.remove_writer(target)?,
    };
    if changed {
        note.revision = store.save_note(&note)?;
        info!(note = %note_id, user = %target, %access, "access revoked");
    }
    Ok(note)
}
