use crate::error::{NotabeneError, Result};
use crate::model::{Note, NoteLimits, UserId};
use crate::store::DataStore;
use tracing::info;

pub fn run<S: DataStore>(
    store: &mut S,
    limits: &NoteLimits,
    title: String,
    content: String,
    creator: UserId,
) -> Result<Note> {
    if creator.is_none() {
        return Err(NotabeneError::Validation(
            "A note needs a creator".to_string(),
        ));
    }
    limits.validate(&title, &content)?;

    let mut note = Note::new(title, content, creator);
    note.revision = store.save_note(&note)?;
    info!(note = %note.id, creator = %creator, "note created");
    Ok(note)
}
