use super::helpers::{ensure_creator, load_note};
use crate::error::Result;
use crate::model::UserId;
use crate::store::DataStore;
use tracing::info;
use uuid::Uuid;

/// Deletes a note and its whole version history. Creator only.
/// Returns how many stored versions went with it.
pub fn run<S: DataStore>(store: &mut S, note_id: &Uuid, user: UserId) -> Result<usize> {
    let note = load_note(store, note_id)?;
    ensure_creator(&note, user)?;

    let removed = store.transaction(|s| {
        let removed = delete_version_history(s, note_id)?;
        s.delete_note(note_id)?;
        Ok(removed)
    })?;
    info!(note = %note_id, versions = removed, "note deleted");
    Ok(removed)
}

/// Drops every stored version of a note, leaving the live note alone.
pub fn delete_version_history<S: DataStore>(store: &mut S, note_id: &Uuid) -> Result<usize> {
    let removed = store.delete_all_versions(note_id)?;
    info!(note = %note_id, versions = removed, "version history deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{update, Settings};
    use crate::error::NotabeneError;
    use crate::store::memory::fixtures::*;

    #[test]
    fn delete_cascades_to_history() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        let settings = Settings::default();
        update::run(&mut fixture.store, &settings, &id, "B".into(), "Y".into(), OWNER).unwrap();
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 1);

        assert_eq!(run(&mut fixture.store, &id, OWNER).unwrap(), 1);
        assert!(fixture.store.get_note(&id).unwrap().is_none());
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 0);
    }

    #[test]
    fn failed_delete_keeps_note_and_history() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        let settings = Settings::default();
        update::run(&mut fixture.store, &settings, &id, "B".into(), "Y".into(), OWNER).unwrap();

        fixture.store.set_simulate_write_error(true);
        assert!(run(&mut fixture.store, &id, OWNER).is_err());
        fixture.store.set_simulate_write_error(false);

        assert!(fixture.store.get_note(&id).unwrap().is_some());
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 1);
    }

    #[test]
    fn only_creator_deletes() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        assert!(matches!(
            run(&mut fixture.store, &id, WRITER),
            Err(NotabeneError::Forbidden { .. })
        ));
        assert!(matches!(
            run(&mut fixture.store, &uuid::Uuid::new_v4(), OWNER),
            Err(NotabeneError::NoteNotFound(_))
        ));
        assert!(fixture.store.get_note(&id).unwrap().is_some());
    }

    #[test]
    fn history_can_be_cleared_alone() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        let settings = Settings::default();
        update::run(&mut fixture.store, &settings, &id, "B".into(), "Y".into(), OWNER).unwrap();
        update::run(&mut fixture.store, &settings, &id, "C".into(), "Z".into(), OWNER).unwrap();

        assert_eq!(delete_version_history(&mut fixture.store, &id).unwrap(), 2);
        assert_eq!(fixture.store.get_note(&id).unwrap().unwrap().title, "C");
    }
}
