use super::helpers::load_writable;
use super::Settings;
use crate::error::{NotabeneError, Result};
use crate::model::{Note, UserId};
use crate::store::DataStore;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Edits a note, keeping its pre-edit state as a new stored version.
///
/// An edit that changes neither title nor content is a no-op: no version is
/// written and the stored note is returned as is.
pub fn run<S: DataStore>(
    store: &mut S,
    settings: &Settings,
    note_id: &Uuid,
    title: String,
    content: String,
    editor: UserId,
) -> Result<Note> {
    apply(store, settings, note_id, None, title, content, editor)
}

/// Like [`run`], but fails with `Conflict` unless the note is still at
/// `expected_revision`. For callers that show a note and save it later.
pub fn run_at_revision<S: DataStore>(
    store: &mut S,
    settings: &Settings,
    note_id: &Uuid,
    expected_revision: u64,
    title: String,
    content: String,
    editor: UserId,
) -> Result<Note> {
    apply(
        store,
        settings,
        note_id,
        Some(expected_revision),
        title,
        content,
        editor,
    )
}

fn apply<S: DataStore>(
    store: &mut S,
    settings: &Settings,
    note_id: &Uuid,
    expected_revision: Option<u64>,
    title: String,
    content: String,
    editor: UserId,
) -> Result<Note> {
    let note = load_writable(store, note_id, editor)?;
    if let Some(expected) = expected_revision {
        if note.revision != expected {
            warn!(note = %note_id, expected, found = note.revision, "stale edit rejected");
            return Err(NotabeneError::Conflict(format!(
                "note {} is at revision {}, edit was based on {}",
                note_id, note.revision, expected
            )));
        }
    }
    settings.limits.validate(&title, &content)?;

    if note.title == title && note.content == content {
        debug!(note = %note_id, "edit changes nothing, no version created");
        return Ok(note);
    }

    let updated = store.transaction(|s| {
        let version = settings.versions.create_version(s, &note, editor)?;

        let mut updated = note.clone();
        updated.title = title;
        updated.content = content;
        updated.updated_at = Utc::now();
        updated.current_version = None;
        updated.revision = s.save_note(&updated)?;

        debug!(note = %note_id, kept = version.number(), "pre-edit state stored");
        Ok(updated)
    })?;

    info!(note = %note_id, editor = %editor, revision = updated.revision, "note updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::VersionManager;
    use crate::model::NoteLimits;
    use crate::store::memory::fixtures::*;
    use crate::store::Order;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn edit_stores_pre_edit_state() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();

        let note =
            run(&mut fixture.store, &settings(), &id, "B".into(), "Y".into(), WRITER).unwrap();
        assert_eq!(note.title, "B");
        assert_eq!(note.content, "Y");
        assert!(note.current_version.is_none());

        let versions = fixture.store.list_versions(&id, Order::Ascending).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].number(), 1);
        assert_eq!(versions[0].title(), "A");
        assert_eq!(versions[0].content(), "X");
        assert_eq!(versions[0].edited_by(), WRITER);
        assert_eq!(fixture.store.get_note(&id).unwrap().unwrap(), note);
    }

    #[test]
    fn unchanged_edit_creates_no_version() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        let before = fixture.store.get_note(&id).unwrap().unwrap();

        let note =
            run(&mut fixture.store, &settings(), &id, "A".into(), "X".into(), OWNER).unwrap();
        assert_eq!(note, before);
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 0);
    }

    #[test]
    fn title_only_change_counts() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        run(&mut fixture.store, &settings(), &id, "A2".into(), "X".into(), OWNER).unwrap();
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 1);
    }

    #[test]
    fn readers_and_strangers_cannot_edit() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        for user in [READER, STRANGER] {
            assert!(matches!(
                run(&mut fixture.store, &settings(), &id, "B".into(), "Y".into(), user),
                Err(NotabeneError::Forbidden { .. })
            ));
        }
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 0);
    }

    #[test]
    fn missing_note_is_not_found() {
        let mut fixture = StoreFixture::new();
        assert!(matches!(
            run(&mut fixture.store, &settings(), &Uuid::new_v4(), "B".into(), "Y".into(), OWNER),
            Err(NotabeneError::NoteNotFound(_))
        ));
    }

    #[test]
    fn invalid_text_is_rejected_before_snapshot() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        let tight = Settings {
            limits: NoteLimits {
                title_max: 5,
                content_max: 5,
            },
            versions: VersionManager::default(),
        };
        assert!(matches!(
            run(&mut fixture.store, &tight, &id, "Too long".into(), "Y".into(), OWNER),
            Err(NotabeneError::Validation(_))
        ));
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 0);
    }

    #[test]
    fn failed_save_leaves_no_snapshot() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        fixture.store.set_simulate_write_error(true);

        assert!(run(&mut fixture.store, &settings(), &id, "B".into(), "Y".into(), OWNER).is_err());

        fixture.store.set_simulate_write_error(false);
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 0);
        assert_eq!(fixture.store.get_note(&id).unwrap().unwrap().title, "A");
    }

    #[test]
    fn stale_revision_conflicts() {
        let mut fixture = StoreFixture::new().with_shared_note("A", "X");
        let id = fixture.note_id();
        let seen = fixture.store.get_note(&id).unwrap().unwrap().revision;

        let note = run_at_revision(
            &mut fixture.store,
            &settings(),
            &id,
            seen,
            "B".into(),
            "Y".into(),
            OWNER,
        )
        .unwrap();
        assert_eq!(note.revision, seen + 1);

        assert!(matches!(
            run_at_revision(
                &mut fixture.store,
                &settings(),
                &id,
                seen,
                "C".into(),
                "Z".into(),
                WRITER,
            ),
            Err(NotabeneError::Conflict(_))
        ));
        assert_eq!(fixture.store.count_versions(&id).unwrap(), 1);
    }

    #[test]
    fn cap_holds_across_many_edits() {
        let mut fixture = StoreFixture::new().with_shared_note("T", "0");
        let id = fixture.note_id();
        let capped = Settings {
            limits: NoteLimits::default(),
            versions: VersionManager::new(3),
        };
        for i in 1..=7 {
            run(&mut fixture.store, &capped, &id, "T".into(), i.to_string(), OWNER).unwrap();
        }
        let numbers: Vec<u32> = fixture
            .store
            .list_versions(&id, Order::Ascending)
            .unwrap()
            .iter()
            .map(|v| v.number())
            .collect();
        assert_eq!(numbers, vec![5, 6, 7]);
    }
}
