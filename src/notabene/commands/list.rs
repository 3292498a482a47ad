use crate::error::Result;
use crate::model::{Note, UserId};
use crate::store::DataStore;

/// Notes the user can read, most recently updated first.
pub fn run<S: DataStore>(store: &S, user: UserId) -> Result<Vec<Note>> {
    let mut notes: Vec<Note> = store
        .list_notes()?
        .into_iter()
        .filter(|note| note.can_read(user))
        .collect();
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::*;
    use chrono::Duration;

    #[test]
    fn lists_only_readable_notes() {
        let fixture = StoreFixture::new()
            .with_shared_note("Shared", "Body")
            .with_note("Private", "Body", STRANGER);

        let titles: Vec<String> = run(&fixture.store, READER)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["Shared"]);

        assert_eq!(run(&fixture.store, STRANGER).unwrap().len(), 1);
        assert!(run(&fixture.store, UserId(99)).unwrap().is_empty());
    }

    #[test]
    fn newest_update_first() {
        let mut fixture = StoreFixture::new();
        let mut old = Note::new("Old".into(), "Body".into(), OWNER);
        old.updated_at = old.updated_at - Duration::hours(1);
        let new = Note::new("New".into(), "Body".into(), OWNER);
        fixture.store.save_note(&old).unwrap();
        fixture.store.save_note(&new).unwrap();

        let titles: Vec<String> = run(&fixture.store, OWNER)
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }
}
