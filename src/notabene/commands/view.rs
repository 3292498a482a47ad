use super::helpers::load_readable;
use crate::error::Result;
use crate::model::{Note, UserId};
use crate::store::DataStore;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &S, note_id: &Uuid, user: UserId) -> Result<Note> {
    load_readable(store, note_id, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotabeneError;
    use crate::store::memory::fixtures::*;

    #[test]
    fn readers_see_the_note() {
        let fixture = StoreFixture::new().with_shared_note("Title", "Body");
        let note = run(&fixture.store, &fixture.note_id(), READER).unwrap();
        assert_eq!(note.title, "Title");
    }

    #[test]
    fn strangers_are_forbidden() {
        let fixture = StoreFixture::new().with_shared_note("Title", "Body");
        assert!(matches!(
            run(&fixture.store, &fixture.note_id(), STRANGER),
            Err(NotabeneError::Forbidden { .. })
        ));
    }
}
