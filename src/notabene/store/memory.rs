use super::mem_backend::MemBackend;
use super::note_store::NoteStore;

pub type InMemoryStore = NoteStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        NoteStore::with_backend(MemBackend::new())
    }

    /// Switches the backend into failing every save.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.backend.set_simulate_write_error(simulate);
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Note, UserId};
    use crate::store::DataStore;
    use uuid::Uuid;

    pub const OWNER: UserId = UserId(1);
    pub const WRITER: UserId = UserId(2);
    pub const READER: UserId = UserId(3);
    pub const STRANGER: UserId = UserId(4);

    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub notes: Vec<Uuid>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                notes: Vec::new(),
            }
        }

        /// A note owned by [`OWNER`], shared with [`WRITER`] for writing and
        /// [`READER`] for reading.
        pub fn with_shared_note(mut self, title: &str, content: &str) -> Self {
            let mut note = Note::new(title.to_string(), content.to_string(), OWNER);
            note.add_writer(WRITER);
            note.add_reader(READER);
            self.store.save_note(&note).unwrap();
            self.notes.push(note.id);
            self
        }

        pub fn with_note(mut self, title: &str, content: &str, owner: UserId) -> Self {
            let note = Note::new(title.to_string(), content.to_string(), owner);
            self.store.save_note(&note).unwrap();
            self.notes.push(note.id);
            self
        }

        pub fn note_id(&self) -> Uuid {
            self.notes[0]
        }
    }
}
