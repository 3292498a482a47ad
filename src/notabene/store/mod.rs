//! # Storage Layer
//!
//! Persistence for two record kinds: live notes and stored versions. The
//! [`DataStore`] trait is what the command layer talks to; it never sees files.
//!
//! ## Layout
//!
//! Storage is split in two, the same way for every implementation:
//!
//! 1. [`backend::StorageBackend`]: the "how". Loads and saves a whole
//!    [`dataset::Dataset`] at once. Saving MUST be atomic.
//! 2. [`note_store::NoteStore`]: the "what". Record-level operations, version
//!    ordering, revision checks and transactions, generic over the backend.
//!
//! ## Transactions
//!
//! [`DataStore::transaction`] runs a closure against a staged copy of the
//! dataset. Nothing reaches the backend until the closure returns `Ok`, and
//! then everything is written in a single save. An `Err` discards the stage.
//!
//! ## Concurrency Checks
//!
//! - Every write, and every transaction from `begin` to `commit`/`rollback`,
//!   holds the backend's exclusive lock. For files that is an advisory lock
//!   on `.notabene.lock` in the data directory, so writers in different
//!   processes queue up instead of overwriting each other.
//! - Every note carries a `revision`. [`DataStore::save_note`] rejects a note
//!   whose revision does not match the stored one, then bumps it.
//! - Every dataset carries a `generation`, bumped on each save. A commit whose
//!   starting generation is no longer the stored one is rejected, so a second
//!   process cannot silently overwrite the first.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON file in the data directory.
//! - [`memory::InMemoryStore`]: for tests and embedding.
//!
//! ```text
//! <data dir>/
//! ├── notabene.json   # notes and versions
//! ├── notabene.toml   # optional configuration
//! └── .notabene.lock  # writer lock
//! ```

use crate::error::Result;
use crate::model::Note;
use crate::version::Version;
use uuid::Uuid;

pub mod backend;
pub mod dataset;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod note_store;

/// Sort direction for version queries, by version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Abstract interface for note and version storage.
pub trait DataStore {
    // --- Live notes ---

    /// Create or update a note. The stored revision must equal
    /// `note.revision`; returns the new revision.
    fn save_note(&mut self, note: &Note) -> Result<u64>;

    fn get_note(&self, id: &Uuid) -> Result<Option<Note>>;

    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Returns false if there was no such note.
    fn delete_note(&mut self, id: &Uuid) -> Result<bool>;

    // --- Stored versions ---

    /// Fails if the note already has a version with this number.
    fn insert_version(&mut self, version: &Version) -> Result<()>;

    fn find_version(&self, note_id: &Uuid, number: u32) -> Result<Option<Version>>;

    fn list_versions(&self, note_id: &Uuid, order: Order) -> Result<Vec<Version>>;

    fn count_versions(&self, note_id: &Uuid) -> Result<usize>;

    /// Deletes the given version numbers; returns how many existed.
    fn delete_versions(&mut self, note_id: &Uuid, numbers: &[u32]) -> Result<usize>;

    fn delete_all_versions(&mut self, note_id: &Uuid) -> Result<usize>;

    // --- Transactions ---

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self);

    /// Runs `work` as one unit: committed if it returns `Ok`, rolled back
    /// otherwise.
    fn transaction<T, F>(&mut self, work: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.begin()?;
        match work(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }
}
