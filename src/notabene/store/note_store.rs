use super::backend::StorageBackend;
use super::dataset::Dataset;
use super::{DataStore, Order};
use crate::error::{NotabeneError, Result};
use crate::model::Note;
use crate::version::Version;
use std::path::PathBuf;
use tracing::{debug, warn};
use uuid::Uuid;

/// Changes staged by an open transaction, with the backend lock held until
/// commit or rollback.
struct Staged<L> {
    base_generation: u64,
    data: Dataset,
    _lock: L,
}

pub struct NoteStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    staged: Option<Staged<B::Lock>>,
}

impl<B: StorageBackend> NoteStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            staged: None,
        }
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn in_transaction(&self) -> bool {
        self.staged.is_some()
    }

    /// Runs a read against the staged data if a transaction is open, else
    /// against a fresh load.
    fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> Result<T> {
        match &self.staged {
            Some(staged) => Ok(f(&staged.data)),
            None => Ok(f(&self.backend.load()?)),
        }
    }

    /// Applies a write to the stage, or locks, loads, applies and saves in
    /// one go when no transaction is open.
    fn write<T>(&mut self, f: impl FnOnce(&mut Dataset) -> Result<T>) -> Result<T> {
        if let Some(staged) = self.staged.as_mut() {
            return f(&mut staged.data);
        }
        let _lock = self.backend.lock()?;
        let mut data = self.backend.load()?;
        let value = f(&mut data)?;
        data.generation += 1;
        self.backend.save(&data)?;
        Ok(value)
    }
}

impl<B: StorageBackend> DataStore for NoteStore<B> {
    fn save_note(&mut self, note: &Note) -> Result<u64> {
        self.write(|data| data.save_note(note))
    }

    fn get_note(&self, id: &Uuid) -> Result<Option<Note>> {
        self.read(|data| data.get_note(id))
    }

    fn list_notes(&self) -> Result<Vec<Note>> {
        self.read(Dataset::list_notes)
    }

    fn delete_note(&mut self, id: &Uuid) -> Result<bool> {
        self.write(|data| Ok(data.delete_note(id)))
    }

    fn insert_version(&mut self, version: &Version) -> Result<()> {
        self.write(|data| data.insert_version(version))
    }

    fn find_version(&self, note_id: &Uuid, number: u32) -> Result<Option<Version>> {
        self.read(|data| data.find_version(note_id, number))
    }

    fn list_versions(&self, note_id: &Uuid, order: Order) -> Result<Vec<Version>> {
        self.read(|data| data.list_versions(note_id, order))
    }

    fn count_versions(&self, note_id: &Uuid) -> Result<usize> {
        self.read(|data| data.count_versions(note_id))
    }

    fn delete_versions(&mut self, note_id: &Uuid, numbers: &[u32]) -> Result<usize> {
        self.write(|data| Ok(data.delete_versions(note_id, numbers)))
    }

    fn delete_all_versions(&mut self, note_id: &Uuid) -> Result<usize> {
        self.write(|data| Ok(data.delete_all_versions(note_id)))
    }

    fn begin(&mut self) -> Result<()> {
        if self.staged.is_some() {
            return Err(NotabeneError::Store(
                "A transaction is already open".to_string(),
            ));
        }
        let lock = self.backend.lock()?;
        let data = self.backend.load()?;
        debug!(generation = data.generation, "transaction started");
        self.staged = Some(Staged {
            base_generation: data.generation,
            data,
            _lock: lock,
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let Some(mut staged) = self.staged.take() else {
            return Err(NotabeneError::Store("No open transaction".to_string()));
        };
        // still under the lock taken in `begin`
        let stored_generation = self.backend.load()?.generation;
        if stored_generation != staged.base_generation {
            warn!(
                expected = staged.base_generation,
                found = stored_generation,
                "transaction rejected: data changed underneath"
            );
            return Err(NotabeneError::Conflict(
                "data was modified by another writer".to_string(),
            ));
        }
        staged.data.generation = staged.base_generation + 1;
        self.backend.save(&staged.data)?;
        debug!(generation = staged.data.generation, "transaction committed");
        Ok(())
    }

    fn rollback(&mut self) {
        if self.staged.take().is_some() {
            debug!("transaction rolled back");
        }
    }
}
