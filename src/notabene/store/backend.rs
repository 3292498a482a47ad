use super::dataset::Dataset;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while NoteStore handles the "what" (records, ordering, transactions).
pub trait StorageBackend {
    /// Exclusive write lock. Released when dropped.
    type Lock;

    /// Blocks until no other writer, in this process or another, holds the
    /// lock. Every load-modify-save cycle runs under it.
    fn lock(&self) -> Result<Self::Lock>;

    /// Load the whole dataset. A store that was never written loads empty.
    fn load(&self) -> Result<Dataset>;

    /// Replace the stored dataset.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, dataset: &Dataset) -> Result<()>;

    /// Where the data lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
