use super::fs_backend::FsBackend;
use super::note_store::NoteStore;
use std::path::PathBuf;

pub type FileStore = NoteStore<FsBackend>;

impl FileStore {
    /// Store rooted at `root`; the directory is created on first write.
    pub fn new(root: PathBuf) -> Self {
        NoteStore::with_backend(FsBackend::new(root))
    }
}
