use super::backend::StorageBackend;
use super::dataset::Dataset;
use crate::error::{NotabeneError, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DATA_FILE: &str = "notabene.json";
pub const LOCK_FILE: &str = ".notabene.lock";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotabeneError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    /// The open lock file; closing it releases the advisory lock.
    type Lock = File;

    fn lock(&self) -> Result<File> {
        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(LOCK_FILE))
            .map_err(NotabeneError::Io)?;
        file.lock().map_err(NotabeneError::Io)?;
        Ok(file)
    }

    fn load(&self) -> Result<Dataset> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(Dataset::default());
        }
        let content = fs::read_to_string(data_file).map_err(NotabeneError::Io)?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(NotabeneError::Serialization)?;
        Ok(dataset)
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_string_pretty(dataset).map_err(NotabeneError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".notabene-{}.tmp", Uuid::new_v4()));
        let written =
            fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, self.data_file()));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(NotabeneError::Io(e));
        }
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.data_file()
    }
}
