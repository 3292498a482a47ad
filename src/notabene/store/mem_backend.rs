use super::backend::StorageBackend;
use super::dataset::Dataset;
use crate::error::{NotabeneError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since a store is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    data: RefCell<Dataset>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper standing in for a write by another process.
    pub fn bump_generation(&self) {
        self.data.borrow_mut().generation += 1;
    }
}

impl StorageBackend for MemBackend {
    /// A `MemBackend` is never shared between stores.
    type Lock = ();

    fn lock(&self) -> Result<()> {
        Ok(())
    }

    fn load(&self) -> Result<Dataset> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(NotabeneError::Store("Simulated write error".to_string()));
        }
        *self.data.borrow_mut() = dataset.clone();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://notabene")
    }
}
