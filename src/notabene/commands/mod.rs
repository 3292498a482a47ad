//! # Command Layer
//!
//! This module contains the **core business logic** of notabene. Each command
//! lives in its own submodule as plain functions over a
//! [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! - Load notes and check the caller's rights on them
//! - Validate titles and contents against the configured limits
//! - Drive the [`VersionManager`] so every change leaves history behind
//! - Return domain types (`Note`, `HistoryEntry`, `Comparison`), never strings
//!
//! Commands do no printing, argument parsing or DTO shaping. Those belong to
//! the CLI and to [`crate::api`].
//!
//! ## Atomic Edits
//!
//! Edit and restore write a snapshot and the live note together inside one
//! [`DataStore::transaction`](crate::store::DataStore::transaction). If either
//! write fails, neither is kept.
//!
//! ## Permission Errors
//!
//! A missing note is always `NoteNotFound`. A note that exists but denies the
//! caller is always `Forbidden`, whatever the operation.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and cover every branch, including the
//! failure paths with `set_simulate_write_error`.
//!
//! ## Command Modules
//!
//! - [`create`]: Create notes
//! - [`view`]: Read one note
//! - [`list`]: Notes a user can read
//! - [`update`]: Edit with history
//! - [`restore`]: Revert to a stored version
//! - [`history`]: Version listing and lookup
//! - [`compare`]: Diff two history entries
//! - [`delete`]: Delete notes and their history
//! - [`sharing`]: Grant and revoke access
//! - [`helpers`]: Shared loading and permission checks

use crate::config::NotabeneConfig;
use crate::manager::VersionManager;
use crate::model::NoteLimits;

pub mod compare;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod history;
pub mod list;
pub mod restore;
pub mod sharing;
pub mod update;
pub mod view;

/// Limits and retention settings the mutating commands work under.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub limits: NoteLimits,
    pub versions: VersionManager,
}

impl From<&NotabeneConfig> for Settings {
    fn from(config: &NotabeneConfig) -> Self {
        Self {
            limits: config.limits(),
            versions: config.version_manager(),
        }
    }
}
