//! # Notabene Architecture
//!
//! Notabene is the **version history engine** of a collaborative note editor,
//! shipped as a UI-agnostic library with a thin CLI client on top.
//!
//! Every edit keeps the note's previous state as an immutable snapshot. A note
//! can be restored to any kept snapshot without losing what came after, and
//! any two entries of its history can be diffed character by character.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Authenticates the caller, guards reads                   │
//! │  - Returns serializable DTOs                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Edit, restore, history, compare, sharing                 │
//! │  - Drives the VersionManager (manager.rs)                   │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait with transactions               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`diff`] sits beside the layers: a pure function of two strings, used by
//! the compare command.
//!
//! ## History Model
//!
//! - Stored versions are numbered 1, 2, 3, … per note and never renumbered.
//! - At most `max_versions` (default 10) are kept; the oldest go first.
//! - The live note appears at the head of every history listing as a
//!   synthesized entry numbered one past the newest stored version. It is
//!   flagged as restored when its title and content match a stored version.
//! - A restore first stores the live state, then copies the target over it.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Diagnostics go through `tracing`; the binary decides
//! where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): thorough unit tests against
//!    `InMemoryStore`. This is where most testing lives.
//! 2. **API** (`api.rs`): authentication, read guards, DTO shape.
//! 3. **CLI** (`tests/cli.rs`): end to end through the binary.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`manager`]: Version creation and retention
//! - [`memento`]: Captured note state
//! - [`version`]: Stored versions and the synthesized current entry
//! - [`diff`]: Character-level diff
//! - [`dto`]: Serializable views for clients
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Notes, users, limits
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod diff;
pub mod dto;
pub mod error;
pub mod manager;
pub mod memento;
pub mod model;
pub mod store;
pub mod version;
