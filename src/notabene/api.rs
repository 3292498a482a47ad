//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every notabene operation, whatever the client.
//!
//! ## Role and Responsibilities
//!
//! - **Authenticates**: every call takes the caller as `Option<UserId>`; `None`
//!   (or the reserved "no user" id) fails with `Unauthorized` before anything
//!   is loaded.
//! - **Guards reads**: history, version lookup and comparison require read
//!   access to the note. The commands themselves do not check it.
//! - **Dispatches** to the matching command function.
//! - **Shapes output** into the serializable DTOs of [`crate::dto`].
//!
//! Business rules live in `commands/*.rs`, not here.
//!
//! ## Generic Over DataStore
//!
//! `NotabeneApi<S: DataStore>` is generic over the storage backend:
//! - Production: `NotabeneApi<FileStore>`
//! - Testing: `NotabeneApi<InMemoryStore>`
//!
//! Mutating methods take `&mut self`, so one facade instance is one writer.
//!
//! ## Testing Strategy
//!
//! API tests check authentication, read guards and DTO shaping. Command logic
//! is tested in the command modules.

use crate::commands::{self, sharing::Access, Settings};
use crate::dto::{ComparisonDto, NoteDto, VersionDto};
use crate::error::{NotabeneError, Result};
use crate::model::UserId;
use crate::store::DataStore;
use uuid::Uuid;

pub struct NotabeneApi<S: DataStore> {
    store: S,
    settings: Settings,
}

impl<S: DataStore> NotabeneApi<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full UUID or unique prefix to a note id.
    pub fn resolve_note(&self, input: &str) -> Result<Uuid> {
        commands::helpers::resolve_note_id(&self.store, input)
    }

    // --- Notes ---

    pub fn create_note(
        &mut self,
        title: String,
        content: String,
        user: Option<UserId>,
    ) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let limits = &self.settings.limits;
        let note = commands::create::run(&mut self.store, limits, title, content, user)?;
        Ok(NoteDto::from_note(&note, user))
    }

    pub fn get_note(&self, note_id: &Uuid, user: Option<UserId>) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let note = commands::view::run(&self.store, note_id, user)?;
        Ok(NoteDto::from_note(&note, user))
    }

    pub fn list_notes(&self, user: Option<UserId>) -> Result<Vec<NoteDto>> {
        let user = authenticated(user)?;
        let notes = commands::list::run(&self.store, user)?;
        Ok(notes.iter().map(|n| NoteDto::from_note(n, user)).collect())
    }

    pub fn edit(
        &mut self,
        note_id: &Uuid,
        title: String,
        content: String,
        user: Option<UserId>,
    ) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let note =
            commands::update::run(&mut self.store, &self.settings, note_id, title, content, user)?;
        Ok(NoteDto::from_note(&note, user))
    }

    pub fn edit_at_revision(
        &mut self,
        note_id: &Uuid,
        expected_revision: u64,
        title: String,
        content: String,
        user: Option<UserId>,
    ) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let note = commands::update::run_at_revision(
            &mut self.store,
            &self.settings,
            note_id,
            expected_revision,
            title,
            content,
            user,
        )?;
        Ok(NoteDto::from_note(&note, user))
    }

    /// Returns how many stored versions were deleted with the note.
    pub fn delete_note(&mut self, note_id: &Uuid, user: Option<UserId>) -> Result<usize> {
        let user = authenticated(user)?;
        commands::delete::run(&mut self.store, note_id, user)
    }

    pub fn share(
        &mut self,
        note_id: &Uuid,
        target: UserId,
        access: Access,
        user: Option<UserId>,
    ) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let note = commands::sharing::grant(&mut self.store, note_id, user, target, access)?;
        Ok(NoteDto::from_note(&note, user))
    }

    pub fn unshare(
        &mut self,
        note_id: &Uuid,
        target: UserId,
        access: Access,
        user: Option<UserId>,
    ) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let note = commands::sharing::revoke(&mut self.store, note_id, user, target, access)?;
        Ok(NoteDto::from_note(&note, user))
    }

    // --- History ---

    /// Current entry first, then stored versions newest first.
    pub fn list_versions(&self, note_id: &Uuid, user: Option<UserId>) -> Result<Vec<VersionDto>> {
        self.ensure_readable(note_id, user)?;
        let entries = commands::history::version_history(&self.store, note_id)?;
        Ok(entries.iter().map(VersionDto::from).collect())
    }

    pub fn get_version(
        &self,
        note_id: &Uuid,
        number: u32,
        user: Option<UserId>,
    ) -> Result<VersionDto> {
        self.ensure_readable(note_id, user)?;
        let entry = commands::history::get_version(&self.store, note_id, number)?;
        Ok(VersionDto::from(&entry))
    }

    pub fn restore(
        &mut self,
        note_id: &Uuid,
        number: u32,
        user: Option<UserId>,
    ) -> Result<NoteDto> {
        let user = authenticated(user)?;
        let note = commands::restore::run(&mut self.store, &self.settings, note_id, number, user)?;
        Ok(NoteDto::from_note(&note, user))
    }

    pub fn compare(
        &self,
        note_id: &Uuid,
        left: u32,
        right: u32,
        user: Option<UserId>,
    ) -> Result<ComparisonDto> {
        self.ensure_readable(note_id, user)?;
        let comparison = commands::compare::run(&self.store, note_id, left, right)?;
        Ok(ComparisonDto::from(&comparison))
    }

    fn ensure_readable(&self, note_id: &Uuid, user: Option<UserId>) -> Result<()> {
        let user = authenticated(user)?;
        commands::helpers::load_readable(&self.store, note_id, user).map(|_| ())
    }
}

fn authenticated(user: Option<UserId>) -> Result<UserId> {
    match user {
        Some(id) if !id.is_none() => Ok(id),
        _ => Err(NotabeneError::Unauthorized),
    }
}
