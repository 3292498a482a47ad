use crate::error::{NotabeneError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Identifier of a user as issued by the external account service.
///
/// `UserId(0)` never names a real user; it stands for "no user" and is
/// rejected wherever an editor is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl UserId {
    pub const NONE: UserId = UserId(0);

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id)
    }
}

/// Length limits applied to note titles and contents, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteLimits {
    pub title_max: usize,
    pub content_max: usize,
}

impl Default for NoteLimits {
    fn default() -> Self {
        Self {
            title_max: 255,
            content_max: 280,
        }
    }
}

impl NoteLimits {
    pub fn validate(&self, title: &str, content: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(NotabeneError::Validation("Title cannot be blank".into()));
        }
        if content.trim().is_empty() {
            return Err(NotabeneError::Validation("Content cannot be blank".into()));
        }
        let title_len = title.chars().count();
        if title_len > self.title_max {
            return Err(NotabeneError::Validation(format!(
                "Title cannot exceed {} characters (got {})",
                self.title_max, title_len
            )));
        }
        let content_len = content.chars().count();
        if content_len > self.content_max {
            return Err(NotabeneError::Validation(format!(
                "Content cannot exceed {} characters (got {})",
                self.content_max, content_len
            )));
        }
        Ok(())
    }
}

/// The live, editable state of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub creator_id: UserId,
    pub readers: BTreeSet<UserId>,
    pub writers: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stored version the live state is known to coincide with. Cleared on
    /// every edit and restore, since the live state is then unstored.
    pub current_version: Option<u32>,
    /// Bumped by the store on every successful save.
    #[serde(default)]
    pub revision: u64,
}

impl Note {
    pub fn new(title: String, content: String, creator_id: UserId) -> Self {
        let now = Utc::now();
        let mut note = Self {
            id: Uuid::new_v4(),
            title,
            content,
            creator_id,
            readers: BTreeSet::new(),
            writers: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            current_version: None,
            revision: 0,
        };
        note.ensure_creator_access();
        note
    }

    pub fn is_creator(&self, user: UserId) -> bool {
        !user.is_none() && user == self.creator_id
    }

    pub fn can_read(&self, user: UserId) -> bool {
        self.is_creator(user) || self.readers.contains(&user)
    }

    pub fn can_write(&self, user: UserId) -> bool {
        self.is_creator(user) || self.writers.contains(&user)
    }

    /// Puts the creator back into both permission sets.
    pub fn ensure_creator_access(&mut self) {
        if !self.creator_id.is_none() {
            self.readers.insert(self.creator_id);
            self.writers.insert(self.creator_id);
        }
    }

    /// Returns true if the user was not already a reader.
    pub fn add_reader(&mut self, user: UserId) -> bool {
        !user.is_none() && self.readers.insert(user)
    }

    /// Writers always get read access as well.
    pub fn add_writer(&mut self, user: UserId) -> bool {
        if user.is_none() {
            return false;
        }
        let added_reader = self.readers.insert(user);
        let added_writer = self.writers.insert(user);
        added_reader || added_writer
    }

    /// Removing read access also removes write access.
    pub fn remove_reader(&mut self, user: UserId) -> Result<bool> {
        self.guard_creator(user)?;
        let removed_reader = self.readers.remove(&user);
        let removed_writer = self.writers.remove(&user);
        Ok(removed_reader || removed_writer)
    }

    pub fn remove_writer(&mut self, user: UserId) -> Result<bool> {
        self.guard_creator(user)?;
        Ok(self.writers.remove(&user))
    }

    fn guard_creator(&self, user: UserId) -> Result<()> {
        if user == self.creator_id {
            return Err(NotabeneError::Validation(
                "Cannot remove the creator's permissions".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_gets_read_and_write_access() {
        let note = Note::new("Title".into(), "Body".into(), UserId(1));
        assert!(note.readers.contains(&UserId(1)));
        assert!(note.writers.contains(&UserId(1)));
        assert!(note.can_read(UserId(1)));
        assert!(note.can_write(UserId(1)));
        assert!(!note.can_read(UserId(2)));
        assert_eq!(note.revision, 0);
        assert!(note.current_version.is_none());
    }

    #[test]
    fn writer_is_also_reader() {
        let mut note = Note::new("Title".into(), "Body".into(), UserId(1));
        assert!(note.add_writer(UserId(2)));
        assert!(note.can_read(UserId(2)));
        assert!(note.can_write(UserId(2)));
        assert!(!note.add_writer(UserId(2)));
    }

    #[test]
    fn removing_reader_revokes_write() {
        let mut note = Note::new("Title".into(), "Body".into(), UserId(1));
        note.add_writer(UserId(2));
        assert!(note.remove_reader(UserId(2)).unwrap());
        assert!(!note.can_read(UserId(2)));
        assert!(!note.can_write(UserId(2)));
    }

    #[test]
    fn creator_rights_cannot_be_removed() {
        let mut note = Note::new("Title".into(), "Body".into(), UserId(1));
        assert!(matches!(
            note.remove_writer(UserId(1)),
            Err(NotabeneError::Validation(_))
        ));
        assert!(matches!(
            note.remove_reader(UserId(1)),
            Err(NotabeneError::Validation(_))
        ));
        assert!(note.can_write(UserId(1)));
    }

    #[test]
    fn no_user_never_has_access() {
        let mut note = Note::new("Title".into(), "Body".into(), UserId(1));
        assert!(!note.add_reader(UserId::NONE));
        assert!(!note.can_read(UserId::NONE));
        assert!(!note.is_creator(UserId::NONE));
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let limits = NoteLimits {
            title_max: 3,
            content_max: 3,
        };
        assert!(limits.validate("été", "été").is_ok());
        assert!(limits.validate("étés", "été").is_err());
        assert!(limits.validate("été", "étés").is_err());
    }

    #[test]
    fn limits_reject_blank_fields() {
        let limits = NoteLimits::default();
        assert!(limits.validate("   ", "body").is_err());
        assert!(limits.validate("title", "").is_err());
        assert!(limits.validate("title", "body").is_ok());
    }
}
