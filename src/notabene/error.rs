use crate::model::UserId;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NotabeneError {
    #[error("Note not found: {0}")]
    NoteNotFound(Uuid),

    #[error("Version {number} not found for note {note_id}")]
    VersionNotFound { note_id: Uuid, number: u32 },

    #[error("User {user} does not have permission to modify note {note_id}")]
    Forbidden { note_id: Uuid, user: UserId },

    #[error("No authenticated user")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),
}

impl NotabeneError {
    /// True for errors that describe a missing note or version.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            NotabeneError::NoteNotFound(_) | NotabeneError::VersionNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NotabeneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_not_found_names_note_and_number() {
        let id = Uuid::nil();
        let err = NotabeneError::VersionNotFound {
            note_id: id,
            number: 7,
        };
        assert_eq!(
            err.to_string(),
            format!("Version 7 not found for note {}", id)
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn forbidden_is_not_a_miss() {
        let err = NotabeneError::Forbidden {
            note_id: Uuid::nil(),
            user: UserId(3),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("User 3"));
    }
}
