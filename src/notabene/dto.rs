//! Serializable views handed to clients. Field names are camelCase on the wire.

use crate::commands::compare::Comparison;
use crate::diff::{DiffSegment, TextDiff};
use crate::model::{Note, UserId};
use crate::version::HistoryEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub creator_id: UserId,
    pub readers: Vec<UserId>,
    pub writers: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub current_version: Option<u32>,
    pub revision: u64,
    pub is_owner: bool,
    pub can_edit: bool,
}

impl NoteDto {
    /// `viewer` decides the `is_owner` and `can_edit` flags.
    pub fn from_note(note: &Note, viewer: UserId) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            creator_id: note.creator_id,
            readers: note.readers.iter().copied().collect(),
            writers: note.writers.iter().copied().collect(),
            created_at: note.created_at,
            updated_at: note.updated_at,
            current_version: note.current_version,
            revision: note.revision,
            is_owner: note.is_creator(viewer),
            can_edit: note.can_write(viewer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDto {
    pub note_id: Uuid,
    pub version_number: u32,
    pub title: String,
    pub content: String,
    pub readers: Vec<UserId>,
    pub writers: Vec<UserId>,
    pub created_by: UserId,
    pub note_creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub original_created_at: DateTime<Utc>,
    pub original_updated_at: DateTime<Utc>,
    pub is_current: bool,
    pub is_restored: bool,
    pub restored_from_version: Option<u32>,
}

impl From<&HistoryEntry> for VersionDto {
    fn from(entry: &HistoryEntry) -> Self {
        let v = entry.version();
        let restored_from = entry.restored_from();
        Self {
            note_id: v.note_id(),
            version_number: v.number(),
            title: v.title().to_string(),
            content: v.content().to_string(),
            readers: v.readers().iter().copied().collect(),
            writers: v.writers().iter().copied().collect(),
            created_by: v.edited_by(),
            note_creator_id: v.note_creator_id(),
            created_at: v.created_at(),
            original_created_at: v.original_created_at(),
            original_updated_at: v.original_updated_at(),
            is_current: entry.is_current(),
            is_restored: restored_from.is_some(),
            restored_from_version: restored_from,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDiffDto {
    pub left_text: String,
    pub right_text: String,
    pub left_segments: Vec<DiffSegment>,
    pub right_segments: Vec<DiffSegment>,
}

impl From<&TextDiff> for TextDiffDto {
    fn from(diff: &TextDiff) -> Self {
        Self {
            left_text: diff.left_text.clone(),
            right_text: diff.right_text.clone(),
            left_segments: diff.left_segments.clone(),
            right_segments: diff.right_segments.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDto {
    pub left: VersionDto,
    pub right: VersionDto,
    pub title_diff: TextDiffDto,
    pub content_diff: TextDiffDto,
    pub has_changes: bool,
}

impl From<&Comparison> for ComparisonDto {
    fn from(cmp: &Comparison) -> Self {
        Self {
            left: VersionDto::from(&cmp.left),
            right: VersionDto::from(&cmp.right),
            title_diff: TextDiffDto::from(&cmp.title_diff),
            content_diff: TextDiffDto::from(&cmp.content_diff),
            has_changes: cmp.has_changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{current_entry, Version};

    #[test]
    fn version_dto_uses_camel_case() {
        let note = Note::new("A".into(), "X".into(), UserId(1));
        let stored = Version::from_memento(note.id, 1, note.create_memento(), UserId(1));
        let entry = HistoryEntry::Current(current_entry(&note, &[stored]));

        let json = serde_json::to_value(VersionDto::from(&entry)).unwrap();
        assert_eq!(json["versionNumber"], 2);
        assert_eq!(json["isCurrent"], true);
        assert_eq!(json["isRestored"], true);
        assert_eq!(json["restoredFromVersion"], 1);
        assert_eq!(json["noteCreatorId"], 1);
        assert_eq!(json["readers"], serde_json::json!([1]));
    }

    #[test]
    fn stored_entry_is_not_current() {
        let note = Note::new("A".into(), "X".into(), UserId(1));
        let stored = Version::from_memento(note.id, 1, note.create_memento(), UserId(2));
        let dto = VersionDto::from(&HistoryEntry::Stored(stored));
        assert!(!dto.is_current);
        assert!(!dto.is_restored);
        assert_eq!(dto.restored_from_version, None);
        assert_eq!(dto.created_by, UserId(2));
    }

    #[test]
    fn comparison_dto_survives_json() {
        let note = Note::new("cat".into(), "X".into(), UserId(1));
        let stored = Version::from_memento(note.id, 1, note.create_memento(), UserId(1));
        let mut edited = note.clone();
        edited.title = "car".into();
        let cmp = Comparison::between(
            HistoryEntry::Stored(stored.clone()),
            HistoryEntry::Current(current_entry(&edited, &[stored])),
        );

        let dto = ComparisonDto::from(&cmp);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains(r#""titleDiff""#));
        assert!(json.contains(r#""kind":"ADDED""#));
        let back: ComparisonDto = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dto);
        assert!(back.has_changes);
    }

    #[test]
    fn note_dto_flags_follow_viewer() {
        let mut note = Note::new("A".into(), "X".into(), UserId(1));
        note.add_reader(UserId(2));
        assert!(NoteDto::from_note(&note, UserId(1)).is_owner);
        let reader = NoteDto::from_note(&note, UserId(2));
        assert!(!reader.is_owner);
        assert!(!reader.can_edit);
    }
}
