use super::history::get_version;
use crate::diff::{compute_diff, TextDiff};
use crate::error::Result;
use crate::store::DataStore;
use crate::version::HistoryEntry;
use uuid::Uuid;

/// Two history entries side by side, with optimized title and content diffs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub left: HistoryEntry,
    pub right: HistoryEntry,
    pub title_diff: TextDiff,
    pub content_diff: TextDiff,
    pub has_changes: bool,
}

impl Comparison {
    pub fn between(left: HistoryEntry, right: HistoryEntry) -> Self {
        let title_diff =
            compute_diff(left.version().title(), right.version().title()).optimized();
        let content_diff =
            compute_diff(left.version().content(), right.version().content()).optimized();
        let has_changes = title_diff.has_changes() || content_diff.has_changes();
        Self {
            left,
            right,
            title_diff,
            content_diff,
            has_changes,
        }
    }
}

/// `left` is the older side by convention, but any two numbers work,
/// including the synthesized current one and the same number twice.
pub fn run<S: DataStore>(store: &S, note_id: &Uuid, left: u32, right: u32) -> Result<Comparison> {
    let left = get_version(store, note_id, left)?;
    let right = get_version(store, note_id, right)?;
    Ok(Comparison::between(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{update, Settings};
    use crate::diff::{DiffKind, DiffSegment};
    use crate::error::NotabeneError;
    use crate::store::memory::fixtures::*;

    fn fixture_with_edit() -> (StoreFixture, Uuid) {
        let mut fixture = StoreFixture::new().with_shared_note("cat", "same body");
        let id = fixture.note_id();
        update::run(
            &mut fixture.store,
            &Settings::default(),
            &id,
            "car".into(),
            "same body".into(),
            OWNER,
        )
        .unwrap();
        (fixture, id)
    }

    #[test]
    fn compares_stored_with_current() {
        let (fixture, id) = fixture_with_edit();
        let cmp = run(&fixture.store, &id, 1, 2).unwrap();

        assert!(!cmp.left.is_current());
        assert!(cmp.right.is_current());
        assert!(cmp.has_changes);
        assert_eq!(
            cmp.title_diff.left_segments,
            vec![
                DiffSegment::new("ca", DiffKind::Equal),
                DiffSegment::new("t", DiffKind::Removed),
            ]
        );
        assert_eq!(
            cmp.title_diff.right_segments,
            vec![
                DiffSegment::new("ca", DiffKind::Equal),
                DiffSegment::new("r", DiffKind::Added),
            ]
        );
        assert!(!cmp.content_diff.has_changes());
    }

    #[test]
    fn same_entry_has_no_changes() {
        let (fixture, id) = fixture_with_edit();
        let cmp = run(&fixture.store, &id, 1, 1).unwrap();
        assert!(!cmp.has_changes);
        assert_eq!(
            cmp.content_diff.right_segments,
            vec![DiffSegment::new("same body", DiffKind::Equal)]
        );
    }

    #[test]
    fn unknown_number_fails() {
        let (fixture, id) = fixture_with_edit();
        assert!(matches!(
            run(&fixture.store, &id, 1, 7),
            Err(NotabeneError::VersionNotFound { number: 7, .. })
        ));
    }
}
