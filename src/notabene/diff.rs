//! # Character Diff
//!
//! Aligns two strings with a longest-common-subsequence table and reports the
//! result as two segment lists, one per side:
//!
//! - the left side carries `Equal` and `Removed` segments and spells out the
//!   left text,
//! - the right side carries `Equal` and `Added` segments and spells out the
//!   right text.
//!
//! Alignment works on `char`s, so multi-byte text never splits mid-character.
//! Raw output has one segment per character; [`optimize_segments`] merges runs
//! of the same kind for display.
//!
//! Ties in the table favour `Added` over `Removed`, which makes the
//! reconstruction deterministic for a given pair of inputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffKind {
    Equal,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub text: String,
    pub kind: DiffKind,
}

impl DiffSegment {
    pub fn new(text: impl Into<String>, kind: DiffKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != DiffKind::Equal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDiff {
    pub left_text: String,
    pub right_text: String,
    pub left_segments: Vec<DiffSegment>,
    pub right_segments: Vec<DiffSegment>,
}

impl TextDiff {
    /// Same diff with adjacent same-kind segments merged on both sides.
    pub fn optimized(self) -> Self {
        Self {
            left_text: self.left_text,
            right_text: self.right_text,
            left_segments: optimize_segments(self.left_segments),
            right_segments: optimize_segments(self.right_segments),
        }
    }

    /// Any insertion or deletion. Removals only ever land on the left side, so
    /// both sides are inspected.
    pub fn has_changes(&self) -> bool {
        self.right_segments.iter().any(DiffSegment::is_change)
            || self.left_segments.iter().any(DiffSegment::is_change)
    }
}

/// Computes the raw per-character diff. `None` is treated as an empty string.
pub fn compute_diff<'a, 'b>(
    left: impl Into<Option<&'a str>>,
    right: impl Into<Option<&'b str>>,
) -> TextDiff {
    let left_text = left.into().unwrap_or_default();
    let right_text = right.into().unwrap_or_default();
    let a: Vec<char> = left_text.chars().collect();
    let b: Vec<char> = right_text.chars().collect();

    let table = lcs_table(&a, &b);

    let mut left_segments = Vec::with_capacity(a.len());
    let mut right_segments = Vec::with_capacity(b.len());
    let (mut i, mut j) = (a.len(), b.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            let text = a[i - 1].to_string();
            left_segments.push(DiffSegment::new(text.clone(), DiffKind::Equal));
            right_segments.push(DiffSegment::new(text, DiffKind::Equal));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            right_segments.push(DiffSegment::new(b[j - 1], DiffKind::Added));
            j -= 1;
        } else {
            left_segments.push(DiffSegment::new(a[i - 1], DiffKind::Removed));
            i -= 1;
        }
    }

    left_segments.reverse();
    right_segments.reverse();

    TextDiff {
        left_text: left_text.to_string(),
        right_text: right_text.to_string(),
        left_segments,
        right_segments,
    }
}

fn lcs_table(a: &[char], b: &[char]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table
}

/// Merges consecutive segments of the same kind. Order and concatenated text
/// are preserved, and applying it twice changes nothing.
pub fn optimize_segments(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    if segments.len() <= 1 {
        return segments;
    }
    let mut merged: Vec<DiffSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.kind == segment.kind => last.text.push_str(&segment.text),
            _ => merged.push(segment),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[DiffSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn single_substitution_splits_into_removed_and_added() {
        let diff = compute_diff("cat", "car").optimized();
        assert_eq!(
            diff.left_segments,
            vec![
                DiffSegment::new("ca", DiffKind::Equal),
                DiffSegment::new("t", DiffKind::Removed),
            ]
        );
        assert_eq!(
            diff.right_segments,
            vec![
                DiffSegment::new("ca", DiffKind::Equal),
                DiffSegment::new("r", DiffKind::Added),
            ]
        );
        assert!(diff.has_changes());
    }

    #[test]
    fn raw_output_is_one_segment_per_char() {
        let diff = compute_diff("héllo", "héllo");
        assert_eq!(diff.left_segments.len(), 5);
        assert_eq!(diff.right_segments.len(), 5);
        assert!(!diff.has_changes());
    }

    #[test]
    fn identical_inputs_optimize_to_single_equal() {
        let diff = compute_diff("same text", "same text").optimized();
        assert_eq!(
            diff.right_segments,
            vec![DiffSegment::new("same text", DiffKind::Equal)]
        );
        assert!(!diff.has_changes());
    }

    #[test]
    fn absent_inputs_are_empty() {
        let diff = compute_diff(None, None);
        assert!(diff.left_segments.is_empty());
        assert!(diff.right_segments.is_empty());
        assert!(!diff.has_changes());

        let diff = compute_diff(None, "new").optimized();
        assert_eq!(diff.left_text, "");
        assert_eq!(
            diff.right_segments,
            vec![DiffSegment::new("new", DiffKind::Added)]
        );

        let diff = compute_diff("old", None).optimized();
        assert_eq!(
            diff.left_segments,
            vec![DiffSegment::new("old", DiffKind::Removed)]
        );
        assert!(diff.right_segments.is_empty());
        assert!(diff.has_changes());
    }

    #[test]
    fn pure_deletion_counts_as_change() {
        let diff = compute_diff("cats", "cat");
        assert!(diff.right_segments.iter().all(|s| !s.is_change()));
        assert!(diff.has_changes());
    }

    #[test]
    fn sides_spell_out_their_inputs() {
        let pairs = [
            ("kitten", "sitting"),
            ("Hello, world", "Goodbye, world!"),
            ("", "abc"),
            ("naïve café", "naive cafe"),
            ("日本語のテキスト", "日本のテキスト文"),
        ];
        for (left, right) in pairs {
            let raw = compute_diff(left, right);
            assert_eq!(joined(&raw.left_segments), left);
            assert_eq!(joined(&raw.right_segments), right);
            assert!(raw
                .left_segments
                .iter()
                .all(|s| s.kind != DiffKind::Added));
            assert!(raw
                .right_segments
                .iter()
                .all(|s| s.kind != DiffKind::Removed));

            let optimized = raw.optimized();
            assert_eq!(joined(&optimized.left_segments), left);
            assert_eq!(joined(&optimized.right_segments), right);
        }
    }

    #[test]
    fn optimize_is_idempotent() {
        let once = optimize_segments(compute_diff("abcdef", "azced").right_segments);
        let twice = optimize_segments(once.clone());
        assert_eq!(once, twice);
        for pair in once.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn optimize_leaves_short_inputs_alone() {
        assert!(optimize_segments(Vec::new()).is_empty());
        let single = vec![DiffSegment::new("x", DiffKind::Added)];
        assert_eq!(optimize_segments(single.clone()), single);
    }

    #[test]
    fn kinds_serialize_uppercase() {
        let segment = DiffSegment::new("ab", DiffKind::Removed);
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, r#"{"text":"ab","kind":"REMOVED"}"#);
        let back: DiffSegment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, segment);
    }
}
