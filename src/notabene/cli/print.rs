use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use notabene::diff::{DiffKind, DiffSegment};
use notabene::dto::{ComparisonDto, NoteDto, TextDiffDto, VersionDto};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 8;
const SHARED_MARKER: &str = "⇄";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_notes(notes: &[NoteDto]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for note in notes {
        let id_str = format!("{} ", short_id(&note.id.to_string()));
        let marker = if note.is_owner {
            "  ".to_string()
        } else {
            format!("{} ", SHARED_MARKER)
        };

        let preview: String = note
            .content
            .chars()
            .take(50)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_content = if preview.is_empty() {
            note.title.clone()
        } else {
            format!("{} {}", note.title, preview)
        };

        let fixed_width = 4 + id_str.width() + marker.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "    {}{}{}{}{}",
            id_str.yellow(),
            title_display,
            " ".repeat(padding),
            marker,
            format_time_ago(note.updated_at).dimmed()
        );
    }
}

pub(super) fn print_note(note: &NoteDto) {
    println!("{} {}", short_id(&note.id.to_string()).yellow(), note.title.bold());
    println!("--------------------------------");
    println!("{}", note.content);
    println!();
    println!(
        "{}",
        format!(
            "owner {}  readers {}  writers {}  revision {}",
            note.creator_id,
            join_users(&note.readers),
            join_users(&note.writers),
            note.revision
        )
        .dimmed()
    );
}

pub(super) fn print_history(versions: &[VersionDto]) {
    if versions.is_empty() {
        println!("No versions found.");
        return;
    }

    for version in versions {
        let number = format!("v{:<4}", version.version_number);
        let tag = version_tag(version);
        let fixed_width = 4 + number.width() + tag.width() + TIME_WIDTH + 1;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&version.title, available);
        let padding = available.saturating_sub(title_display.width());

        let number_colored = if version.is_current {
            number.green().bold()
        } else {
            number.yellow()
        };

        println!(
            "    {}{}{}{} {}",
            number_colored,
            title_display,
            " ".repeat(padding),
            tag.cyan(),
            format_time_ago(version.created_at).dimmed()
        );
    }
}

pub(super) fn print_version(version: &VersionDto) {
    let tag = version_tag(version);
    println!(
        "{} {} {}",
        format!("v{}", version.version_number).yellow(),
        version.title.bold(),
        tag.trim().cyan()
    );
    println!("--------------------------------");
    println!("{}", version.content);
    println!();
    println!(
        "{}",
        format!(
            "edited by {}  {}",
            version.created_by,
            format_time_ago(version.created_at).trim()
        )
        .dimmed()
    );
}

pub(super) fn print_comparison(cmp: &ComparisonDto) {
    println!(
        "{} {} {}",
        format!("v{}", cmp.left.version_number).yellow(),
        "→".dimmed(),
        format!("v{}", cmp.right.version_number).yellow()
    );
    if !cmp.has_changes {
        println!("{}", "No changes.".dimmed());
        return;
    }

    println!();
    print_field_diff("title", &cmp.title_diff);
    print_field_diff("content", &cmp.content_diff);
}

fn print_field_diff(label: &str, diff: &TextDiffDto) {
    println!("{}", label.bold());
    println!("  {} {}", "-".red(), render_segments(&diff.left_segments));
    println!("  {} {}", "+".green(), render_segments(&diff.right_segments));
}

pub(super) fn print_config(entries: &[(&str, String)]) {
    let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    for (key, value) in entries {
        let padded = format!("{:<width$}", key, width = key_width);
        println!("{}  {}", padded.bold(), value);
    }
}

fn render_segments(segments: &[DiffSegment]) -> String {
    segments.iter().map(|s| paint(s).to_string()).collect()
}

fn paint(segment: &DiffSegment) -> ColoredString {
    match segment.kind {
        DiffKind::Equal => segment.text.normal(),
        DiffKind::Added => segment.text.green().underline(),
        DiffKind::Removed => segment.text.red().strikethrough(),
    }
}

fn version_tag(version: &VersionDto) -> String {
    match (version.is_current, version.restored_from_version) {
        (true, Some(from)) => format!(" current, restored from v{} ", from),
        (true, None) => " current ".to_string(),
        _ => String::new(),
    }
}

fn join_users<T: std::fmt::Display>(users: &[T]) -> String {
    if users.is_empty() {
        return "-".to_string();
    }
    users
        .iter()
        .map(|u| u.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn short_id(id: &str) -> &str {
    id.get(..ID_WIDTH).unwrap_or(id)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn truncate_counts_display_width() {
        // each CJK char is two columns wide
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
    }

    #[test]
    fn short_id_handles_short_input() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }

    #[test]
    fn tag_marks_restored_current_entry() {
        let json = serde_json::json!({
            "noteId": "00000000-0000-0000-0000-000000000001",
            "versionNumber": 4,
            "title": "A",
            "content": "X",
            "readers": [1],
            "writers": [1],
            "createdBy": 1,
            "noteCreatorId": 1,
            "createdAt": "2026-01-01T00:00:00Z",
            "originalCreatedAt": "2026-01-01T00:00:00Z",
            "originalUpdatedAt": "2026-01-01T00:00:00Z",
            "isCurrent": true,
            "isRestored": true,
            "restoredFromVersion": 1
        });
        let version: VersionDto = serde_json::from_value(json).unwrap();
        assert_eq!(version_tag(&version), " current, restored from v1 ");
    }
}
