//! The drafts changelog (`<drafts>/README.md`).
//!
//! The log is a markdown document: a fixed header, then one
//! `## Draft N: Title` section per draft in draft order. New runs append
//! sections and never edit existing ones.
use crate::draft::{Draft, DraftNumber};
use anyhow::{anyhow, Result};
use regex::Regex;
use std::sync::OnceLock;

/// One `## Draft N: Title` section as found in an existing changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Raw number from the heading; may fall outside the valid draft range.
    pub number: u32,
    pub title: String,
    pub description: String,
}

fn entry_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^##[ \t]+Draft[ \t]+(\d+)[ \t]*:[ \t]*(.*?)[ \t]*$")
            .expect("valid changelog heading pattern")
    })
}

pub fn header(base_rel: &str) -> String {
    format!("# Drafts\n\nStylistic variants of `{base_rel}`, one entry per draft.\n")
}

fn render_entry(draft: &Draft) -> String {
    format!(
        "\n## Draft {}: {}\n\n{}\n",
        draft.number,
        draft.title,
        draft.description.trim()
    )
}

/// Byte range of each draft section, paired with its parsed entry.
fn entry_sections(text: &str) -> Vec<(std::ops::Range<usize>, ChangelogEntry)> {
    let headings: Vec<_> = entry_heading_re().captures_iter(text).collect();
    let mut sections = Vec::with_capacity(headings.len());
    for (idx, caps) in headings.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        let body_end = headings
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |next| next.start());
        let body = &text[whole.end()..body_end];
        // A non-draft `##` heading ends the section too.
        let body_len = body.find("\n## ").unwrap_or(body.len());
        let entry = ChangelogEntry {
            number: caps[1].parse().unwrap_or(u32::MAX),
            title: caps[2].to_string(),
            description: body[..body_len].trim().to_string(),
        };
        sections.push((whole.start()..whole.end() + body_len, entry));
    }
    sections
}

/// Parse every draft section in document order.
pub fn parse_entries(text: &str) -> Vec<ChangelogEntry> {
    entry_sections(text)
        .into_iter()
        .map(|(_, entry)| entry)
        .collect()
}

/// Drop every draft section, keeping the header and any other notes.
pub fn remove_entries(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, _) in entry_sections(text) {
        kept.push_str(&text[cursor..range.start]);
        cursor = range.end;
    }
    kept.push_str(&text[cursor..]);
    let mut kept = kept.trim_end().to_string();
    if !kept.is_empty() {
        kept.push('\n');
    }
    kept
}

/// Draft numbers of `drafts` that already have a changelog section.
pub fn recorded_numbers(existing: &str, drafts: &[Draft]) -> Vec<DraftNumber> {
    let entries = parse_entries(existing);
    drafts
        .iter()
        .map(|draft| draft.number)
        .filter(|number| {
            entries
                .iter()
                .any(|entry| entry.number == u32::from(number.get()))
        })
        .collect()
}

/// Append one section per draft, creating the document when `existing` is
/// absent or blank.
///
/// Fails if any draft already has a section; callers rebuild with
/// `existing = None` when replacing drafts.
pub fn append_entries(existing: Option<&str>, base_rel: &str, drafts: &[Draft]) -> Result<String> {
    let mut sorted: Vec<&Draft> = drafts.iter().collect();
    sorted.sort_by_key(|draft| draft.number);

    let mut text = match existing {
        Some(existing) if !existing.trim().is_empty() => {
            let duplicates = recorded_numbers(existing, drafts);
            if let Some(first) = duplicates.first() {
                return Err(anyhow!("changelog already has an entry for draft {first}"));
            }
            let mut text = existing.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text
        }
        _ => header(base_rel),
    };
    for draft in sorted {
        text.push_str(&render_entry(draft));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(n: u8, title: &str) -> Draft {
        Draft {
            number: DraftNumber::new(n).unwrap(),
            title: title.to_string(),
            description: format!("{title} description."),
            html: String::new(),
        }
    }

    #[test]
    fn new_changelog_has_header_and_ordered_entries() {
        let text = append_entries(None, "index.html", &[draft(2, "Two"), draft(1, "One")]).unwrap();
        assert!(text.starts_with("# Drafts\n"));
        let entries = parse_entries(&text);
        assert_eq!(
            entries.iter().map(|e| e.number).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(entries[0].title, "One");
        assert_eq!(entries[0].description, "One description.");
    }

    #[test]
    fn appends_after_existing_content() {
        let existing = "# Drafts\n\nnotes without trailing newline";
        let text = append_entries(Some(existing), "index.html", &[draft(3, "Three")]).unwrap();
        assert!(text.starts_with(existing));
        assert!(text.ends_with("## Draft 3: Three\n\nThree description.\n"));
    }

    #[test]
    fn refuses_duplicate_entries() {
        let text = append_entries(None, "index.html", &[draft(1, "One")]).unwrap();
        let err = append_entries(Some(&text), "index.html", &[draft(1, "Again")]).unwrap_err();
        assert!(err.to_string().contains("draft 1"));
    }

    #[test]
    fn parse_stops_descriptions_at_other_headings() {
        let text = "# Drafts\n\n## Draft 1: A\n\nalpha\n\n## Notes\n\nextra\n\n## Draft 9: Z\n\nzeta\n";
        let entries = parse_entries(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "alpha");
        assert_eq!(entries[1].number, 9);
    }

    #[test]
    fn remove_entries_keeps_notes_and_other_sections() {
        let text = "# Drafts\n\nReview notes.\n\n## Draft 1: A\n\nalpha\n\n## Notes\n\nextra\n\n## Draft 2: B\n\nbeta\n";
        let kept = remove_entries(text);
        assert_eq!(kept, "# Drafts\n\nReview notes.\n\n\n## Notes\n\nextra\n");
        assert!(parse_entries(&kept).is_empty());

        let rebuilt = append_entries(Some(&kept), "index.html", &[draft(1, "One")]).unwrap();
        assert!(rebuilt.starts_with("# Drafts\n\nReview notes.\n"));
        assert_eq!(parse_entries(&rebuilt).len(), 1);
    }

    #[test]
    fn remove_entries_of_generated_log_leaves_header() {
        let text = append_entries(None, "index.html", &[draft(1, "One"), draft(2, "Two")]).unwrap();
        assert_eq!(remove_entries(&text), header("index.html"));
    }

    #[test]
    fn recorded_numbers_reports_overlap() {
        let text = append_entries(None, "index.html", &[draft(4, "Four")]).unwrap();
        let overlap = recorded_numbers(&text, &[draft(4, "x"), draft(5, "y")]);
        assert_eq!(overlap, vec![DraftNumber::new(4).unwrap()]);
    }
}
