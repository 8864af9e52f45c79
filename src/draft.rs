//! Draft identities and stylesheet injection into the base document.
use crate::palette::Palette;
use crate::styles::StyleVariant;
use anyhow::{anyhow, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Number of drafts produced per run.
pub const DRAFT_COUNT: u8 = 7;

/// Id attribute of the injected stylesheet; restyling replaces this block.
pub const DRAFT_STYLE_ID: &str = "draft-style";

/// Draft identifier in `1..=DRAFT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DraftNumber(u8);

impl DraftNumber {
    pub fn new(value: u8) -> Result<Self> {
        if (1..=DRAFT_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(anyhow!("draft number must be between 1 and {DRAFT_COUNT} (got {value})"))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = DraftNumber> {
        (1..=DRAFT_COUNT).map(DraftNumber)
    }

    pub fn variant(self) -> StyleVariant {
        StyleVariant::ALL[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for DraftNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rendered variant of the base page.
#[derive(Debug, Clone)]
pub struct Draft {
    pub number: DraftNumber,
    pub title: String,
    pub description: String,
    pub html: String,
}

/// Render a draft with the built-in stylesheet for its variant.
pub fn render_builtin(base_html: &str, number: DraftNumber, palette: &Palette) -> Draft {
    let variant = number.variant();
    let css = variant.stylesheet(palette);
    tracing::debug!(draft = number.get(), variant = variant.slug(), "render draft");
    Draft {
        number,
        title: variant.title().to_string(),
        description: variant.description().to_string(),
        html: inject_style(base_html, number, variant, &css),
    }
}

fn style_block(number: DraftNumber, variant: StyleVariant, css: &str) -> String {
    format!(
        "<style id=\"{DRAFT_STYLE_ID}\" data-draft=\"{number}\">\n/* draft {number}: {title} */\n{css}</style>\n",
        title = variant.title(),
    )
}

fn existing_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<style\s+id="draft-style"[^>]*>.*?</style>\s*"#)
            .expect("valid draft style pattern")
    })
}

fn head_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</head\s*>").expect("valid head close pattern"))
}

fn head_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<head(\s[^>]*)?>").expect("valid head open pattern"))
}

fn html_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<html(\s[^>]*)?>").expect("valid html open pattern"))
}

/// Place the draft stylesheet in the document head.
///
/// Insertion point, in order: an existing draft style block (replaced), before
/// `</head>`, after `<head>`, in a new head after `<html>`, else prepended.
pub fn inject_style(
    base_html: &str,
    number: DraftNumber,
    variant: StyleVariant,
    css: &str,
) -> String {
    let block = style_block(number, variant, css);

    if let Some(found) = existing_style_re().find(base_html) {
        let mut out = String::with_capacity(base_html.len() + block.len());
        out.push_str(&base_html[..found.start()]);
        out.push_str(&block);
        out.push_str(&base_html[found.end()..]);
        return out;
    }
    let (at, insert) = if let Some(found) = head_close_re().find(base_html) {
        (found.start(), block)
    } else if let Some(found) = head_open_re().find(base_html) {
        (found.end(), format!("\n{block}"))
    } else if let Some(found) = html_open_re().find(base_html) {
        (found.end(), format!("\n<head>\n{block}</head>\n"))
    } else {
        (0, block)
    };
    let mut out = String::with_capacity(base_html.len() + insert.len());
    out.push_str(&base_html[..at]);
    out.push_str(&insert);
    out.push_str(&base_html[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<!doctype html>\n<html lang=\"en\">\n<head>\n<title>Home</title>\n</head>\n<body><h1>Hi</h1></body>\n</html>\n";

    fn first() -> DraftNumber {
        DraftNumber::new(1).unwrap()
    }

    #[test]
    fn draft_number_range_is_enforced() {
        assert!(DraftNumber::new(0).is_err());
        assert!(DraftNumber::new(8).is_err());
        assert_eq!(DraftNumber::new(7).unwrap().get(), 7);
        assert_eq!(DraftNumber::all().count(), 7);
    }

    #[test]
    fn injects_before_head_close() {
        let out = inject_style(PAGE, first(), StyleVariant::Minimal, "body{}\n");
        let style_at = out.find("<style id=\"draft-style\"").unwrap();
        let head_close = out.find("</head>").unwrap();
        let title = out.find("<title>").unwrap();
        assert!(title < style_at && style_at < head_close);
        assert!(out.contains("/* draft 1: Minimal */"));
    }

    #[test]
    fn injects_after_head_open_without_close() {
        let out = inject_style("<head><title>x</title>", first(), StyleVariant::Minimal, "");
        assert!(out.starts_with("<head>\n<style id=\"draft-style\""));
    }

    #[test]
    fn creates_head_after_html_open() {
        let out = inject_style("<HTML><body>x</body></HTML>", first(), StyleVariant::Minimal, "");
        assert!(out.starts_with("<HTML>\n<head>\n<style"));
        assert!(out.contains("</style>\n</head>\n<body>"));
    }

    #[test]
    fn prepends_for_fragments() {
        let out = inject_style("<p>fragment</p>", first(), StyleVariant::Minimal, "");
        assert!(out.starts_with("<style id=\"draft-style\""));
        assert!(out.ends_with("<p>fragment</p>"));
    }

    #[test]
    fn restyling_replaces_previous_block() {
        let once = inject_style(PAGE, first(), StyleVariant::Minimal, "a{}\n");
        let second = DraftNumber::new(2).unwrap();
        let twice = inject_style(&once, second, StyleVariant::Editorial, "b{}\n");
        assert_eq!(twice.matches("id=\"draft-style\"").count(), 1);
        assert!(twice.contains("/* draft 2: Editorial */"));
        assert!(!twice.contains("a{}"));
    }

    #[test]
    fn builtin_drafts_carry_variant_metadata() {
        let draft = render_builtin(PAGE, DraftNumber::new(5).unwrap(), &Palette::default());
        assert_eq!(draft.title, "Midnight");
        assert!(draft.html.contains("data-draft=\"5\""));
        assert_ne!(draft.html, PAGE);
    }
}
