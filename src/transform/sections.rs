//! Marker-delimited narrative sections.
//!
//! Stored profile and lore text is a run of sections, each introduced by a
//! line `--- <Title> ---`. The same module reads labeled lines such as
//! `【種族】コータス` out of a section body.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^---[ \t]*([^\n]+?)[ \t]*---[ \t]*\r?$").expect("valid regex")
});

/// One titled section; body is trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Split `text` at marker lines. Text before the first marker belongs to no
/// section and is dropped. Duplicate titles are all returned, in order.
pub fn parse_sections(text: &str) -> Vec<Section<'_>> {
    let markers: Vec<_> = MARKER.captures_iter(text).collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?.as_str().trim();
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());
            Some(Section {
                title,
                body: text[whole.end()..end].trim(),
            })
        })
        .collect()
}

/// Format one section the way it is stored: marker line, then body
pub fn format_section(title: &str, body: &str) -> String {
    format!("--- {} ---\n{}", title, body)
}

/// The allowed sections with a non-empty body, each rendered as
/// `"--- {title} ---\n{body}\n\n"`; `None` when nothing qualifies.
pub fn extract_allowed<S: AsRef<str>>(text: &str, allow: &[S]) -> Option<String> {
    let extracted: String = parse_sections(text)
        .into_iter()
        .filter(|s| !s.body.is_empty())
        .filter(|s| allow.iter().any(|a| a.as_ref() == s.title))
        .map(|s| format!("{}\n\n", format_section(s.title, s.body)))
        .collect();

    if extracted.is_empty() {
        None
    } else {
        Some(extracted)
    }
}

/// Render the allowed sections for display. When nothing qualifies, the raw
/// text is returned as-is so that existing text is never hidden.
pub fn extract_sections<S: AsRef<str>>(text: &str, allow: &[S]) -> String {
    extract_allowed(text, allow).unwrap_or_else(|| text.to_string())
}

/// Values of every line in `body` that starts with `{open}{label}{close}`,
/// trimmed, in order. Lines are compared after trimming leading whitespace.
pub fn labeled_values<'a>(body: &'a str, open: &str, label: &str, close: &str) -> Vec<&'a str> {
    let prefix = format!("{}{}{}", open, label, close);
    body.lines()
        .map(str::trim_start)
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::trim)
        .collect()
}

/// First labeled value in `body`
pub fn labeled_value<'a>(body: &'a str, open: &str, label: &str, close: &str) -> Option<&'a str> {
    labeled_values(body, open, label, close).into_iter().next()
}
