//! Fills `{key}` / `{key:format}` placeholders in skill and talent
//! descriptions from a blackboard.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::source::{BlackboardEntry, BlackboardValue};

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("valid regex"));
static DOLLAR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$.*?>").expect("valid regex"));
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}:]+)(?::([\w.%]+))?\}").expect("valid regex"));

/// Number format requested by a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `0%`
    Percent,
    /// `0.0%`
    PercentOneDecimal,
    /// `0.0`
    OneDecimal,
    /// `0`, no specifier, or anything unrecognised
    Plain,
}

impl NumberFormat {
    pub fn parse(format: Option<&str>) -> Self {
        match format {
            Some("0%") => NumberFormat::Percent,
            Some("0.0%") => NumberFormat::PercentOneDecimal,
            Some("0.0") => NumberFormat::OneDecimal,
            _ => NumberFormat::Plain,
        }
    }

    pub fn apply(self, n: f64) -> String {
        match self {
            NumberFormat::Percent => format!("{:.0}%", n * 100.0),
            NumberFormat::PercentOneDecimal => format!("{:.1}%", n * 100.0),
            NumberFormat::OneDecimal => format!("{:.1}", n),
            NumberFormat::Plain => plain_number(n),
        }
    }
}

/// Integral values print without a fraction, everything else in the
/// shortest form that round-trips.
fn plain_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Remove presentation tags (`<@ba.vup>`, `</>`, `$…>`) the output cannot render.
pub fn strip_markup(raw: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(raw, "");
    DOLLAR_TAG.replace_all(&without_tags, "").into_owned()
}

/// First entry whose key matches `key` ignoring case
pub fn lookup<'a>(blackboard: &'a [BlackboardEntry], key: &str) -> Option<&'a BlackboardEntry> {
    let wanted = key.to_lowercase();
    blackboard
        .iter()
        .find(|entry| matches!(&entry.key, Some(k) if k.to_lowercase() == wanted))
}

fn format_value(value: &BlackboardValue, format: NumberFormat) -> String {
    match value.as_number() {
        Some(n) => format.apply(n),
        None => value.to_string(),
    }
}

/// Replace every placeholder in `text`. Placeholders without a usable
/// blackboard value are left untouched.
pub fn substitute(text: &str, blackboard: &[BlackboardEntry]) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let key = &caps[1];
            let format = NumberFormat::parse(caps.get(2).map(|m| m.as_str()));

            match lookup(blackboard, key).and_then(BlackboardEntry::resolved_value) {
                Some(value) => format_value(&value, format),
                None => {
                    tracing::debug!(placeholder = &caps[0], "no blackboard value for placeholder");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Strip markup, fill placeholders and trim: the stored form of a description
pub fn render_description(raw: &str, blackboard: &[BlackboardEntry]) -> String {
    substitute(&strip_markup(raw), blackboard).trim().to_string()
}
