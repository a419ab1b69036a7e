//! Labeled-line extraction (`Priority: High`, `Metrics:` followed by bullets) from a
//! section body, plus the lenient parsers for the enumerated labels.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::segments::{clean_lines, normalize_line};
use crate::types::{Phase, Rating, Timeline};

static PHASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:phase\s*)?(1|2|3|one|two|three|i{1,3})\b").unwrap());

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:#?\d+|[ivx]{1,4}\b)\s*").unwrap());

/// Value after `label:` when the normalized line starts with that label. An ordinal
/// may sit between the label and the colon (`Recommendation 2:`, `Phase II:`).
fn label_value<'a>(normalized: &'a str, label: &str) -> Option<&'a str> {
    let head = normalized.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = normalized[label.len()..].trim_start();
    let rest = ORDINAL.find(rest).map_or(rest, |m| &rest[m.end()..]);
    rest.strip_prefix(':').map(str::trim)
}

/// Normalized value of a single `label: value` line.
pub fn labeled_value(line: &str, label: &str) -> Option<String> {
    let normalized = normalize_line(line);
    label_value(&normalized, label).map(str::to_string)
}

pub fn starts_with_label(line: &str, labels: &[&str]) -> bool {
    let normalized = normalize_line(line);
    labels.iter().any(|l| label_value(&normalized, l).is_some())
}

/// Text captured for one label: the inline value and the lines that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpan {
    pub inline: String,
    pub rest: Vec<String>,
}

/// Finds the first `label:` line and captures up to the next line that starts with
/// any label in `labels`.
pub fn field_span<S: AsRef<str>>(lines: &[S], label: &str, labels: &[&str]) -> Option<FieldSpan> {
    let mut iter = lines.iter().map(AsRef::as_ref);
    let inline = iter.by_ref().find_map(|line| {
        let normalized = normalize_line(line);
        label_value(&normalized, label).map(str::to_string)
    })?;
    let rest = iter
        .take_while(|line| !starts_with_label(line, labels))
        .map(str::to_string)
        .collect();
    Some(FieldSpan { inline, rest })
}

/// Single-line text value; continuation lines are joined with spaces.
pub fn text_field<S: AsRef<str>>(lines: &[S], label: &str, labels: &[&str]) -> Option<String> {
    let span = field_span(lines, label, labels)?;
    let mut parts = Vec::with_capacity(span.rest.len() + 1);
    if !span.inline.is_empty() {
        parts.push(span.inline);
    }
    parts.extend(clean_lines(&span.rest));
    let joined = parts.join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// List value. Follow-on lines become items; an inline-only value is split on
/// commas and semicolons.
pub fn list_field<S: AsRef<str>>(lines: &[S], label: &str, labels: &[&str]) -> Vec<String> {
    let Some(span) = field_span(lines, label, labels) else {
        return Vec::new();
    };
    let rest = clean_lines(&span.rest);
    if rest.is_empty() {
        return span
            .inline
            .split([',', ';'])
            .map(normalize_line)
            .filter(|s| !s.is_empty())
            .collect();
    }
    let mut out = Vec::with_capacity(rest.len() + 1);
    if !span.inline.is_empty() {
        out.push(span.inline);
    }
    out.extend(rest);
    out
}

/// A closed set of labels with a documented fallback.
pub trait Enumerated: Copy + Default {
    fn match_label(value: &str) -> Option<Self>;

    fn parse_or_default(value: &str) -> Self {
        Self::match_label(value).unwrap_or_default()
    }
}

impl Enumerated for Rating {
    fn match_label(value: &str) -> Option<Self> {
        let lower = normalize_line(value).to_lowercase();
        let word = lower.split(|c: char| !c.is_alphanumeric()).next().unwrap_or_default();
        match word {
            "high" => Some(Rating::High),
            "medium" | "med" | "moderate" => Some(Rating::Medium),
            "low" => Some(Rating::Low),
            _ => None,
        }
    }
}

impl Enumerated for Timeline {
    fn match_label(value: &str) -> Option<Self> {
        let lower = normalize_line(value).to_lowercase();
        if lower.starts_with("short") {
            Some(Timeline::ShortTerm)
        } else if lower.starts_with("medium") || lower.starts_with("mid") {
            Some(Timeline::MediumTerm)
        } else if lower.starts_with("long") {
            Some(Timeline::LongTerm)
        } else {
            None
        }
    }
}

impl Enumerated for Phase {
    fn match_label(value: &str) -> Option<Self> {
        let normalized = normalize_line(value);
        let caps = PHASE.captures(&normalized)?;
        match caps[1].to_lowercase().as_str() {
            "1" | "one" | "i" => Some(Phase::One),
            "2" | "two" | "ii" => Some(Phase::Two),
            "3" | "three" | "iii" => Some(Phase::Three),
            _ => None,
        }
    }
}

pub fn enum_field<T: Enumerated, S: AsRef<str>>(lines: &[S], label: &str, labels: &[&str]) -> T {
    text_field(lines, label, labels)
        .map(|v| T::parse_or_default(&v))
        .unwrap_or_default()
}

/// Item blocks, each opened by a line carrying one of `start_labels`. Lines before
/// the first block are returned as the preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocks {
    pub preamble: Vec<String>,
    pub items: Vec<Vec<String>>,
}

pub fn split_blocks<S: AsRef<str>>(lines: &[S], start_labels: &[&str]) -> Blocks {
    let mut blocks = Blocks::default();
    for line in lines.iter().map(AsRef::as_ref) {
        if starts_with_label(line, start_labels) {
            blocks.items.push(vec![line.to_string()]);
        } else if let Some(item) = blocks.items.last_mut() {
            item.push(line.to_string());
        } else {
            blocks.preamble.push(line.to_string());
        }
    }
    blocks
}
