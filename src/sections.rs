//! Header-driven splitting of a model response into named sections.
//!
//! Recognition is a line scanner over an explicit vocabulary table: each line is
//! either a header for one of the registered sections or body text for the section
//! that is currently open.

use std::fmt::Debug;

use crate::segments::{clean_lines, has_heading_markup, is_bulleted, normalize_line};

/// One registered section: the key it parses into, the header spellings that open
/// it, and the text used when the section comes back empty.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec<K: 'static> {
    pub key: K,
    pub headers: &'static [&'static str],
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Vocabulary<K: 'static> {
    specs: &'static [SectionSpec<K>],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<K> {
    pub key: K,
    pub heading: String,
    /// Text after `Header:` on the same line.
    pub inline: Option<String>,
    /// The header matched inside a longer heading rather than as the whole line.
    pub qualified: bool,
}

/// Longest heading, in words, that may carry a qualifier around a header.
const MAX_HEADING_WORDS: usize = 6;

const CONNECTORS: &[&str] = &["a", "an", "and", "for", "in", "of", "on", "the", "to", "vs", "with", "&"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Sentence-like text; only an exact header counts.
    Plain,
    /// Short title-cased line: a header may lead, followed by a qualifier.
    Titled,
    /// `#`/bold markup or all caps: a header may sit anywhere in the heading.
    Marked,
}

fn heading_shape(raw: &str, heading: &str) -> Shape {
    let words: Vec<&str> = heading.split_whitespace().collect();
    if words.is_empty() || words.len() > MAX_HEADING_WORDS || heading.contains(['.', ',', ';', '!', '?']) {
        return Shape::Plain;
    }
    let all_caps = heading.chars().any(char::is_alphabetic) && !heading.chars().any(char::is_lowercase);
    if all_caps || has_heading_markup(raw) {
        return Shape::Marked;
    }
    let titled = words.iter().all(|w| {
        w.chars().next().is_some_and(|c| !c.is_lowercase()) || CONNECTORS.contains(&w.to_lowercase().as_str())
    });
    if titled {
        Shape::Titled
    } else {
        Shape::Plain
    }
}

/// Byte offset of `needle` in `haystack` where it starts and ends on word boundaries.
fn find_words(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<K> {
    /// `None` for text that precedes every recognized header.
    pub key: Option<K>,
    pub heading: String,
    pub body: Vec<String>,
}

impl<K: Copy + Eq + Debug> Vocabulary<K> {
    pub const fn new(specs: &'static [SectionSpec<K>]) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &'static [SectionSpec<K>] {
        self.specs
    }

    pub fn placeholder(&self, key: K) -> &'static str {
        self.specs.iter().find(|s| s.key == key).map(|s| s.placeholder).unwrap_or_default()
    }

    /// Classifies one raw line. A registered header matches when it makes up the
    /// whole line or is followed by a colon. On a line shaped like a heading it may
    /// also carry a short qualifier (`Accessibility Review`), and on a marked-up or
    /// all-caps heading it may appear anywhere (`KEY RECOMMENDATIONS`). The longest
    /// matching header wins. Bulleted lines are always body text.
    pub fn recognize(&self, line: &str) -> Option<HeaderMatch<K>> {
        if is_bulleted(line) {
            return None;
        }
        let normalized = normalize_line(line);
        if normalized.is_empty() {
            return None;
        }
        let lower = normalized.to_lowercase();
        let (heading, inline) = match normalized.split_once(':') {
            Some((head, tail)) => {
                let tail = tail.trim();
                (head.trim().to_string(), (!tail.is_empty()).then(|| tail.to_string()))
            }
            None => (normalized.clone(), None),
        };
        let head_lower = heading.to_lowercase();
        let shape = heading_shape(line, &heading);

        // (header length, key, matched with a qualifier)
        let mut best: Option<(usize, K, bool)> = None;
        let mut matched_keys: Vec<K> = Vec::new();
        for spec in self.specs {
            for header in spec.headers {
                let h = header.to_lowercase();
                let exact = lower
                    .strip_prefix(h.as_str())
                    .map(str::trim_start)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'));
                let qualified = !exact
                    && match shape {
                        Shape::Marked => find_words(&head_lower, &h).is_some(),
                        Shape::Titled => find_words(&head_lower, &h) == Some(0),
                        Shape::Plain => false,
                    };
                if !(exact || qualified) {
                    continue;
                }
                if !matched_keys.contains(&spec.key) {
                    matched_keys.push(spec.key);
                }
                if best.map_or(true, |(len, _, _)| h.len() > len) {
                    best = Some((h.len(), spec.key, qualified));
                }
            }
        }

        let (_, key, qualified) = best?;
        if matched_keys.len() > 1 {
            tracing::debug!(?matched_keys, ?key, line = %normalized, "ambiguous section header, longest match wins");
        }
        Some(HeaderMatch { key, heading, inline, qualified })
    }

    /// Header pairs registered under different keys where one is a prefix of the
    /// other. Such pairs are resolved by longest match, which may not be intended.
    pub fn ambiguities(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        for (i, a) in self.specs.iter().enumerate() {
            for b in &self.specs[i + 1..] {
                if a.key == b.key {
                    continue;
                }
                for ha in a.headers {
                    for hb in b.headers {
                        let (la, lb) = (ha.to_lowercase(), hb.to_lowercase());
                        if la.starts_with(&lb) || lb.starts_with(&la) {
                            out.push((*ha, *hb));
                        }
                    }
                }
            }
        }
        out
    }
}

/// Splits `raw` at recognized headers, keeping source order.
///
/// A header for the section that is already open is an echo and only contributes
/// its inline text; a qualified echo such as a bold `Design Recommendations` inside
/// `Recommendations` stays in the body for nested parsing. When nothing is recognized the result is a single unnamed
/// section holding the whole text.
pub fn split_sections<K: Copy + Eq + Debug>(raw: &str, vocab: &Vocabulary<K>) -> Vec<Section<K>> {
    let mut sections = Vec::new();
    let mut current = Section { key: None, heading: String::new(), body: Vec::new() };

    for line in raw.lines() {
        match vocab.recognize(line) {
            Some(m) if current.key == Some(m.key) => {
                if m.qualified {
                    current.body.push(line.to_string());
                } else {
                    current.body.extend(m.inline);
                }
            }
            Some(m) => {
                let prev = std::mem::replace(
                    &mut current,
                    Section { key: Some(m.key), heading: m.heading, body: m.inline.into_iter().collect() },
                );
                if prev.key.is_some() || prev.body.iter().any(|l| !l.trim().is_empty()) {
                    sections.push(prev);
                }
            }
            None => current.body.push(line.to_string()),
        }
    }

    if current.key.is_some() || current.body.iter().any(|l| !l.trim().is_empty()) || sections.is_empty() {
        sections.push(current);
    }
    sections
}

/// Section lookup for an assembler. Repeated sections with the same key are read
/// as one body, concatenated in source order.
#[derive(Debug, Clone)]
pub struct SectionMap<K: 'static> {
    vocab: Vocabulary<K>,
    sections: Vec<Section<K>>,
}

impl<K: Copy + Eq + Debug> SectionMap<K> {
    pub fn parse(raw: &str, vocab: Vocabulary<K>) -> Self {
        let sections = split_sections(raw, &vocab);
        tracing::trace!(count = sections.len(), "split response into sections");
        Self { vocab, sections }
    }

    pub fn sections(&self) -> &[Section<K>] {
        &self.sections
    }

    pub fn contains(&self, key: K) -> bool {
        self.sections.iter().any(|s| s.key == Some(key))
    }

    /// Raw body lines of every section registered under `key`.
    pub fn body(&self, key: K) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.key == Some(key))
            .flat_map(|s| s.body.iter().map(String::as_str))
            .collect()
    }

    /// Normalized, non-empty body lines; the section placeholder when there are none.
    pub fn list(&self, key: K) -> Vec<String> {
        or_placeholder(clean_lines(&self.body(key)), self.vocab.placeholder(key))
    }

    pub fn placeholder(&self, key: K) -> &'static str {
        self.vocab.placeholder(key)
    }
}

pub fn or_placeholder(items: Vec<String>, placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}
