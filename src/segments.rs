use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)](?:\s+|$)").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-•●]\s*").unwrap());
static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#{1,6}(?:\s+|$)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

/// Strips list prefixes and markdown residue from one line of model output.
///
/// The pass is repeated until nothing changes, so `normalize_line(normalize_line(x)) ==
/// normalize_line(x)` for every input. Each productive pass either removes characters
/// or only rewrites whitespace, which bounds the loop.
pub fn normalize_line(line: &str) -> String {
    let mut current = normalize_once(line);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(line: &str) -> String {
    let s = NUMBERED.replace(line, "");
    let s = BULLET.replace(&s, "");
    let s = s.replace('*', "").replace('`', "");
    let s = HEADER.replace(&s, "");
    let s = LINK.replace_all(&s, "$1");
    let s = s.replace("\\n", " ");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes every line and drops the ones left empty.
pub fn clean_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|l| normalize_line(l.as_ref()))
        .filter(|l| !l.is_empty())
        .collect()
}

/// True when the raw line opens with a bullet glyph (after indentation and emphasis).
pub fn is_bulleted(line: &str) -> bool {
    let t = line.trim_start().trim_start_matches("**").trim_start();
    t.starts_with('-') || t.starts_with('•') || t.starts_with('●') || t.starts_with("* ")
}

/// True when the raw line carries heading markup: `#` hashes or an opening `**`.
pub fn has_heading_markup(line: &str) -> bool {
    let s = NUMBERED.replace(line, "");
    let t = s.trim_start();
    t.starts_with('#') || t.starts_with("**") || t.starts_with("__")
}

/// True when the raw line opens with a `1.` / `2)` style ordinal.
pub fn is_numbered(line: &str) -> bool {
    NUMBERED.is_match(&line.replace('*', ""))
}
