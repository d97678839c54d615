// src/value.rs
//! Cell text → typed frame value.
//!
//! `normalize` is total: whatever the cell holds, the result is null, an
//! integer, the knockdown marker, a range string, or the trimmed text itself.
//! Only ASCII case folding is involved, so the script of the text never
//! changes the outcome.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Written form of the knockdown marker.
pub const KNOCKDOWN: &str = "D";

/// Cells that mean "no value".
const BLANK_MARKERS: &[&str] = &["", "-", "－", "—", "―"];

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-[0-9]+$").expect("valid range regex"));

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameValue {
    Int(i64),
    Knockdown,
    /// Two-number span such as `4-6`, kept verbatim.
    Range(String),
    /// Anything else, kept verbatim (trimmed).
    Text(String),
}

impl FrameValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FrameValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_knockdown(&self) -> bool {
        matches!(self, FrameValue::Knockdown)
    }
}

impl fmt::Display for FrameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameValue::Int(n) => write!(f, "{n}"),
            FrameValue::Knockdown => f.write_str(KNOCKDOWN),
            FrameValue::Range(s) | FrameValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for FrameValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            FrameValue::Int(n) => s.serialize_i64(*n),
            FrameValue::Knockdown => s.serialize_str(KNOCKDOWN),
            FrameValue::Range(t) | FrameValue::Text(t) => s.serialize_str(t),
        }
    }
}

pub fn normalize(raw: &str) -> Option<FrameValue> {
    let text = raw.trim();

    if BLANK_MARKERS.contains(&text) {
        return None;
    }
    if text.eq_ignore_ascii_case(KNOCKDOWN) {
        return Some(FrameValue::Knockdown);
    }
    if let Some(n) = parse_int(text) {
        return Some(FrameValue::Int(n));
    }
    if RANGE_RE.is_match(text) {
        return Some(FrameValue::Range(s!(text)));
    }
    // Continuations (`+2`, `KD+5`), landing and whole-duration qualifiers
    // (`着地後3`, `全体41`) and any other descriptor stay verbatim.
    Some(FrameValue::Text(s!(text)))
}

/// Unsigned base-10 integer. Any sign keeps the cell as text.
fn parse_int(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Combo / special correction cell: a flag or free-form scaling text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Correction {
    Flag(bool),
    Text(String),
}

pub fn correction(raw: &str) -> Option<Correction> {
    match raw.trim() {
        t if BLANK_MARKERS.contains(&t) => None,
        "○" | "◯" | "〇" => Some(Correction::Flag(true)),
        "×" | "✕" | "✖" => Some(Correction::Flag(false)),
        t => Some(Correction::Text(s!(t))),
    }
}

/// Free-text cell: trimmed, blank markers dropped.
pub fn text_cell(raw: &str) -> Option<String> {
    let t = raw.trim();
    if BLANK_MARKERS.contains(&t) { None } else { Some(s!(t)) }
}
