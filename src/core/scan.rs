// src/core/scan.rs
//! Balanced-delimiter scanning for objects embedded in script text.
//!
//! Regexes cannot cut a nested `{…}` correctly: greedy matching runs past the
//! object into trailing code, lazy matching stops at the first inner `}`.
//! Here the cut happens exactly where the brace depth returns to zero.
//! Braces inside string literals do not count.

/// Byte range `(start, end)` of the balanced object whose opening brace is the
/// first `{` at or after `from`. `None` when no brace exists or the object never
/// closes.
pub fn balanced_object(s: &str, from: usize) -> Option<(usize, usize)> {
    let start = s.get(from..)?.find('{')? + from;
    let bytes = s.as_bytes();

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'"' | b'\'' => quote = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, i + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Slice form of [`balanced_object`].
pub fn balanced_object_str(s: &str, from: usize) -> Option<&str> {
    balanced_object(s, from).map(|(a, b)| &s[a..b])
}
