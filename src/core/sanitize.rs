// src/core/sanitize.rs

const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
    ("&#39;", "'"),
];

/// Decode the handful of entities the move tables use, plus numeric ones.
/// `&amp;` goes last so `&amp;lt;` stays `&lt;`.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s!(s);
    }
    let mut out = decode_numeric(s);
    for (ent, rep) in NAMED_ENTITIES {
        out = out.replace(ent, rep);
    }
    out.replace("&amp;", "&")
}

fn decode_numeric(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(i) = rest.find("&#") {
        out.push_str(&rest[..i]);
        let tail = &rest[i + 2..];
        let decoded = tail.find(';').and_then(|semi| {
            let body = &tail[..semi];
            let code = match body.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => body.parse::<u32>().ok(),
            };
            // leave &#39; to the named table
            code.filter(|_| body != "39")
                .and_then(char::from_u32)
                .map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push_str("&#");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
