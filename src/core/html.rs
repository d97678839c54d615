// src/core/html.rs
//! Case-insensitive tag-block slicing over raw markup.
//!
//! Lowering only touches ASCII, so byte offsets line up between the raw text
//! and its lowered copy. Every offset handed out here indexes the raw text.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// One `<tag …>inner</tag>` block.
#[derive(Clone, Copy, Debug)]
pub struct Block<'a> {
    pub start: usize,
    pub end: usize,
    /// Opener text, `<tag attr=…>`.
    pub open: &'a str,
    pub inner: &'a str,
}

impl<'a> Block<'a> {
    pub fn attr(&self, name: &str) -> Option<String> {
        attr_value(self.open, name)
    }

    /// Visible text: tags dropped, entities decoded, whitespace collapsed.
    pub fn text(&self) -> String {
        visible_text(self.inner)
    }
}

/// Raw markup paired with its lowered copy, so repeated scans lower once.
pub struct Markup<'a> {
    raw: &'a str,
    lc: String,
}

impl<'a> Markup<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw, lc: to_lower(raw) }
    }

    /// Position of the next `<tag` opener at or after `from`.
    /// `<th` does not match `<thead`.
    pub fn find_open(&self, tag: &str, from: usize) -> Option<usize> {
        let pat = join!("<", &tag.to_ascii_lowercase());
        let bytes = self.lc.as_bytes();
        let mut pos = from;
        loop {
            let at = self.lc.get(pos..)?.find(&pat)? + pos;
            let after = at + pat.len();
            match bytes.get(after) {
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
                Some(_) => pos = after,
                None => return None,
            }
        }
    }

    /// Next `<tag …>…</tag>` block at or after `from`. Unclosed blocks are skipped.
    pub fn next_block(&self, tag: &str, from: usize) -> Option<Block<'a>> {
        let close = join!("</", &tag.to_ascii_lowercase());
        let mut pos = from;
        loop {
            let start = self.find_open(tag, pos)?;
            let open_end = self.raw[start..].find('>')? + start + 1;
            let Some(rel) = self.lc[open_end..].find(&close) else {
                pos = open_end;
                continue;
            };
            let inner_end = open_end + rel;
            let end = self.raw[inner_end..]
                .find('>')
                .map(|g| inner_end + g + 1)
                .unwrap_or(self.raw.len());
            return Some(Block {
                start,
                end,
                open: &self.raw[start..open_end],
                inner: &self.raw[open_end..inner_end],
            });
        }
    }

    /// Earliest block of any of `tags` at or after `from`.
    pub fn next_block_any(&self, tags: &[&str], from: usize) -> Option<Block<'a>> {
        tags.iter()
            .filter_map(|t| self.next_block(t, from))
            .min_by_key(|b| b.start)
    }

    /// All `tag` blocks in document order.
    pub fn blocks(&self, tag: &str) -> Vec<Block<'a>> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some(b) = self.next_block(tag, pos) {
            pos = b.end;
            out.push(b);
        }
        out
    }

    /// All blocks of any of `tags`, in document order, non-overlapping.
    pub fn blocks_any(&self, tags: &[&str]) -> Vec<Block<'a>> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some(b) = self.next_block_any(tags, pos) {
            pos = b.end;
            out.push(b);
        }
        out
    }

    /// Occurrences of `needle`, ignoring ASCII case.
    pub fn count_ci(&self, needle: &str) -> usize {
        let n = to_lower(needle);
        if n.is_empty() {
            return 0;
        }
        self.lc.matches(&n).count()
    }
}

/// Value of attribute `name` in an opener like `<script id="x" type=json>`.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let name = name.to_ascii_lowercase();
    let bytes = lc.as_bytes();
    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find(&name) {
        let at = pos + rel;
        pos = at + name.len();
        if at == 0 || !bytes[at - 1].is_ascii_whitespace() {
            continue;
        }
        let Some(rest) = open_tag[pos..].trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let value = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => rest[1..].split(q).next().unwrap_or(""),
            _ => rest
                .split(|c: char| c.is_whitespace() || c == '>')
                .next()
                .unwrap_or(""),
        };
        return Some(s!(value));
    }
    None
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Tags first, then entities, so an escaped `&lt;` never opens a tag.
pub fn visible_text(fragment: &str) -> String {
    normalize_ws(&normalize_entities(&strip_tags(fragment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn th_does_not_match_thead() {
        let m = Markup::new("<table><thead><tr><th>A</th></tr></thead></table>");
        let th = m.next_block("th", 0).unwrap();
        assert_eq!(th.inner, "A");
        assert!(th.open.starts_with("<th"));
    }

    #[test]
    fn blocks_any_keeps_document_order() {
        let m = Markup::new("<tr><th>h</th><td>1</td><TD class=x>2</TD></tr>");
        let texts: Vec<String> = m.blocks_any(&["td", "th"]).iter().map(|b| b.text()).collect();
        assert_eq!(texts, vec!["h", "1", "2"]);
    }

    #[test]
    fn attr_value_quoted_and_bare() {
        assert_eq!(attr_value(r#"<script id="__NEXT_DATA__" type="application/json">"#, "id").as_deref(), Some("__NEXT_DATA__"));
        assert_eq!(attr_value("<script ID='x'>", "id").as_deref(), Some("x"));
        assert_eq!(attr_value("<script id=bare>", "id").as_deref(), Some("bare"));
        assert_eq!(attr_value(r#"<div data-id="x">"#, "id"), None);
    }

    #[test]
    fn visible_text_decodes_after_stripping() {
        assert_eq!(visible_text("<span>a &lt;b&gt;</span>&nbsp; c"), "a <b> c");
    }

    #[test]
    fn offsets_survive_non_ascii() {
        let m = Markup::new("<p>技名</p><TD>立ち弱P</TD>");
        let td = m.next_block("td", 0).unwrap();
        assert_eq!(td.inner, "立ち弱P");
    }
}
