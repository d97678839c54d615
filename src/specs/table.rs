// src/specs/table.rs
//! Tabular markup → header-keyed rows.
//!
//! Two layouts are understood:
//! - **Class-tagged**: the site's frame table marks each cell with a CSS module
//!   class `frame_<field>__<hash>`. Rows are read by class, so column order and
//!   extra decoration cells do not matter. Keys are canonical field keys.
//! - **Header row**: any other `<table>`. The first row holds the labels; each
//!   later row with at least 3 cells maps label → cell text. Cells beyond the
//!   header count are dropped; headers without a cell stay unset.
//!
//! Class-tagged rows win when a document has any.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::core::html::Markup;
use crate::specs::fields::{Field, TableRow, HEADER_LABELS};

/// Data rows need at least this many cells.
const MIN_CELLS: usize = 3;

const CELL_TAGS: &[&str] = &["td", "th"];

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"frame_([a-z_]+?)__").expect("valid class regex"));

// Opener of any element carrying a class attribute.
static CLASSED_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<([a-z][a-z0-9]*)\b[^>]*\bclass\s*=\s*["']([^"']*)["'][^>]*>"#)
        .expect("valid opener regex")
});

/// Every row of every table in `doc`, in document order.
pub fn parse_tables(doc: &Markup) -> Vec<TableRow> {
    let classed = classed_rows(doc);
    if !classed.is_empty() {
        debug!("Table: class-tagged rows={}", classed.len());
        return classed;
    }

    let mut rows = Vec::new();
    for table in doc.blocks("table") {
        rows.extend(header_rows(&Markup::new(table.inner)));
    }
    debug!("Table: header rows={}", rows.len());
    rows
}

/// Rows of one table, keyed by its first row's labels.
pub fn header_rows(table: &Markup) -> Vec<TableRow> {
    let mut trs = table.blocks("tr").into_iter();
    let Some(head) = trs.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = cells(head.inner);
    if headers.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for tr in trs {
        let cells = cells(tr.inner);
        if cells.len() < MIN_CELLS {
            continue;
        }
        let mut row = TableRow::new();
        // zip drops surplus cells and leaves missing ones unset
        for (label, text) in headers.iter().zip(cells) {
            row.insert(label.as_str(), text);
        }
        out.push(row);
    }
    out
}

fn cells(tr_inner: &str) -> Vec<String> {
    Markup::new(tr_inner)
        .blocks_any(CELL_TAGS)
        .iter()
        .map(|c| c.text())
        .collect()
}

/// Rows holding a named skill cell, read by class tag.
pub fn classed_rows(doc: &Markup) -> Vec<TableRow> {
    let mut out = Vec::new();
    for tr in doc.blocks("tr") {
        if !CLASS_RE.is_match(tr.open) && !CLASS_RE.is_match(tr.inner) {
            continue;
        }
        let row = classed_row(tr.inner);
        // a frame row without its skill cell names no move
        let named = row
            .get(Field::Name.key())
            .is_some_and(|n| !n.is_empty() && !HEADER_LABELS.contains(&n));
        if named {
            out.push(row);
        } else {
            debug!("Table: dropped class-tagged row without a move name");
        }
    }
    out
}

fn classed_row(tr_inner: &str) -> TableRow {
    let mut row = TableRow::new();
    let tr = Markup::new(tr_inner);

    for open in CLASSED_OPEN_RE.captures_iter(tr_inner) {
        let (Some(whole), Some(tag), Some(class)) = (open.get(0), open.get(1), open.get(2)) else {
            continue;
        };
        let Some(field) = CLASS_RE
            .captures_iter(class.as_str())
            .filter_map(|c| c.get(1))
            .find_map(|stem| Field::from_class_stem(stem.as_str()))
        else {
            continue;
        };
        // first element per field
        if row.contains(field.key()) {
            continue;
        }
        let text = match tr.next_block(tag.as_str(), whole.start()) {
            Some(b) if b.start == whole.start() => b.text(),
            // void or unclosed element: nothing past the opener belongs to it
            _ => s!(),
        };
        row.insert(field.key(), text);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::fields::FieldSource;

    #[test]
    fn header_row_maps_labels() {
        let html = "<table><tr><th>技名</th><th>発生</th><th>持続</th><th>硬直</th><th>ヒット</th><th>ガード</th></tr>\
                    <tr><td>立ち弱攻撃</td><td>4</td><td>3</td><td>8</td><td>+2</td><td>-1</td></tr></table>";
        let rows = parse_tables(&Markup::new(html));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("技名"), Some("立ち弱攻撃"));
        assert_eq!(rows[0].field(Field::OnHit).as_deref(), Some("+2"));
    }

    #[test]
    fn short_rows_dropped_extra_cells_ignored_missing_unset() {
        let html = "<table><tr><th>技名</th><th>発生</th><th>持続</th><th>硬直</th></tr>\
                    <tr><td>a</td><td>1</td></tr>\
                    <tr><td>b</td><td>1</td><td>2</td><td>3</td><td>9</td></tr>\
                    <tr><td>c</td><td>5</td><td>6</td></tr></table>";
        let rows = parse_tables(&Markup::new(html));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[1].get("硬直"), None);
        assert!(!rows[1].contains("硬直"));
    }

    #[test]
    fn class_tagged_rows_read_by_class() {
        let html = r#"<table>
            <tr><th class="frame_skill__a1">技名</th><th class="frame_startup_frame__b2">発生</th></tr>
            <tr><td class="frame_skill__a1"><span>立ち弱P</span></td>
                <td class="icon">x</td>
                <td class="frame_startup_frame__b2">4</td>
                <td class="frame_hit_frame__c3">+4</td>
                <td class="frame_drive_gauge_lose_dguard__d4">-500</td></tr>
            <tr><td class="other">ad</td></tr>
        </table>"#;
        let rows = parse_tables(&Markup::new(html));
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.field(Field::Name).as_deref(), Some("立ち弱P"));
        assert_eq!(r.field(Field::Startup).as_deref(), Some("4"));
        assert_eq!(r.field(Field::OnHit).as_deref(), Some("+4"));
        assert_eq!(r.field(Field::DriveLossOnGuard).as_deref(), Some("-500"));
    }

    #[test]
    fn no_table_no_rows() {
        assert!(parse_tables(&Markup::new("<p>nothing</p>")).is_empty());
    }
}
