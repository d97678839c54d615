// src/specs/locate.rs
//! Finds where a page keeps its frame data.
//!
//! Strategies run in a fixed order and the first hit wins:
//!
//! 1. `<script id="__NEXT_DATA__">` whose whole body parses as an object.
//! 2. `__NEXT_DATA__ = {…}` inside any script body. The object is cut by
//!    balanced-brace scanning; a body whose cut fails to parse is skipped.
//! 3. Alternate globals (`window.__INITIAL_STATE__`, `frameData`, …), same cut.
//!    Only objects with a top-level `character` or `moves` key count.
//! 4. Any top-level object literal in a script body of at least
//!    [`MIN_EMBEDDED_OBJECT_LEN`] chars with the same key requirement.
//! 5. Table markup.
//!
//! A strategy that finds nothing, or only unparseable text, is a miss; misses
//! are logged at debug level and never surface as errors. When every strategy
//! misses the page is `NotFound`.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::Value;

use crate::config::consts::MIN_EMBEDDED_OBJECT_LEN;
use crate::core::html::{Block, Markup};
use crate::core::scan::balanced_object;
use crate::specs::fields::TableRow;
use crate::specs::table::parse_tables;

pub const NEXT_DATA_ID: &str = "__NEXT_DATA__";

/// Keys that mark an anonymous object as frame data.
const PAYLOAD_KEYS: &[&str] = &["character", "moves"];

#[derive(Clone, Debug, PartialEq)]
pub enum Located {
    /// The page's canonical data element.
    EmbeddedPayload(Value),
    /// An object cut out of script text.
    PatternPayload(Value),
    TableRows(Vec<TableRow>),
    NotFound,
}

impl Located {
    /// Short name for logs and errors.
    pub fn origin(&self) -> &'static str {
        match self {
            Located::EmbeddedPayload(_) => "embedded payload",
            Located::PatternPayload(_) => "script payload",
            Located::TableRows(_) => "table",
            Located::NotFound => "nothing",
        }
    }
}

/// Why one strategy produced nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Miss {
    Absent,
    Malformed(String),
}

type Strategy = fn(&Page<'_>) -> Result<Located, Miss>;

const STRATEGIES: &[(&str, Strategy)] = &[
    ("next-data element", next_data_element),
    ("next-data assignment", next_data_assignment),
    ("alternate globals", alternate_globals),
    ("large object", large_object),
    ("tables", tables),
];

pub static NEXT_DATA_ASSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__NEXT_DATA__\s*=\s*\{").expect("valid next-data regex"));

pub static ALTERNATE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"window\.__INITIAL_STATE__\s*=\s*\{",
        r"window\.frameData\s*=\s*\{",
        r"\bframeData\s*[:=]\s*\{",
        r"\bcharacterData\s*[:=]\s*\{",
        r"\bmoveData\s*[:=]\s*\{",
        r"\bdata\s*[:=]\s*\{",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid alternate regex"))
    .collect()
});

/// A document plus its script blocks, sliced once.
struct Page<'a> {
    markup: &'a Markup<'a>,
    scripts: Vec<Block<'a>>,
}

pub fn locate(doc: &Markup) -> Located {
    let page = Page { markup: doc, scripts: doc.blocks("script") };

    for (name, strategy) in STRATEGIES {
        match strategy(&page) {
            Ok(found) => {
                debug!("Locate: hit strategy={name} origin={}", found.origin());
                return found;
            }
            Err(Miss::Absent) => debug!("Locate: miss strategy={name}"),
            Err(Miss::Malformed(why)) => debug!("Locate: miss strategy={name} malformed={why}"),
        }
    }
    Located::NotFound
}

fn next_data_element(page: &Page) -> Result<Located, Miss> {
    let script = page
        .scripts
        .iter()
        .find(|s| s.attr("id").as_deref() == Some(NEXT_DATA_ID))
        .ok_or(Miss::Absent)?;
    parse_object(script.inner.trim()).map(Located::EmbeddedPayload)
}

fn next_data_assignment(page: &Page) -> Result<Located, Miss> {
    first_assignment(page, std::slice::from_ref(&*NEXT_DATA_ASSIGN_RE), false)
}

fn alternate_globals(page: &Page) -> Result<Located, Miss> {
    first_assignment(page, &ALTERNATE_RES, true)
}

// Each script body in order; within a body, each pattern in order.
fn first_assignment(page: &Page, patterns: &[Regex], keyed: bool) -> Result<Located, Miss> {
    let mut miss = Miss::Absent;
    for script in &page.scripts {
        let body = script.inner;
        for re in patterns {
            for m in re.find_iter(body) {
                // pattern ends on the opening brace
                let Some((a, b)) = balanced_object(body, m.end() - 1) else {
                    miss = Miss::Malformed(s!("unbalanced object"));
                    continue;
                };
                match parse_object(&body[a..b]) {
                    Ok(v) if !keyed || has_payload_key(&v) => return Ok(Located::PatternPayload(v)),
                    Ok(_) => {}
                    Err(e) => miss = e,
                }
            }
        }
    }
    Err(miss)
}

fn large_object(page: &Page) -> Result<Located, Miss> {
    let mut miss = Miss::Absent;
    for script in &page.scripts {
        let body = script.inner;
        let mut pos = 0usize;
        while let Some(open) = body.get(pos..).and_then(|rest| rest.find('{')) {
            let open = pos + open;
            // a stray quote in code leaves this brace unclosed; try the next one
            let Some((a, b)) = balanced_object(body, open) else {
                pos = open + 1;
                continue;
            };
            // top-level objects only: resume after this one
            pos = b;
            if body[a..b].chars().count() < MIN_EMBEDDED_OBJECT_LEN {
                continue;
            }
            match parse_object(&body[a..b]) {
                Ok(v) if has_payload_key(&v) => return Ok(Located::PatternPayload(v)),
                Ok(_) => {}
                Err(e) => miss = e,
            }
        }
    }
    Err(miss)
}

fn tables(page: &Page) -> Result<Located, Miss> {
    let rows = parse_tables(page.markup);
    if rows.is_empty() { Err(Miss::Absent) } else { Ok(Located::TableRows(rows)) }
}

fn parse_object(text: &str) -> Result<Value, Miss> {
    match serde_json::from_str::<Value>(text) {
        Ok(v) if v.is_object() => Ok(v),
        Ok(_) => Err(Miss::Malformed(s!("not an object"))),
        Err(e) => Err(Miss::Malformed(e.to_string())),
    }
}

fn has_payload_key(v: &Value) -> bool {
    PAYLOAD_KEYS.iter().any(|k| v.get(*k).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(html: &str) -> Located {
        locate(&Markup::new(html))
    }

    #[test]
    fn next_data_element_first() {
        let html = r#"<script>window.frameData = {"moves": [2]};</script>
            <script id="__NEXT_DATA__" type="application/json">{"props":{"pageProps":{"moves":[1]}}}</script>"#;
        assert_eq!(
            run(html),
            Located::EmbeddedPayload(json!({"props": {"pageProps": {"moves": [1]}}}))
        );
    }

    #[test]
    fn malformed_element_falls_through_to_assignment() {
        let html = r#"<script id="__NEXT_DATA__">{broken</script>
            <script>self.__NEXT_DATA__ = {"a": {"b": "}"}}; start();</script>"#;
        assert_eq!(run(html), Located::PatternPayload(json!({"a": {"b": "}"}})));
    }

    #[test]
    fn bad_assignment_body_tries_next_script() {
        let html = r#"<script>__NEXT_DATA__ = {oops: 1};</script>
            <script>__NEXT_DATA__ = {"ok": true}</script>"#;
        assert_eq!(run(html), Located::PatternPayload(json!({"ok": true})));
    }

    #[test]
    fn alternate_global_needs_payload_key() {
        let skip = r#"<script>var data = {"theme": "dark"};</script>"#;
        assert_eq!(run(skip), Located::NotFound);

        let take = r#"<script>window.__INITIAL_STATE__ = {"character": "ken", "moves": []};</script>"#;
        assert_eq!(run(take), Located::PatternPayload(json!({"character": "ken", "moves": []})));
    }

    #[test]
    fn large_anonymous_object() {
        let filler = "x".repeat(MIN_EMBEDDED_OBJECT_LEN);
        let html = format!(
            r#"<script>init({{"small": 1}}); register({{"moves": [], "pad": "{filler}"}});</script>"#
        );
        match run(&html) {
            Located::PatternPayload(v) => assert!(v.get("moves").is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn large_object_after_stray_quote_in_code() {
        let filler = "x".repeat(MIN_EMBEDDED_OBJECT_LEN);
        let html = format!(
            r#"<script>function f(s){{return s.replace(/'/g,"")}} register({{"moves":[{{"name":"立ち弱P"}}],"pad":"{filler}"}});</script>"#
        );
        match run(&html) {
            Located::PatternPayload(v) => assert_eq!(v["moves"][0]["name"], json!("立ち弱P")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tables_last_then_not_found() {
        let html = "<table><tr><th>技名</th><th>発生</th><th>持続</th></tr><tr><td>a</td><td>1</td><td>2</td></tr></table>";
        assert!(matches!(run(html), Located::TableRows(rows) if rows.len() == 1));
        assert_eq!(run("<p>empty</p>"), Located::NotFound);
    }
}
