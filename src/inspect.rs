// src/inspect.rs
//! Read-only page survey for `--inspect`: what markers a page carries and
//! where the locator would take its data from. Nothing is written.

use std::fmt;

use crate::config::consts::MIN_EMBEDDED_OBJECT_LEN;
use crate::core::html::Markup;
use crate::specs::locate::locate;

/// Counted case-insensitively.
pub const MARKERS: &[&str] = &[
    "__NEXT_DATA__",
    "frameData",
    "characterData",
    "moveData",
    "通常技",
    "必殺技",
    "startup",
    "active",
    "recovery",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LargeScript {
    /// Position among the page's script blocks.
    pub index: usize,
    pub chars: usize,
    pub looks_like_json: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectReport {
    pub chars: usize,
    pub markers: Vec<(&'static str, usize)>,
    pub scripts: usize,
    pub large_scripts: Vec<LargeScript>,
    /// Which source the locator settles on.
    pub origin: &'static str,
}

pub fn inspect(doc: &str) -> InspectReport {
    let markup = Markup::new(doc);
    let scripts = markup.blocks("script");

    let large_scripts = scripts
        .iter()
        .enumerate()
        .filter_map(|(index, s)| {
            let body = s.inner.trim();
            let chars = body.chars().count();
            (chars > MIN_EMBEDDED_OBJECT_LEN).then(|| LargeScript {
                index,
                chars,
                looks_like_json: body.starts_with('{') || body.starts_with('['),
            })
        })
        .collect();

    InspectReport {
        chars: doc.chars().count(),
        markers: MARKERS.iter().map(|m| (*m, markup.count_ci(m))).collect(),
        scripts: scripts.len(),
        large_scripts,
        origin: locate(&markup).origin(),
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  size: {} chars", self.chars)?;
        writeln!(f, "  source: {}", self.origin)?;
        for (marker, n) in &self.markers {
            if *n > 0 {
                writeln!(f, "  {marker}: {n}")?;
            }
        }
        writeln!(f, "  scripts: {}", self.scripts)?;
        for s in &self.large_scripts {
            let kind = if s.looks_like_json { "json-like" } else { "code" };
            writeln!(f, "    #{} {} chars ({kind})", s.index, s.chars)?;
        }
        Ok(())
    }
}
