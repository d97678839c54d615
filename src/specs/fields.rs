// src/specs/fields.rs
//! Canonical move fields and where each one can be read from.
//!
//! The same field shows up under different names depending on the source:
//! a Japanese table header (`発生`), an English header (`Startup`), a CSS
//! module class stem (`frame_startup_frame__…`) or a payload key
//! (`startup`, possibly nested under `frames`). `Field` owns that mapping so
//! table rows and payload rows answer the same questions.

use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    NameEnglish,
    NameBase,
    Startup,
    Active,
    Recovery,
    OnHit,
    OnBlock,
    Damage,
    Cancel,
    ComboScaling,
    SpecialScaling,
    Attribute,
    Notes,
    Knockdown,
    DriveGainOnHit,
    DriveLossOnGuard,
    DriveLossOnPunish,
    SaGain,
}

/// Header texts that only ever label a column; a row named like this is a
/// repeated header row.
pub const HEADER_LABELS: &[&str] = &["技名", "発生", "持続", "硬直", "ヒット", "ガード"];

impl Field {
    /// Canonical key; also the first alias.
    pub fn key(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted column/payload names, canonical key first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Name => &["name", "技名", "Move Name", "move_name"],
            Field::NameEnglish => &["name_english", "English Name", "english_name"],
            Field::NameBase => &["name_base", "japanese_base"],
            Field::Startup => &["startup", "発生", "Startup"],
            Field::Active => &["active", "持続", "Active"],
            Field::Recovery => &["recovery", "硬直", "Recovery"],
            Field::OnHit => &["on_hit", "ヒット", "On Hit", "Hit"],
            Field::OnBlock => &["on_block", "ガード", "On Block", "Block"],
            Field::Damage => &["damage", "ダメージ", "Damage"],
            Field::Cancel => &["cancel", "キャンセル", "Cancel"],
            Field::ComboScaling => &["combo_scaling", "補正", "コンボ補正", "Scaling"],
            Field::SpecialScaling => &["special_scaling", "必殺技補正", "Special Scaling"],
            Field::Attribute => &["attribute", "属性", "Attribute"],
            Field::Notes => &["notes", "備考", "Notes"],
            Field::Knockdown => &["knockdown", "ダウン", "Knockdown"],
            Field::DriveGainOnHit => &["gain_on_hit", "DRVゲイン(ヒット)", "Drive Gain Hit"],
            Field::DriveLossOnGuard => &["loss_on_guard", "DRVロス(ガード)", "Drive Loss Guard"],
            Field::DriveLossOnPunish => &["loss_on_punish", "DRVロス(カウンター)", "Drive Loss Counter"],
            Field::SaGain => &["sa_gain", "SAゲイン", "SA Gain"],
        }
    }

    /// Nested object holding this field in canonical payloads.
    pub fn group(self) -> Option<&'static str> {
        match self {
            Field::Startup | Field::Active | Field::Recovery | Field::OnHit | Field::OnBlock => {
                Some("frames")
            }
            Field::Damage
            | Field::Cancel
            | Field::ComboScaling
            | Field::SpecialScaling
            | Field::Attribute
            | Field::Notes
            | Field::Knockdown => Some("properties"),
            Field::DriveGainOnHit | Field::DriveLossOnGuard | Field::DriveLossOnPunish => {
                Some("drive_system")
            }
            Field::Name | Field::NameEnglish | Field::NameBase | Field::SaGain => None,
        }
    }

    /// Field for a `frame_<stem>__<hash>` class name.
    pub fn from_class_stem(stem: &str) -> Option<Field> {
        let f = match stem {
            "skill" => Field::Name,
            "startup_frame" => Field::Startup,
            "active_frame" => Field::Active,
            "recovery_frame" => Field::Recovery,
            "hit_frame" => Field::OnHit,
            "block_frame" => Field::OnBlock,
            "damage" => Field::Damage,
            "cancel" => Field::Cancel,
            "combo_correct" => Field::ComboScaling,
            "special_correct" => Field::SpecialScaling,
            "attribute" => Field::Attribute,
            "note" => Field::Notes,
            "knockdown" => Field::Knockdown,
            "drive_gauge_gain_hit" => Field::DriveGainOnHit,
            "drive_gauge_lose_dguard" => Field::DriveLossOnGuard,
            "drive_gauge_lose_punish" => Field::DriveLossOnPunish,
            "sa_gauge_gain" => Field::SaGain,
            _ => return None,
        };
        Some(f)
    }
}

/// Anything a move can be read from.
pub trait FieldSource {
    /// Raw text of `field`, `None` when the source has no such cell.
    fn field(&self, field: Field) -> Option<String>;
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn field(&self, field: Field) -> Option<String> {
        (**self).field(field)
    }
}

/// One table row: header label (or canonical key) → cell text, in column
/// order. Headers without a cell are absent, not empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRow(Vec<(String, String)>);

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing an earlier cell under the same label.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let (key, text) = (key.into(), text.into());
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(cell) => cell.1 = text,
            None => self.0.push((key, text)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Leftmost cell.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FieldSource for TableRow {
    fn field(&self, field: Field) -> Option<String> {
        let aliases = field.aliases();
        let hit = aliases.iter().find_map(|a| self.get(a)).or_else(|| {
            // headers in odd case ("STARTUP")
            self.0
                .iter()
                .find(|(k, _)| aliases.iter().any(|a| k.trim().eq_ignore_ascii_case(a)))
                .map(|(_, v)| v.as_str())
        });
        match (hit, field) {
            (Some(v), _) => Some(s!(v)),
            // unlabelled name column: tables lead with the move name
            (None, Field::Name) => self.first().map(str::to_string),
            (None, _) => None,
        }
    }
}

/// One move object from an embedded payload.
#[derive(Clone, Copy, Debug)]
pub struct PayloadRow<'a>(pub &'a Map<String, Value>);

impl PayloadRow<'_> {
    fn name_part(&self, key: &str) -> Option<String> {
        match self.0.get("name")? {
            Value::Object(name) => name.get(key).and_then(value_text),
            _ => None,
        }
    }
}

impl FieldSource for PayloadRow<'_> {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Name => {
                if let Some(n) = self.name_part("japanese") {
                    return Some(n);
                }
            }
            Field::NameEnglish => {
                if let Some(n) = self.name_part("english") {
                    return Some(n);
                }
            }
            Field::NameBase => {
                if let Some(n) = self.name_part("japanese_base") {
                    return Some(n);
                }
            }
            _ => {}
        }

        let direct = field
            .aliases()
            .iter()
            .find_map(|a| self.0.get(*a))
            .and_then(value_text);
        if direct.is_some() {
            return direct;
        }

        let group = self.0.get(field.group()?)?.as_object()?;
        group.get(field.key()).and_then(value_text)
    }
}

/// Cell text of a payload value. Objects carry no single text.
pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some(s!("○")),
        Value::Bool(false) => Some(s!("×")),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|i| !i.is_array() && !i.is_object())
                .filter_map(value_text)
                .collect();
            if parts.is_empty() { None } else { Some(parts.join("/")) }
        }
        Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_row_reads_any_alias() {
        let mut row = TableRow::new();
        row.insert("発生", "4");
        row.insert("STARTUP", "9");
        row.insert("On Hit", "+2");
        assert_eq!(row.field(Field::Startup).as_deref(), Some("4"));
        assert_eq!(row.field(Field::OnHit).as_deref(), Some("+2"));
        assert_eq!(row.field(Field::Damage), None);
        assert_eq!(row.field(Field::Name).as_deref(), Some("4"));
    }

    #[test]
    fn name_prefers_a_labelled_column() {
        let mut row = TableRow::new();
        row.insert("No.", "12");
        row.insert("Move Name", "Hadoken");
        assert_eq!(row.field(Field::Name).as_deref(), Some("Hadoken"));
    }

    #[test]
    fn payload_row_reads_flat_nested_and_name_object() {
        let v = json!({
            "name": {"japanese": "波動拳", "english": "Hadoken"},
            "startup": 16,
            "frames": {"on_block": -6},
            "properties": {"combo_scaling": true},
            "cancel": ["SA", "CA"]
        });
        let row = PayloadRow(v.as_object().unwrap());
        assert_eq!(row.field(Field::Name).as_deref(), Some("波動拳"));
        assert_eq!(row.field(Field::NameEnglish).as_deref(), Some("Hadoken"));
        assert_eq!(row.field(Field::Startup).as_deref(), Some("16"));
        assert_eq!(row.field(Field::OnBlock).as_deref(), Some("-6"));
        assert_eq!(row.field(Field::ComboScaling).as_deref(), Some("○"));
        assert_eq!(row.field(Field::Cancel).as_deref(), Some("SA/CA"));
        assert_eq!(row.field(Field::NameBase), None);
    }

    #[test]
    fn class_stems_map_to_fields() {
        assert_eq!(Field::from_class_stem("skill"), Some(Field::Name));
        assert_eq!(Field::from_class_stem("drive_gauge_lose_dguard"), Some(Field::DriveLossOnGuard));
        assert_eq!(Field::from_class_stem("icon"), None);
    }
}
