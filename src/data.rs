// src/data.rs
//
// Output data model: one CharacterRecord per page.
//
// - Category / MoveType: closed sets. Category keys and their label pairs are
//   part of the output contract (see CATEGORY_LABELS_VERSION).
// - CharacterRecord: built once by the assembler, never mutated afterwards.
//
// Field order of every struct is the key order of the written JSON.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::value::{Correction, FrameValue};

/// Bump when a category key or label changes; consumers key on these strings.
pub const CATEGORY_LABELS_VERSION: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocalizedName {
    pub japanese: String,
    pub english: String,
}

impl LocalizedName {
    pub fn new(japanese: impl Into<String>, english: impl Into<String>) -> Self {
        Self { japanese: japanese.into(), english: english.into() }
    }
}

/// Static label pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Label {
    pub japanese: &'static str,
    pub english: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Normal,
    SpecialNormal,
    SpecialMove,
    SuperArt,
    Throw,
    System,
}

impl Category {
    /// Output order of the category map.
    pub const ALL: [Category; 6] = [
        Category::Normal,
        Category::SpecialNormal,
        Category::SpecialMove,
        Category::SuperArt,
        Category::Throw,
        Category::System,
    ];

    pub fn index(self) -> usize {
        match self {
            Category::Normal => 0,
            Category::SpecialNormal => 1,
            Category::SpecialMove => 2,
            Category::SuperArt => 3,
            Category::Throw => 4,
            Category::System => 5,
        }
    }

    /// Map key in the written record.
    pub fn key(self) -> &'static str {
        self.label().japanese
    }

    pub fn label(self) -> Label {
        let (japanese, english) = match self {
            Category::Normal => ("通常技", "Normal Attacks"),
            Category::SpecialNormal => ("特殊技", "Special Normals"),
            Category::SpecialMove => ("必殺技", "Special Moves"),
            Category::SuperArt => ("スーパーアーツ", "Super Arts"),
            Category::Throw => ("通常投げ", "Throws"),
            Category::System => ("共通システム", "System Mechanics"),
        };
        Label { japanese, english }
    }
}

// A move's category is written as its label pair.
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.label().serialize(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    StandingNormal,
    CrouchingNormal,
    JumpingNormal,
    Throw,
    SpecialMove,
    SpecialNormal,
    SuperArt,
    DriveSystem,
    Unique,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveName {
    pub japanese: String,
    pub english: String,
    pub japanese_base: String,
}

impl MoveName {
    /// Untranslated name: every field carries the native text.
    pub fn native(name: &str) -> Self {
        Self { japanese: s!(name), english: s!(name), japanese_base: s!(name) }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameTiming {
    pub startup: Option<FrameValue>,
    pub active: Option<FrameValue>,
    pub recovery: Option<FrameValue>,
    pub on_hit: Option<FrameValue>,
    pub on_block: Option<FrameValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MoveProperties {
    pub damage: Option<FrameValue>,
    pub cancel: Option<String>,
    pub combo_scaling: Option<Correction>,
    pub special_scaling: Option<Correction>,
    pub attribute: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knockdown: Option<String>,
}

impl MoveProperties {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DriveGauge {
    pub gain_on_hit: Option<FrameValue>,
    pub loss_on_guard: Option<FrameValue>,
    pub loss_on_punish: Option<FrameValue>,
}

impl DriveGauge {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: MoveName,
    pub category: Category,
    #[serde(rename = "type")]
    pub move_type: MoveType,
    pub frames: FrameTiming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<MoveProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drive_system: Option<DriveGauge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sa_gain: Option<FrameValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    #[serde(flatten)]
    pub label: Label,
    pub moves: Vec<u32>,
}

/// The six canonical buckets, always all present, in `Category::ALL` order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBuckets([CategoryBucket; 6]);

impl CategoryBuckets {
    pub fn new() -> Self {
        Self(Category::ALL.map(|c| CategoryBucket { label: c.label(), moves: Vec::new() }))
    }

    pub fn push(&mut self, category: Category, id: u32) {
        self.0[category.index()].moves.push(id);
    }

    pub fn get(&self, category: Category) -> &CategoryBucket {
        &self.0[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryBucket)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }
}

impl Default for CategoryBuckets {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for CategoryBuckets {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.0.len()))?;
        for (category, bucket) in self.iter() {
            map.serialize_entry(category.key(), bucket)?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CharacterRecord {
    pub character: String,
    pub character_name: LocalizedName,
    pub health: u32,
    pub categories: CategoryBuckets,
    pub moves: Vec<MoveRecord>,
}

impl CharacterRecord {
    pub fn move_by_id(&self, id: u32) -> Option<&MoveRecord> {
        // ids are 1..=N in array order
        let ix = usize::try_from(id).ok()?.checked_sub(1)?;
        self.moves.get(ix).filter(|m| m.id == id)
    }

    pub fn moves_in(&self, category: Category) -> impl Iterator<Item = &MoveRecord> {
        self.categories
            .get(category)
            .moves
            .iter()
            .filter_map(|id| self.move_by_id(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_serialize_all_six_in_order() {
        let mut b = CategoryBuckets::new();
        b.push(Category::Throw, 2);
        let json = serde_json::to_string(&b).unwrap();
        let keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        let mut last = 0;
        for k in keys {
            let at = json.find(k).unwrap();
            assert!(at >= last);
            last = at;
        }
        assert!(json.contains(r#""通常投げ":{"japanese":"通常投げ","english":"Throws","moves":[2]}"#));
        assert!(json.contains(r#""共通システム":{"japanese":"共通システム","english":"System Mechanics","moves":[]}"#));
    }

    #[test]
    fn category_serializes_as_label_and_type_as_snake_case() {
        assert_eq!(serde_json::to_string(&Category::SuperArt).unwrap(), r#"{"japanese":"スーパーアーツ","english":"Super Arts"}"#);
        assert_eq!(serde_json::to_string(&MoveType::StandingNormal).unwrap(), r#""standing_normal""#);
    }
}
