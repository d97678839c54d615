// src/rules.rs
//! Keyword rule table and the move classifier.
//!
//! Two independent passes run over the same name text, both by substring
//! containment:
//!
//! 1. **Category** – `category_rules` in order, first match wins. No match
//!    means special normal when a `special_normal_tokens` entry matches, else
//!    normal attack. The special-normal check only runs once every listed
//!    rule has missed.
//! 2. **Move type** – `type_rules` in order, first match wins. No match means
//!    special normal when a `special_normal_tokens` entry matches, else unique.
//!
//! The passes are not cross-checked; a disagreement is logged at debug level
//! and both answers are kept.
//!
//! The table is loaded once (built-in or from JSON) and passed by reference.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use serde::Deserialize;

use crate::data::{Category, MoveType};
use crate::error::ExtractError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub tokens: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TypeRule {
    pub move_type: MoveType,
    pub tokens: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RuleTable {
    pub version: String,
    pub category_rules: Vec<CategoryRule>,
    pub special_normal_tokens: Vec<String>,
    pub type_rules: Vec<TypeRule>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub move_type: MoveType,
}

impl Classification {
    /// Whether the type pass landed on the type its category implies.
    /// Categories with several plausible types always agree.
    pub fn agrees(&self) -> bool {
        let expected = match self.category {
            Category::SuperArt => MoveType::SuperArt,
            Category::Throw => MoveType::Throw,
            Category::SpecialMove => MoveType::SpecialMove,
            Category::System => MoveType::DriveSystem,
            Category::Normal | Category::SpecialNormal => return true,
        };
        self.move_type == expected
    }
}

const SUPER_ART: &[&str] = &["SA1", "SA2", "SA3", "CA", "スーパーアーツ", "クリティカルアーツ"];
const THROW: &[&str] = &["投げ", "スルー"];
const SPECIAL_MOVE: &[&str] = &[
    "昇龍", "波動", "竜巻", "スピニング", "百裂", "鷹爪", "気功", "霞駆け",
    "ソニックブーム", "サマーソルト", "スクリューパイル", "ヨガ", "タイガー",
    "スパイラルアロー", "キャノンスパイク", "ローリングアタック", "エレクトリックサンダー",
];
const SYSTEM: &[&str] = &["ドライブ", "Drive", "パリィ", "インパクト", "ラッシュ"];
const SPECIAL_NORMAL: &[&str] = &["天空", "虎襲", "追突", "鶴脚", "追蹴", "天仰", "旋風", "千裂", "順体"];

static BUILTIN: LazyLock<RuleTable> = LazyLock::new(|| {
    let cat = |category, tokens: &[&str]| CategoryRule { category, tokens: owned(tokens) };
    let ty = |move_type, tokens: &[&str]| TypeRule { move_type, tokens: owned(tokens) };
    RuleTable {
        version: s!("2024.2"),
        category_rules: vec![
            cat(Category::SuperArt, SUPER_ART),
            cat(Category::Throw, THROW),
            cat(Category::SpecialMove, SPECIAL_MOVE),
            cat(Category::System, SYSTEM),
        ],
        special_normal_tokens: owned(SPECIAL_NORMAL),
        // posture qualifiers lead the type pass
        type_rules: vec![
            ty(MoveType::StandingNormal, &["立ち", "Stand"]),
            ty(MoveType::CrouchingNormal, &["しゃがみ", "Crouch"]),
            ty(MoveType::JumpingNormal, &["ジャンプ", "Jump"]),
            ty(MoveType::Throw, THROW),
            ty(MoveType::SuperArt, SUPER_ART),
            ty(MoveType::SpecialMove, SPECIAL_MOVE),
            ty(MoveType::DriveSystem, SYSTEM),
        ],
    }
});

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| s!(*t)).collect()
}

fn contains_any(name: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|t| name.contains(t.as_str()))
}

impl RuleTable {
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    pub fn from_json(text: &str) -> Result<Self, ExtractError> {
        let table: RuleTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, ExtractError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject tables that would classify every name the same way.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.version.trim().is_empty() {
            return Err(ExtractError::rules("empty version"));
        }
        let all_tokens = self
            .category_rules
            .iter()
            .flat_map(|r| &r.tokens)
            .chain(self.type_rules.iter().flat_map(|r| &r.tokens))
            .chain(&self.special_normal_tokens);
        for token in all_tokens {
            if token.is_empty() {
                return Err(ExtractError::rules("empty token matches every name"));
            }
        }
        for rule in &self.category_rules {
            if matches!(rule.category, Category::Normal | Category::SpecialNormal) {
                return Err(ExtractError::rules(format!(
                    "{:?} is a fallback category and cannot head a rule",
                    rule.category
                )));
            }
        }
        Ok(())
    }

    pub fn category_of(&self, name: &str) -> Category {
        self.category_rules
            .iter()
            .find(|r| contains_any(name, &r.tokens))
            .map(|r| r.category)
            .unwrap_or_else(|| {
                if contains_any(name, &self.special_normal_tokens) {
                    Category::SpecialNormal
                } else {
                    Category::Normal
                }
            })
    }

    pub fn type_of(&self, name: &str) -> MoveType {
        self.type_rules
            .iter()
            .find(|r| contains_any(name, &r.tokens))
            .map(|r| r.move_type)
            .unwrap_or_else(|| {
                if contains_any(name, &self.special_normal_tokens) {
                    MoveType::SpecialNormal
                } else {
                    MoveType::Unique
                }
            })
    }

    pub fn classify(&self, name: &str) -> Classification {
        let c = Classification {
            category: self.category_of(name),
            move_type: self.type_of(name),
        };
        if !c.agrees() {
            debug!("Classify: passes disagree name={name:?} category={:?} type={:?}", c.category, c.move_type);
        }
        c
    }
}
