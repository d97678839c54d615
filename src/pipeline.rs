// src/pipeline.rs
//! One page → one `CharacterRecord`.
//!
//! `extract` is a pure function of the page text and the rule table: it does
//! no I/O and holds no state between calls, so the batch runner can call it
//! from several threads at once.

use log::debug;

use crate::assemble::assemble;
use crate::core::html::Markup;
use crate::data::{CharacterRecord, DriveGauge, FrameTiming, MoveName, MoveProperties, MoveRecord};
use crate::error::ExtractError;
use crate::rules::RuleTable;
use crate::specs::fields::{Field, FieldSource, PayloadRow, HEADER_LABELS};
use crate::specs::locate::{locate, Located};
use crate::specs::payload::{move_rows, resolve};
use crate::specs::table::parse_tables;
use crate::value::{correction, normalize, text_cell, FrameValue};

pub fn extract(slug: &str, doc: &str, rules: &RuleTable) -> Result<CharacterRecord, ExtractError> {
    let markup = Markup::new(doc);
    let located = locate(&markup);
    let origin = located.origin();

    let moves = match &located {
        Located::EmbeddedPayload(payload) | Located::PatternPayload(payload) => {
            let rows = move_rows(resolve(payload));
            let moves = build_moves(rows.into_iter().map(PayloadRow), rules);
            if moves.is_empty() {
                // payload without usable rows: the page may still carry a table
                debug!("Extract: {slug} payload has no move rows, trying tables");
                build_moves(parse_tables(&markup), rules)
            } else {
                moves
            }
        }
        Located::TableRows(rows) => build_moves(rows.iter(), rules),
        Located::NotFound => return Err(ExtractError::SourceNotFound),
    };

    if moves.is_empty() {
        return Err(ExtractError::EmptyMoveSet { origin });
    }
    debug!("Extract: {slug} origin={origin} moves={}", moves.len());
    Ok(assemble(slug, moves))
}

/// Rows → moves with ids `1..=N` over the rows that survive.
pub fn build_moves<S: FieldSource>(rows: impl IntoIterator<Item = S>, rules: &RuleTable) -> Vec<MoveRecord> {
    let mut moves: Vec<MoveRecord> = Vec::new();
    for row in rows {
        let id = moves.len() as u32 + 1;
        if let Some(m) = to_move(&row, id, rules) {
            moves.push(m);
        }
    }
    moves
}

/// `None` when the row has no usable name.
pub fn to_move<S: FieldSource + ?Sized>(row: &S, id: u32, rules: &RuleTable) -> Option<MoveRecord> {
    let name = text(row, Field::Name).filter(|n| !HEADER_LABELS.contains(&n.as_str()))?;

    let mut move_name = MoveName::native(&name);
    if let Some(en) = text(row, Field::NameEnglish) {
        move_name.english = en;
    }
    if let Some(base) = text(row, Field::NameBase) {
        move_name.japanese_base = base;
    }

    let class = rules.classify(&name);

    let frames = FrameTiming {
        startup: frame(row, Field::Startup),
        active: frame(row, Field::Active),
        recovery: frame(row, Field::Recovery),
        on_hit: frame(row, Field::OnHit),
        on_block: frame(row, Field::OnBlock),
    };
    let properties = MoveProperties {
        damage: frame(row, Field::Damage),
        cancel: text(row, Field::Cancel),
        combo_scaling: row.field(Field::ComboScaling).and_then(|t| correction(&t)),
        special_scaling: row.field(Field::SpecialScaling).and_then(|t| correction(&t)),
        attribute: text(row, Field::Attribute),
        notes: text(row, Field::Notes),
        knockdown: text(row, Field::Knockdown),
    };
    let drive = DriveGauge {
        gain_on_hit: frame(row, Field::DriveGainOnHit),
        loss_on_guard: frame(row, Field::DriveLossOnGuard),
        loss_on_punish: frame(row, Field::DriveLossOnPunish),
    };

    Some(MoveRecord {
        id,
        name: move_name,
        category: class.category,
        move_type: class.move_type,
        frames,
        properties: (!properties.is_empty()).then_some(properties),
        drive_system: (!drive.is_empty()).then_some(drive),
        sa_gain: frame(row, Field::SaGain),
    })
}

fn frame<S: FieldSource + ?Sized>(row: &S, field: Field) -> Option<FrameValue> {
    row.field(field).and_then(|t| normalize(&t))
}

fn text<S: FieldSource + ?Sized>(row: &S, field: Field) -> Option<String> {
    row.field(field).and_then(|t| text_cell(&t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, MoveType};
    use crate::specs::fields::TableRow;
    use crate::value::Correction;

    fn rules() -> &'static RuleTable {
        RuleTable::builtin()
    }

    #[test]
    fn nameless_and_header_rows_do_not_consume_ids() {
        let mut header = TableRow::new();
        header.insert("技名", "技名");
        let mut blank = TableRow::new();
        blank.insert("技名", " - ");
        let mut a = TableRow::new();
        a.insert("技名", "立ち弱P");
        let mut b = TableRow::new();
        b.insert("技名", "前投げ");

        let moves = build_moves([header, a, blank, b].iter(), rules());
        assert_eq!(moves.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(moves[1].category, Category::Throw);
    }

    #[test]
    fn optional_groups_only_when_populated() {
        let mut row = TableRow::new();
        row.insert("技名", "しゃがみ中K");
        row.insert("発生", "8");
        row.insert("補正", "○");
        row.insert("DRVゲイン(ヒット)", "2500");
        let m = to_move(&row, 1, rules()).unwrap();
        assert_eq!(m.move_type, MoveType::CrouchingNormal);
        assert_eq!(m.frames.startup, Some(FrameValue::Int(8)));
        assert_eq!(m.properties.unwrap().combo_scaling, Some(Correction::Flag(true)));
        assert_eq!(m.drive_system.unwrap().gain_on_hit, Some(FrameValue::Int(2500)));
        assert_eq!(m.sa_gain, None);

        let mut bare = TableRow::new();
        bare.insert("技名", "挑発");
        let m = to_move(&bare, 1, rules()).unwrap();
        assert!(m.properties.is_none() && m.drive_system.is_none());
    }

    #[test]
    fn not_found_and_empty() {
        assert!(matches!(extract("x", "<p>hi</p>", rules()), Err(ExtractError::SourceNotFound)));

        let empty = r#"<script id="__NEXT_DATA__">{"props":{"pageProps":{"moves":[]}}}</script>"#;
        assert!(matches!(
            extract("x", empty, rules()),
            Err(ExtractError::EmptyMoveSet { origin: "embedded payload" })
        ));
    }

    #[test]
    fn empty_payload_falls_back_to_tables() {
        let html = r#"<script id="__NEXT_DATA__">{"props":{"pageProps":{"moves":[]}}}</script>
            <table><tr><th>技名</th><th>発生</th><th>持続</th></tr>
            <tr><td>波動拳</td><td>16</td><td>-</td></tr></table>"#;
        let rec = extract("ryu", html, rules()).unwrap();
        assert_eq!(rec.moves.len(), 1);
        assert_eq!(rec.categories.get(Category::SpecialMove).moves, vec![1]);
        assert_eq!(rec.moves[0].frames.active, None);
    }
}
