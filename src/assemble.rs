// src/assemble.rs
//! Moves → one `CharacterRecord`.
//!
//! Bucketing is a single pass: each id lands in exactly the bucket of its own
//! category, in move order. All six buckets are emitted, empty or not.

use crate::config::consts::DEFAULT_HEALTH;
use crate::config::names::character_name;
use crate::data::{CategoryBuckets, CharacterRecord, MoveRecord};

pub fn assemble(slug: &str, moves: Vec<MoveRecord>) -> CharacterRecord {
    let mut categories = CategoryBuckets::new();
    for m in &moves {
        categories.push(m.category, m.id);
    }
    CharacterRecord {
        character: s!(slug),
        character_name: character_name(slug),
        health: DEFAULT_HEALTH,
        categories,
        moves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, FrameTiming, MoveName, MoveType};

    fn mv(id: u32, category: Category) -> MoveRecord {
        MoveRecord {
            id,
            name: MoveName::native("x"),
            category,
            move_type: MoveType::Unique,
            frames: FrameTiming::default(),
            properties: None,
            drive_system: None,
            sa_gain: None,
        }
    }

    #[test]
    fn each_id_in_exactly_its_bucket() {
        let moves = vec![
            mv(1, Category::Normal),
            mv(2, Category::Throw),
            mv(3, Category::Normal),
            mv(4, Category::System),
        ];
        let rec = assemble("ken", moves);
        assert_eq!(rec.categories.get(Category::Normal).moves, vec![1, 3]);
        assert_eq!(rec.categories.get(Category::Throw).moves, vec![2]);
        assert!(rec.categories.get(Category::SuperArt).moves.is_empty());

        let total: usize = rec.categories.iter().map(|(_, b)| b.moves.len()).sum();
        assert_eq!(total, rec.moves.len());
        for m in &rec.moves {
            assert!(rec.categories.get(m.category).moves.contains(&m.id));
        }
    }

    #[test]
    fn names_and_baseline() {
        let rec = assemble("ryu", Vec::new());
        assert_eq!(rec.character_name.english, "Ryu");
        assert_eq!(rec.health, 10_000);
        assert_eq!(rec.categories.iter().count(), 6);

        let unknown = assemble("newcomer", Vec::new());
        assert_eq!(unknown.character_name.japanese, "newcomer");
    }
}
