// src/config/names.rs
use crate::data::LocalizedName;

/// Roster slug → (native, English).
const CHARACTER_NAMES: &[(&str, &str, &str)] = &[
    ("aki", "A.K.I.", "A.K.I."),
    ("blanka", "ブランカ", "Blanka"),
    ("cammy", "キャミィ", "Cammy"),
    ("chunli", "春麗", "Chun-Li"),
    ("deejay", "ディージェイ", "Dee Jay"),
    ("dhalsim", "ダルシム", "Dhalsim"),
    ("ed", "エド", "Ed"),
    ("ehonda", "E.本田", "E. Honda"),
    ("elena", "エレナ", "Elena"),
    ("gouki", "豪鬼", "Akuma"),
    ("guile", "ガイル", "Guile"),
    ("jamie", "ジェイミー", "Jamie"),
    ("jp", "JP", "JP"),
    ("juri", "ジュリ", "Juri"),
    ("ken", "ケン", "Ken"),
    ("kimberly", "キンバリー", "Kimberly"),
    ("lily", "リリー", "Lily"),
    ("luke", "ルーク", "Luke"),
    ("mai", "不知火舞", "Mai Shiranui"),
    ("manon", "マノン", "Manon"),
    ("marisa", "マリーザ", "Marisa"),
    ("rashid", "ラシード", "Rashid"),
    ("ryu", "リュウ", "Ryu"),
    ("sagat", "サガット", "Sagat"),
    ("terry", "テリー・ボガード", "Terry Bogard"),
    ("vega_mbison", "ベガ", "M. Bison"),
    ("zangief", "ザンギエフ", "Zangief"),
];

/// Localized name of `slug`; unknown slugs name themselves.
pub fn character_name(slug: &str) -> LocalizedName {
    CHARACTER_NAMES
        .iter()
        .find(|(s, _, _)| *s == slug)
        .map(|(_, ja, en)| LocalizedName::new(*ja, *en))
        .unwrap_or_else(|| LocalizedName::new(slug, slug))
}

pub fn known_slugs() -> impl Iterator<Item = &'static str> {
    CHARACTER_NAMES.iter().map(|(s, _, _)| *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_27_unique_slugs() {
        let mut slugs: Vec<&str> = known_slugs().collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 27);
    }

    #[test]
    fn known_and_unknown() {
        assert_eq!(character_name("gouki"), LocalizedName::new("豪鬼", "Akuma"));
        assert_eq!(character_name("newcomer"), LocalizedName::new("newcomer", "newcomer"));
    }
}
