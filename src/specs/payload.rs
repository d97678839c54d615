// src/specs/payload.rs
//! Embedded payload → the object holding the moves.
//!
//! Payload shape depends on how the page was rendered: a Next.js capture wraps
//! everything in `props.pageProps`, older captures assign a bare object to a
//! global. `resolve` looks at most two levels below the focus object, never
//! further, so a deep but irrelevant payload costs the same as a shallow one.

use serde_json::{Map, Value};

/// Checked directly on the focus object, in this order.
const CANDIDATE_KEYS: &[&str] = &["frameData", "characterData", "data", "moves", "character"];

/// A nested object holding one of these is taken as the data holder.
const HOLDER_KEYS: &[&str] = &["moves", "character", "frameData"];

/// Where a holder may keep its move list.
const MOVE_CONTAINERS: &[&str] = &["frameData", "characterData", "character", "data"];

/// The object holding the move data, or `payload` itself when nothing fits.
pub fn resolve(payload: &Value) -> &Value {
    let focus = payload
        .pointer("/props/pageProps")
        .filter(|v| v.is_object())
        .unwrap_or(payload);
    let Some(obj) = focus.as_object() else {
        return payload;
    };

    if obj.get("moves").is_some_and(Value::is_array) {
        return focus;
    }
    if let Some(hit) = CANDIDATE_KEYS
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| v.is_object())
    {
        return hit;
    }

    // level 1, then level 2; breadth first, document order
    if let Some(hit) = obj.values().find(|v| is_holder(v)) {
        return hit;
    }
    for child in obj.values().filter_map(Value::as_object) {
        if let Some(hit) = child.values().find(|v| is_holder(v)) {
            return hit;
        }
    }
    payload
}

fn is_holder(v: &Value) -> bool {
    v.as_object()
        .is_some_and(|o| HOLDER_KEYS.iter().any(|k| o.contains_key(*k)))
}

/// Move objects under `holder`, in document order. Non-object entries are
/// skipped.
pub fn move_rows(holder: &Value) -> Vec<&Map<String, Value>> {
    let list = holder.get("moves").or_else(|| {
        MOVE_CONTAINERS
            .iter()
            .filter_map(|k| holder.get(*k))
            .find_map(|v| v.get("moves"))
    });
    match list {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        Some(Value::Object(by_key)) => by_key.values().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn next_page_props_with_moves() {
        let p = json!({"props": {"pageProps": {"moves": [{"name": "a"}]}}});
        assert_eq!(resolve(&p), &p["props"]["pageProps"]);
        assert_eq!(move_rows(resolve(&p)).len(), 1);
    }

    #[test]
    fn candidate_key_order() {
        let p = json!({"data": {"x": 1}, "frameData": {"moves": []}});
        assert_eq!(resolve(&p), &p["frameData"]);
    }

    #[test]
    fn searches_two_levels_only() {
        let two = json!({"a": {"b": {"character": "ken"}}});
        assert_eq!(resolve(&two), &two["a"]["b"]);

        let three = json!({"a": {"b": {"c": {"moves": []}}}});
        assert_eq!(resolve(&three), &three);
    }

    #[test]
    fn level_one_beats_level_two() {
        let p = json!({"x": {"y": {"moves": []}}, "z": {"character": "ryu"}});
        assert_eq!(resolve(&p), &p["z"]);
    }

    #[test]
    fn moves_under_container_or_keyed_object() {
        let nested = json!({"frameData": {"moves": [{"n": 1}, 3, {"n": 2}]}});
        assert_eq!(move_rows(&nested).len(), 2);

        let keyed = json!({"moves": {"m1": {"n": 1}, "m2": {"n": 2}}});
        assert_eq!(move_rows(&keyed).len(), 2);

        assert!(move_rows(&json!({"character": "ken"})).is_empty());
    }

    #[test]
    fn non_object_payload_unchanged() {
        let p = json!([1, 2]);
        assert_eq!(resolve(&p), &p);
    }
}
