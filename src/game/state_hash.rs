//! Deterministic state hashing for search deduplication
//!
//! Serializes the game state to JSON, strips fields that do not affect play,
//! puts unordered zones in a canonical order and hashes the result. Two
//! states that play out identically from here on hash the same.

use crate::game::GameState;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fields to exclude when computing the state hash
///
/// - logger: presentation layer
/// - rng: shuffles are not part of any sequence outcome
/// - turn_number: bookkeeping only
const EXCLUDED_FIELDS: &[&str] = &["logger", "rng", "turn_number"];

/// Compute a deterministic hash of game state
///
/// Hand, discard, table and trash are treated as multisets; only the draw
/// pile keeps its order.
pub fn compute_state_hash(game: &GameState) -> u64 {
    let json_value = match serde_json::to_value(game) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Warning: Failed to serialize game state for hashing: {}", e);
            return 0;
        }
    };

    let cleaned = strip_metadata(json_value);

    let canonical = match serde_json::to_string(&cleaned) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to canonicalize cleaned state: {}", e);
            return 0;
        }
    };

    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    hasher.finish()
}

/// Recursively strip metadata fields and sort unordered zones
fn strip_metadata(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) => {
            for field in EXCLUDED_FIELDS {
                map.remove(*field);
            }

            let unordered_zone = map
                .get("zone_type")
                .and_then(|z| z.as_str())
                .is_some_and(|z| z != "Draw");

            for (_, v) in map.iter_mut() {
                *v = strip_metadata(v.take());
            }

            if unordered_zone {
                if let Some(serde_json::Value::Array(cards)) = map.get_mut("cards") {
                    cards.sort_by_key(|card| card.to_string());
                }
            }

            serde_json::Value::Object(map)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(strip_metadata).collect())
        }
        other => other,
    }
}

/// Format a hash for display (shows first 8 hex digits)
pub fn format_hash(hash: u64) -> String {
    format!("{:08x}", (hash >> 32) as u32)
}
