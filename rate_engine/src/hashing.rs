/// Rate Engine — Canonical Hashing
///
/// Deterministic canonical serialization + SHA-256 hashing.
/// Two replays of the same log must produce the same digest.
///
/// Rules:
///   - Zones sorted by name (UTF-8 byte order)
///   - Postcodes sorted
///   - Rates in log order (order is meaningful for resolution)
///   - Postcode index sorted by postcode
///   - UTF-8 JSON, no whitespace

use sha2::{Digest, Sha256};
use serde_json::{Map, Value};

use crate::domain::ApplicationState;
use crate::STATE_FORMAT_VERSION;

/// Canonical serialization of ApplicationState to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &ApplicationState) -> Vec<u8> {
    build_canonical_value(state).to_string().into_bytes()
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &ApplicationState) -> String {
    to_hex(&Sha256::digest(canonical_serialize(state)))
}

/// Lowercase hex of a digest.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Field order: format_version, zones, rates, postcode_index
fn build_canonical_value(state: &ApplicationState) -> Value {
    // BTreeMap / BTreeSet are already sorted
    let zones: Vec<Value> = state
        .zones()
        .values()
        .map(|zone| {
            let mut zone_map = Map::new();
            zone_map.insert("name".to_string(), Value::String(zone.name.clone()));
            zone_map.insert(
                "postcodes".to_string(),
                Value::Array(zone.postcodes.iter().cloned().map(Value::String).collect()),
            );
            Value::Object(zone_map)
        })
        .collect();

    let rates: Vec<Value> = state
        .rates()
        .iter()
        .map(|rate| {
            let mut rate_map = Map::new();
            rate_map.insert("id".to_string(), Value::String(rate.id.clone()));
            rate_map.insert("max_weight".to_string(), Value::from(rate.max_weight));
            rate_map.insert("cost".to_string(), Value::from(rate.cost));
            rate_map.insert("from_zone".to_string(), Value::String(rate.from_zone.clone()));
            rate_map.insert("to_zone".to_string(), Value::String(rate.to_zone.clone()));
            Value::Object(rate_map)
        })
        .collect();

    let mut index = Map::new();
    for (postcode, zone) in &state.postcode_index {
        index.insert(postcode.clone(), Value::String(zone.clone()));
    }

    let mut root = Map::new();
    root.insert(
        "format_version".to_string(),
        Value::Number(STATE_FORMAT_VERSION.into()),
    );
    root.insert("zones".to_string(), Value::Array(zones));
    root.insert("rates".to_string(), Value::Array(rates));
    root.insert("postcode_index".to_string(), Value::Object(index));

    Value::Object(root)
}
