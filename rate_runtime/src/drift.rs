//! Drift detection — determinism verification and state comparison.

use std::collections::BTreeSet;

use rate_engine::domain::ApplicationState;
use rate_engine::events::EventEnvelope;

use crate::error::{Result, RuntimeError};
use crate::replay;

/// Replay the same events twice and require identical hashes.
/// Returns the agreed hash.
pub fn verify_determinism(events: &[EventEnvelope]) -> Result<String> {
    let first = replay::rebuild_hash(events)?;
    let second = replay::rebuild_hash(events)?;

    if first != second {
        return Err(RuntimeError::Determinism { first, second });
    }
    Ok(first)
}

/// Structured comparison of two rule sets, `a` being the baseline.
pub fn compare_states(state_a: &ApplicationState, state_b: &ApplicationState) -> DriftReport {
    let names_a: BTreeSet<&str> = state_a.zones().keys().map(String::as_str).collect();
    let names_b: BTreeSet<&str> = state_b.zones().keys().map(String::as_str).collect();

    let added_zones = names_b.difference(&names_a).map(|s| s.to_string()).collect();
    let removed_zones = names_a.difference(&names_b).map(|s| s.to_string()).collect();
    let changed_zones = names_a
        .intersection(&names_b)
        .filter(|name| state_a.zone(name) != state_b.zone(name))
        .map(|s| s.to_string())
        .collect();

    let rate_count_a = state_a.rates().len() as i64;
    let rate_count_b = state_b.rates().len() as i64;

    DriftReport {
        zone_count_a: names_a.len() as i64,
        zone_count_b: names_b.len() as i64,
        zone_count_delta: names_b.len() as i64 - names_a.len() as i64,
        rate_count_a,
        rate_count_b,
        rate_count_delta: rate_count_b - rate_count_a,
        rates_reordered_or_changed: state_a.rates() != state_b.rates(),
        added_zones,
        removed_zones,
        changed_zones,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftReport {
    pub zone_count_a: i64,
    pub zone_count_b: i64,
    pub zone_count_delta: i64,
    pub rate_count_a: i64,
    pub rate_count_b: i64,
    pub rate_count_delta: i64,
    pub rates_reordered_or_changed: bool,
    pub added_zones: Vec<String>,
    pub removed_zones: Vec<String>,
    pub changed_zones: Vec<String>,
}

impl DriftReport {
    pub fn is_identical(&self) -> bool {
        self.added_zones.is_empty()
            && self.removed_zones.is_empty()
            && self.changed_zones.is_empty()
            && !self.rates_reordered_or_changed
    }
}
