//! Replay orchestrator — rebuild state from the event log.
//!
//! Delegates all domain logic to the kernel. No cached state.

use tracing::info;

use rate_engine::domain::ApplicationState;
use rate_engine::events::EventEnvelope;
use rate_engine::hashing::canonical_hash;
use rate_engine::state::build;

use crate::error::Result;

/// Rebuild the rule set from a sequence of events.
///
/// Returns (final_state, canonical_hash). Fails without producing a
/// state if any recognised event is malformed.
pub fn rebuild_state(events: &[EventEnvelope]) -> Result<(ApplicationState, String)> {
    let state = build(events)?;
    let hash = canonical_hash(&state);
    info!(
        events = events.len(),
        zones = state.zones().len(),
        rates = state.rates().len(),
        conflicts = state.postcode_conflicts().len(),
        hash = %hash,
        "state rebuilt"
    );
    Ok((state, hash))
}

/// Rebuild state and return only the canonical hash.
pub fn rebuild_hash(events: &[EventEnvelope]) -> Result<String> {
    let (_, hash) = rebuild_state(events)?;
    Ok(hash)
}
