/// Rate Engine — Price Resolution
///
/// Read-only over ApplicationState. Never fails: a request that
/// matches nothing yields an empty quote list.

use crate::domain::{ApplicationState, PriceQuote, RateRequest};

/// Resolve every applicable price for `request`, in rate log order.
pub fn resolve(request: &RateRequest, state: &ApplicationState) -> Vec<PriceQuote> {
    let (from_zone, to_zone) = match (state.zone_for(&request.from), state.zone_for(&request.to)) {
        (Some(from), Some(to)) => (from, to),
        _ => return Vec::new(),
    };

    state
        .rates()
        .iter()
        .filter(|rate| rate.applies_to(from_zone, to_zone, request.weight))
        .map(PriceQuote::from)
        .collect()
}
