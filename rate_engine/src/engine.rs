/// Rate Engine — Engine
///
/// Top-level handle. Delegates construction to `state`, lookups to
/// `resolver`.
///
/// The state sits behind an `Arc` and is never mutated after replay,
/// so clones of the engine can quote from any number of threads.

use std::sync::Arc;

use crate::domain::{ApplicationState, PriceQuote, RateRequest};
use crate::error::Result;
use crate::events::EventEnvelope;
use crate::hashing::canonical_hash;
use crate::resolver::resolve;
use crate::state::build;

#[derive(Debug, Clone, Default)]
pub struct RateEngine {
    state: Arc<ApplicationState>,
}

impl RateEngine {
    /// Event-sourced reconstruction from the full log.
    pub fn replay(events: &[EventEnvelope]) -> Result<Self> {
        Ok(Self::from_state(build(events)?))
    }

    pub fn from_state(state: ApplicationState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// Shared read handle to the rebuilt state.
    pub fn shared_state(&self) -> Arc<ApplicationState> {
        Arc::clone(&self.state)
    }

    pub fn quote(&self, request: &RateRequest) -> Vec<PriceQuote> {
        resolve(request, &self.state)
    }

    /// Quote an ordered batch; output order matches input order.
    pub fn quote_all(&self, requests: &[RateRequest]) -> Vec<Vec<PriceQuote>> {
        requests.iter().map(|request| self.quote(request)).collect()
    }

    pub fn state_hash(&self) -> String {
        canonical_hash(&self.state)
    }
}
