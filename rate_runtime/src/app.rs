//! Command handlers — load, replay, then quote / verify / inspect.
//!
//! Every handler replays the log from scratch; nothing survives the run.

use std::path::Path;

use tracing::info;

use rate_engine::domain::PostcodeConflict;
use rate_engine::RateEngine;

use crate::batch::{quote_batch, BatchSummary};
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::event_store::EventStore;
use crate::replay;
use crate::store::ByteStore;
use crate::verify::{verify_fixture, VerificationReport};

/// Outcome of a `quote` run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOutcome {
    pub summary: BatchSummary,
    pub state_hash: String,
}

/// Snapshot facts reported by `inspect`.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub events: usize,
    pub log_digest: String,
    pub zones: usize,
    pub rates: usize,
    pub state_hash: String,
    pub conflicts: Vec<PostcodeConflict>,
}

pub struct App<S> {
    store: EventStore<S>,
    config: RuntimeConfig,
}

impl<S: ByteStore> App<S> {
    pub fn new(store: S, config: RuntimeConfig) -> Self {
        Self {
            store: EventStore::new(store),
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Load and replay the event log.
    pub fn load_engine(&self) -> Result<(RateEngine, String)> {
        let log = self.store.load_events(&self.config.events)?;
        let (state, hash) = replay::rebuild_state(&log.events)?;
        Ok((RateEngine::from_state(state), hash))
    }

    /// Quote the request batch and write the result batch.
    pub fn run_quote(&self) -> Result<QuoteOutcome> {
        let (engine, state_hash) = self.load_engine()?;
        let requests = self.store.load_requests(&self.config.requests)?;

        let results = quote_batch(engine.state(), &requests);
        self.store.write_results(&self.config.output, &results)?;
        info!(path = %self.config.output.display(), results = results.len(), "results written");

        Ok(QuoteOutcome {
            summary: BatchSummary::of(&results),
            state_hash,
        })
    }

    /// Check an `{Input, Output}` fixture against a fresh replay.
    pub fn run_verify(&self, fixture: &Path) -> Result<VerificationReport> {
        let (engine, _) = self.load_engine()?;
        let pairs = self.store.load_fixture(fixture)?;
        let report = verify_fixture(engine.state(), &pairs);
        info!(
            total = report.total,
            passed = report.passed,
            failed = report.mismatches.len(),
            "fixture verified"
        );
        Ok(report)
    }

    pub fn run_inspect(&self) -> Result<Inspection> {
        let log = self.store.load_events(&self.config.events)?;
        let (state, state_hash) = replay::rebuild_state(&log.events)?;
        Ok(Inspection {
            events: log.events.len(),
            log_digest: log.digest,
            zones: state.zones().len(),
            rates: state.rates().len(),
            state_hash,
            conflicts: state.postcode_conflicts().to_vec(),
        })
    }
}
