//! JSON file contracts over a `ByteStore`.
//!
//! Reads the event log, the request batch and verification fixtures;
//! writes the result batch. All byte-level framing lives here so the
//! kernel only ever sees decoded values.

use std::path::Path;

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use tracing::debug;

use rate_engine::domain::RateRequest;
use rate_engine::events::EventEnvelope;
use rate_engine::hashing::to_hex;

use crate::batch::{encode_results, QuotedRequest};
use crate::error::{Result, RuntimeError};
use crate::store::ByteStore;

/// Decoded event log plus the SHA-256 of its raw bytes.
#[derive(Debug, Clone)]
pub struct EventLog {
    pub events: Vec<EventEnvelope>,
    pub digest: String,
}

pub struct EventStore<S> {
    store: S,
}

impl<S: ByteStore> EventStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the event log: a JSON array of `{"Event", "Data"}` objects.
    ///
    /// Only the envelope is decoded here; payloads are decoded by the
    /// kernel during replay.
    pub fn load_events(&self, path: &Path) -> Result<EventLog> {
        let bytes = self.read(path)?;
        let digest = to_hex(&Sha256::digest(&bytes));
        let events: Vec<EventEnvelope> = decode(&bytes, path, "event log")?;
        debug!(path = %path.display(), events = events.len(), digest = %digest, "event log loaded");
        Ok(EventLog { events, digest })
    }

    /// Load a request batch: a JSON array of `{"From", "To", "Weight"}`.
    pub fn load_requests(&self, path: &Path) -> Result<Vec<RateRequest>> {
        let bytes = self.read(path)?;
        decode(&bytes, path, "request batch")
    }

    /// Load `{Input, Output}` pairs, either as a JSON array or as a
    /// stream of concatenated objects.
    pub fn load_fixture(&self, path: &Path) -> Result<Vec<QuotedRequest>> {
        let bytes = self.read(path)?;
        let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
        if first == Some(&b'[') {
            return decode(&bytes, path, "fixture");
        }
        serde_json::Deserializer::from_slice(&bytes)
            .into_iter::<QuotedRequest>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|source| RuntimeError::Decode {
                what: "fixture",
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn write_results(&self, path: &Path, results: &[QuotedRequest]) -> Result<()> {
        let bytes = encode_results(results)?;
        self.store
            .write(path, &bytes)
            .map_err(|source| RuntimeError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.store.read(path).map_err(|source| RuntimeError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8], path: &Path, what: &'static str) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| RuntimeError::Decode {
        what,
        path: path.to_path_buf(),
        source,
    })
}
