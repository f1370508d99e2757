//! Runtime errors — I/O, JSON framing, and failures surfaced from the kernel.

use std::io;
use std::path::PathBuf;

use rate_engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {what} from {}: {source}", .path.display())]
    Decode {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("determinism failure: replay 1 hashed to {first}, replay 2 to {second}")]
    Determinism { first: String, second: String },

    #[error("logging setup failed: {0}")]
    Logging(String),
}
