/// Rate Engine — Errors
///
/// Only replay can fail. Price resolution has no error path.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A recognised event whose payload does not fit its tag's shape.
    /// Fatal to the whole build.
    #[error("malformed {event_type} payload at event {index}: {source}")]
    MalformedEventData {
        index: usize,
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}
