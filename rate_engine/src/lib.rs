#![forbid(unsafe_code)]

/// Version of the canonical state serialization. Bump when the hashed
/// layout changes.
pub const STATE_FORMAT_VERSION: u32 = 1;

pub mod error;
pub mod domain;
pub mod events;
pub mod state;
pub mod resolver;
pub mod hashing;
pub mod engine;

pub use domain::{ApplicationState, PostcodeConflict, PriceQuote, Rate, RateRequest, Zone};
pub use engine::RateEngine;
pub use error::{EngineError, Result};
pub use events::{Event, EventEnvelope};
