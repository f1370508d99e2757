/// Rate Engine — Event Definitions
///
/// Events are pure data. They carry a tag and a payload only.
/// They contain ZERO replay logic.
///
/// Envelopes arrive with an undecoded payload. Decoding is eager and
/// per-variant: a recognised tag whose payload does not fit its shape
/// is an error, an unrecognised tag decodes to `Event::Unknown`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, Result};

/// Tag of the zone definition event.
pub const ZONE_DEFINED: &str = "ZoneDefined";
/// Tag of the rate definition event.
pub const RATE_DEFINED: &str = "RateDefined";

/// Raw log entry: `{"Event": <tag>, "Data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "Event")]
    pub event_type: String,
    #[serde(rename = "Data", default)]
    pub payload: Value,
}

/// Payload of a `ZoneDefined` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDefined {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Postcodes")]
    pub postcodes: Vec<String>,
}

/// Payload of a `RateDefined` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateDefined {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "MaxWeight")]
    pub max_weight: f64,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "FromZone")]
    pub from_zone: String,
    #[serde(rename = "ToZone")]
    pub to_zone: String,
}

/// Decoded event. Closed over the tags this engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ZoneDefined(ZoneDefined),
    RateDefined(RateDefined),
    /// Tag not recognised by this engine; skipped during replay.
    Unknown { event_type: String },
}

impl Event {
    pub fn event_type(&self) -> &str {
        match self {
            Event::ZoneDefined(_) => ZONE_DEFINED,
            Event::RateDefined(_) => RATE_DEFINED,
            Event::Unknown { event_type } => event_type.as_str(),
        }
    }
}

impl EventEnvelope {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }

    /// Build the envelope for a zone definition.
    pub fn zone_defined(name: &str, postcodes: &[&str]) -> Self {
        Self::new(
            ZONE_DEFINED,
            serde_json::json!({ "Name": name, "Postcodes": postcodes }),
        )
    }

    /// Build the envelope for a rate definition.
    pub fn rate_defined(
        id: &str,
        max_weight: f64,
        cost: f64,
        from_zone: &str,
        to_zone: &str,
    ) -> Self {
        Self::new(
            RATE_DEFINED,
            serde_json::json!({
                "ID": id,
                "MaxWeight": max_weight,
                "Cost": cost,
                "FromZone": from_zone,
                "ToZone": to_zone
            }),
        )
    }

    /// Decode the payload according to the tag.
    ///
    /// `index` is the envelope's position in the log, carried into the
    /// error so a bad entry can be located.
    pub fn decode(&self, index: usize) -> Result<Event> {
        match self.event_type.as_str() {
            ZONE_DEFINED => ZoneDefined::deserialize(&self.payload)
                .map(Event::ZoneDefined)
                .map_err(|source| self.malformed(index, source)),
            RATE_DEFINED => RateDefined::deserialize(&self.payload)
                .map(Event::RateDefined)
                .map_err(|source| self.malformed(index, source)),
            other => Ok(Event::Unknown {
                event_type: other.to_string(),
            }),
        }
    }

    fn malformed(&self, index: usize, source: serde_json::Error) -> EngineError {
        EngineError::MalformedEventData {
            index,
            event_type: self.event_type.clone(),
            source,
        }
    }
}

/// Decode every envelope, stopping at the first malformed one.
pub fn decode_all(envelopes: &[EventEnvelope]) -> Result<Vec<Event>> {
    envelopes
        .iter()
        .enumerate()
        .map(|(index, envelope)| envelope.decode(index))
        .collect()
}
