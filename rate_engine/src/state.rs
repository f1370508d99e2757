/// Rate Engine — State Construction
///
/// ApplicationState is a pure fold over the event log:
///   - ZoneDefined inserts or overwrites the zone keyed by name
///   - RateDefined appends, log order preserved
///   - unknown tags are logged and skipped
///
/// The postcode index is derived once the fold is complete. Each
/// postcode belongs to the zone whose current definition appears
/// latest in the log.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{ApplicationState, PostcodeConflict, Rate, Zone};
use crate::error::Result;
use crate::events::{decode_all, Event, EventEnvelope, RateDefined, ZoneDefined};

/// Decode every envelope, then fold. No state is produced if any
/// recognised event is malformed.
pub fn build(envelopes: &[EventEnvelope]) -> Result<ApplicationState> {
    let events = decode_all(envelopes)?;
    Ok(build_from_events(&events))
}

/// Fold already-decoded events into a state snapshot.
pub fn build_from_events(events: &[Event]) -> ApplicationState {
    let mut builder = StateBuilder::new();
    for event in events {
        builder.apply(event);
    }
    builder.finish()
}

/// Incremental fold. Consumed by `finish`, so a built state can never
/// be touched again through the builder.
#[derive(Debug, Default)]
pub struct StateBuilder {
    zones: BTreeMap<String, Zone>,
    // zone name -> log position of its current definition
    defined_at: BTreeMap<String, usize>,
    rates: Vec<Rate>,
    position: usize,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event at the next log position.
    pub fn apply(&mut self, event: &Event) {
        let position = self.position;
        self.position += 1;

        match event {
            Event::ZoneDefined(zone) => self.apply_zone_defined(position, zone),
            Event::RateDefined(rate) => self.apply_rate_defined(position, rate),
            Event::Unknown { event_type } => {
                warn!(position, event_type = %event_type, "skipping unknown event type");
            }
        }
    }

    /// Number of events applied so far, recognised or not.
    pub fn applied(&self) -> usize {
        self.position
    }

    pub fn finish(self) -> ApplicationState {
        let (postcode_index, conflicts) = index_postcodes(&self.zones, &self.defined_at);

        for conflict in &conflicts {
            warn!(
                postcode = %conflict.postcode,
                zones = ?conflict.zones,
                owner = conflict.winner().unwrap_or_default(),
                "postcode defined in more than one zone"
            );
        }

        ApplicationState {
            zones: self.zones,
            rates: self.rates,
            postcode_index,
            conflicts,
        }
    }

    fn apply_zone_defined(&mut self, position: usize, event: &ZoneDefined) {
        let zone = Zone {
            name: event.name.clone(),
            postcodes: event.postcodes.iter().cloned().collect(),
        };
        debug!(
            position,
            zone = %zone.name,
            postcodes = zone.postcodes.len(),
            replaced = self.zones.contains_key(&zone.name),
            "zone defined"
        );
        self.defined_at.insert(zone.name.clone(), position);
        self.zones.insert(zone.name.clone(), zone);
    }

    fn apply_rate_defined(&mut self, position: usize, event: &RateDefined) {
        debug!(
            position,
            rate = %event.id,
            from_zone = %event.from_zone,
            to_zone = %event.to_zone,
            "rate defined"
        );
        self.rates.push(Rate {
            id: event.id.clone(),
            max_weight: event.max_weight,
            cost: event.cost,
            from_zone: event.from_zone.clone(),
            to_zone: event.to_zone.clone(),
        });
    }
}

/// Build `postcode -> zone name`, visiting zones in definition order so
/// the latest definition owns a shared postcode.
fn index_postcodes(
    zones: &BTreeMap<String, Zone>,
    defined_at: &BTreeMap<String, usize>,
) -> (BTreeMap<String, String>, Vec<PostcodeConflict>) {
    let mut ordered: Vec<&Zone> = zones.values().collect();
    ordered.sort_by_key(|zone| defined_at.get(&zone.name).copied().unwrap_or(0));

    let mut owners: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for zone in ordered {
        for postcode in &zone.postcodes {
            owners
                .entry(postcode.as_str())
                .or_default()
                .push(zone.name.clone());
        }
    }

    let mut index = BTreeMap::new();
    let mut conflicts = Vec::new();
    for (postcode, names) in owners {
        if let Some(owner) = names.last() {
            index.insert(postcode.to_string(), owner.clone());
        }
        if names.len() > 1 {
            conflicts.push(PostcodeConflict {
                postcode: postcode.to_string(),
                zones: names,
            });
        }
    }

    (index, conflicts)
}
