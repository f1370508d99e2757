/// Rate Engine — Core Domain Types
///
/// Pure data. No replay logic, no resolution logic.
/// Maps are BTree-backed so iteration order is deterministic.

use std::collections::{BTreeMap, BTreeSet};
use serde::{Serialize, Deserialize};

// ── Rule Set ───────────────────────────────────────────────────────

/// A named group of postcodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub postcodes: BTreeSet<String>,
}

impl Zone {
    pub fn contains(&self, postcode: &str) -> bool {
        self.postcodes.contains(postcode)
    }
}

/// One row of the cost table. Ids are not unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub id: String,
    pub max_weight: f64,
    pub cost: f64,
    pub from_zone: String,
    pub to_zone: String,
}

impl Rate {
    /// Inclusive weight bound plus exact zone match on both ends.
    pub fn applies_to(&self, from_zone: &str, to_zone: &str, weight: f64) -> bool {
        weight <= self.max_weight && self.from_zone == from_zone && self.to_zone == to_zone
    }
}

/// A postcode listed by more than one current zone definition.
///
/// `zones` is in definition order; the last entry owns the postcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostcodeConflict {
    pub postcode: String,
    pub zones: Vec<String>,
}

impl PostcodeConflict {
    pub fn winner(&self) -> Option<&str> {
        self.zones.last().map(String::as_str)
    }
}

/// Rule set rebuilt from the event log. Immutable once built.
///
/// Only `StateBuilder` constructs this; everything else reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationState {
    pub(crate) zones: BTreeMap<String, Zone>,
    pub(crate) rates: Vec<Rate>,
    pub(crate) postcode_index: BTreeMap<String, String>,
    pub(crate) conflicts: Vec<PostcodeConflict>,
}

impl ApplicationState {
    pub fn zones(&self) -> &BTreeMap<String, Zone> {
        &self.zones
    }

    pub fn zone(&self, name: &str) -> Option<&Zone> {
        self.zones.get(name)
    }

    /// Rates in log order.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Name of the zone that owns `postcode`, if any.
    pub fn zone_for(&self, postcode: &str) -> Option<&str> {
        self.postcode_index.get(postcode).map(String::as_str)
    }

    /// Postcodes claimed by more than one zone, sorted by postcode.
    pub fn postcode_conflicts(&self) -> &[PostcodeConflict] {
        &self.conflicts
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty() && self.rates.is_empty()
    }
}

// ── Requests & Quotes ──────────────────────────────────────────────

/// One quote request: `{"From", "To", "Weight"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Weight")]
    pub weight: f64,
}

impl RateRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// One applicable price: `{"RateID", "Price"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(rename = "RateID")]
    pub rate_id: String,
    #[serde(rename = "Price")]
    pub price: f64,
}

impl From<&Rate> for PriceQuote {
    fn from(rate: &Rate) -> Self {
        Self {
            rate_id: rate.id.clone(),
            price: rate.cost,
        }
    }
}
