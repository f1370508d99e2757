//! Batch quoting — one result entry per request, input order preserved.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use rate_engine::domain::{ApplicationState, PriceQuote, RateRequest};
use rate_engine::resolver::resolve;

use crate::error::{Result, RuntimeError};

/// `{"Input": RateRequest, "Output": [PriceQuote]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedRequest {
    #[serde(rename = "Input")]
    pub input: RateRequest,
    #[serde(rename = "Output", default, deserialize_with = "null_as_empty")]
    pub output: Vec<PriceQuote>,
}

// Fixtures written by other tools may carry `"Output": null` for a miss.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<PriceQuote>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<PriceQuote>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub requests: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub quotes: usize,
}

impl BatchSummary {
    pub fn of(results: &[QuotedRequest]) -> Self {
        let matched = results.iter().filter(|r| !r.output.is_empty()).count();
        Self {
            requests: results.len(),
            matched,
            unmatched: results.len() - matched,
            quotes: results.iter().map(|r| r.output.len()).sum(),
        }
    }
}

pub fn quote_batch(state: &ApplicationState, requests: &[RateRequest]) -> Vec<QuotedRequest> {
    let results: Vec<QuotedRequest> = requests
        .iter()
        .map(|request| QuotedRequest {
            input: request.clone(),
            output: resolve(request, state),
        })
        .collect();

    let summary = BatchSummary::of(&results);
    info!(
        requests = summary.requests,
        matched = summary.matched,
        unmatched = summary.unmatched,
        quotes = summary.quotes,
        "batch quoted"
    );
    results
}

/// Two-space pretty JSON with a trailing newline.
pub fn encode_results(results: &[QuotedRequest]) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(results).map_err(|source| RuntimeError::Encode {
        what: "result batch",
        source,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rate_engine::state::build;
    use rate_engine::EventEnvelope;

    fn state() -> ApplicationState {
        build(&[
            EventEnvelope::zone_defined("A", &["1000"]),
            EventEnvelope::zone_defined("B", &["2000"]),
            EventEnvelope::rate_defined("R1", 10.0, 5.0, "A", "B"),
        ])
        .unwrap()
    }

    #[test]
    fn batch_keeps_request_order_and_misses() {
        let requests = vec![
            RateRequest::new("1000", "2000", 3.0),
            RateRequest::new("1000", "2000", 11.0),
            RateRequest::new("9999", "2000", 3.0),
        ];
        let results = quote_batch(&state(), &requests);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].output.len(), 1);
        assert_eq!(results[0].output[0].rate_id, "R1");
        assert!(results[1].output.is_empty());
        assert_eq!(results[2].input, requests[2]);
        assert_eq!(
            BatchSummary::of(&results),
            BatchSummary { requests: 3, matched: 1, unmatched: 2, quotes: 1 }
        );
    }

    #[test]
    fn encoded_results_use_wire_names_and_two_space_indent() {
        let results = quote_batch(&state(), &[RateRequest::new("9999", "2000", 3.0)]);
        let json = String::from_utf8(encode_results(&results).unwrap()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"Input\": {\n      \"From\": \"9999\""));
        assert!(json.contains("\"Output\": []"));
        assert!(json.ends_with("]\n"));
    }

    #[test]
    fn null_output_decodes_as_empty() {
        let raw = r#"{"Input":{"From":"1","To":"2","Weight":1},"Output":null}"#;
        let pair: QuotedRequest = serde_json::from_str(raw).unwrap();
        assert!(pair.output.is_empty());
    }
}
