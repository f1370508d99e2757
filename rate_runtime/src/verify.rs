//! Fixture verification — recompute every `{Input, Output}` pair and
//! report the ones whose quotes differ.

use tracing::warn;

use rate_engine::domain::{ApplicationState, PriceQuote, RateRequest};
use rate_engine::resolver::resolve;

use crate::batch::QuotedRequest;

/// Absolute tolerance when comparing prices.
pub const PRICE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub index: usize,
    pub input: RateRequest,
    pub expected: Vec<PriceQuote>,
    pub actual: Vec<PriceQuote>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationReport {
    pub total: usize,
    pub passed: usize,
    pub mismatches: Vec<Mismatch>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

pub fn verify_fixture(state: &ApplicationState, pairs: &[QuotedRequest]) -> VerificationReport {
    let mut report = VerificationReport {
        total: pairs.len(),
        ..Default::default()
    };

    for (index, pair) in pairs.iter().enumerate() {
        let actual = resolve(&pair.input, state);
        if quotes_match(&pair.output, &actual) {
            report.passed += 1;
            continue;
        }
        warn!(index, input = ?pair.input, "quote mismatch");
        report.mismatches.push(Mismatch {
            index,
            input: pair.input.clone(),
            expected: pair.output.clone(),
            actual,
        });
    }
    report
}

/// Same rate ids in the same order, prices within tolerance.
pub fn quotes_match(expected: &[PriceQuote], actual: &[PriceQuote]) -> bool {
    expected.len() == actual.len()
        && expected.iter().zip(actual).all(|(e, a)| {
            e.rate_id == a.rate_id && (e.price - a.price).abs() <= PRICE_TOLERANCE
        })
}
