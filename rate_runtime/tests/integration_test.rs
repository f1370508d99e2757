//! Integration tests for rate_runtime.
//!
//! Filesystem tests use temporary directories; the rest run against
//! the in-memory store.

use std::fs;
use std::path::{Path, PathBuf};

use rate_engine::events::EventEnvelope;

use rate_runtime::app::App;
use rate_runtime::batch::QuotedRequest;
use rate_runtime::config::RuntimeConfig;
use rate_runtime::drift::{compare_states, verify_determinism};
use rate_runtime::error::RuntimeError;
use rate_runtime::replay;
use rate_runtime::store::{ByteStore, FsStore, MemoryStore};
use rate_runtime::verify::quotes_match;

/// Golden hash of the kernel's frozen event log.
const GOLDEN_HASH: &str =
    "6398fe582d0a4a92652387b11a7198a8b5830f5580ce231a0f00d62b3068b6aa";

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

fn read_testdata(name: &str) -> Vec<u8> {
    fs::read(testdata(name)).unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
}

fn load_golden_events() -> Vec<EventEnvelope> {
    serde_json::from_slice(&read_testdata("events.json")).expect("Failed to parse events.json")
}

fn memory_config() -> RuntimeConfig {
    RuntimeConfig {
        events: PathBuf::from("events.json"),
        requests: PathBuf::from("requests.json"),
        output: PathBuf::from("out/results.json"),
        ..RuntimeConfig::default()
    }
}

fn golden_memory_store() -> MemoryStore {
    MemoryStore::new()
        .with_file("events.json", read_testdata("events.json"))
        .with_file("requests.json", read_testdata("requests.json"))
        .with_file("input-output.json", read_testdata("input-output.json"))
}

// ─────────────────────────────────────────────────────────────
// Replay
// ─────────────────────────────────────────────────────────────

#[test]
fn replay_matches_golden_hash() {
    let hash = replay::rebuild_hash(&load_golden_events()).expect("golden log must replay");
    assert_eq!(hash, GOLDEN_HASH, "Runtime replay hash does not match golden hash");
}

#[test]
fn replay_is_deterministic() {
    let hash = verify_determinism(&load_golden_events()).expect("replay must be deterministic");
    assert_eq!(hash, GOLDEN_HASH);
}

#[test]
fn drift_between_prefix_and_full_log() {
    let events = load_golden_events();
    let (prefix, _) = replay::rebuild_state(&events[..5]).expect("prefix replays");
    let (full, _) = replay::rebuild_state(&events).expect("full log replays");

    let report = compare_states(&prefix, &full);
    assert_eq!(report.added_zones, vec!["Remote".to_string()]);
    assert!(report.removed_zones.is_empty());
    assert_eq!(report.changed_zones, vec!["Regional".to_string()]);
    assert_eq!(report.rate_count_delta, 3);
    assert!(!report.is_identical());
    assert!(compare_states(&full, &full).is_identical());
}

// ─────────────────────────────────────────────────────────────
// Quote run
// ─────────────────────────────────────────────────────────────

#[test]
fn quote_run_on_disk_matches_fixture() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = RuntimeConfig {
        events: testdata("events.json"),
        requests: testdata("requests.json"),
        output: dir.path().join("out").join("results.json"),
        ..RuntimeConfig::default()
    };
    let output_path = config.output.clone();

    let outcome = App::new(FsStore, config).run_quote().expect("quote run");
    assert_eq!(outcome.state_hash, GOLDEN_HASH);
    assert_eq!(outcome.summary.requests, 8);
    assert_eq!(outcome.summary.matched, 5);
    assert_eq!(outcome.summary.unmatched, 3);
    assert_eq!(outcome.summary.quotes, 12);

    let written: Vec<QuotedRequest> =
        serde_json::from_slice(&fs::read(&output_path).expect("results written"))
            .expect("results parse");
    let expected: Vec<QuotedRequest> =
        serde_json::from_slice(&read_testdata("input-output.json")).expect("fixture parses");

    assert_eq!(written.len(), expected.len());
    for (got, want) in written.iter().zip(&expected) {
        assert_eq!(got.input, want.input);
        assert!(quotes_match(&want.output, &got.output), "mismatch for {:?}", got.input);
    }
}

#[test]
fn quote_run_pretty_prints_with_two_spaces() {
    let store = golden_memory_store();
    App::new(&store, memory_config()).run_quote().expect("quote run");

    let bytes = store.read(Path::new("out/results.json")).expect("results written");
    let text = String::from_utf8(bytes).expect("UTF-8 output");
    assert!(text.starts_with("[\n  {\n    \"Input\": {"));
    assert!(text.contains("\"Output\": []"));
}

#[test]
fn malformed_log_aborts_and_writes_nothing() {
    let store = golden_memory_store().with_file(
        "events.json",
        r#"[
            {"Event":"ZoneDefined","Data":{"Name":"A","Postcodes":["1000"]}},
            {"Event":"RateDefined","Data":{"ID":"R1","MaxWeight":"ten","Cost":5,"FromZone":"A","ToZone":"A"}}
        ]"#,
    );

    let err = App::new(&store, memory_config()).run_quote().unwrap_err();
    assert!(matches!(err, RuntimeError::Engine(_)), "unexpected error: {}", err);
    assert!(store.read(Path::new("out/results.json")).is_err());
}

#[test]
fn unknown_events_do_not_change_state() {
    let mut events = load_golden_events();
    events.push(EventEnvelope::new("ZoneMerged", serde_json::json!({ "Into": "Metro" })));
    events.insert(0, EventEnvelope::new("Heartbeat", serde_json::Value::Null));

    let hash = replay::rebuild_hash(&events).expect("unknown tags are skipped");
    assert_eq!(hash, GOLDEN_HASH);
}

// ─────────────────────────────────────────────────────────────
// Verify / inspect
// ─────────────────────────────────────────────────────────────

#[test]
fn golden_fixture_verifies() {
    let store = golden_memory_store();
    let report = App::new(&store, memory_config())
        .run_verify(Path::new("input-output.json"))
        .expect("verify run");
    assert_eq!(report.total, 8);
    assert_eq!(report.passed, 8);
    assert!(report.is_ok());
}

#[test]
fn tampered_fixture_reports_mismatch() {
    let store = golden_memory_store().with_file(
        "tampered.json",
        r#"{"Input":{"From":"1000","To":"1002","Weight":10},"Output":[{"RateID":"STD-MM","Price":4.5}]}
           {"Input":{"From":"9999","To":"2000","Weight":1},"Output":null}"#,
    );
    let report = App::new(&store, memory_config())
        .run_verify(Path::new("tampered.json"))
        .expect("verify run");
    assert_eq!(report.total, 2);
    assert_eq!(report.passed, 1);
    assert_eq!(report.mismatches[0].index, 0);
    assert_eq!(report.mismatches[0].actual[0].price, 4.0);
}

#[test]
fn inspect_flags_postcode_conflicts() {
    let store = MemoryStore::new().with_file(
        "events.json",
        r#"[
            {"Event":"ZoneDefined","Data":{"Name":"North","Postcodes":["1000","1001"]}},
            {"Event":"ZoneDefined","Data":{"Name":"South","Postcodes":["1001","2000"]}},
            {"Event":"RateDefined","Data":{"ID":"NS","MaxWeight":1,"Cost":1,"FromZone":"North","ToZone":"South"}}
        ]"#,
    );
    let inspection = App::new(&store, memory_config()).run_inspect().expect("inspect run");
    assert_eq!(inspection.events, 3);
    assert_eq!(inspection.zones, 2);
    assert_eq!(inspection.rates, 1);
    assert_eq!(inspection.conflicts.len(), 1);
    assert_eq!(inspection.conflicts[0].postcode, "1001");
    assert_eq!(inspection.conflicts[0].winner(), Some("South"));
}

#[test]
fn missing_event_log_is_a_read_error() {
    let err = App::new(MemoryStore::new(), memory_config()).run_quote().unwrap_err();
    assert!(matches!(err, RuntimeError::Read { .. }));
}
