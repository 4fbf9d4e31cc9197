//! Record-replay round-trip integration test.
//!
//! Records a real `create` and `allocate` against a live store, then
//! replays the captured store and clock cassettes with no store on disk
//! and checks the replayed identifiers match, twice over.

use std::path::{Path, PathBuf};

use serde_json::json;

use listing_id::allocator::{AllocatorSettings, IdScheme};
use listing_id::cassette::config::{cassette_file_name, CassetteConfig};
use listing_id::cassette::recorder::CassetteRecorder;
use listing_id::commands::{allocate, create};
use listing_id::cli::AllocateArgs;
use listing_id::context::ServiceContext;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn family_args(key: &str) -> AllocateArgs {
    AllocateArgs { family: Some(key.to_string()), prefix: None, width: None, collection: None }
}

/// Creates one listing and then previews the next identifier.
async fn exercise(ctx: &ServiceContext) -> (String, String) {
    let created = create::run(ctx, "commercial-sell-warehouse", &[]).await.unwrap();
    let next = allocate::run(ctx, &family_args("commercial-sell-warehouse")).await.unwrap();
    (created, next)
}

fn replay_context(cassettes: &Path) -> ServiceContext {
    // The store root no longer exists; everything comes from cassettes.
    ServiceContext::replaying_from(
        &CassetteConfig::from_dir(cassettes),
        Path::new("/nonexistent/store"),
        AllocatorSettings::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn record_then_replay_produces_identical_outputs() {
    let store = fresh_dir("listing_id_rr_store");
    let cassettes = fresh_dir("listing_id_rr_cassettes");

    // --- Phase 1: record against a live store ---
    let (ctx, session) =
        ServiceContext::recording_at(&cassettes, &store, AllocatorSettings::default()).unwrap();
    let recorded = exercise(&ctx).await;
    drop(ctx);
    session.finish().unwrap();

    assert_eq!(recorded.0, "RA-COMSEWH0001\n");
    assert_eq!(recorded.1, "RA-COMSEWH0002\n");
    for port in ["clock", "fs", "store"] {
        assert!(cassettes.join(cassette_file_name(port)).exists(), "missing {port} cassette");
    }
    let _ = std::fs::remove_dir_all(&store);

    // --- Phase 2: replay and compare ---
    let first = exercise(&replay_context(&cassettes)).await;
    assert_eq!(first, recorded);

    // --- Phase 3: replay again for determinism ---
    let second = exercise(&replay_context(&cassettes)).await;
    assert_eq!(second, first);

    let _ = std::fs::remove_dir_all(&cassettes);
}

#[tokio::test]
async fn replayed_store_outage_falls_back_to_replayed_clock() {
    let dir = fresh_dir("listing_id_rr_outage");

    let mut clock = CassetteRecorder::new(dir.join(cassette_file_name("clock")), "clock", "/srv");
    clock.record("clock", "now", json!({}), json!("2024-06-15T10:10:00.123Z"));
    clock.finish().unwrap();

    let mut store = CassetteRecorder::new(dir.join(cassette_file_name("store")), "store", "/srv");
    store.record(
        "store",
        "find_highest",
        json!({"prefix": "RA-PS"}),
        json!({"Err": "connection refused"}),
    );
    store.finish().unwrap();

    let ctx = replay_context(&dir);
    let records = ctx.record_store("property_selection");
    let scheme = IdScheme::new("RA-PS").unwrap().with_width(2).unwrap();
    let id = ctx.allocator(records.as_ref()).allocate(&scheme).await;

    // 1718446200123 ms since the epoch, modulo 10^8.
    assert_eq!(id, "RA-PS46200123");

    let _ = std::fs::remove_dir_all(&dir);
}
