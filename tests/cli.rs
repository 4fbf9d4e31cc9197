//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

fn store_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("listing_id_cli_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn run_listing_id(store: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_listing-id");
    Command::new(bin)
        .args(args)
        .env("LISTING_ID_STORE", store)
        .env_remove("LISTING_ID_RECORD")
        .output()
        .expect("failed to run listing-id binary")
}

#[test]
fn families_lists_catalog() {
    let output = run_listing_id(&store_dir("families"), &["families"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("commercial-lease-covered-space"));
    assert!(stdout.contains("RA-RESSEAP"));
}

#[test]
fn allocate_in_empty_store_starts_at_one() {
    let store = store_dir("allocate_empty");
    let output = run_listing_id(&store, &["allocate", "commercial-lease-covered-space"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "RA-COMLECS0001\n");

    let output = run_listing_id(&store, &["allocate", "property-selection"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "RA-PS01\n");
}

#[test]
fn create_advances_the_sequence() {
    let store = store_dir("create");
    let first = run_listing_id(&store, &["create", "residential-sell-apartment", "--field", "city=Pune"]);
    assert!(first.status.success());
    assert_eq!(String::from_utf8_lossy(&first.stdout), "RA-RESSEAP0001\n");

    let next = run_listing_id(&store, &["allocate", "residential-sell-apartment"]);
    assert_eq!(String::from_utf8_lossy(&next.stdout), "RA-RESSEAP0002\n");

    let listed = run_listing_id(&store, &["list", "residential-sell-apartment"]);
    let stdout = String::from_utf8_lossy(&listed.stdout);
    assert!(listed.status.success());
    assert!(stdout.contains("RA-RESSEAP0001"));
    assert!(stdout.contains("city=Pune"));

    let _ = std::fs::remove_dir_all(&store);
}

#[test]
fn allocate_continues_after_existing_records() {
    let store = store_dir("existing");
    std::fs::create_dir_all(&store).unwrap();
    std::fs::write(
        store.join("commercial_lease.yaml"),
        "collection: commercial_lease\nrecords:\n\
         - property_id: RA-COMLECS0041\n  family: commercial-lease-covered-space\n  created_at: 2024-06-15T10:00:00Z\n\
         - property_id: RA-COMLESH0099\n  family: commercial-lease-shop\n  created_at: 2024-06-15T10:00:00Z\n",
    )
    .unwrap();

    let output = run_listing_id(&store, &["allocate", "commercial-lease-covered-space"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "RA-COMLECS0042\n");

    let _ = std::fs::remove_dir_all(&store);
}

#[test]
fn allocate_ad_hoc_prefix() {
    let store = store_dir("adhoc");
    let output =
        run_listing_id(&store, &["allocate", "--prefix", "RA-TEST", "--width", "6", "--collection", "misc"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "RA-TEST000001\n");
}

#[test]
fn unknown_family_exits_with_error() {
    let output = run_listing_id(&store_dir("unknown"), &["allocate", "castle"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Unknown listing family"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_listing_id(&store_dir("invalid"), &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
