//! Recording adapters that capture port interactions to cassettes.

pub mod clock;
pub mod filesystem;
pub mod record_store;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use record_store::RecordingRecordStore;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Record an interaction with an infallible return value.
///
/// Mirror of `replaying::next_output`. Recording is best effort: a value
/// that cannot be serialized is logged and skipped so the recorded command
/// still runs.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    match (serde_json::to_value(input), serde_json::to_value(output)) {
        (Ok(input), Ok(output)) => push(recorder, port, method, input, output),
        (Err(e), _) | (_, Err(e)) => warn!(port, method, "skipping unserializable interaction: {e}"),
    }
}

/// Record a fallible interaction as `{"Ok": value}` or `{"Err": message}`.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(value) => serde_json::to_value(value).map(|v| serde_json::json!({ "Ok": v })),
        Err(e) => Ok(serde_json::json!({ "Err": e.to_string() })),
    };
    match (serde_json::to_value(input), output) {
        (Ok(input), Ok(output)) => push(recorder, port, method, input, output),
        (Err(e), _) | (_, Err(e)) => warn!(port, method, "skipping unserializable interaction: {e}"),
    }
}

/// Record a fallible interaction whose error is itself serializable, as
/// `{"Ok": value}` or `{"Err": <error>}`, so replay can rebuild the variant.
pub(crate) fn record_typed_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
    I: Serialize,
{
    let output = match result {
        Ok(value) => serde_json::to_value(value).map(|v| serde_json::json!({ "Ok": v })),
        Err(e) => serde_json::to_value(e).map(|v| serde_json::json!({ "Err": v })),
    };
    match (serde_json::to_value(input), output) {
        (Ok(input), Ok(output)) => push(recorder, port, method, input, output),
        (Err(e), _) | (_, Err(e)) => warn!(port, method, "skipping unserializable interaction: {e}"),
    }
}

fn push(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(e) => warn!(port, method, "recorder lock poisoned: {e}"),
    }
}
