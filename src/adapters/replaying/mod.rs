//! Replaying adapters that serve port interactions from cassettes.

pub mod clock;
pub mod filesystem;
pub mod record_store;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use record_store::ReplayingRecordStore;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Take the output of the next recorded `port`/`method` interaction.
///
/// # Panics
///
/// Panics if the replayer is missing, exhausted for the pair, or poisoned.
pub(crate) fn next_output(
    replayer: Option<&Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let Some(replayer) = replayer else {
        panic!("{port} port not configured in CassetteConfig — no cassette loaded for {port}");
    };
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode a recorded `{"Ok": value}` / `{"Err": message}` output.
///
/// An `Err` becomes `Err(message)`; callers map it into their port's error
/// type.
///
/// # Panics
///
/// Panics if the output has neither key or the `Ok` value does not decode
/// as `T`; either means the cassette does not match the code replaying it.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, String> {
    if let Some(message) = output.get("Err") {
        return Err(message.as_str().unwrap_or("unknown error").to_string());
    }
    let value = output
        .get("Ok")
        .cloned()
        .unwrap_or_else(|| panic!("{context}: expected Ok or Err output, got {output}"));
    Ok(serde_json::from_value(value)
        .unwrap_or_else(|e| panic!("{context}: failed to decode recorded output: {e}")))
}
