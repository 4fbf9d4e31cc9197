//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single call made through a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the recording (assigned by the recorder).
    pub seq: u64,
    /// Port name: `clock`, `fs`, or `store`.
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments the method was called with.
    pub input: serde_json::Value,
    /// What the port returned. Fallible methods use `{"Ok": ..}` / `{"Err": ".."}`.
    pub output: serde_json::Value,
}

/// An ordered recording of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the recording was written.
    pub recorded_at: DateTime<Utc>,
    /// Store root the recorded command ran against.
    pub store: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}
