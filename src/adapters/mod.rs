//! Port adapters: live, recording, and replaying implementations.

pub mod live;
pub mod recording;
pub mod replaying;
