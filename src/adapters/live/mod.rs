//! Live adapters for real external interactions.
//!
//! Record stores live in [`crate::store`]; they sit on top of the
//! filesystem port rather than talking to the outside world directly.

pub mod clock;
pub mod filesystem;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
