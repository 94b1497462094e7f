//! Configuration types
//!
//! Tuning constants and the board description the firmware parses at boot.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
