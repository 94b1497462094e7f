//! tvpattern Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the pattern controller needs from
//! a chip-specific HAL. The core logic only ever sees these traits, so it can
//! be driven by synthetic inputs on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tvpattern-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tvpattern-core (debounce, selection)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tvpattern-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ tvpattern-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::InputBus`] - Whole-bank input snapshot
//! - [`clock::SystemClock`] - System clock reconfiguration

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use clock::{ClockError, PllConfig, SystemClock};
pub use gpio::{BusError, InputBus, InputPin, OutputPin, Polarity};
