//! RP2040-specific HAL for the tvpattern firmware
//!
//! This crate provides RP2040 implementations of the `tvpattern-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - GPIO allocation and pin-string parsing for config-driven setup
//! - Dynamic pin allocation from the peripheral set
//! - Button input bank (implements `tvpattern_hal::InputBus`)
//! - Indicator output bank (implements `tvpattern_core::traits::Indicators`)

#![no_std]

pub mod gpio;
pub mod input;
pub mod output;
pub mod pins;

pub use gpio::{parse_pin_string, GpioAllocator, GPIO_COUNT};
pub use input::InputBank;
pub use output::IndicatorBank;
pub use pins::{PinBank, PinError, RemainingPeripherals};
