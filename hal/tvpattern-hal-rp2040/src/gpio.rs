//! GPIO allocation and pin strings
//!
//! Tracks which GPIO pins are in use to prevent conflicts, and parses the
//! pin strings used in the board configuration.

use tvpattern_core::config::PinConfig;
use tvpattern_hal::Polarity;

use crate::pins::PinError;

/// GPIO lines on the RP2040 (GPIO0-29)
pub const GPIO_COUNT: usize = 30;

/// Claims on GPIO lines, checked before any pin is configured
///
/// Used to reject board files that put two functions on one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpioAllocator {
    claimed: u32,
}

impl GpioAllocator {
    pub const fn new() -> Self {
        Self { claimed: 0 }
    }

    /// Claim one line
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        let bit = line_bit(pin)?;
        if self.claimed & bit != 0 {
            return Err(PinError::AlreadyTaken);
        }
        self.claimed |= bit;
        Ok(())
    }

    /// Claim `count` consecutive lines starting at `first`
    ///
    /// All or nothing: on error no line is claimed.
    pub fn allocate_range(&mut self, first: u8, count: u8) -> Result<(), PinError> {
        let mut range = 0u32;
        for pin in first..first.checked_add(count).ok_or(PinError::InvalidPin)? {
            range |= line_bit(pin)?;
        }
        if self.claimed & range != 0 {
            return Err(PinError::Reserved);
        }
        self.claimed |= range;
        Ok(())
    }

    /// Give a line back
    pub fn release(&mut self, pin: u8) {
        if let Ok(bit) = line_bit(pin) {
            self.claimed &= !bit;
        }
    }

    pub fn is_allocated(&self, pin: u8) -> bool {
        line_bit(pin).is_ok_and(|bit| self.claimed & bit != 0)
    }

    /// Number of claimed lines
    pub fn allocated_count(&self) -> usize {
        self.claimed.count_ones() as usize
    }
}

fn line_bit(pin: u8) -> Result<u32, PinError> {
    if (pin as usize) < GPIO_COUNT {
        Ok(1 << pin)
    } else {
        Err(PinError::InvalidPin)
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> pin 11, active-high, no pull
/// - "!gpio26" -> pin 26, active-low
/// - "^gpio4" -> pin 4 with pull-up
/// - "^!gpio27" or "!^gpio27" -> active-low with pull-up
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let mut s = s.trim();
    let mut config = PinConfig::new(0);

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            config.polarity = Polarity::ActiveLow;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            config.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin >= GPIO_COUNT as u8 {
        return None;
    }

    config.pin = pin;
    Some(config)
}
