//! Active input lines and their polarity
//!
//! Only lines registered here take part in debouncing; everything else on
//! the bus is ignored even if wired.

use tvpattern_hal::gpio::BUS_WIDTH;
use tvpattern_hal::Polarity;

use crate::config::BoardConfig;

/// Set of monitored input lines
///
/// Built once at initialization and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputLines {
    /// Lines that are monitored
    mask: u32,
    /// Monitored lines that are active-low
    active_low: u32,
}

impl InputLines {
    /// Empty set
    pub const fn new() -> Self {
        Self {
            mask: 0,
            active_low: 0,
        }
    }

    /// Add a line with the given polarity
    ///
    /// Lines outside the bus width are ignored.
    pub const fn with_line(mut self, line: u8, polarity: Polarity) -> Self {
        if line >= BUS_WIDTH {
            return self;
        }
        let bit = 1u32 << line;
        self.mask |= bit;
        match polarity {
            Polarity::ActiveLow => self.active_low |= bit,
            Polarity::ActiveHigh => self.active_low &= !bit,
        }
        self
    }

    /// Lines for every button on the board
    pub fn from_config(config: &BoardConfig) -> Self {
        config.buttons().fold(Self::new(), |lines, button| {
            lines.with_line(button.input.pin, button.input.polarity)
        })
    }

    /// Bit mask of monitored lines
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Check if a line is monitored
    pub fn contains(&self, line: u8) -> bool {
        line < BUS_WIDTH && self.mask & (1 << line) != 0
    }

    /// Polarity of a monitored line
    pub fn polarity(&self, line: u8) -> Option<Polarity> {
        if !self.contains(line) {
            return None;
        }
        if self.active_low & (1 << line) != 0 {
            Some(Polarity::ActiveLow)
        } else {
            Some(Polarity::ActiveHigh)
        }
    }

    /// Convert a raw bus snapshot into "asserted" bits
    ///
    /// Bit `n` of the result is set when line `n` is monitored and its raw
    /// level means pressed for its polarity.
    pub fn asserted(&self, raw: u32) -> u32 {
        (raw ^ self.active_low) & self.mask
    }

    /// Raw bus snapshot with every monitored line released
    pub fn idle_level(&self) -> u32 {
        self.active_low
    }
}
