//! Hardware configuration types
//!
//! Pin assignments for the selection buttons and their indicator outputs.

use tvpattern_hal::gpio::BUS_WIDTH;
use tvpattern_hal::Polarity;

/// Input pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO line number (bit index in a bus snapshot)
    pub pin: u8,
    /// Electrical convention of the line
    pub polarity: Polarity,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create an active-high pin without pull
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            polarity: Polarity::ActiveHigh,
            pull_up: false,
        }
    }

    /// Create an active-low button with internal pull-up
    ///
    /// This is how the pattern board wires its push-buttons.
    pub const fn button(pin: u8) -> Self {
        Self {
            pin,
            polarity: Polarity::ActiveLow,
            pull_up: true,
        }
    }

    /// Check the pin fits in a bus snapshot
    pub fn is_valid(&self) -> bool {
        self.pin < BUS_WIDTH
    }
}

/// Button wiring plus its optional indicator output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Input line the button is wired to
    pub input: PinConfig,
    /// Output line driven while the button is held (active-high)
    pub indicator: Option<u8>,
}

impl ButtonConfig {
    /// Button without an indicator
    pub const fn new(input: PinConfig) -> Self {
        Self {
            input,
            indicator: None,
        }
    }

    /// Attach an indicator output line
    pub const fn with_indicator(mut self, line: u8) -> Self {
        self.indicator = Some(line);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_is_active_low_with_pullup() {
        let pin = PinConfig::button(26);
        assert_eq!(pin.polarity, Polarity::ActiveLow);
        assert!(pin.pull_up);
        assert!(pin.is_valid());
    }

    #[test]
    fn test_pin_out_of_bus_is_invalid() {
        assert!(!PinConfig::new(32).is_valid());
        assert!(PinConfig::new(31).is_valid());
    }

    #[test]
    fn test_with_indicator() {
        let button = ButtonConfig::new(PinConfig::button(27)).with_indicator(17);
        assert_eq!(button.indicator, Some(17));
    }
}
