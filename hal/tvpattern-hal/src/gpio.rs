//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins, plus a bus-level
//! snapshot trait used by the input sampler.

/// Maximum number of input lines a single bus snapshot can carry
pub const BUS_WIDTH: u8 = 32;

/// Electrical convention of an input line
///
/// Buttons wired to ground with a pull-up read low when pressed
/// (`ActiveLow`); buttons wired to the supply read high (`ActiveHigh`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Line reads logic 0 when asserted
    #[default]
    ActiveLow,
    /// Line reads logic 1 when asserted
    ActiveHigh,
}

impl Polarity {
    /// Whether a raw electrical level means "asserted" for this polarity
    pub fn is_asserted(self, high: bool) -> bool {
        match self {
            Polarity::ActiveLow => !high,
            Polarity::ActiveHigh => high,
        }
    }

    /// Raw electrical level of a released (idle) line
    pub fn idle_level(self) -> bool {
        matches!(self, Polarity::ActiveLow)
    }
}

/// Errors reported by an input bus read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The bus could not be read this cycle
    Unavailable,
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Snapshot of every input line on a GPIO bank
///
/// Bit `n` of the returned word is the raw electrical level of line `n`
/// (1 = high). Implementations should take the snapshot in a single read
/// where the hardware allows it.
pub trait InputBus {
    /// Read the raw level of all lines at once
    fn read_all(&mut self) -> Result<u32, BusError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_low_asserted_when_low() {
        assert!(Polarity::ActiveLow.is_asserted(false));
        assert!(!Polarity::ActiveLow.is_asserted(true));
        assert!(Polarity::ActiveLow.idle_level());
    }

    #[test]
    fn test_active_high_asserted_when_high() {
        assert!(Polarity::ActiveHigh.is_asserted(true));
        assert!(!Polarity::ActiveHigh.is_asserted(false));
        assert!(!Polarity::ActiveHigh.idle_level());
    }

    struct FakePin(bool);

    impl OutputPin for FakePin {
        fn set_high(&mut self) {
            self.0 = true;
        }
        fn set_low(&mut self) {
            self.0 = false;
        }
        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state_dispatches() {
        let mut pin = FakePin(false);
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
    }
}
