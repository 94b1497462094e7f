//! Button input bank
//!
//! Collects the configured button pins into one [`InputBus`]. The RP2040
//! reads each pin separately; the debounce window absorbs the skew between
//! pins within one snapshot.

use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;
use heapless::Vec;
use tvpattern_core::config::{BoardConfig, PinConfig};
use tvpattern_hal::{BusError, InputBus, InputPin};

use crate::pins::{PinBank, PinError};

/// Maximum number of button inputs
pub const MAX_INPUTS: usize = 4;

/// Embassy input pin adapter
pub struct RpInput(Input<'static>);

impl RpInput {
    /// Configure a pin as input with the pull the config asks for
    pub fn new(pin: Peri<'static, AnyPin>, config: &PinConfig) -> Self {
        let pull = if config.pull_up { Pull::Up } else { Pull::None };
        Self(Input::new(pin, pull))
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Set of input pins read as one bus snapshot
pub struct InputBank<P = RpInput> {
    inputs: Vec<(u8, P), MAX_INPUTS>,
}

impl<P> Default for InputBank<P> {
    fn default() -> Self {
        Self { inputs: Vec::new() }
    }
}

impl<P: InputPin> InputBank<P> {
    /// Add a pin on line `line`
    pub fn add(&mut self, line: u8, pin: P) -> Result<(), PinError> {
        self.inputs
            .push((line, pin))
            .map_err(|_| PinError::BankFull)
    }

    /// Lines in the bank
    pub fn mask(&self) -> u32 {
        self.inputs.iter().fold(0, |mask, (line, _)| mask | 1 << line)
    }
}

impl InputBank<RpInput> {
    /// Take every button pin from the bank
    pub fn from_config(pins: &mut PinBank, config: &BoardConfig) -> Result<Self, PinError> {
        let mut bank = Self::default();
        for button in config.buttons() {
            let pin = pins.take(button.input.pin)?;
            bank.add(button.input.pin, RpInput::new(pin, &button.input))?;
        }
        Ok(bank)
    }
}

impl<P: InputPin> InputBus for InputBank<P> {
    fn read_all(&mut self) -> Result<u32, BusError> {
        if self.inputs.is_empty() {
            return Err(BusError::Unavailable);
        }

        let raw = self
            .inputs
            .iter()
            .filter(|(_, pin)| pin.is_high())
            .fold(0u32, |raw, (line, _)| raw | 1 << line);
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_snapshot_places_bits_by_line() {
        let mut bank = InputBank::default();
        bank.add(26, Level(true)).unwrap();
        bank.add(27, Level(false)).unwrap();

        assert_eq!(bank.read_all(), Ok(1 << 26));
        assert_eq!(bank.mask(), (1 << 26) | (1 << 27));
    }

    #[test]
    fn test_empty_bank_unavailable() {
        let mut bank: InputBank<Level> = InputBank::default();
        assert_eq!(bank.read_all(), Err(BusError::Unavailable));
    }

    #[test]
    fn test_bank_full() {
        let mut bank = InputBank::default();
        for line in 0..MAX_INPUTS as u8 {
            bank.add(line, Level(false)).unwrap();
        }
        assert_eq!(bank.add(9, Level(false)), Err(PinError::BankFull));
    }
}
