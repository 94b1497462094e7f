//! Indicator outputs

use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;
use heapless::Vec;
use tvpattern_core::config::BoardConfig;
use tvpattern_core::traits::Indicators;
use tvpattern_hal::OutputPin;

use crate::pins::{PinBank, PinError};

/// Maximum number of indicator outputs
pub const MAX_INDICATORS: usize = 4;

/// Embassy output pin adapter
pub struct RpOutput(Output<'static>);

impl RpOutput {
    /// Configure a pin as output, initially low
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Indicator lines addressed by GPIO number
pub struct IndicatorBank<P = RpOutput> {
    outputs: Vec<(u8, P), MAX_INDICATORS>,
}

impl<P> Default for IndicatorBank<P> {
    fn default() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }
}

impl<P: OutputPin> IndicatorBank<P> {
    /// Add an output on line `line`
    pub fn add(&mut self, line: u8, pin: P) -> Result<(), PinError> {
        self.outputs
            .push((line, pin))
            .map_err(|_| PinError::BankFull)
    }

    /// Current level of an indicator
    pub fn is_on(&self, line: u8) -> Option<bool> {
        self.outputs
            .iter()
            .find(|(l, _)| *l == line)
            .map(|(_, pin)| pin.is_set_high())
    }
}

impl IndicatorBank<RpOutput> {
    /// Take every indicator pin named by the buttons
    ///
    /// Two buttons may share one indicator line.
    pub fn from_config(pins: &mut PinBank, config: &BoardConfig) -> Result<Self, PinError> {
        let mut bank = Self::default();
        for line in config.buttons().filter_map(|button| button.indicator) {
            if bank.is_on(line).is_some() {
                continue;
            }
            bank.add(line, RpOutput::new(pins.take(line)?))?;
        }
        Ok(bank)
    }
}

impl<P: OutputPin> Indicators for IndicatorBank<P> {
    fn set(&mut self, line: u8, on: bool) {
        if let Some((_, pin)) = self.outputs.iter_mut().find(|(l, _)| *l == line) {
            pin.set_state(on);
        }
    }
}
