//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so button and
//! indicator lines can come from the board configuration instead of being
//! hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::CORE1;
use embassy_rp::{Peri, Peripherals};

use crate::gpio::GPIO_COUNT;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the video output
    Reserved,
    /// Bank has no room for another pin
    BankFull,
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
    /// Lines handed to the video engine
    reserved: u32,
}

impl PinBank {
    /// Split the peripherals into a pin bank and everything else
    pub fn new(p: Peripherals) -> (Self, RemainingPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
            reserved: 0,
        };
        let remaining = RemainingPeripherals { core1: p.CORE1 };
        (bank, remaining)
    }

    /// Withhold a range of pins, e.g. the video output lines
    ///
    /// Reserved pins can never be taken.
    pub fn reserve(&mut self, first: u8, count: u8) -> Result<(), PinError> {
        let last = first.checked_add(count).ok_or(PinError::InvalidPin)?;
        if last as usize > GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        for pin in first..last {
            if self.pins[pin as usize].take().is_none() && !self.is_reserved(pin) {
                return Err(PinError::AlreadyTaken);
            }
            self.reserved |= 1 << pin;
        }
        Ok(())
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if self.is_reserved(pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        (pin_num as usize) < GPIO_COUNT && self.pins[pin_num as usize].is_some()
    }

    fn is_reserved(&self, pin_num: u8) -> bool {
        self.reserved & (1 << pin_num) != 0
    }
}

/// Non-GPIO peripherals that remain after creating the pin bank
pub struct RemainingPeripherals {
    /// Second core, runs the video engine
    pub core1: Peri<'static, CORE1>,
}
