//! System clock abstraction
//!
//! Video modes are generated from the system clock, so switching modes can
//! require a new PLL setting. The frequency must be confirmed after the
//! change before anything relies on it.

/// PLL settings for a target system clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllConfig {
    /// Resulting system clock in kHz
    pub sys_khz: u32,
    /// VCO frequency in kHz
    pub vco_khz: u32,
    /// First post divider (1-7)
    pub post_div1: u8,
    /// Second post divider (1-7)
    pub post_div2: u8,
}

impl PllConfig {
    /// Check the dividers and VCO produce the advertised frequency
    pub fn is_consistent(&self) -> bool {
        let div = self.post_div1 as u32 * self.post_div2 as u32;
        div != 0 && self.vco_khz / div == self.sys_khz
    }
}

/// Errors reported while reconfiguring the system clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Requested settings cannot be produced by the PLL
    Unattainable,
    /// Clock was reprogrammed but the measured frequency does not match
    NotConfirmed {
        /// Frequency that was requested (kHz)
        requested_khz: u32,
        /// Frequency measured afterwards (kHz)
        actual_khz: u32,
    },
}

/// Platform system clock
pub trait SystemClock {
    /// Current system clock frequency in kHz
    fn frequency_khz(&self) -> u32;

    /// Reprogram the system PLL
    fn apply_pll(&mut self, pll: &PllConfig) -> Result<(), ClockError>;

    /// Make sure the system clock runs at `pll.sys_khz`
    ///
    /// Leaves the clock untouched when it already matches. Returns `true`
    /// if the PLL was reprogrammed.
    fn ensure(&mut self, pll: &PllConfig) -> Result<bool, ClockError> {
        if self.frequency_khz() == pll.sys_khz {
            return Ok(false);
        }

        if !pll.is_consistent() {
            return Err(ClockError::Unattainable);
        }

        self.apply_pll(pll)?;

        let actual_khz = self.frequency_khz();
        if actual_khz != pll.sys_khz {
            return Err(ClockError::NotConfirmed {
                requested_khz: pll.sys_khz,
                actual_khz,
            });
        }

        Ok(true)
    }
}
