//! Configuration type definitions
//!
//! Compile-time tuning constants and the runtime board description.

use super::hardware::{ButtonConfig, PinConfig};

/// Raw samples that must agree before a button state is trusted
pub const SAMPLE_COUNT: usize = 10;

/// Sampling period in microseconds (10 × 2 ms = 20 ms debounce latency)
pub const SAMPLE_INTERVAL_US: u32 = 2_000;

/// GPIO used for the "next pattern" button
pub const DEFAULT_NEXT_PIN: u8 = 26;

/// GPIO used for the "previous pattern" button
pub const DEFAULT_PREV_PIN: u8 = 27;

/// Video mode shown at power-on
pub const DEFAULT_MODE_INDEX: u8 = 0;

/// Row-offset entries the staging buffer can hold (4 × 240 lines + 2)
pub const MAX_ROW_ENTRIES: usize = 962;

/// RLE image bytes the staging buffer can hold
pub const MAX_IMAGE_BYTES: usize = 180_000;

/// What a release edge does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReleasePolicy {
    /// Release edges have no effect
    #[default]
    Ignore,
    /// Release edges clear the button's indicator output
    MirrorIndicator,
}

/// Board configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number does not fit the input bus
    PinOutOfRange(u8),
    /// Two buttons share the same input line
    DuplicatePin(u8),
    /// Sampling interval must be non-zero
    ZeroInterval,
}

/// Board description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Advance to the next image
    pub next: ButtonConfig,
    /// Go back to the previous image
    pub prev: ButtonConfig,
    /// Cycle video modes (boards with more than one timing)
    pub mode: Option<ButtonConfig>,
    /// Effect of release edges
    pub release_policy: ReleasePolicy,
    /// Sampling period in microseconds
    pub sample_interval_us: u32,
    /// Index of the power-on video mode
    pub default_mode: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            next: ButtonConfig::new(PinConfig::button(DEFAULT_NEXT_PIN)),
            prev: ButtonConfig::new(PinConfig::button(DEFAULT_PREV_PIN)),
            mode: None,
            release_policy: ReleasePolicy::Ignore,
            sample_interval_us: SAMPLE_INTERVAL_US,
            default_mode: DEFAULT_MODE_INDEX,
        }
    }
}

impl BoardConfig {
    /// Configured buttons in processing order: next, previous, mode
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonConfig> {
        [Some(&self.next), Some(&self.prev), self.mode.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Check pin ranges, pin uniqueness and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_us == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let mut seen: u32 = 0;
        for button in self.buttons() {
            let pin = button.input.pin;
            if !button.input.is_valid() {
                return Err(ConfigError::PinOutOfRange(pin));
            }
            if seen & (1 << pin) != 0 {
                return Err(ConfigError::DuplicatePin(pin));
            }
            seen |= 1 << pin;
        }

        Ok(())
    }
}
