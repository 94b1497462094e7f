//! Board configuration loading and parsing
//!
//! The board description is embedded from `board.toml` and parsed at boot
//! by a small `no_std` parser. The same file is validated by `build.rs`,
//! so a parse failure here means the image was built from a stale tree.

pub mod toml;

use defmt::*;
use tvpattern_core::config::BoardConfig;
use tvpattern_hal_rp2040::{GpioAllocator, PinError};

pub use toml::{parse_config, ParseError};

/// GPIO lines driven by the video engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub struct VideoPins {
    /// First colour line
    pub first: u8,
    /// Colour lines plus the sync line
    pub count: u8,
}

impl Default for VideoPins {
    fn default() -> Self {
        // 8 colour bits on GPIO0-7, composite sync on GPIO8
        Self { first: 0, count: 9 }
    }
}

/// Everything the firmware reads from `board.toml`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Format)]
pub struct FirmwareConfig {
    pub board: BoardConfig,
    pub video: VideoPins,
}

impl FirmwareConfig {
    /// Check that no line is claimed twice
    pub fn check_pins(&self) -> Result<(), PinError> {
        let mut alloc = GpioAllocator::new();
        alloc.allocate_range(self.video.first, self.video.count)?;

        for button in self.board.buttons() {
            alloc.allocate(button.input.pin)?;
        }

        let mut indicators: u32 = 0;
        for line in self.board.buttons().filter_map(|b| b.indicator) {
            if line < 32 && indicators & (1 << line) != 0 {
                // Shared between buttons
                continue;
            }
            alloc.allocate(line)?;
            indicators |= 1 << line;
        }

        Ok(())
    }
}

/// Parse and validate the embedded configuration
///
/// Falls back to the built-in defaults if anything is wrong.
pub fn load(embedded: &str) -> FirmwareConfig {
    let config = match parse_config(embedded) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse board config: {:?}", e);
            error!("Using built-in defaults");
            return FirmwareConfig::default();
        }
    };

    if let Err(e) = config.board.validate() {
        error!("Invalid board config: {:?}, using built-in defaults", e);
        return FirmwareConfig::default();
    }

    if let Err(e) = config.check_pins() {
        error!("Board config pin conflict: {:?}, using built-in defaults", e);
        return FirmwareConfig::default();
    }

    info!("Parsed embedded board configuration successfully");
    config
}
