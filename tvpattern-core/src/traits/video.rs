//! Video generator trait
//!
//! The generator runs on its own core and streams the composed layers to
//! the display. It must be stopped before it is reconfigured.

use tvpattern_hal::PllConfig;

use crate::catalog::VideoMode;

/// Errors reported by the video generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VideoError {
    /// Timing cannot be produced at any reachable clock
    UnsupportedMode,
    /// Generator did not acknowledge the request
    NotResponding,
}

/// Result of configuring a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Active width in pixels
    pub width: u16,
    /// Active height in lines
    pub height: u16,
    /// System clock the mode needs
    pub pll: PllConfig,
}

/// Video generation process
pub trait VideoGenerator {
    /// Timing source identifier carried by [`VideoMode`]
    type Timing;

    /// Stop generating video
    fn stop(&mut self);

    /// Compute the mode setup without starting it
    ///
    /// Also resets the background layer for the new geometry.
    fn configure(&mut self, mode: &VideoMode<Self::Timing>) -> Result<Geometry, VideoError>;

    /// Start generating video with a configured geometry
    fn start(&mut self, geometry: &Geometry) -> Result<(), VideoError>;
}
