//! Video mode descriptors

/// Display aspect ratio, for logs and documentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AspectRatio {
    pub num: u8,
    pub den: u8,
}

impl AspectRatio {
    pub const fn new(num: u8, den: u8) -> Self {
        Self { num, den }
    }
}

/// A video mode the generator can run
///
/// `T` identifies the timing source and is interpreted only by the video
/// generator implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode<T> {
    /// Display name used in logs
    pub name: &'static str,
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in lines
    pub height: u16,
    /// Full line width including the hidden part
    pub full_width: u16,
    /// Aspect ratio of the visible area
    pub aspect: AspectRatio,
    /// Timing source
    pub timing: T,
    /// Scan every line twice
    pub double_y: bool,
}
