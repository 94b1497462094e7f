//! Frame and video mode publication
//!
//! The image layer is only ever enabled over fully staged data, and a video
//! mode is only started once the system clock has been confirmed.

pub mod mode;
pub mod publisher;
pub mod staging;

pub use mode::ModeSwitcher;
pub use publisher::FramePublisher;
pub use staging::StagingBuffer;

use tvpattern_hal::ClockError;

use crate::traits::VideoError;

/// Errors while publishing an image or video mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishError {
    /// Generator rejected the mode
    Video(VideoError),
    /// System clock could not be set or confirmed
    Clock(ClockError),
    /// Image does not fit the staging buffer
    ImageTooLarge,
}

impl From<VideoError> for PublishError {
    fn from(e: VideoError) -> Self {
        PublishError::Video(e)
    }
}

impl From<ClockError> for PublishError {
    fn from(e: ClockError) -> Self {
        PublishError::Clock(e)
    }
}
