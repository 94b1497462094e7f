//! Video mode switching

use tvpattern_hal::SystemClock;

use super::PublishError;
use crate::catalog::VideoMode;
use crate::traits::{Geometry, VideoGenerator};

/// Owns the video generator and the system clock it depends on
pub struct ModeSwitcher<V, K> {
    video: V,
    clock: K,
}

impl<V: VideoGenerator, K: SystemClock> ModeSwitcher<V, K> {
    pub fn new(video: V, clock: K) -> Self {
        Self { video, clock }
    }

    /// Stop the generator, configure `mode` and restart
    ///
    /// The generator is only restarted after the clock has been confirmed.
    /// On error it is left stopped.
    pub fn apply(&mut self, mode: &VideoMode<V::Timing>) -> Result<Geometry, PublishError> {
        self.video.stop();

        let geometry = self.video.configure(mode)?;
        self.clock.ensure(&geometry.pll)?;
        self.video.start(&geometry)?;

        Ok(geometry)
    }

    pub fn video(&self) -> &V {
        &self.video
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }
}
