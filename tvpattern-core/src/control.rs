//! Controller context
//!
//! One owned value holding everything the control loop touches: the
//! debouncer, the selection state, both catalogs and the output
//! collaborators. The firmware builds it once and calls
//! [`ControlLoop::iterate`] after every sampler tick.

use crate::catalog::{Catalog, CatalogError, ImageDescriptor, VideoMode};
use crate::config::BoardConfig;
use crate::input::{ButtonState, Debouncer};
use crate::publish::{FramePublisher, ModeSwitcher, PublishError};
use crate::selection::{Action, Actions, SelectionController};
use crate::traits::{Geometry, Indicators, LayerCompositor, VideoGenerator};
use tvpattern_hal::SystemClock;

/// Errors raised while acting on an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Image could not be published
    Publish(PublishError),
    /// New video mode failed; the mode cursor was reverted
    ModeSwitch {
        cause: PublishError,
        /// Previous mode came back up and the image was re-published
        restored: bool,
    },
}

impl From<PublishError> for ControlError {
    fn from(e: PublishError) -> Self {
        ControlError::Publish(e)
    }
}

/// Output of a successful iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iteration {
    /// Debounced state the iteration acted on
    pub state: ButtonState,
    /// Actions performed, in order
    pub actions: Actions,
}

/// Collaborators the control loop drives
pub struct Outputs<'a, C, V, K, I> {
    pub publisher: FramePublisher<'a, C>,
    pub switcher: ModeSwitcher<V, K>,
    pub indicators: I,
}

/// Control loop context
pub struct ControlLoop<'a, const N: usize, C, V: VideoGenerator, K, I> {
    debouncer: Debouncer<'a, N>,
    selection: SelectionController,
    images: Catalog<'a, ImageDescriptor>,
    modes: Catalog<'a, VideoMode<V::Timing>>,
    publisher: FramePublisher<'a, C>,
    switcher: ModeSwitcher<V, K>,
    indicators: I,
    geometry: Option<Geometry>,
}

impl<'a, const N: usize, C, V, K, I> ControlLoop<'a, N, C, V, K, I>
where
    C: LayerCompositor,
    V: VideoGenerator,
    K: SystemClock,
    I: Indicators,
{
    /// Build the context
    ///
    /// Rejects empty catalogs and images that do not fit the staging
    /// buffer, so later lookups cannot fail.
    pub fn new(
        config: &BoardConfig,
        debouncer: Debouncer<'a, N>,
        images: &'a [ImageDescriptor],
        modes: &'a [VideoMode<V::Timing>],
        outputs: Outputs<'a, C, V, K, I>,
    ) -> Result<Self, CatalogError> {
        let images = Catalog::new(images)?;
        let modes = Catalog::new(modes)?;

        let (max_rows, max_bytes) = outputs.publisher.staging_capacity();
        images.check_fits(max_rows, max_bytes)?;

        Ok(Self {
            debouncer,
            selection: SelectionController::new(config, images.len(), modes.len()),
            images,
            modes,
            publisher: outputs.publisher,
            switcher: outputs.switcher,
            indicators: outputs.indicators,
            geometry: None,
        })
    }

    /// Bring up the initial video mode and image
    ///
    /// Must be called once before the first [`iterate`](Self::iterate).
    pub fn start(&mut self) -> Result<Geometry, PublishError> {
        let geometry = self.switcher.apply(self.modes.get(self.selection.mode_index()))?;
        self.geometry = Some(geometry);
        self.publisher
            .publish_image(self.images.get(self.selection.image_index()))?;
        Ok(geometry)
    }

    /// Run one controller iteration
    ///
    /// All actions are carried out even if one fails; the first error is
    /// returned.
    pub fn iterate(&mut self) -> Result<Iteration, ControlError> {
        let state = self.debouncer.stable_state();
        let actions = self.selection.step(state);

        let mut first_error = None;
        for action in &actions {
            let result = match *action {
                Action::ShowImage(index) => self
                    .publisher
                    .publish_image(self.images.get(index))
                    .map_err(ControlError::from),
                Action::SwitchMode { from, to } => self.switch_mode(from, to),
                Action::Indicator { line, on } => {
                    self.indicators.set(line, on);
                    Ok(())
                }
            };
            if let Err(e) = result {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(Iteration { state, actions }),
        }
    }

    fn switch_mode(&mut self, from: usize, to: usize) -> Result<(), ControlError> {
        match self.switcher.apply(self.modes.get(to)) {
            Ok(geometry) => {
                self.geometry = Some(geometry);
                self.publish_current()?;
                Ok(())
            }
            Err(cause) => {
                self.selection.revert_mode(from);
                let restored = match self.switcher.apply(self.modes.get(from)) {
                    Ok(geometry) => {
                        self.geometry = Some(geometry);
                        self.publish_current().is_ok()
                    }
                    Err(_) => {
                        self.geometry = None;
                        false
                    }
                };
                Err(ControlError::ModeSwitch { cause, restored })
            }
        }
    }

    fn publish_current(&mut self) -> Result<(), PublishError> {
        self.publisher
            .publish_image(self.images.get(self.selection.image_index()))
    }

    /// Image currently selected
    pub fn current_image(&self) -> &'a ImageDescriptor {
        self.images.get(self.selection.image_index())
    }

    /// Video mode currently selected
    pub fn current_mode(&self) -> &'a VideoMode<V::Timing> {
        self.modes.get(self.selection.mode_index())
    }

    /// Geometry of the running mode, if video is up
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn publisher(&self) -> &FramePublisher<'a, C> {
        &self.publisher
    }

    pub fn switcher(&self) -> &ModeSwitcher<V, K> {
        &self.switcher
    }

    pub fn indicators(&self) -> &I {
        &self.indicators
    }
}
