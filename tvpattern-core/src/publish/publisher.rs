//! Image publication on the image layer

use super::staging::StagingBuffer;
use super::PublishError;
use crate::catalog::ImageDescriptor;
use crate::traits::{LayerCompositor, LayerGeometry, LayerId};

/// Publishes images to one compositor layer
pub struct FramePublisher<'a, C> {
    compositor: C,
    staging: StagingBuffer<'a>,
    layer: LayerId,
}

impl<'a, C: LayerCompositor> FramePublisher<'a, C> {
    pub fn new(compositor: C, staging: StagingBuffer<'a>, layer: LayerId) -> Self {
        Self {
            compositor,
            staging,
            layer,
        }
    }

    /// Show an image
    ///
    /// The layer is disabled for the whole copy, so the video engine never
    /// reads a half-written buffer. On error the layer is left untouched.
    pub fn publish_image(&mut self, image: &ImageDescriptor) -> Result<(), PublishError> {
        if !self.staging.fits(image) {
            return Err(PublishError::ImageTooLarge);
        }

        self.compositor.set_layer_enabled(self.layer, false);

        let (data, rows) = self
            .staging
            .load(image)
            .ok_or(PublishError::ImageTooLarge)?;
        let geometry = LayerGeometry {
            width: image.width,
            height: image.height,
        };
        self.compositor
            .configure_layer(self.layer, data, rows, geometry);

        self.compositor.set_layer_enabled(self.layer, true);
        Ok(())
    }

    /// Staging capacity as (row entries, data bytes)
    pub fn staging_capacity(&self) -> (usize, usize) {
        (self.staging.row_capacity(), self.staging.data_capacity())
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn compositor(&self) -> &C {
        &self.compositor
    }
}
