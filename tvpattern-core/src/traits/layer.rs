//! Display layer compositor trait

/// Compositor layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(pub u8);

/// Static background, owned by the video generator
pub const BACKGROUND_LAYER: LayerId = LayerId(0);

/// Layer showing the selected test pattern
pub const IMAGE_LAYER: LayerId = LayerId(1);

/// Size of the picture shown on a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerGeometry {
    pub width: u16,
    pub height: u16,
}

/// Display layer API
///
/// While a layer is enabled the video generator may read its buffers at any
/// time. Callers must disable a layer before touching the memory it points
/// at.
pub trait LayerCompositor {
    /// Show or hide a layer
    fn set_layer_enabled(&mut self, layer: LayerId, enabled: bool);

    /// Point a layer at new RLE data
    ///
    /// The buffers must stay valid and unchanged while the layer is
    /// enabled.
    fn configure_layer(
        &mut self,
        layer: LayerId,
        data: &[u8],
        rows: &[u16],
        geometry: LayerGeometry,
    );
}
