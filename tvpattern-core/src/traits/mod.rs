//! Collaborator traits
//!
//! These traits define the interface between the selection logic and the
//! video engine, display compositor and indicator outputs.

pub mod indicator;
pub mod layer;
pub mod video;

pub use indicator::Indicators;
pub use layer::{LayerCompositor, LayerGeometry, LayerId, BACKGROUND_LAYER, IMAGE_LAYER};
pub use video::{Geometry, VideoError, VideoGenerator};
