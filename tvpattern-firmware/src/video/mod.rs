//! Video engine facade and mode catalog
//!
//! The engine itself is the PicoVGA library running on core 1; see
//! [`picovga`] for the binding.

pub mod picovga;

use tvpattern_core::catalog::{AspectRatio, VideoMode};

pub use picovga::Timing;

/// Video modes selectable with the mode button, power-on mode first
pub static MODES: [VideoMode<Timing>; 2] = [
    VideoMode {
        name: "NTSC 320x224p",
        width: 320,
        height: 224,
        full_width: 320,
        aspect: AspectRatio::new(10, 7),
        timing: Timing::NtscProgressive,
        double_y: false,
    },
    VideoMode {
        name: "PAL 320x224p",
        width: 320,
        height: 224,
        full_width: 320,
        aspect: AspectRatio::new(10, 7),
        timing: Timing::PalProgressive,
        double_y: false,
    },
];
