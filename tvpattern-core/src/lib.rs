//! Board-agnostic core logic for the tvpattern firmware
//!
//! This crate contains everything between the raw button inputs and the
//! display collaborators that does not depend on specific hardware:
//!
//! - Input sampling, consensus debouncing and edge detection
//! - Image and video mode catalogs
//! - Selection state machine with wrapping cursors
//! - Frame and video mode publication
//! - Collaborator traits (video generator, layer compositor, indicators)
//! - Configuration type definitions
//!
//! ```text
//!  timer ─▶ Sampler ─▶ SampleBuffer
//!                          │
//!  control loop:           ▼
//!    Debouncer ─▶ SelectionController ─▶ FramePublisher ─▶ LayerCompositor
//!                          │
//!                          └──────────▶ ModeSwitcher ─▶ VideoGenerator
//!                                                     └▶ SystemClock
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod control;
pub mod input;
pub mod publish;
pub mod selection;
pub mod traits;
