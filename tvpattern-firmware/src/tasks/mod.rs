//! Embassy async tasks
//!
//! The sampler feeds the shared sample buffer; the controller reacts to it.

pub mod controller;
pub mod sampler;

pub use controller::{controller_task, Controller};
pub use sampler::sampler_task;
