//! Button input pipeline
//!
//! Raw bus snapshots flow through a fixed ring of samples, are reduced to a
//! debounced state by unanimous agreement, and compared against the previous
//! state to produce press/release edges.
//!
//! ```text
//! InputBus ──tick──▶ SampleBuffer ──debounce──▶ ButtonState ──diff──▶ Edges
//! ```

pub mod debouncer;
pub mod edges;
pub mod lines;
pub mod sampler;

pub use debouncer::{debounce, Debouncer};
pub use edges::{ButtonState, Edges};
pub use lines::InputLines;
pub use sampler::{SampleBuffer, Sampler};
