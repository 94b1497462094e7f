//! Inter-task shared state
//!
//! The sampler task writes raw snapshots into `SAMPLES` and raises
//! `SAMPLE_TICK`; the controller task waits on the signal and debounces
//! from the buffer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use tvpattern_core::config::SAMPLE_COUNT;
use tvpattern_core::input::SampleBuffer;

/// Most recent raw button snapshots
pub static SAMPLES: SampleBuffer<SAMPLE_COUNT> = SampleBuffer::new();

/// Raised after every sampler tick
pub static SAMPLE_TICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();
