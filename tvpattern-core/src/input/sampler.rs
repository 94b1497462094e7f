//! Periodic raw input sampling
//!
//! The sample buffer is a fixed ring of the most recent bus snapshots. It is
//! written by exactly one sampler (usually a timer-driven task) and read by
//! the controller loop at any time.
//!
//! Every slot is an independent atomic word, so a reader racing the writer
//! sees each slot either old or new, never torn. A read may mix samples from
//! two neighbouring ticks; that is harmless because only the unanimous
//! result over the whole window is ever consumed.

use core::ops::ControlFlow;

use portable_atomic::{AtomicU32, AtomicUsize, Ordering};
use tvpattern_hal::InputBus;

/// Ring buffer of the `N` most recent raw bus snapshots
pub struct SampleBuffer<const N: usize> {
    slots: [AtomicU32; N],
    /// Next slot to overwrite
    cursor: AtomicUsize,
}

impl<const N: usize> SampleBuffer<N> {
    const NON_EMPTY: () = assert!(N > 0, "sample buffer needs at least one slot");

    /// Create a buffer with every slot zero
    ///
    /// Call [`prime`](Self::prime) with the idle level before sampling
    /// starts, otherwise active-low lines read as pressed.
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            slots: [const { AtomicU32::new(0) }; N],
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of samples in the debounce window
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Fill every slot with the same snapshot
    pub fn prime(&self, raw: u32) {
        for slot in &self.slots {
            slot.store(raw, Ordering::Release);
        }
        self.cursor.store(0, Ordering::Relaxed);
    }

    /// Overwrite the oldest slot and advance the write cursor
    ///
    /// Must only be called from a single writer.
    pub fn push(&self, raw: u32) {
        let index = self.cursor.load(Ordering::Relaxed);
        self.slots[index].store(raw, Ordering::Release);

        let next = if index + 1 >= N { 0 } else { index + 1 };
        self.cursor.store(next, Ordering::Relaxed);
    }

    /// Most recently written snapshot
    pub fn latest(&self) -> u32 {
        let index = self.cursor.load(Ordering::Relaxed);
        let last = if index == 0 { N - 1 } else { index - 1 };
        self.slots[last].load(Ordering::Acquire)
    }

    /// Current contents, in slot order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().map(|slot| slot.load(Ordering::Acquire))
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sampler driving a [`SampleBuffer`] from an input bus
///
/// Owns the bus; the buffer is shared with the debouncer.
pub struct Sampler<'a, B, const N: usize> {
    bus: B,
    buffer: &'a SampleBuffer<N>,
    /// Reads that failed and reused the previous sample
    stale_reads: u32,
}

impl<'a, B: InputBus, const N: usize> Sampler<'a, B, N> {
    /// Create a sampler writing into `buffer`
    pub fn new(bus: B, buffer: &'a SampleBuffer<N>) -> Self {
        Self {
            bus,
            buffer,
            stale_reads: 0,
        }
    }

    /// Take one snapshot
    ///
    /// A failed bus read repeats the previous snapshot. Always asks the
    /// timer driver to keep running.
    pub fn tick(&mut self) -> ControlFlow<()> {
        let raw = match self.bus.read_all() {
            Ok(raw) => raw,
            Err(_) => {
                self.stale_reads = self.stale_reads.wrapping_add(1);
                self.buffer.latest()
            }
        };

        self.buffer.push(raw);
        ControlFlow::Continue(())
    }

    /// Number of ticks that reused a stale sample
    pub fn stale_reads(&self) -> u32 {
        self.stale_reads
    }
}
