//! Pattern catalog
//!
//! Generated by `build.rs` from the `[pattern.*]` sections of `board.toml`.
//! Each pattern is a PicoVGA RLE image plus its row-offset table.

use tvpattern_core::catalog::ImageDescriptor;

/// Word-aligned storage, as the RLE decoder reads whole words
#[repr(C, align(4))]
pub struct Aligned<T: ?Sized>(pub T);

include!(concat!(env!("OUT_DIR"), "/patterns.rs"));
