//! In-place slot operations
//!
//! Frame ranges address paired slots: frame `i` spans slots
//! `[2*i, 2*i + 2)`. Callers validate ranges before reaching this
//! module; the slice indexing here assumes the range fits.

use std::mem;

use crate::editor::range::FrameRange;
use crate::error::{Result, SpliceError};
use crate::host::SLOTS_PER_FRAME;

/// Zero-fill the slots of `range` in one buffer.
pub(crate) fn zero_frames(samples: &mut [f32], range: FrameRange) {
    let lo = range.start * SLOTS_PER_FRAME;
    let hi = range.end * SLOTS_PER_FRAME;
    samples[lo..hi].fill(0.0);
}

/// Exchange the slots of `range` between two buffers.
///
/// The exchange goes through a scratch copy of `b`'s range taken
/// before either buffer is written, so an allocation failure leaves
/// both buffers exactly as they were.
pub(crate) fn swap_frames(a: &mut [f32], b: &mut [f32], range: FrameRange) -> Result<()> {
    let lo = range.start * SLOTS_PER_FRAME;
    let hi = range.end * SLOTS_PER_FRAME;
    let slots = hi - lo;

    let mut scratch: Vec<f32> = Vec::new();
    scratch
        .try_reserve_exact(slots)
        .map_err(|_| SpliceError::AllocationFailure {
            bytes: slots * mem::size_of::<f32>(),
        })?;

    scratch.extend_from_slice(&b[lo..hi]);
    b[lo..hi].copy_from_slice(&a[lo..hi]);
    a[lo..hi].copy_from_slice(&scratch);

    Ok(())
}
