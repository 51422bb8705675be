//! Validated frame ranges
//!
//! Control-surface arguments arrive as untrusted floats. They truncate
//! toward zero to frame indices and are checked against the current
//! frame count of the buffer(s) they will touch before anything runs.

use crate::error::{Result, SpliceError};

/// A half-open frame range `[start, end)` that passed validation
/// against a concrete frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: usize,
    pub end: usize,
}

impl FrameRange {
    /// Truncate float arguments to frame indices and validate them.
    ///
    /// Rejects `start < 0`, `end > frames` and `start > end`. The `as`
    /// cast truncates toward zero and saturates, so NaN becomes frame 0
    /// and an infinite end falls out of range instead of wrapping.
    pub fn checked(start: f64, end: f64, frames: usize) -> Result<Self> {
        let start_frame = start as i64;
        let end_frame = end as i64;

        if start_frame < 0 || end_frame > frames as i64 || start_frame > end_frame {
            return Err(SpliceError::InvalidRange {
                start: start_frame,
                end: end_frame,
            });
        }

        Ok(FrameRange {
            start: start_frame as usize,
            end: end_frame as usize,
        })
    }

    /// Build a range from already-validated frame indices.
    pub fn from_frames(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        FrameRange { start, end }
    }

    /// Number of frames covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the range covers no frames
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
