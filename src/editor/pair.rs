//! Buffer pair operations
//!
//! `BufferPair` holds two array names and nothing else. Every public
//! operation re-resolves both names against the host, validates its
//! arguments against the frame counts reported for this call, performs
//! the in-place edit, then asks the host to redraw. Any failure along
//! the way is reported once on the host error channel and returns
//! before either buffer is touched.

use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::editor::ops;
use crate::editor::range::FrameRange;
use crate::error::{Result, SpliceError};
use crate::host::{BufferHandle, Host, Resolution};

// ============================================================================
// Target Selection
// ============================================================================

/// Which buffer of the pair an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    A,
    B,
}

impl Target {
    /// Decode the control-surface selector value.
    ///
    /// Zero selects A and any positive value selects B. The encoding is
    /// kept asymmetric for compatibility with existing patches; negative
    /// values select nothing and are rejected.
    pub fn from_selector(selector: f64) -> Result<Self> {
        if selector == 0.0 {
            Ok(Target::A)
        } else if selector > 0.0 {
            Ok(Target::B)
        } else {
            Err(SpliceError::InvalidTarget { selector })
        }
    }
}

// ============================================================================
// Inspection Reports
// ============================================================================

/// Per-buffer slice of an [`PairInfo`] report.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferReport {
    pub name: String,
    pub frames: usize,
    pub sample_rate: f32,
    pub valid: bool,
}

impl BufferReport {
    fn from_handle(handle: &BufferHandle) -> Self {
        BufferReport {
            name: handle.name.clone(),
            frames: handle.frames,
            sample_rate: handle.sample_rate,
            valid: true,
        }
    }
}

/// Snapshot of both buffers produced by [`BufferPair::info`].
#[derive(Debug, Clone, PartialEq)]
pub struct PairInfo {
    pub a: BufferReport,
    pub b: BufferReport,
}

// ============================================================================
// Buffer Pair
// ============================================================================

/// Editor over two equal-role host arrays.
///
/// The name of buffer A is fixed at construction; buffer B can be
/// re-pointed at a different array with [`BufferPair::rename_b`]. The
/// new name is not checked until the next operation resolves it.
#[derive(Debug, Clone)]
pub struct BufferPair {
    a_name: String,
    b_name: String,
}

impl BufferPair {
    /// Create a pair over two named host arrays.
    pub fn new(a_name: impl Into<String>, b_name: impl Into<String>) -> Self {
        let pair = BufferPair {
            a_name: a_name.into(),
            b_name: b_name.into(),
        };
        debug!("buffer pair created: A=\"{}\" B=\"{}\"", pair.a_name, pair.b_name);
        pair
    }

    /// Name buffer A resolves under
    pub fn a_name(&self) -> &str {
        &self.a_name
    }

    /// Name buffer B resolves under
    pub fn b_name(&self) -> &str {
        &self.b_name
    }

    /// Re-point buffer B at a different array name.
    ///
    /// Takes effect at the next resolution; nothing is validated here.
    pub fn rename_b(&mut self, name: impl Into<String>) {
        self.b_name = name.into();
        debug!("buffer pair: B renamed to \"{}\"", self.b_name);
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Zero-fill the frame range `[start, end)` of one buffer.
    ///
    /// The range is checked against the selected buffer's current frame
    /// count. On success both buffers are refreshed, not just the one
    /// that changed; hosts expect the whole pair view to redraw.
    pub fn cut(&self, host: &dyn Host, target: Target, start: f64, end: f64) -> Result<()> {
        let (a, b) = self.attach(host)?;
        let handle = match target {
            Target::A => &a,
            Target::B => &b,
        };

        let range = FrameRange::checked(start, end, handle.frames)
            .map_err(|e| report(host, e))?;

        {
            let mut samples = borrow_mut_samples(host, handle)?;
            ops::zero_frames(samples.as_mut_slice(), range);
        }
        debug!(
            "cut: zeroed frames {}..{} of \"{}\"",
            range.start, range.end, handle.name
        );

        host.refresh(&b.name);
        host.refresh(&a.name);
        Ok(())
    }

    /// Exchange the frame range `[start, end)` between the two buffers.
    ///
    /// The shared range must fit inside both buffers regardless of
    /// which one is shorter. The exchange is all or nothing: the
    /// scratch copy is taken before either buffer is written.
    pub fn swap(&self, host: &dyn Host, start: f64, end: f64) -> Result<()> {
        let (a, b) = self.attach(host)?;

        let range = FrameRange::checked(start, end, a.frames.min(b.frames))
            .map_err(|e| report(host, e))?;

        self.swap_resolved(host, &a, &b, range)?;
        debug!(
            "swap: exchanged frames {}..{} between \"{}\" and \"{}\"",
            range.start, range.end, a.name, b.name
        );

        host.refresh(&b.name);
        host.refresh(&a.name);
        Ok(())
    }

    /// Block-interleave the two buffers.
    ///
    /// Over `[0, min(frames(A), frames(B)))`, alternating blocks of
    /// `width` frames are exchanged: the block at offset 0 is swapped,
    /// the next is skipped, and so on. A trailing block that does not
    /// fully fit is left untouched. The host is refreshed once after
    /// the whole pass, not per block.
    pub fn shuffle(&self, host: &dyn Host, width: f64) -> Result<()> {
        let (a, b) = self.attach(host)?;

        let width_frames = width as i64;
        if width_frames <= 0 {
            return Err(report(host, SpliceError::InvalidWidth { width: width_frames }));
        }
        let width_frames = width_frames as usize;

        let length = a.frames.min(b.frames);
        let mut blocks = 0usize;
        let mut i = 0usize;
        while i + width_frames < length {
            self.swap_resolved(host, &a, &b, FrameRange::from_frames(i, i + width_frames))?;
            blocks += 1;
            // advance past the swapped block and the skipped one
            i += 2 * width_frames;
        }
        debug!(
            "shuffle: width {} over {} frames, {} blocks exchanged",
            width_frames, length, blocks
        );

        host.refresh(&b.name);
        host.refresh(&a.name);
        Ok(())
    }

    /// Report both buffers' name, frame count and validity.
    ///
    /// Read-only. If resolution fails the call aborts without output
    /// beyond what resolution itself reported.
    pub fn info(&self, host: &dyn Host) -> Result<PairInfo> {
        let (a, b) = self.attach(host)?;

        let info = PairInfo {
            a: BufferReport::from_handle(&a),
            b: BufferReport::from_handle(&b),
        };

        host.report_info("buffer pair:");
        for report in [&info.a, &info.b] {
            host.report_info(&format!("  buffer name: {}", report.name));
            host.report_info(&format!("  frame count: {}", report.frames));
            host.report_info(&format!("  validity: {}", report.valid as u8));
        }

        Ok(info)
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve both names for the current call.
    ///
    /// Either side failing aborts the whole operation; the other buffer
    /// has not been touched because resolution always precedes mutation.
    fn attach(&self, host: &dyn Host) -> Result<(BufferHandle, BufferHandle)> {
        let a = attach_one(host, &self.a_name)?;
        let b = attach_one(host, &self.b_name)?;
        Ok((a, b))
    }

    /// Exchange a validated range on already-resolved handles.
    ///
    /// Shared by `swap` and `shuffle`; requests no refresh. Both names
    /// may resolve to the same array, in which case exchanging a range
    /// with itself is the identity and the copies are skipped.
    fn swap_resolved(
        &self,
        host: &dyn Host,
        a: &BufferHandle,
        b: &BufferHandle,
        range: FrameRange,
    ) -> Result<()> {
        if range.is_empty() || Rc::ptr_eq(&a.samples, &b.samples) {
            return Ok(());
        }

        let mut a_samples = borrow_mut_samples(host, a)?;
        let mut b_samples = borrow_mut_samples(host, b)?;
        ops::swap_frames(a_samples.as_mut_slice(), b_samples.as_mut_slice(), range)
            .map_err(|e| report(host, e))
    }
}

/// Resolve one name and normalize the handle for this call.
fn attach_one(host: &dyn Host, name: &str) -> Result<BufferHandle> {
    match host.resolve(name) {
        Resolution::NotFound => Err(report(
            host,
            SpliceError::BufferNotFound {
                name: name.to_string(),
            },
        )),
        Resolution::Unreadable => Err(report(
            host,
            SpliceError::BufferUnreadable {
                name: name.to_string(),
            },
        )),
        Resolution::Found(mut handle) => {
            // a handle whose storage is shorter than its reported frame
            // count would index past the array; treat it as unreadable
            let readable = handle
                .samples
                .try_borrow()
                .map(|s| s.len() >= handle.slot_count())
                .unwrap_or(false);
            if !readable {
                return Err(report(
                    host,
                    SpliceError::BufferUnreadable {
                        name: name.to_string(),
                    },
                ));
            }

            if handle.sample_rate <= 0.0 {
                handle.sample_rate = host.default_sample_rate();
            }
            Ok(handle)
        }
    }
}

/// Borrow a handle's storage mutably for the rest of the call.
fn borrow_mut_samples<'a>(
    host: &dyn Host,
    handle: &'a BufferHandle,
) -> Result<std::cell::RefMut<'a, Vec<f32>>> {
    handle.samples.try_borrow_mut().map_err(|_| {
        report(
            host,
            SpliceError::BufferUnreadable {
                name: handle.name.clone(),
            },
        )
    })
}

/// Push an error onto the host diagnostic channel and hand it back.
fn report(host: &dyn Host, err: SpliceError) -> SpliceError {
    host.report_error(&err.to_string());
    err
}
