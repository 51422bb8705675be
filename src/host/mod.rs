//! Host collaborator seam
//!
//! The host environment owns every sample array, its namespace and its
//! visual representation. The editor reaches storage only through this
//! trait, re-resolving both names before every operation and dropping
//! the handles when the call returns. Handles are never cached: the
//! host is free to resize, delete or reallocate an array between calls.

pub mod memory;

use std::cell::RefCell;
use std::rc::Rc;

pub use memory::MemoryHost;

/// Sample rate substituted when the host reports none (or a bogus one)
pub const FALLBACK_SAMPLE_RATE: f32 = 44100.0;

/// Number of float slots occupied by one frame
pub const SLOTS_PER_FRAME: usize = 2;

/// Host-owned sample storage, borrowed by the editor per call.
///
/// The host is single threaded and delivers one control message at a
/// time, so shared ownership with runtime borrow checking is enough.
pub type SampleStorage = Rc<RefCell<Vec<f32>>>;

/// A resolved, non-owning view of one named host array.
///
/// Valid only for the duration of one editor call. `frames` counts
/// paired frames: each frame occupies [`SLOTS_PER_FRAME`] consecutive
/// float slots of `samples`.
#[derive(Debug, Clone)]
pub struct BufferHandle {
    /// Name the handle was resolved under
    pub name: String,
    /// Current frame count reported by the host
    pub frames: usize,
    /// Sampling rate, informational only (never gates validity)
    pub sample_rate: f32,
    /// The host's current storage for this array
    pub samples: SampleStorage,
}

impl BufferHandle {
    /// Number of float slots covered by `frames`
    pub fn slot_count(&self) -> usize {
        self.frames * SLOTS_PER_FRAME
    }
}

/// Outcome of a namespace lookup.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Lookup and storage retrieval both succeeded
    Found(BufferHandle),
    /// The name does not exist in the host namespace
    NotFound,
    /// The name exists but its storage could not be retrieved
    Unreadable,
}

impl Resolution {
    /// True if the lookup produced a usable handle
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// The host environment contract.
///
/// `refresh` and the two report channels are fire and forget; nothing
/// the host does with them feeds back into control flow.
pub trait Host {
    /// Look up a named array and retrieve its current storage.
    fn resolve(&self, name: &str) -> Resolution;

    /// Ask the host to redraw its visual representation of an array.
    fn refresh(&self, name: &str);

    /// Host-wide sample rate used when an array reports none.
    fn default_sample_rate(&self) -> f32 {
        FALLBACK_SAMPLE_RATE
    }

    /// One-way diagnostic channel for failures.
    fn report_error(&self, message: &str);

    /// One-way diagnostic channel for informational output.
    fn report_info(&self, message: &str);
}
