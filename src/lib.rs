//! Splicer - Paired-Buffer Sample Editor
//!
//! Splicer performs sample-accurate, in-place editing across a pair of
//! float sample arrays owned by a host environment:
//! 1. Cut - zero-fill a frame range in one buffer
//! 2. Swap - exchange a frame range between the two buffers
//! 3. Shuffle - block-interleave the two buffers into a comb pattern
//!
//! # Architecture
//!
//! The editor never owns sample storage. Both buffers are reachable only
//! through named handles resolved against a [`host::Host`] before every
//! operation, because the host may resize, delete or reallocate an array
//! between calls. All arguments arrive as untrusted numbers from a live
//! control surface and are validated against the current buffer lengths
//! before anything is written.

pub mod cli;
pub mod control;
pub mod editor;
pub mod error;
pub mod host;
pub mod wave;

pub use editor::{BufferPair, Target};
pub use error::{Result, SpliceError};
pub use host::{Host, MemoryHost, Resolution};
