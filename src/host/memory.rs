//! In-process host implementation
//!
//! `MemoryHost` keeps named sample arrays in a map and records every
//! refresh request and diagnostic message, so the CLI driver can run
//! real edits against it and tests can observe exactly what an
//! operation did to the host. A per-array switch makes storage
//! retrieval fail on demand to exercise the unreadable path.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};

use crate::host::{BufferHandle, Host, Resolution, SampleStorage, FALLBACK_SAMPLE_RATE, SLOTS_PER_FRAME};

struct ArrayEntry {
    samples: SampleStorage,
    /// Reported as-is on resolution; zero or negative means "unset"
    /// and the editor substitutes the host default.
    sample_rate: f32,
    readable: bool,
}

/// Host backed by in-process arrays.
pub struct MemoryHost {
    arrays: HashMap<String, ArrayEntry>,
    sample_rate: f32,
    refreshes: RefCell<HashMap<String, usize>>,
    errors: RefCell<Vec<String>>,
    infos: RefCell<Vec<String>>,
}

impl MemoryHost {
    /// Create an empty host reporting the default 44.1 kHz rate
    pub fn new() -> Self {
        Self::with_sample_rate(FALLBACK_SAMPLE_RATE)
    }

    /// Create an empty host with a specific host-wide sample rate
    pub fn with_sample_rate(sample_rate: f32) -> Self {
        MemoryHost {
            arrays: HashMap::new(),
            sample_rate,
            refreshes: RefCell::new(HashMap::new()),
            errors: RefCell::new(Vec::new()),
            infos: RefCell::new(Vec::new()),
        }
    }

    /// Create a zeroed array of `frames` paired frames
    pub fn insert(&mut self, name: &str, frames: usize) {
        self.insert_samples(name, vec![0.0; frames * SLOTS_PER_FRAME]);
    }

    /// Create an array from existing slot data.
    ///
    /// The frame count is derived from the slot count; a trailing odd
    /// slot is kept in storage but unreachable through frame ranges.
    pub fn insert_samples(&mut self, name: &str, samples: Vec<f32>) {
        debug!("memory host: array \"{}\" created ({} slots)", name, samples.len());
        self.arrays.insert(
            name.to_string(),
            ArrayEntry {
                samples: Rc::new(RefCell::new(samples)),
                sample_rate: 0.0,
                readable: true,
            },
        );
    }

    /// Delete an array from the namespace
    pub fn remove(&mut self, name: &str) {
        self.arrays.remove(name);
    }

    /// Override the rate one array reports (zero or negative = unset)
    pub fn set_array_rate(&mut self, name: &str, sample_rate: f32) {
        if let Some(entry) = self.arrays.get_mut(name) {
            entry.sample_rate = sample_rate;
        }
    }

    /// Make storage retrieval fail for one array
    pub fn set_unreadable(&mut self, name: &str, unreadable: bool) {
        if let Some(entry) = self.arrays.get_mut(name) {
            entry.readable = !unreadable;
        }
    }

    /// Snapshot of an array's slot data
    pub fn samples(&self, name: &str) -> Option<Vec<f32>> {
        self.arrays.get(name).map(|e| e.samples.borrow().clone())
    }

    /// Shared storage of an array, for callers that mutate it directly
    pub fn storage(&self, name: &str) -> Option<SampleStorage> {
        self.arrays.get(name).map(|e| Rc::clone(&e.samples))
    }

    /// How many redraw requests an array has received
    pub fn refresh_count(&self, name: &str) -> usize {
        self.refreshes.borrow().get(name).copied().unwrap_or(0)
    }

    /// All error-channel messages so far
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// All info-channel messages so far
    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    /// Clear recorded refreshes and diagnostics
    pub fn clear_log(&mut self) {
        self.refreshes.borrow_mut().clear();
        self.errors.borrow_mut().clear();
        self.infos.borrow_mut().clear();
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn resolve(&self, name: &str) -> Resolution {
        match self.arrays.get(name) {
            None => Resolution::NotFound,
            Some(entry) if !entry.readable => Resolution::Unreadable,
            Some(entry) => {
                let rate = if entry.sample_rate > 0.0 {
                    entry.sample_rate
                } else {
                    // unset: report the host-wide rate, which itself may
                    // be unset on hosts with no running audio driver
                    self.sample_rate
                };
                Resolution::Found(BufferHandle {
                    name: name.to_string(),
                    frames: entry.samples.borrow().len() / SLOTS_PER_FRAME,
                    sample_rate: rate,
                    samples: Rc::clone(&entry.samples),
                })
            }
        }
    }

    fn refresh(&self, name: &str) {
        debug!("memory host: refresh \"{}\"", name);
        *self
            .refreshes
            .borrow_mut()
            .entry(name.to_string())
            .or_insert(0) += 1;
    }

    fn default_sample_rate(&self) -> f32 {
        if self.sample_rate > 0.0 {
            self.sample_rate
        } else {
            FALLBACK_SAMPLE_RATE
        }
    }

    fn report_error(&self, message: &str) {
        warn!("host error channel: {}", message);
        self.errors.borrow_mut().push(message.to_string());
    }

    fn report_info(&self, message: &str) {
        debug!("host info channel: {}", message);
        self.infos.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_is_not_found() {
        let host = MemoryHost::new();
        assert!(matches!(host.resolve("nope"), Resolution::NotFound));
    }

    #[test]
    fn test_resolve_reports_frame_count() {
        let mut host = MemoryHost::new();
        host.insert("a", 64);
        match host.resolve("a") {
            Resolution::Found(handle) => {
                assert_eq!(handle.frames, 64);
                assert_eq!(handle.slot_count(), 128);
                assert_eq!(handle.samples.borrow().len(), 128);
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_switch() {
        let mut host = MemoryHost::new();
        host.insert("a", 8);
        host.set_unreadable("a", true);
        assert!(matches!(host.resolve("a"), Resolution::Unreadable));
        host.set_unreadable("a", false);
        assert!(host.resolve("a").is_found());
    }

    #[test]
    fn test_refresh_counting() {
        let mut host = MemoryHost::new();
        host.insert("a", 8);
        host.refresh("a");
        host.refresh("a");
        assert_eq!(host.refresh_count("a"), 2);
        assert_eq!(host.refresh_count("b"), 0);
    }

    #[test]
    fn test_array_rate_override() {
        let mut host = MemoryHost::with_sample_rate(48000.0);
        host.insert("a", 8);
        match host.resolve("a") {
            Resolution::Found(handle) => assert_eq!(handle.sample_rate, 48000.0),
            other => panic!("expected Found, got {:?}", other),
        }
        host.set_array_rate("a", 22050.0);
        match host.resolve("a") {
            Resolution::Found(handle) => assert_eq!(handle.sample_rate, 22050.0),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_odd_slot_count_truncates_frames() {
        let mut host = MemoryHost::new();
        host.insert_samples("a", vec![0.0; 9]);
        match host.resolve("a") {
            Resolution::Found(handle) => assert_eq!(handle.frames, 4),
            other => panic!("expected Found, got {:?}", other),
        }
    }
}
