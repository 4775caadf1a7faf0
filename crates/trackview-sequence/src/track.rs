//! Animation key tracks owned by a sequence.

use serde::{Deserialize, Serialize};
use trackview_core::TimeRange;

/// A single key at a point in time (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub time: f64,
    pub value: f64,
}

impl Key {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

/// A named track of keys for one animated parameter.
///
/// Keys are kept sorted by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyTrack {
    /// Human-readable parameter name.
    pub name: String,
    keys: Vec<Key>,
}

impl KeyTrack {
    /// Create a new empty track.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Vec::new(),
        }
    }

    /// Insert or update a key. Maintains sorted order.
    pub fn set(&mut self, time: f64, value: f64) {
        if let Some(key) = self.keys.iter_mut().find(|k| k.time == time) {
            key.value = value;
            return;
        }
        let pos = self.keys.partition_point(|k| k.time < time);
        self.keys.insert(pos, Key::new(time, value));
    }

    /// Move every key from `old` onto `new`, preserving relative position.
    ///
    /// A zero-length `old` range only offsets the keys.
    pub fn remap(&mut self, old: TimeRange, new: TimeRange) {
        let old_len = old.length();
        let scale = if old_len.abs() > TimeRange::EPSILON {
            new.length() / old_len
        } else {
            1.0
        };
        for key in &mut self.keys {
            key.time = new.start + (key.time - old.start) * scale;
        }
        // A negative scale reverses the order.
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Get all keys (read-only).
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
