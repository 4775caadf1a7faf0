//! The sequence entity and the interface editors use to mutate it.

use serde::{Deserialize, Serialize};
use trackview_core::TimeRange;
use uuid::Uuid;

use crate::flags::SequenceFlags;
use crate::track::KeyTrack;

/// Operations an editor needs from a sequence.
///
/// Implemented by [`Sequence`]; tests substitute recording doubles.
pub trait SequenceEntity {
    /// ID of the entity that owns the sequence component.
    fn entity_id(&self) -> Uuid;
    fn name(&self) -> &str;
    /// Set the name directly. Editors rename through a
    /// [`SequenceManager`](crate::manager::SequenceManager) instead.
    fn set_name(&mut self, name: &str);
    fn flags(&self) -> SequenceFlags;
    fn set_flags(&mut self, flags: SequenceFlags);
    /// Time range in seconds.
    fn time_range(&self) -> TimeRange;
    fn set_time_range(&mut self, range: TimeRange);
    /// Move and rescale all keys from the current range onto `range`, then
    /// adopt `range`.
    fn adjust_keys_to_time_range(&mut self, range: TimeRange);
    fn tracks(&self) -> &[KeyTrack];
    /// Overwrite everything with a previously captured state.
    fn restore(&mut self, state: &SequenceState);
}

/// An animation timeline with flags and a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    /// Unique sequence ID
    pub id: Uuid,
    pub name: String,
    pub flags: SequenceFlags,
    /// Time range in seconds
    pub time_range: TimeRange,
    pub tracks: Vec<KeyTrack>,
}

impl Sequence {
    /// Create a new sequence spanning `time_range`.
    pub fn new(name: impl Into<String>, time_range: TimeRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            flags: SequenceFlags::NONE,
            time_range,
            tracks: Vec::new(),
        }
    }

    /// Builder-style flag assignment.
    pub fn with_flags(mut self, flags: SequenceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add a key track.
    pub fn add_track(&mut self, track: KeyTrack) {
        self.tracks.push(track);
    }

    /// Total number of keys over all tracks.
    pub fn key_count(&self) -> usize {
        self.tracks.iter().map(KeyTrack::len).sum()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new("Sequence 1", TimeRange::new(0.0, 10.0))
    }
}

impl SequenceEntity for Sequence {
    fn entity_id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    fn flags(&self) -> SequenceFlags {
        self.flags
    }

    fn set_flags(&mut self, flags: SequenceFlags) {
        self.flags = flags;
    }

    fn time_range(&self) -> TimeRange {
        self.time_range
    }

    fn set_time_range(&mut self, range: TimeRange) {
        self.time_range = range;
    }

    fn adjust_keys_to_time_range(&mut self, range: TimeRange) {
        let old = self.time_range;
        for track in &mut self.tracks {
            track.remap(old, range);
        }
        self.time_range = range;
    }

    fn tracks(&self) -> &[KeyTrack] {
        &self.tracks
    }

    fn restore(&mut self, state: &SequenceState) {
        self.name = state.name.clone();
        self.flags = state.flags;
        self.time_range = state.time_range;
        self.tracks = state.tracks.clone();
    }
}

/// Snapshot of the editable state of a sequence, used for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceState {
    pub name: String,
    pub flags: SequenceFlags,
    pub time_range: TimeRange,
    pub tracks: Vec<KeyTrack>,
}

impl SequenceState {
    pub fn capture(entity: &dyn SequenceEntity) -> Self {
        Self {
            name: entity.name().to_owned(),
            flags: entity.flags(),
            time_range: entity.time_range(),
            tracks: entity.tracks().to_vec(),
        }
    }
}
