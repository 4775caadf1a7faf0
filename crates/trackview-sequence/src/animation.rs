//! Playback context that caches the active sequence's time range.

use tracing::debug;
use trackview_core::TimeRange;
use uuid::Uuid;

use crate::sequence::SequenceEntity;

/// Receives notice that a sequence's time range changed.
pub trait AnimationContext {
    /// Refresh any cached state derived from `sequence`'s time range.
    fn update_time_range(&mut self, sequence: &dyn SequenceEntity);
}

/// Editor-wide playback state for the active sequence.
#[derive(Debug, Default)]
pub struct Playback {
    active: Option<Uuid>,
    time_range: TimeRange,
    current_time: f64,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `sequence` the active sequence and rewind to its start.
    pub fn set_active(&mut self, sequence: &dyn SequenceEntity) {
        self.active = Some(sequence.entity_id());
        self.time_range = sequence.time_range();
        self.current_time = self.time_range.start;
    }

    pub fn active(&self) -> Option<Uuid> {
        self.active
    }

    /// Cached time range of the active sequence.
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Seek within the cached range.
    pub fn set_current_time(&mut self, time: f64) {
        self.current_time = self.time_range.clamp(time);
    }
}

impl AnimationContext for Playback {
    fn update_time_range(&mut self, sequence: &dyn SequenceEntity) {
        if self.active != Some(sequence.entity_id()) {
            return;
        }
        self.time_range = sequence.time_range();
        self.current_time = self.time_range.clamp(self.current_time);
        debug!(range = %self.time_range, "playback range refreshed");
    }
}
