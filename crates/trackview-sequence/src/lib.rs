//! TrackView Sequence - Sequence data model
//!
//! Implements the sequence entity and the editor services around it:
//! - Sequences with flags, a time range and key tracks
//! - Playback context caching the active time range
//! - Sequence naming and lookup
//! - Batched undo/redo
//! - Versioned sequence files

pub mod animation;
pub mod flags;
pub mod manager;
pub mod sequence;
pub mod serialization;
pub mod track;
pub mod undo;

pub use animation::{AnimationContext, Playback};
pub use flags::{OutOfRange, SequenceFlags};
pub use manager::{SequenceLibrary, SequenceManager};
pub use sequence::{Sequence, SequenceEntity, SequenceState};
pub use serialization::SequenceFile;
pub use track::{Key, KeyTrack};
pub use undo::{EntityChange, UndoBatch, UndoManager, UndoStack};
