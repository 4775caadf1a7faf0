//! TrackView Core - Foundation types for sequence editing
//!
//! This crate provides the value types shared by the sequence model and the
//! editor UI:
//! - Time representation (FrameRate, TimeRange, TimeUnit)
//! - Error types and sequence name validation

pub mod error;
pub mod time;

pub use error::{validate_sequence_name, NameError, Result, TrackViewError};
pub use time::{FrameRate, TimeRange, TimeUnit};

/// Limits applied to the time range inputs of the property dialog.
pub mod limits {
    /// Lowest value a start/end input accepts, in display units.
    pub const TIME_INPUT_MIN: f64 = 0.0;

    /// Highest value a start/end input accepts, in display units.
    pub const TIME_INPUT_MAX: f64 = 1e5;
}
