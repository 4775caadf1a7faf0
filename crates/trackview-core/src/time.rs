//! Time representation for sequence editing.
//!
//! Sequence time ranges are stored in seconds. The editor may display them
//! in frames instead; conversion always goes through the session frame rate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame rate as a rational number (e.g., 24000/1001 for 23.976 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 24000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Seconds per frame.
    #[inline]
    pub fn inv_fps(self) -> f64 {
        1.0 / self.to_fps_f64()
    }

    /// A rate with a zero numerator or denominator cannot convert units.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.numerator != 0 && self.denominator != 0
    }

    /// Common frame rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

/// Unit used to display time values in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    Seconds,
    Frames,
}

impl TimeUnit {
    /// Express a value stored in seconds in this unit. No rounding is applied.
    #[inline]
    pub fn from_seconds(self, seconds: f64, rate: FrameRate) -> f64 {
        match self {
            Self::Seconds => seconds,
            Self::Frames => seconds * rate.to_fps_f64(),
        }
    }

    /// Convert a value expressed in this unit back to seconds.
    #[inline]
    pub fn to_seconds(self, value: f64, rate: FrameRate) -> f64 {
        match self {
            Self::Seconds => value,
            Self::Frames => value * rate.inv_fps(),
        }
    }

    /// Increment used by numeric inputs showing values in this unit.
    #[inline]
    pub fn step(self, rate: FrameRate) -> f64 {
        match self {
            Self::Seconds => rate.inv_fps(),
            Self::Frames => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Seconds => "Seconds",
            Self::Frames => "Frames",
        }
    }
}

/// A time range `[start, end]` in seconds.
///
/// `start <= end` by convention; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    /// Two ranges closer than this on both ends compare equal.
    pub const EPSILON: f64 = 1e-6;

    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the range (`end - start`).
    #[inline]
    pub fn length(self) -> f64 {
        self.end - self.start
    }

    /// Check if a time is within this range (inclusive on both ends).
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Clamp a time into this range.
    pub fn clamp(self, time: f64) -> f64 {
        if time < self.start {
            self.start
        } else if time > self.end {
            self.end
        } else {
            time
        }
    }

    /// Equality within [`Self::EPSILON`].
    pub fn approx_eq(self, other: Self) -> bool {
        (self.start - other.start).abs() <= Self::EPSILON
            && (self.end - other.end).abs() <= Self::EPSILON
    }

    /// Apply `f` to both ends.
    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.start), f(self.end))
    }

    /// This range (in seconds) expressed in `unit`.
    pub fn to_unit(self, unit: TimeUnit, rate: FrameRate) -> Self {
        self.map(|v| unit.from_seconds(v, rate))
    }

    /// Interpret this range as `unit` values and convert it to seconds.
    pub fn to_seconds(self, unit: TimeUnit, rate: FrameRate) -> Self {
        self.map(|v| unit.to_seconds(v, rate))
    }

    /// Zero-length range at zero.
    pub const EMPTY: Self = Self::new(0.0, 0.0);
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_rate_23_976() {
        let rate = FrameRate::FPS_23_976;
        let fps = rate.to_fps_f64();
        assert!((fps - 23.976).abs() < 0.001);
        assert_eq!(rate.to_string(), "23.976 fps");
        assert_eq!(FrameRate::FPS_24.to_string(), "24 fps");
    }

    #[test]
    fn test_unit_conversion_frames() {
        let rate = FrameRate::FPS_24;
        assert_eq!(TimeUnit::Frames.from_seconds(2.0, rate), 48.0);
        assert!((TimeUnit::Frames.to_seconds(48.0, rate) - 2.0).abs() < 1e-12);
        assert_eq!(TimeUnit::Seconds.from_seconds(2.0, rate), 2.0);
    }

    #[test]
    fn test_from_seconds_does_not_round() {
        let rate = FrameRate::FPS_24;
        // 0.51s is 12.24 frames
        let frames = TimeUnit::Frames.from_seconds(0.51, rate);
        assert!((frames - 12.24).abs() < 1e-9);
    }

    #[test]
    fn test_step_sizes() {
        let rate = FrameRate::FPS_25;
        assert_eq!(TimeUnit::Frames.step(rate), 1.0);
        assert!((TimeUnit::Seconds.step(rate) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_time_range_clamp_and_contains() {
        let range = TimeRange::new(1.0, 4.0);
        assert_eq!(range.length(), 3.0);
        assert!(range.contains(1.0));
        assert!(range.contains(4.0));
        assert!(!range.contains(4.5));
        assert_eq!(range.clamp(0.0), 1.0);
        assert_eq!(range.clamp(9.0), 4.0);
        assert_eq!(range.clamp(2.5), 2.5);
    }

    #[test]
    fn test_approx_eq() {
        let a = TimeRange::new(0.0, 1.0);
        assert!(a.approx_eq(TimeRange::new(1e-9, 1.0 - 1e-9)));
        assert!(!a.approx_eq(TimeRange::new(0.0, 1.01)));
    }

    proptest! {
        #[test]
        fn prop_unit_roundtrip(start in 0.0f64..1000.0, len in 0.0f64..1000.0) {
            let range = TimeRange::new(start, start + len);
            for rate in [FrameRate::FPS_24, FrameRate::FPS_29_97, FrameRate::FPS_60] {
                let back = range.to_unit(TimeUnit::Frames, rate).to_seconds(TimeUnit::Frames, rate);
                prop_assert!(back.approx_eq(range));
            }
        }
    }
}
