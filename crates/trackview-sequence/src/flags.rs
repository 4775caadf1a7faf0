//! Sequence flag bitmask and the out-of-range playback policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Independent boolean attributes of a sequence packed into a `u32`.
///
/// Bits without a named constant are carried through untouched, so a
/// round trip through the editor never drops flags it does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceFlags(u32);

impl SequenceFlags {
    pub const NONE: Self = Self(0);
    /// Start playing when the game resets.
    pub const PLAY_ON_RESET: Self = Self(1 << 0);
    /// Hold the last value past the end of the range.
    pub const OUT_OF_RANGE_CONSTANT: Self = Self(1 << 1);
    /// Wrap around past the end of the range.
    pub const OUT_OF_RANGE_LOOP: Self = Self(1 << 2);
    pub const CUT_SCENE: Self = Self(1 << 3);
    pub const NO_HUD: Self = Self(1 << 4);
    /// Disable the player while this cutscene runs.
    pub const NO_PLAYER: Self = Self(1 << 5);
    pub const NO_GAME_SOUNDS: Self = Self(1 << 9);
    pub const NO_SEEK: Self = Self(1 << 10);
    /// The cutscene cannot be skipped.
    pub const NO_ABORT: Self = Self(1 << 11);
    pub const NO_SPEED: Self = Self(1 << 13);
    /// Update before the rest of the frame rather than after.
    pub const EARLY_MOVIE_UPDATE: Self = Self(1 << 15);
    /// Show times in frames instead of seconds.
    pub const DISPLAY_AS_FRAMES: Self = Self(1 << 18);

    #[inline]
    pub const fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Set or clear `other` depending on `value`.
    #[inline]
    pub fn set(&mut self, other: Self, value: bool) {
        if value {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// The out-of-range policy encoded in these flags.
    pub fn out_of_range(self) -> OutOfRange {
        OutOfRange::from_flags(self)
    }
}

impl BitOr for SequenceFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for SequenceFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for SequenceFlags {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Display for SequenceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// What playback does once time leaves the sequence range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutOfRange {
    /// Stop at the end.
    #[default]
    Once,
    /// Hold the value at the boundary.
    Constant,
    /// Wrap back to the start.
    Loop,
}

impl OutOfRange {
    pub const ALL: [Self; 3] = [Self::Once, Self::Constant, Self::Loop];

    /// Both out-of-range bits together.
    pub const MASK: SequenceFlags = SequenceFlags(
        SequenceFlags::OUT_OF_RANGE_CONSTANT.0 | SequenceFlags::OUT_OF_RANGE_LOOP.0,
    );

    /// Decode the policy. Constant wins when both bits are set.
    pub fn from_flags(flags: SequenceFlags) -> Self {
        if flags.contains(SequenceFlags::OUT_OF_RANGE_CONSTANT) {
            Self::Constant
        } else if flags.contains(SequenceFlags::OUT_OF_RANGE_LOOP) {
            Self::Loop
        } else {
            Self::Once
        }
    }

    /// Replace the out-of-range bits of `flags` with this policy.
    pub fn apply_to(self, flags: SequenceFlags) -> SequenceFlags {
        let cleared = flags & !Self::MASK;
        match self {
            Self::Once => cleared,
            Self::Constant => cleared | SequenceFlags::OUT_OF_RANGE_CONSTANT,
            Self::Loop => cleared | SequenceFlags::OUT_OF_RANGE_LOOP,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Once => "Once",
            Self::Constant => "Constant",
            Self::Loop => "Loop",
        }
    }
}
