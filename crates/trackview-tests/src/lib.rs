//! Integration test crate for TrackView.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple trackview crates to verify they work together.

#[cfg(test)]
mod props;

#[cfg(test)]
mod persistence;
