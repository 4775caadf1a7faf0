//! TrackView UI - sequence property editing
//!
//! Provides:
//! - The sequence properties form (headless edit model with diff/apply)
//! - The egui sequence properties dialog
//! - A scoped undo batch guard
//! - The editor theme

pub mod props_dialog;
pub mod sequence_props;
pub mod theme;
pub mod undo_batch;

pub use props_dialog::{show_sequence_props_dialog, SequencePropsAction, SequencePropsDialogState};
pub use sequence_props::{
    ConfirmOutcome, FlagBinding, PlaybackOptions, PropsContext, PropsDiff, SequencePropsForm,
    FLAG_BINDINGS, UNDO_LABEL,
};
pub use theme::Theme;
pub use undo_batch::ScopedUndoBatch;
