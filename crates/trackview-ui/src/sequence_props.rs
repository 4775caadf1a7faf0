//! Sequence properties form: editable copies of a sequence's name, flags and
//! time range, and the diff/apply logic that commits them.
//!
//! The form never touches the sequence while editing. [`SequencePropsForm::confirm`]
//! validates the name, computes a [`PropsDiff`] and applies it inside a single
//! undo batch.

use tracing::{debug, info, warn};
use trackview_core::limits::{TIME_INPUT_MAX, TIME_INPUT_MIN};
use trackview_core::{
    validate_sequence_name, FrameRate, NameError, Result, TimeRange, TimeUnit, TrackViewError,
};
use trackview_sequence::{
    AnimationContext, OutOfRange, SequenceEntity, SequenceFlags, SequenceManager, UndoManager,
};

use crate::undo_batch::ScopedUndoBatch;

/// Label of the undo step recorded by a committed dialog.
pub const UNDO_LABEL: &str = "Change Sequence Settings";

// ── Flag bindings ───────────────────────────────────────────────

/// Pairs a checkbox with the flag bit it controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagBinding {
    pub flag: SequenceFlags,
    pub label: &'static str,
    /// Editable only while the cutscene flag is checked.
    pub cutscene_only: bool,
}

impl FlagBinding {
    const fn new(flag: SequenceFlags, label: &'static str, cutscene_only: bool) -> Self {
        Self {
            flag,
            label,
            cutscene_only,
        }
    }
}

/// Number of flag checkboxes.
pub const FLAG_COUNT: usize = 7;

/// Every checkbox of the dialog, in display order.
pub static FLAG_BINDINGS: [FlagBinding; FLAG_COUNT] = [
    FlagBinding::new(SequenceFlags::PLAY_ON_RESET, "Always play on reset", false),
    FlagBinding::new(SequenceFlags::CUT_SCENE, "Cutscene", false),
    FlagBinding::new(SequenceFlags::NO_PLAYER, "Disable player", true),
    FlagBinding::new(SequenceFlags::NO_GAME_SOUNDS, "Disable game sounds", true),
    FlagBinding::new(SequenceFlags::NO_SEEK, "Disable seeking", false),
    FlagBinding::new(SequenceFlags::NO_ABORT, "Cannot be aborted", true),
    FlagBinding::new(SequenceFlags::EARLY_MOVIE_UPDATE, "Early movie update", false),
];

/// Checked state of every entry in [`FLAG_BINDINGS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackOptions {
    checked: [bool; FLAG_COUNT],
}

impl PlaybackOptions {
    /// Read every bound flag from `flags`.
    pub fn from_flags(flags: SequenceFlags) -> Self {
        let mut options = Self::default();
        for (checked, binding) in options.checked.iter_mut().zip(FLAG_BINDINGS.iter()) {
            *checked = flags.contains(binding.flag);
        }
        options
    }

    /// Write every bound flag into `flags`, leaving other bits alone.
    pub fn write_to(&self, mut flags: SequenceFlags) -> SequenceFlags {
        for (checked, binding) in self.checked.iter().zip(FLAG_BINDINGS.iter()) {
            flags.set(binding.flag, *checked);
        }
        flags
    }

    pub fn is_checked(&self, flag: SequenceFlags) -> bool {
        FLAG_BINDINGS
            .iter()
            .position(|b| b.flag == flag)
            .is_some_and(|i| self.checked[i])
    }

    /// Check or uncheck the box bound to `flag`. Unbound flags are ignored.
    pub fn set(&mut self, flag: SequenceFlags, value: bool) {
        if let Some(i) = FLAG_BINDINGS.iter().position(|b| b.flag == flag) {
            self.checked[i] = value;
        }
    }

    /// Bindings paired with their checked state.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&'static FlagBinding, &mut bool)> {
        FLAG_BINDINGS.iter().zip(self.checked.iter_mut())
    }
}

// ── Collaborators ───────────────────────────────────────────────

/// Editor services a confirmed dialog writes through.
pub struct PropsContext<'a> {
    pub animation: &'a mut dyn AnimationContext,
    pub sequences: &'a mut dyn SequenceManager,
    pub undo: &'a mut dyn UndoManager,
}

// ── Diff ────────────────────────────────────────────────────────

/// Changes a confirmed form would make. `None` means unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropsDiff {
    /// Move/rescale keys onto this range (seconds).
    pub rescale_keys: Option<TimeRange>,
    /// New time range (seconds).
    pub time_range: Option<TimeRange>,
    pub name: Option<String>,
    pub flags: Option<SequenceFlags>,
}

impl PropsDiff {
    pub fn is_dirty(&self) -> bool {
        self.rescale_keys.is_some()
            || self.time_range.is_some()
            || self.name.is_some()
            || self.flags.is_some()
    }
}

/// Result of a successful [`SequencePropsForm::confirm`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// Changes were applied and recorded as one undo step.
    Committed(PropsDiff),
    /// Nothing differed; the sequence was left alone.
    Unchanged,
}

// ── Form ────────────────────────────────────────────────────────

/// Transient edit state of the sequence properties dialog.
#[derive(Debug, Clone)]
pub struct SequencePropsForm {
    rate: FrameRate,
    pub name: String,
    pub options: PlaybackOptions,
    pub out_of_range: OutOfRange,
    /// Move/rescale keys to the new range instead of only setting it.
    pub move_scale_keys: bool,
    time_unit: TimeUnit,
    /// Displayed start, in `time_unit`.
    pub start: f64,
    /// Displayed end, in `time_unit`.
    pub end: f64,
    step: f64,
    cutscene_options_enabled: bool,
    open: bool,
}

impl SequencePropsForm {
    /// Seed the form from `entity`. `rate` stays fixed for the form's lifetime.
    pub fn new(entity: &dyn SequenceEntity, rate: FrameRate) -> Result<Self> {
        if !rate.is_valid() {
            return Err(TrackViewError::InvalidParameter(format!(
                "frame rate {}/{} cannot convert time units",
                rate.numerator, rate.denominator
            )));
        }

        let flags = entity.flags();
        let time_unit = if flags.contains(SequenceFlags::DISPLAY_AS_FRAMES) {
            TimeUnit::Frames
        } else {
            TimeUnit::Seconds
        };
        let displayed = entity.time_range().to_unit(time_unit, rate);
        let options = PlaybackOptions::from_flags(flags);

        let mut form = Self {
            rate,
            name: entity.name().to_owned(),
            options,
            out_of_range: OutOfRange::from_flags(flags),
            move_scale_keys: false,
            time_unit,
            start: displayed.start,
            end: displayed.end,
            step: time_unit.step(rate),
            cutscene_options_enabled: true,
            open: true,
        };
        form.toggle_cutscene_options(options.is_checked(SequenceFlags::CUT_SCENE));
        Ok(form)
    }

    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Increment for the start/end inputs in the current unit.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Bounds of the start/end inputs.
    pub fn input_range(&self) -> std::ops::RangeInclusive<f64> {
        TIME_INPUT_MIN..=TIME_INPUT_MAX
    }

    pub fn displayed_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the cutscene-only checkboxes accept input.
    pub fn cutscene_options_enabled(&self) -> bool {
        self.cutscene_options_enabled
    }

    /// Turn cutscene mode on or off. Turning it off unchecks and locks the
    /// options that only make sense for cutscenes; turning it on unlocks them
    /// without checking them.
    pub fn toggle_cutscene_options(&mut self, enabled: bool) {
        self.options.set(SequenceFlags::CUT_SCENE, enabled);
        if !enabled {
            for (binding, checked) in self.options.iter_mut() {
                if binding.cutscene_only {
                    *checked = false;
                }
            }
        }
        self.cutscene_options_enabled = enabled;
    }

    /// Convert the displayed start/end into `unit`.
    ///
    /// Switching to frames rounds to whole frames; switching to seconds
    /// multiplies by `1 / fps`. Selecting the current unit does nothing.
    pub fn switch_display_unit(&mut self, unit: TimeUnit) {
        if unit == self.time_unit {
            return;
        }
        match unit {
            TimeUnit::Frames => {
                let fps = self.rate.to_fps_f64();
                self.start = (self.start * fps).round();
                self.end = (self.end * fps).round();
            }
            TimeUnit::Seconds => {
                let inv_fps = self.rate.inv_fps();
                self.start *= inv_fps;
                self.end *= inv_fps;
            }
        }
        self.step = unit.step(self.rate);
        self.time_unit = unit;
        debug!(unit = unit.label(), start = self.start, end = self.end, "display unit switched");
    }

    /// Check the candidate name.
    pub fn validate(&self) -> std::result::Result<(), NameError> {
        validate_sequence_name(&self.name)
    }

    /// Recompute the flag bitmask from the form, starting from `current` so
    /// bits the dialog does not edit are preserved.
    pub fn flags_for(&self, current: SequenceFlags) -> SequenceFlags {
        let mut flags = self.options.write_to(current);
        flags = self.out_of_range.apply_to(flags);
        flags.set(
            SequenceFlags::DISPLAY_AS_FRAMES,
            self.time_unit == TimeUnit::Frames,
        );
        flags
    }

    /// Compare the form against `entity` without changing anything.
    pub fn compute_diff(&self, entity: &dyn SequenceEntity) -> PropsDiff {
        let stored = entity.time_range();
        let displayed = self.displayed_range();
        let seconds = displayed.to_seconds(self.time_unit, self.rate);

        let rescale = self.move_scale_keys
            && !displayed.approx_eq(stored.to_unit(self.time_unit, self.rate));
        let range_changed = !seconds.approx_eq(stored);

        let current_flags = entity.flags();
        let flags = self.flags_for(current_flags);

        PropsDiff {
            rescale_keys: rescale.then_some(seconds),
            time_range: range_changed.then_some(seconds),
            name: (self.name != entity.name()).then(|| self.name.clone()),
            flags: (flags != current_flags).then_some(flags),
        }
    }

    /// Write `diff` into `entity` through the editor services.
    pub fn apply(
        &self,
        diff: &PropsDiff,
        entity: &mut dyn SequenceEntity,
        animation: &mut dyn AnimationContext,
        sequences: &mut dyn SequenceManager,
    ) {
        if let Some(range) = diff.rescale_keys {
            entity.adjust_keys_to_time_range(range);
            animation.update_time_range(&*entity);
        } else if let Some(range) = diff.time_range {
            entity.set_time_range(range);
            animation.update_time_range(&*entity);
        }

        if let Some(name) = &diff.name {
            if let Err(e) = sequences.rename_node(entity, name) {
                warn!(error = %e, "sequence rename rejected");
            }
        }

        if let Some(flags) = diff.flags {
            entity.set_flags(flags);
        }
    }

    /// Validate and commit the form. On a name error nothing is changed and
    /// the form stays open; otherwise the form closes.
    pub fn confirm(
        &mut self,
        entity: &mut dyn SequenceEntity,
        ctx: PropsContext<'_>,
    ) -> std::result::Result<ConfirmOutcome, NameError> {
        if let Err(e) = self.validate() {
            debug!(name = %self.name, error = %e, "sequence name rejected");
            return Err(e);
        }

        let diff = self.compute_diff(entity);
        let outcome = if diff.is_dirty() {
            let PropsContext {
                animation,
                sequences,
                undo,
            } = ctx;
            let mut batch = ScopedUndoBatch::begin(undo, UNDO_LABEL);
            self.apply(&diff, entity, animation, sequences);
            batch.mark_entity_dirty(&*entity);
            info!(sequence = %entity.entity_id(), ?diff, "sequence properties changed");
            ConfirmOutcome::Committed(diff)
        } else {
            ConfirmOutcome::Unchanged
        };

        self.open = false;
        Ok(outcome)
    }

    /// Close without touching the sequence.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}

// ── Tests ───────────────────────────────────────────────────────
