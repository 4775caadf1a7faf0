//! Integration tests for the sequence properties form.
//!
//! Drives `SequencePropsForm` against the real playback, library and undo
//! services from trackview-sequence.

use proptest::prelude::*;
use trackview_core::{FrameRate, NameError, TimeRange, TimeUnit};
use trackview_sequence::{
    KeyTrack, OutOfRange, Playback, Sequence, SequenceFlags, SequenceLibrary, UndoManager,
    UndoStack,
};
use trackview_ui::{ConfirmOutcome, PropsContext, SequencePropsForm, UNDO_LABEL};

// ── Helpers ────────────────────────────────────────────────────

struct Editor {
    playback: Playback,
    library: SequenceLibrary,
    undo: UndoStack,
}

impl Editor {
    fn with(sequence: &Sequence) -> Self {
        let mut editor = Self {
            playback: Playback::new(),
            library: SequenceLibrary::new(),
            undo: UndoStack::default(),
        };
        editor.playback.set_active(sequence);
        editor.library.register(sequence);
        editor.undo.track(sequence);
        editor
    }

    fn ctx(&mut self) -> PropsContext<'_> {
        PropsContext {
            animation: &mut self.playback,
            sequences: &mut self.library,
            undo: &mut self.undo,
        }
    }

    fn undo_into(&mut self, sequence: &mut Sequence) {
        let batch = self.undo.undo().expect("nothing to undo");
        batch.apply_to(std::slice::from_mut(sequence));
    }
}

fn keyed_sequence() -> Sequence {
    let mut seq = Sequence::new("Intro", TimeRange::new(0.0, 10.0));
    let mut track = KeyTrack::new("camera.fov");
    track.set(0.0, 60.0);
    track.set(5.0, 45.0);
    track.set(10.0, 30.0);
    seq.add_track(track);
    seq
}

fn key_times(seq: &Sequence) -> Vec<f64> {
    seq.tracks[0].keys().iter().map(|k| k.time).collect()
}

fn form(seq: &Sequence) -> SequencePropsForm {
    SequencePropsForm::new(seq, FrameRate::FPS_30).unwrap()
}

// ── Confirm & undo ─────────────────────────────────────────────

#[test]
fn rescale_rename_and_undo_as_one_step() {
    let mut seq = keyed_sequence();
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    form.name = "Intro Long".into();
    form.end = 20.0;
    form.move_scale_keys = true;

    let outcome = form.confirm(&mut seq, editor.ctx()).unwrap();
    assert!(matches!(outcome, ConfirmOutcome::Committed(_)));
    assert!(!form.is_open());

    assert_eq!(seq.name, "Intro Long");
    assert!(seq.time_range.approx_eq(TimeRange::new(0.0, 20.0)));
    assert_eq!(key_times(&seq), vec![0.0, 10.0, 20.0]);
    assert!(editor.playback.time_range().approx_eq(seq.time_range));
    assert_eq!(editor.library.find_by_name("Intro Long"), Some(seq.id));

    assert_eq!(editor.undo.undo_count(), 1);
    assert_eq!(editor.undo.undo_label(), Some(UNDO_LABEL));

    editor.undo_into(&mut seq);
    assert_eq!(seq.name, "Intro");
    assert!(seq.time_range.approx_eq(TimeRange::new(0.0, 10.0)));
    assert_eq!(key_times(&seq), vec![0.0, 5.0, 10.0]);
}

#[test]
fn range_change_without_rescale_keeps_keys() {
    let mut seq = keyed_sequence();
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    form.end = 4.0;
    form.confirm(&mut seq, editor.ctx()).unwrap();

    assert!(seq.time_range.approx_eq(TimeRange::new(0.0, 4.0)));
    assert_eq!(key_times(&seq), vec![0.0, 5.0, 10.0]);
    assert!(editor.playback.time_range().approx_eq(TimeRange::new(0.0, 4.0)));
}

#[test]
fn invalid_name_leaves_everything_untouched() {
    let mut seq = keyed_sequence();
    let before = seq.clone();
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    form.name = "cams/intro".into();
    form.end = 20.0;

    let err = form.confirm(&mut seq, editor.ctx()).unwrap_err();
    assert_eq!(err, NameError::InvalidCharacter('/'));
    assert!(form.is_open());
    assert_eq!(seq, before);
    assert!(!editor.undo.can_undo());

    form.name.clear();
    assert_eq!(form.confirm(&mut seq, editor.ctx()), Err(NameError::Empty));
    assert_eq!(seq, before);
}

#[test]
fn unchanged_form_records_no_history() {
    let mut seq = keyed_sequence();
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    let outcome = form.confirm(&mut seq, editor.ctx()).unwrap();

    assert_eq!(outcome, ConfirmOutcome::Unchanged);
    assert!(!form.is_open());
    assert!(!editor.undo.can_undo());
}

#[test]
fn confirm_inside_outer_batch_joins_it() {
    let mut seq = keyed_sequence();
    let mut editor = Editor::with(&seq);

    editor.undo.begin_batch("Import Level");
    let mut form = form(&seq);
    form.end = 12.0;
    form.confirm(&mut seq, editor.ctx()).unwrap();
    assert!(!editor.undo.can_undo());
    editor.undo.end_batch();

    assert_eq!(editor.undo.undo_label(), Some("Import Level"));
    assert_eq!(editor.undo.undo_count(), 1);
}

// ── Display units ──────────────────────────────────────────────

#[test]
fn frames_sequence_edits_in_frames() {
    let mut seq = Sequence::new("Fly-in", TimeRange::new(1.0, 2.0))
        .with_flags(SequenceFlags::DISPLAY_AS_FRAMES);
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    assert_eq!(form.time_unit(), TimeUnit::Frames);
    assert_eq!(form.step(), 1.0);
    assert!(form.displayed_range().approx_eq(TimeRange::new(30.0, 60.0)));

    form.end = 90.0;
    form.confirm(&mut seq, editor.ctx()).unwrap();

    assert!(seq.time_range.approx_eq(TimeRange::new(1.0, 3.0)));
    assert!(seq.flags.contains(SequenceFlags::DISPLAY_AS_FRAMES));
}

#[test]
fn switching_unit_only_changes_display_flag() {
    let mut seq = Sequence::new("Loop", TimeRange::new(0.0, 2.0));
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    form.switch_display_unit(TimeUnit::Frames);
    assert!(form.displayed_range().approx_eq(TimeRange::new(0.0, 60.0)));

    let outcome = form.confirm(&mut seq, editor.ctx()).unwrap();
    let ConfirmOutcome::Committed(diff) = outcome else {
        panic!("expected a committed change");
    };
    assert_eq!(diff.time_range, None);
    assert_eq!(diff.name, None);
    assert_eq!(diff.flags, Some(SequenceFlags::DISPLAY_AS_FRAMES));
    assert!(seq.time_range.approx_eq(TimeRange::new(0.0, 2.0)));
}

#[test]
fn frames_round_trip_back_to_seconds() {
    let seq = Sequence::new("Loop", TimeRange::new(0.5, 1.5));
    let mut form = form(&seq);

    form.switch_display_unit(TimeUnit::Frames);
    form.switch_display_unit(TimeUnit::Seconds);

    assert!(form.displayed_range().approx_eq(TimeRange::new(0.5, 1.5)));
    assert!((form.step() - 1.0 / 30.0).abs() < 1e-12);
}

// ── Flags ──────────────────────────────────────────────────────

#[test]
fn clearing_cutscene_clears_dependent_flags() {
    let mut seq = Sequence::new("Boss Intro", TimeRange::new(0.0, 5.0)).with_flags(
        SequenceFlags::CUT_SCENE
            | SequenceFlags::NO_PLAYER
            | SequenceFlags::NO_ABORT
            | SequenceFlags::NO_SEEK,
    );
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    form.toggle_cutscene_options(false);
    form.confirm(&mut seq, editor.ctx()).unwrap();

    assert!(!seq.flags.contains(SequenceFlags::CUT_SCENE));
    assert!(!seq.flags.contains(SequenceFlags::NO_PLAYER));
    assert!(!seq.flags.contains(SequenceFlags::NO_ABORT));
    assert!(seq.flags.contains(SequenceFlags::NO_SEEK));
}

#[test]
fn flags_outside_the_dialog_survive_confirm() {
    let hidden = SequenceFlags::NO_HUD | SequenceFlags::NO_SPEED | SequenceFlags::from_bits_retain(1 << 30);
    let mut seq = Sequence::new("Outro", TimeRange::new(0.0, 5.0)).with_flags(hidden);
    let mut editor = Editor::with(&seq);

    let mut form = form(&seq);
    form.out_of_range = OutOfRange::Loop;
    form.confirm(&mut seq, editor.ctx()).unwrap();

    assert!(seq.flags.contains(hidden));
    assert_eq!(seq.flags.out_of_range(), OutOfRange::Loop);
}

fn known_flags() -> impl Strategy<Value = SequenceFlags> {
    let bits = [0u32, 1, 2, 3, 4, 5, 9, 10, 11, 13, 15, 18];
    proptest::collection::vec(any::<bool>(), bits.len()).prop_map(move |set| {
        let raw = bits
            .iter()
            .zip(set)
            .filter(|(_, on)| *on)
            .fold(0u32, |acc, (bit, _)| acc | (1 << bit));
        SequenceFlags::from_bits_retain(raw)
    })
}

proptest! {
    #[test]
    fn reopening_after_confirm_shows_same_state(flags in known_flags()) {
        let mut seq = Sequence::new("Any", TimeRange::new(0.0, 3.0)).with_flags(flags);
        let mut editor = Editor::with(&seq);

        let mut first = form(&seq);
        first.confirm(&mut seq, editor.ctx()).unwrap();

        let second = form(&seq);
        prop_assert_eq!(second.options, first.options);
        prop_assert_eq!(second.out_of_range, first.out_of_range);
        prop_assert_eq!(second.time_unit(), first.time_unit());
        prop_assert_eq!(second.cutscene_options_enabled(), first.cutscene_options_enabled());
    }

    #[test]
    fn out_of_range_mode_is_exclusive(flags in known_flags(), pick in 0usize..3) {
        let mut seq = Sequence::new("Any", TimeRange::new(0.0, 3.0)).with_flags(flags);
        let mut editor = Editor::with(&seq);

        let mut form = form(&seq);
        form.out_of_range = OutOfRange::ALL[pick];
        form.confirm(&mut seq, editor.ctx()).unwrap();

        let both = SequenceFlags::OUT_OF_RANGE_CONSTANT | SequenceFlags::OUT_OF_RANGE_LOOP;
        prop_assert!(!seq.flags.contains(both));
        prop_assert_eq!(seq.flags.out_of_range(), OutOfRange::ALL[pick]);
    }
}
