//! Integration tests for saving edited sequences.
//!
//! Exercises trackview-ui edits flowing through trackview-sequence
//! file serialization.

use trackview_core::{FrameRate, TimeRange, TimeUnit};
use trackview_sequence::{
    KeyTrack, Playback, Sequence, SequenceFile, SequenceFlags, SequenceLibrary, UndoStack,
};
use trackview_ui::{PropsContext, SequencePropsForm};

fn scratch_file() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("trackview-it-{}", uuid::Uuid::new_v4()))
        .join("sequences.json")
}

#[test]
fn edited_sequence_survives_save_and_load() {
    let mut seq = Sequence::new("Opening", TimeRange::new(0.0, 4.0));
    let mut track = KeyTrack::new("light.intensity");
    track.set(2.0, 1.0);
    seq.add_track(track);

    let mut playback = Playback::new();
    let mut library = SequenceLibrary::new();
    let mut undo = UndoStack::default();
    library.register(&seq);
    undo.track(&seq);

    let mut form = SequencePropsForm::new(&seq, FrameRate::FPS_24).unwrap();
    form.switch_display_unit(TimeUnit::Frames);
    form.end = 192.0;
    form.move_scale_keys = true;
    form.toggle_cutscene_options(true);
    form.confirm(
        &mut seq,
        PropsContext {
            animation: &mut playback,
            sequences: &mut library,
            undo: &mut undo,
        },
    )
    .unwrap();

    let path = scratch_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    SequenceFile::new(vec![seq.clone()]).save_to_file(&path).unwrap();
    let loaded = SequenceFile::load_from_file(&path).unwrap();
    let _ = std::fs::remove_dir_all(path.parent().unwrap());

    assert_eq!(loaded.sequences, vec![seq.clone()]);
    let reloaded = &loaded.sequences[0];
    assert!(reloaded.time_range.approx_eq(TimeRange::new(0.0, 8.0)));
    assert_eq!(reloaded.tracks[0].keys()[0].time, 4.0);
    assert!(reloaded
        .flags
        .contains(SequenceFlags::CUT_SCENE | SequenceFlags::DISPLAY_AS_FRAMES));

    let reopened = SequencePropsForm::new(reloaded, FrameRate::FPS_24).unwrap();
    assert_eq!(reopened.time_unit(), TimeUnit::Frames);
    assert!(reopened.displayed_range().approx_eq(TimeRange::new(0.0, 192.0)));
    assert!(reopened.cutscene_options_enabled());
}

#[test]
fn legacy_array_file_opens_in_form() {
    let seq = Sequence::new("Legacy", TimeRange::new(0.0, 1.0))
        .with_flags(SequenceFlags::NO_PLAYER);
    let legacy = serde_json::to_string(&vec![seq]).unwrap();

    let file = SequenceFile::from_json(legacy.as_bytes()).unwrap();
    let form = SequencePropsForm::new(&file.sequences[0], FrameRate::FPS_30).unwrap();

    // Without the cutscene flag the dependent box is cleared and locked.
    assert!(!form.cutscene_options_enabled());
    assert!(!form.options.is_checked(SequenceFlags::NO_PLAYER));
}
