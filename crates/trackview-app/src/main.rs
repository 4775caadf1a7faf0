//! TrackView - Sequence editor
//!
//! Entry point and main application loop.

mod config;

use anyhow::Result;
use config::EditorConfig;
use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trackview_core::TimeRange;
use trackview_sequence::{
    AnimationContext, KeyTrack, Playback, Sequence, SequenceFile, SequenceFlags, SequenceLibrary,
    UndoBatch, UndoStack,
};
use trackview_ui::{
    show_sequence_props_dialog, ConfirmOutcome, PropsContext, SequencePropsAction,
    SequencePropsDialogState, SequencePropsForm, Theme,
};
use uuid::Uuid;

fn main() -> Result<()> {
    let loaded = EditorConfig::load();

    // Initialize logging
    let default_level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".into());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "config unreadable, using defaults");
        EditorConfig::default()
    });

    info!("TrackView starting...");

    // Parse command line for a sequence file
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.last_file.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("TrackView"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "TrackView",
        options,
        Box::new(move |cc| Ok(Box::new(TrackViewApp::new(cc, config, file_path)))),
    )?;

    Ok(())
}

struct TrackViewApp {
    config: EditorConfig,
    file_path: Option<PathBuf>,
    sequences: Vec<Sequence>,
    selected: Option<Uuid>,
    playback: Playback,
    library: SequenceLibrary,
    undo: UndoStack,
    props: SequencePropsDialogState,
    /// Sequence the properties dialog is editing.
    editing: Option<Uuid>,
    status: String,
}

impl TrackViewApp {
    fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig, file_path: Option<PathBuf>) -> Self {
        Theme::apply(&cc.egui_ctx);

        let sequences = file_path
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| match SequenceFile::load_from_file(path) {
                Ok(file) => Some(file.sequences),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to open sequence file");
                    None
                }
            })
            .unwrap_or_else(demo_sequences);

        let mut app = Self {
            undo: UndoStack::new(config.undo_depth),
            config,
            file_path,
            sequences: Vec::new(),
            selected: None,
            playback: Playback::new(),
            library: SequenceLibrary::new(),
            props: SequencePropsDialogState::default(),
            editing: None,
            status: String::new(),
        };
        for seq in sequences {
            app.add_sequence(seq);
        }
        app
    }

    fn add_sequence(&mut self, sequence: Sequence) {
        self.library.register(&sequence);
        self.undo.track(&sequence);
        if self.selected.is_none() {
            self.select(&sequence);
        }
        self.sequences.push(sequence);
    }

    fn select(&mut self, sequence: &Sequence) {
        self.selected = Some(sequence.id);
        self.playback.set_active(sequence);
    }

    fn new_sequence(&mut self) {
        let name = self.library.unique_name("Sequence");
        let sequence = Sequence::new(name, TimeRange::new(0.0, 10.0));
        info!(name = %sequence.name, "sequence created");
        self.add_sequence(sequence);
    }

    fn open_props(&mut self, id: Uuid) {
        let Some(seq) = self.sequences.iter().find(|s| s.id == id) else {
            return;
        };
        match SequencePropsForm::new(seq, self.config.frame_rate) {
            Ok(form) => {
                self.editing = Some(id);
                self.props.open(form);
            }
            Err(e) => self.status = format!("Cannot edit sequence: {e}"),
        }
    }

    fn confirm_props(&mut self) {
        let editing = self.editing;
        let Some(seq) = self.sequences.iter_mut().find(|s| Some(s.id) == editing) else {
            self.props.close();
            return;
        };
        let Some(form) = self.props.form.as_mut() else {
            return;
        };
        let ctx = PropsContext {
            animation: &mut self.playback,
            sequences: &mut self.library,
            undo: &mut self.undo,
        };
        match form.confirm(seq, ctx) {
            Ok(ConfirmOutcome::Committed(_)) => {
                self.status = format!("Updated \"{}\"", seq.name);
                self.props.close();
                self.editing = None;
            }
            Ok(ConfirmOutcome::Unchanged) => {
                self.props.close();
                self.editing = None;
            }
            Err(e) => self.props.error = Some(e),
        }
    }

    fn undo(&mut self) {
        if let Some(batch) = self.undo.undo() {
            self.apply_history(&batch);
            self.status = format!("Undo {}", batch.label);
        }
    }

    fn redo(&mut self) {
        if let Some(batch) = self.undo.redo() {
            self.apply_history(&batch);
            self.status = format!("Redo {}", batch.label);
        }
    }

    fn apply_history(&mut self, batch: &UndoBatch) {
        batch.apply_to(&mut self.sequences);
        for seq in self.sequences.iter().filter(|s| batch.touches(s.id)) {
            self.library.register(seq);
            self.playback.update_time_range(seq);
        }
    }

    fn save(&mut self) {
        let path = self
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("sequences.json"));
        match SequenceFile::new(self.sequences.clone()).save_to_file(&path) {
            Ok(()) => {
                self.status = format!("Saved {}", path.display());
                self.config.last_file = Some(path.clone());
                self.file_path = Some(path);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "failed to save config");
                }
            }
            Err(e) => self.status = format!("Save failed: {e}"),
        }
    }

    fn show_sequence_list(&mut self, ui: &mut egui::Ui) {
        let mut select = None;
        let mut edit = None;
        egui::Grid::new("sequence_list")
            .num_columns(5)
            .striped(true)
            .show(ui, |ui| {
                for seq in &self.sequences {
                    let selected = self.selected == Some(seq.id);
                    if ui.selectable_label(selected, seq.name.as_str()).clicked() {
                        select = Some(seq.id);
                    }
                    ui.label(seq.time_range.to_string());
                    ui.label(format!("{} keys", seq.key_count()));
                    if seq.flags.contains(SequenceFlags::CUT_SCENE) {
                        ui.colored_label(Theme::cutscene(), "cutscene");
                    } else {
                        ui.label("");
                    }
                    if ui.button("Properties…").clicked() {
                        edit = Some(seq.id);
                    }
                    ui.end_row();
                }
            });

        if let Some(id) = select {
            if let Some(seq) = self.sequences.iter().find(|s| s.id == id).cloned() {
                self.select(&seq);
            }
        }
        if let Some(id) = edit {
            self.open_props(id);
        }
    }
}

impl eframe::App for TrackViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal = self.props.is_open();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("New Sequence").clicked() {
                        self.new_sequence();
                    }
                    let undo_hint = match self.undo.undo_label() {
                        Some(label) => format!("Undo {label}"),
                        None => "Nothing to undo".to_owned(),
                    };
                    if ui
                        .add_enabled(self.undo.can_undo(), egui::Button::new("Undo"))
                        .on_hover_text(undo_hint)
                        .clicked()
                    {
                        self.undo();
                    }
                    if ui
                        .add_enabled(self.undo.can_redo(), egui::Button::new("Redo"))
                        .clicked()
                    {
                        self.redo();
                    }
                    if ui.button("Save").clicked() {
                        self.save();
                    }
                    ui.separator();
                    ui.label(format!("{}", self.config.frame_rate));
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(self.status.as_str()).color(Theme::text_muted()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} undo steps", self.undo.undo_count()));
                    ui.separator();
                    let range = self.playback.time_range();
                    let mut time = self.playback.current_time();
                    let playhead = ui.add(
                        egui::DragValue::new(&mut time)
                            .range(range.start..=range.end)
                            .speed(self.config.frame_rate.inv_fps())
                            .suffix(" s"),
                    );
                    if playhead.changed() {
                        self.playback.set_current_time(time);
                    }
                    ui.label(format!("Playhead in {range}"));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| self.show_sequence_list(ui));
        });

        for action in show_sequence_props_dialog(ctx, &mut self.props) {
            match action {
                SequencePropsAction::Confirm => self.confirm_props(),
                SequencePropsAction::Cancel => {
                    if let Some(form) = self.props.form.as_mut() {
                        form.cancel();
                    }
                    self.props.close();
                    self.editing = None;
                }
            }
        }
    }
}

fn demo_sequences() -> Vec<Sequence> {
    let mut intro = Sequence::new("Intro", TimeRange::new(0.0, 8.0))
        .with_flags(SequenceFlags::CUT_SCENE | SequenceFlags::NO_PLAYER);
    let mut fov = KeyTrack::new("camera.fov");
    fov.set(0.0, 60.0);
    fov.set(4.0, 45.0);
    fov.set(8.0, 30.0);
    intro.add_track(fov);

    let ambient = Sequence::new("Ambient Loop", TimeRange::new(0.0, 30.0))
        .with_flags(SequenceFlags::PLAY_ON_RESET | SequenceFlags::OUT_OF_RANGE_LOOP);

    vec![intro, ambient]
}
