//! Sequence properties dialog: name, time range, playback flags.

use crate::sequence_props::{SequencePropsForm, FLAG_COUNT};
use crate::theme::Theme;
use egui::{self, Vec2};
use trackview_core::{NameError, TimeUnit};
use trackview_sequence::{OutOfRange, SequenceFlags};

// ── State ───────────────────────────────────────────────────────

/// Persistent state for the sequence properties dialog.
#[derive(Default)]
pub struct SequencePropsDialogState {
    /// Edit state while the dialog is open.
    pub form: Option<SequencePropsForm>,
    /// Blocking notice from the last rejected confirm.
    pub error: Option<NameError>,
}

impl SequencePropsDialogState {
    pub fn open(&mut self, form: SequencePropsForm) {
        self.form = Some(form);
        self.error = None;
    }

    pub fn close(&mut self) {
        self.form = None;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }
}

// ── Actions ─────────────────────────────────────────────────────

/// Actions that the properties dialog can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePropsAction {
    /// User clicked "OK"; the host should run `SequencePropsForm::confirm`.
    Confirm,
    /// User clicked "Cancel" or closed the window.
    Cancel,
}

// ── Rendering ───────────────────────────────────────────────────

/// One checkbox per flag binding. Toggling the cutscene box locks or
/// unlocks the cutscene-only boxes. Returns the checkbox responses in
/// binding order.
fn playback_options_ui(ui: &mut egui::Ui, form: &mut SequencePropsForm) -> Vec<egui::Response> {
    let dependents_enabled = form.cutscene_options_enabled();
    let mut cutscene_toggled = None;
    let mut responses = Vec::with_capacity(FLAG_COUNT);
    for (binding, checked) in form.options.iter_mut() {
        let enabled = !binding.cutscene_only || dependents_enabled;
        let response = ui.add_enabled(enabled, egui::Checkbox::new(checked, binding.label));
        if binding.flag == SequenceFlags::CUT_SCENE && response.changed() {
            cutscene_toggled = Some(*checked);
        }
        responses.push(response);
    }
    if let Some(on) = cutscene_toggled {
        form.toggle_cutscene_options(on);
    }
    responses
}

/// Show the sequence properties dialog as a floating egui window.
///
/// Returns any actions the caller should handle.
pub fn show_sequence_props_dialog(
    ctx: &egui::Context,
    state: &mut SequencePropsDialogState,
) -> Vec<SequencePropsAction> {
    let mut actions = Vec::new();

    let Some(form) = state.form.as_mut() else {
        return actions;
    };

    let error = state.error;
    let mut still_open = true;

    egui::Window::new("Sequence Properties")
        .open(&mut still_open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
        .frame(Theme::dialog_frame())
        .show(ctx, |ui| {
            ui.set_width(Theme::DIALOG_WIDTH);
            ui.spacing_mut().item_spacing = Vec2::new(6.0, Theme::ROW_GAP);

            // ── Name ─────────────────────────────────────
            Theme::caption_label(ui, "Name");
            ui.add(
                egui::TextEdit::singleline(&mut form.name)
                    .desired_width(ui.available_width())
                    .hint_text("Sequence name"),
            );

            ui.add_space(Theme::ROW_GAP);

            // ── Time range ───────────────────────────────
            Theme::caption_label(ui, "Time range");
            ui.horizontal(|ui| {
                let mut unit = form.time_unit();
                for option in [TimeUnit::Seconds, TimeUnit::Frames] {
                    ui.radio_value(&mut unit, option, option.label());
                }
                if unit != form.time_unit() {
                    form.switch_display_unit(unit);
                }
            });

            let range = form.input_range();
            let step = form.step();
            ui.horizontal(|ui| {
                ui.label("Start");
                ui.add(
                    egui::DragValue::new(&mut form.start)
                        .range(range.clone())
                        .speed(step)
                        .max_decimals(4),
                );
                ui.label("End");
                ui.add(
                    egui::DragValue::new(&mut form.end)
                        .range(range)
                        .speed(step)
                        .max_decimals(4),
                );
            });
            ui.checkbox(&mut form.move_scale_keys, "Move/rescale keys");

            ui.add_space(Theme::ROW_GAP);
            Theme::section_rule(ui);

            // ── Playback flags ───────────────────────────
            Theme::caption_label(ui, "Playback");
            playback_options_ui(ui, form);

            ui.add_space(Theme::ROW_GAP);

            Theme::caption_label(ui, "Out of range");
            ui.horizontal(|ui| {
                for option in OutOfRange::ALL {
                    ui.radio_value(&mut form.out_of_range, option, option.label());
                }
            });

            ui.add_space(Theme::SECTION_GAP);
            Theme::section_rule(ui);

            // ── Validation notice ────────────────────────
            if let Some(error) = error {
                ui.label(
                    egui::RichText::new(error.to_string())
                        .size(Theme::NOTICE_SIZE)
                        .color(Theme::error()),
                );
            }

            // ── Buttons ──────────────────────────────────
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    actions.push(SequencePropsAction::Confirm);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(SequencePropsAction::Cancel);
                }
            });
        });

    if !still_open {
        actions.push(SequencePropsAction::Cancel);
    }

    actions
}
