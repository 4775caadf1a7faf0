//! Editor theme for the sequence list and the properties dialog.

use egui::{Color32, Rounding, Stroke, Vec2};

/// Palette and metrics shared by every TrackView panel.
pub struct Theme;

impl Theme {
    /// Caption size for dialog section headers.
    pub const CAPTION_SIZE: f32 = 11.0;
    pub const NOTICE_SIZE: f32 = 13.0;

    pub const ROW_GAP: f32 = 4.0;
    pub const SECTION_GAP: f32 = 10.0;

    pub const CORNER: f32 = 4.0;
    pub const DIALOG_CORNER: f32 = 8.0;
    pub const DIALOG_WIDTH: f32 = 360.0;

    pub const fn canvas() -> Color32 {
        Color32::from_rgb(20, 22, 26)
    }
    pub const fn panel() -> Color32 {
        Color32::from_rgb(30, 33, 38)
    }
    pub const fn raised() -> Color32 {
        Color32::from_rgb(40, 44, 51)
    }
    pub const fn control() -> Color32 {
        Color32::from_rgb(52, 57, 66)
    }

    pub const fn text() -> Color32 {
        Color32::from_rgb(222, 224, 228)
    }
    pub const fn text_muted() -> Color32 {
        Color32::from_rgb(140, 146, 156)
    }
    pub const fn caption() -> Color32 {
        Color32::from_rgb(98, 104, 114)
    }

    /// Selection and focus highlight.
    pub const fn highlight() -> Color32 {
        Color32::from_rgb(232, 163, 61)
    }
    pub const fn highlight_fill() -> Color32 {
        Color32::from_rgba_premultiplied(23, 16, 6, 26)
    }

    /// Badge colour for sequences flagged as cutscenes.
    pub const fn cutscene() -> Color32 {
        Color32::from_rgb(120, 170, 240)
    }

    pub const fn outline() -> Color32 {
        Color32::from_rgba_premultiplied(18, 18, 18, 18)
    }

    pub const fn error() -> Color32 {
        Color32::from_rgb(240, 96, 90)
    }

    /// Thin rule between dialog sections.
    pub fn section_rule(ui: &mut egui::Ui) {
        let (rect, _) =
            ui.allocate_exact_size(Vec2::new(ui.available_width(), 1.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 0.0, Self::outline());
    }

    /// Upper-case caption above a group of controls.
    pub fn caption_label(ui: &mut egui::Ui, text: &str) {
        ui.label(
            egui::RichText::new(text.to_uppercase())
                .size(Self::CAPTION_SIZE)
                .color(Self::caption())
                .strong(),
        );
    }

    /// Install the palette into `ctx`.
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = egui::Visuals::dark();

        visuals.override_text_color = Some(Self::text());
        visuals.panel_fill = Self::panel();
        visuals.window_fill = Self::raised();
        visuals.extreme_bg_color = Self::canvas();
        visuals.faint_bg_color = Self::raised();

        for widget in [
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
        ] {
            widget.rounding = Rounding::same(Self::CORNER);
        }
        visuals.widgets.inactive.bg_fill = Self::control();
        visuals.widgets.inactive.weak_bg_fill = Self::control();
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::text_muted());
        visuals.widgets.active.bg_fill = Self::highlight_fill();
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Self::highlight());

        visuals.selection.bg_fill = Self::highlight_fill();
        visuals.selection.stroke = Stroke::new(1.0, Self::highlight());
        visuals.window_rounding = Rounding::same(Self::DIALOG_CORNER);
        visuals.window_stroke = Stroke::new(1.0, Self::outline());

        style.visuals = visuals;
        ctx.set_style(style);
    }

    /// Frame for the properties dialog window.
    pub fn dialog_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::raised())
            .stroke(Stroke::new(1.0, Self::outline()))
            .rounding(Rounding::same(Self::DIALOG_CORNER))
            .inner_margin(egui::Margin::same(12.0))
            .shadow(egui::epaint::Shadow {
                offset: Vec2::new(0.0, 6.0),
                blur: 24.0,
                spread: 0.0,
                color: Color32::from_black_alpha(90),
            })
    }
}
