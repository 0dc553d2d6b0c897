use eframe::egui;

use crate::localizations::Localizations;
use crate::models::{AppState, MediaKind, QualityPreset};
use crate::theme::*;

pub mod dialogs;

pub fn render_url_input(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) -> egui::Response {
    ui.label(localizer.text("url-label"));

    egui::Frame::group(ui.style())
        .fill(egui::Color32::from_rgb(250, 250, 250))
        .stroke(egui::Stroke::new(1.0, egui::Color32::LIGHT_GRAY))
        .rounding(4.0)
        .show(ui, |ui| {
            ui.add_sized(
                [ui.available_width(), 32.0],
                egui::TextEdit::singleline(&mut state.url)
                    .hint_text(localizer.text("url-placeholder"))
                    .font(egui::FontId::proportional(16.0)),
            )
        })
        .inner
}

fn kind_label(kind: MediaKind, localizer: &Localizations) -> String {
    match kind {
        MediaKind::Video => localizer.text("kind-video"),
        MediaKind::Audio => localizer.text("kind-audio"),
    }
}

pub fn render_selectors(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) {
    egui::Grid::new("selectors")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label(localizer.text("kind-label"));
            let mut kind = state.kind;
            egui::ComboBox::from_id_source("kind")
                .width(COMBO_WIDTH)
                .selected_text(kind_label(kind, localizer))
                .show_ui(ui, |ui| {
                    for option in MediaKind::ALL {
                        ui.selectable_value(&mut kind, option, kind_label(option, localizer));
                    }
                });
            state.set_kind(kind);
            ui.end_row();

            ui.label(localizer.text("format-label"));
            egui::ComboBox::from_id_source("container")
                .width(COMBO_WIDTH)
                .selected_text(state.container.clone())
                .show_ui(ui, |ui| {
                    for container in state.kind.containers() {
                        ui.selectable_value(&mut state.container, container.to_string(), *container);
                    }
                });
            ui.end_row();

            ui.label(localizer.text("quality-label"));
            egui::ComboBox::from_id_source("quality")
                .width(COMBO_WIDTH)
                .selected_text(state.preset.to_string())
                .show_ui(ui, |ui| {
                    for preset in QualityPreset::ALL {
                        ui.selectable_value(&mut state.preset, preset, preset.to_string());
                    }
                });
            ui.end_row();
        });
}

/// Returns true when the toggle changed this frame.
pub fn render_remember_toggle(ui: &mut egui::Ui, state: &mut AppState, localizer: &Localizations) -> bool {
    ui.checkbox(&mut state.remember_folder, localizer.text("remember-folder"))
        .changed()
}

pub fn render_status(ui: &mut egui::Ui, state: &AppState, localizer: &Localizations) {
    egui::Frame::group(ui.style())
        .fill(PANEL_BG)
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical(|ui| {
                let status_text = if let Some(error) = &state.last_error {
                    egui::RichText::new(format!("{}: {}", localizer.text("error-title"), error))
                        .color(TEXT_ERROR)
                } else if state.output_path.is_some() {
                    egui::RichText::new(&state.status).color(TEXT_SUCCESS)
                } else {
                    egui::RichText::new(&state.status).color(egui::Color32::DARK_GRAY)
                };
                ui.label(status_text);

                ui.add_space(8.0);
                // engine percentages can exceed 100 without a size estimate
                let progress = (state.progress / 100.0).clamp(0.0, 1.0);
                ui.add(egui::ProgressBar::new(progress).show_percentage());

                if let Some(path) = &state.output_path {
                    ui.add_space(8.0);
                    ui.label(format!("{} {}", localizer.text("saved-to"), path.display()));
                }
            });
        });
}

pub fn render_footer(ui: &mut egui::Ui, localizer: &Localizations) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(localizer.text("footer"))
                .small()
                .color(SECONDARY_TEXT),
        );
    });
}
