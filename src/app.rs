use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Stroke};

use crate::config::AppConfig;
use crate::download::{JobEvent, JobHandle};
use crate::engine::{DownloadEngine, YtDlpEngine};
use crate::localizations::Localizations;
use crate::models::AppState;
use crate::orchestrator::{Orchestrator, RememberedFolder, SubmitError};
use crate::theme::*;
use crate::ui::{self, dialogs};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Puts the validation message inline in the status panel. A failure left over
/// from the previous job would hide it, so that is cleared.
fn show_submit_error(state: &mut AppState, error: &SubmitError, localizer: &Localizations) -> String {
    let message = match error {
        SubmitError::EmptyUrl => localizer.text("error-no-url"),
        SubmitError::FolderSelectionCancelled => localizer.text("error-no-folder"),
    };
    state.status = message.clone();
    state.last_error = None;
    message
}

pub struct QuickFileApp {
    pub state: AppState,
    localizer: Localizations,
    orchestrator: Orchestrator,
    remembered: RememberedFolder,
    prompter: dialogs::NativePrompter,
    job: Option<JobHandle>,
}

impl QuickFileApp {
    pub fn new(config: AppConfig) -> Self {
        let localizer = Localizations::with_requested(&config.languages);

        let engine = YtDlpEngine::locate(config.engine_program).unwrap_or_else(|e| {
            log::warn!("yt-dlp not found ({}), falling back to PATH lookup at spawn time", e);
            YtDlpEngine::new("yt-dlp")
        });
        log::info!("Using download engine {}", engine.program().display());
        let engine: Arc<dyn DownloadEngine> = Arc::new(engine);

        let state = AppState {
            status: localizer.text("status-ready"),
            ..Default::default()
        };

        Self {
            state,
            prompter: dialogs::NativePrompter::new(&localizer, config.start_dir),
            localizer,
            orchestrator: Orchestrator::new(engine),
            remembered: RememberedFolder::default(),
            job: None,
        }
    }

    pub fn start_download(&mut self, ctx: &egui::Context) {
        if self.state.is_downloading {
            return;
        }

        let request = self.state.request();
        match self
            .orchestrator
            .submit(&request, &mut self.remembered, &self.prompter)
        {
            Ok(job) => {
                self.state.is_downloading = true;
                self.state.progress = 0.0;
                self.state.last_error = None;
                self.state.output_path = None;
                self.state.status = self.localizer.text("status-downloading");
                self.job = Some(job);
                ctx.request_repaint();
            }
            Err(e) => {
                log::warn!("Download not started: {}", e);
                let message = show_submit_error(&mut self.state, &e, &self.localizer);
                if e == SubmitError::EmptyUrl {
                    dialogs::show_warning(&self.localizer.text("error-title"), &message);
                }
            }
        }
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.process_job_events(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.localizer.text("app-title"));
            ui.add_space(16.0);

            let url_response = ui::render_url_input(ui, &mut self.state, &self.localizer);
            if url_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_download(ctx);
            }
            ui.add_space(12.0);

            ui::render_selectors(ui, &mut self.state, &self.localizer);
            ui.add_space(16.0);

            self.render_download_button(ui, ctx);
            ui.add_space(12.0);

            ui::render_status(ui, &self.state, &self.localizer);
            ui.add_space(8.0);

            if ui::render_remember_toggle(ui, &mut self.state, &self.localizer) {
                self.remembered.set_enabled(self.state.remember_folder);
                log::debug!(
                    "Remember folder {} ({:?})",
                    self.state.remember_folder,
                    self.remembered.folder()
                );
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                ui::render_footer(ui, &self.localizer);
            });
        });

        if self.state.is_downloading {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }

    fn process_job_events(&mut self, ctx: &egui::Context) {
        let Some(job) = &mut self.job else {
            return;
        };

        for event in job.poll() {
            match event {
                JobEvent::Progress(percent) => {
                    self.state.progress = percent;
                }
                JobEvent::Finished(path) => {
                    self.state.is_downloading = false;
                    self.state.progress = 100.0;
                    self.state.status = self.localizer.text("status-complete");
                    self.state.output_path = path;
                    dialogs::show_info(
                        &self.localizer.text("done-title"),
                        &self.localizer.text("status-complete"),
                    );
                    let folder = job.destination().to_path_buf();
                    self.state.remember_folder =
                        self.remembered.offer_after_success(&folder, &self.prompter);
                }
                JobEvent::Failed(reason) => {
                    self.state.is_downloading = false;
                    self.state.status = self.localizer.text("status-ready");
                    dialogs::show_error(
                        &self.localizer.text("error-title"),
                        &format!("{} {}", self.localizer.text("download-failed"), reason),
                    );
                    self.state.last_error = Some(reason);
                }
            }
            ctx.request_repaint();
        }

        if job.is_done() {
            self.job = None;
        }
    }

    fn render_download_button(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            let download_button = egui::Button::new(
                egui::RichText::new(self.localizer.text("download-button"))
                    .size(BUTTON_FONT_SIZE)
                    .color(BUTTON_MAIN_TEXT),
            )
            .min_size(MIN_SIZE_BUTTON)
            .fill(PRIMARY_BUTTON_BG)
            .rounding(ROUNDING_BUTTON)
            .stroke(Stroke::new(1.0, BORDER_COLOR));

            if ui.add_enabled(!self.state.is_downloading, download_button).clicked() {
                self.start_download(ctx);
            }
        });
    }
}

impl eframe::App for QuickFileApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_folder_selection_is_shown_inline() {
        let localizer = Localizations::new();
        let mut state = AppState {
            status: "Ready".to_string(),
            last_error: Some("ERROR: earlier failure".to_string()),
            ..Default::default()
        };

        let message = show_submit_error(&mut state, &SubmitError::FolderSelectionCancelled, &localizer);
        assert_eq!(message, "No download folder selected.");
        assert_eq!(state.status, message);
        assert_eq!(state.last_error, None);
        assert!(!state.is_downloading);
    }

    #[test]
    fn empty_url_message_is_shown_inline() {
        let localizer = Localizations::new();
        let mut state = AppState::default();

        let message = show_submit_error(&mut state, &SubmitError::EmptyUrl, &localizer);
        assert_eq!(message, "Please enter a URL.");
        assert_eq!(state.status, "Please enter a URL.");
        assert_eq!(state.last_error, None);
    }
}
