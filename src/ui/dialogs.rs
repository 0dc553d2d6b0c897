use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::localizations::Localizations;
use crate::orchestrator::Prompter;

/// Native dialogs backed by rfd.
pub struct NativePrompter {
    pick_title: String,
    remember_title: String,
    remember_question: String,
    start_dir: PathBuf,
}

impl NativePrompter {
    pub fn new(localizer: &Localizations, start_dir: PathBuf) -> Self {
        Self {
            pick_title: localizer.text("pick-folder-title"),
            remember_title: localizer.text("remember-title"),
            remember_question: localizer.text("remember-question"),
            start_dir,
        }
    }
}

impl Prompter for NativePrompter {
    fn pick_folder(&self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title(&self.pick_title)
            .set_directory(&self.start_dir)
            .pick_folder()
    }

    fn confirm_remember_folder(&self, folder: &Path) -> bool {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&self.remember_title)
            .set_description(&format!("{}\n{}", self.remember_question, folder.display()))
            .set_buttons(MessageButtons::YesNo)
            .show()
    }
}

pub fn show_info(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn show_warning(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
