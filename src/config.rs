use std::env;
use std::path::PathBuf;

use i18n_embed::DesktopLanguageRequester;
use unic_langid::LanguageIdentifier;

pub const ENGINE_ENV: &str = "QUICKFILE_YTDLP";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Explicit yt-dlp executable, otherwise it is looked up on PATH.
    pub engine_program: Option<PathBuf>,
    /// Desktop languages in order of preference.
    pub languages: Vec<LanguageIdentifier>,
    /// Where the folder picker opens.
    pub start_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let engine_program = env::var_os(ENGINE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        if let Some(program) = &engine_program {
            log::info!("Using yt-dlp from {}: {}", ENGINE_ENV, program.display());
        }

        let start_dir = dirs::download_dir()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_default();

        Self {
            engine_program,
            languages: DesktopLanguageRequester::requested_languages(),
            start_dir,
        }
    }
}
