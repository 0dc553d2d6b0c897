use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Video, MediaKind::Audio];

    /// Container formats offered for this kind, first entry is the default.
    pub fn containers(self) -> &'static [&'static str] {
        match self {
            Self::Video => &["mp4", "webm", "mkv", "flv", "mov", "avi"],
            Self::Audio => &["mp3", "m4a", "flac", "wav", "aac", "opus"],
        }
    }

    pub fn default_container(self) -> &'static str {
        self.containers()[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    #[default]
    Best,
    Worst,
    /// Vertical resolution in lines, 2k and 4k map to 1440 and 2160.
    Height(u32),
    Framerate(u32),
    Custom,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 15] = [
        QualityPreset::Best,
        QualityPreset::Worst,
        QualityPreset::Height(180),
        QualityPreset::Height(240),
        QualityPreset::Height(360),
        QualityPreset::Height(480),
        QualityPreset::Height(720),
        QualityPreset::Height(1080),
        QualityPreset::Height(1440),
        QualityPreset::Height(2160),
        QualityPreset::Framerate(30),
        QualityPreset::Framerate(60),
        QualityPreset::Framerate(24),
        QualityPreset::Framerate(25),
        QualityPreset::Custom,
    ];
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Best => f.write_str("best"),
            Self::Worst => f.write_str("worst"),
            Self::Height(1440) => f.write_str("2k"),
            Self::Height(2160) => f.write_str("4k"),
            Self::Height(h) => write!(f, "{}p", h),
            Self::Framerate(fps) => write!(f, "{}fps", fps),
            Self::Custom => f.write_str("custom"),
        }
    }
}

/// What the user asked for. The destination folder is resolved at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub kind: MediaKind,
    pub container: String,
    pub preset: QualityPreset,
}

/// Options bundle handed to the download engine together with the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// `{folder}/%(title)s.%(ext)s`, title and extension filled in by the engine.
    pub output_template: PathBuf,
    pub format: String,
    pub no_playlist: bool,
    pub quiet: bool,
    pub no_warnings: bool,
    pub extract_audio: bool,
    pub audio_format: Option<String>,
}

pub struct AppState {
    pub url: String,
    pub kind: MediaKind,
    pub container: String,
    pub preset: QualityPreset,
    pub remember_folder: bool,
    pub is_downloading: bool,
    pub progress: f32,
    pub status: String,
    pub last_error: Option<String>,
    pub output_path: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        let kind = MediaKind::default();
        Self {
            url: String::new(),
            kind,
            container: kind.default_container().to_string(),
            preset: QualityPreset::default(),
            remember_folder: false,
            is_downloading: false,
            progress: 0.0,
            status: String::new(),
            last_error: None,
            output_path: None,
        }
    }
}

impl AppState {
    pub fn set_kind(&mut self, kind: MediaKind) {
        if self.kind != kind || !kind.containers().contains(&self.container.as_str()) {
            self.kind = kind;
            self.container = kind.default_container().to_string();
        }
    }

    pub fn request(&self) -> DownloadRequest {
        DownloadRequest {
            url: self.url.clone(),
            kind: self.kind,
            container: self.container.clone(),
            preset: self.preset,
        }
    }
}
