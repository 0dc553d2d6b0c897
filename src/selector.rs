use crate::models::{MediaKind, QualityPreset};

/// Builds the yt-dlp format selector for a form selection.
///
/// Resolution and framerate presets are not turned into constraints yet and
/// fall through to plain `best`.
pub fn format_selector(kind: MediaKind, container: &str, preset: QualityPreset) -> String {
    match (kind, preset) {
        (_, QualityPreset::Custom) => container.to_string(),
        (MediaKind::Audio, _) => format!("bestaudio/{}", container),
        (MediaKind::Video, QualityPreset::Best) => {
            format!("bestvideo[ext={0}]+bestaudio/best[ext={0}]", container)
        }
        (MediaKind::Video, QualityPreset::Worst) => {
            format!("worstvideo[ext={0}]+worstaudio/worst[ext={0}]", container)
        }
        _ => "best".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_picks_best_audio() {
        assert_eq!(
            format_selector(MediaKind::Audio, "mp3", QualityPreset::Best),
            "bestaudio/mp3"
        );
        assert_eq!(
            format_selector(MediaKind::Audio, "flac", QualityPreset::Height(720)),
            "bestaudio/flac"
        );
    }

    #[test]
    fn video_best_and_worst() {
        assert_eq!(
            format_selector(MediaKind::Video, "mp4", QualityPreset::Best),
            "bestvideo[ext=mp4]+bestaudio/best[ext=mp4]"
        );
        assert_eq!(
            format_selector(MediaKind::Video, "webm", QualityPreset::Worst),
            "worstvideo[ext=webm]+worstaudio/worst[ext=webm]"
        );
    }

    #[test]
    fn custom_passes_container_through() {
        assert_eq!(format_selector(MediaKind::Video, "mp4", QualityPreset::Custom), "mp4");
        assert_eq!(format_selector(MediaKind::Audio, "opus", QualityPreset::Custom), "opus");
    }

    #[test]
    fn fixed_presets_fall_back_to_best() {
        assert_eq!(format_selector(MediaKind::Video, "mp4", QualityPreset::Height(720)), "best");
        assert_eq!(format_selector(MediaKind::Video, "mkv", QualityPreset::Framerate(60)), "best");
    }

    #[test]
    fn total_and_deterministic_over_every_selection() {
        for kind in MediaKind::ALL {
            for container in kind.containers() {
                for preset in QualityPreset::ALL {
                    let first = format_selector(kind, container, preset);
                    assert!(!first.is_empty());
                    assert_eq!(first, format_selector(kind, container, preset));
                }
            }
        }
    }
}
