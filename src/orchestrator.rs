use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::download::JobHandle;
use crate::engine::DownloadEngine;
use crate::models::{DownloadOptions, DownloadRequest, MediaKind};
use crate::selector::format_selector;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no URL provided")]
    EmptyUrl,
    #[error("no download folder selected")]
    FolderSelectionCancelled,
}

/// User interaction the orchestrator needs. Both calls block until answered.
pub trait Prompter {
    /// Directory picker; `None` when the user cancels.
    fn pick_folder(&self) -> Option<PathBuf>;
    fn confirm_remember_folder(&self, folder: &Path) -> bool;
}

/// Folder reused across submissions for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RememberedFolder {
    folder: Option<PathBuf>,
    enabled: bool,
}

impl RememberedFolder {
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Backs the "always use this folder" toggle.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn resolve(&mut self, prompter: &dyn Prompter) -> Option<PathBuf> {
        if self.enabled {
            if let Some(folder) = &self.folder {
                return Some(folder.clone());
            }
        }
        let picked = prompter.pick_folder()?;
        self.folder = Some(picked.clone());
        Some(picked)
    }

    /// Called after a successful download. Returns whether the folder is
    /// remembered from now on.
    pub fn offer_after_success(&mut self, folder: &Path, prompter: &dyn Prompter) -> bool {
        if self.enabled {
            return true;
        }
        if prompter.confirm_remember_folder(folder) {
            log::info!("Remembering download folder {}", folder.display());
            self.folder = Some(folder.to_path_buf());
            self.enabled = true;
        } else {
            log::debug!("Download folder not remembered");
        }
        self.enabled
    }
}

pub fn output_template(folder: &Path) -> PathBuf {
    folder.join("%(title)s.%(ext)s")
}

pub fn build_options(request: &DownloadRequest, folder: &Path) -> DownloadOptions {
    let audio = request.kind == MediaKind::Audio;
    DownloadOptions {
        output_template: output_template(folder),
        format: format_selector(request.kind, &request.container, request.preset),
        no_playlist: true,
        quiet: true,
        no_warnings: true,
        extract_audio: audio,
        audio_format: audio.then(|| request.container.clone()),
    }
}

/// Starts one background job per accepted request.
pub struct Orchestrator {
    engine: Arc<dyn DownloadEngine>,
}

impl Orchestrator {
    pub fn new(engine: Arc<dyn DownloadEngine>) -> Self {
        Self { engine }
    }

    /// Validates the request, resolves the destination and starts the job.
    /// Returns as soon as the worker is running.
    pub fn submit(
        &self,
        request: &DownloadRequest,
        remembered: &mut RememberedFolder,
        prompter: &dyn Prompter,
    ) -> Result<JobHandle, SubmitError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(SubmitError::EmptyUrl);
        }

        let folder = remembered
            .resolve(prompter)
            .ok_or(SubmitError::FolderSelectionCancelled)?;
        let options = build_options(request, &folder);

        log::info!(
            "Starting download of {} to {} with format {}",
            url,
            folder.display(),
            options.format
        );
        Ok(JobHandle::spawn(
            Arc::clone(&self.engine),
            url.to_string(),
            options,
            folder,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::tests::ScriptedEngine;
    use crate::download::JobEvent;
    use crate::models::QualityPreset;
    use std::cell::{Cell, RefCell};
    use std::sync::atomic::Ordering;

    struct ScriptedPrompter {
        folders: RefCell<Vec<Option<PathBuf>>>,
        remember: bool,
        picks: Cell<usize>,
        confirms: Cell<usize>,
    }

    impl ScriptedPrompter {
        fn new(folders: Vec<Option<&str>>, remember: bool) -> Self {
            Self {
                folders: RefCell::new(folders.into_iter().rev().map(|f| f.map(PathBuf::from)).collect()),
                remember,
                picks: Cell::new(0),
                confirms: Cell::new(0),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn pick_folder(&self) -> Option<PathBuf> {
            self.picks.set(self.picks.get() + 1);
            self.folders.borrow_mut().pop().flatten()
        }

        fn confirm_remember_folder(&self, _folder: &Path) -> bool {
            self.confirms.set(self.confirms.get() + 1);
            self.remember
        }
    }

    fn request(url: &str, kind: MediaKind, container: &str) -> DownloadRequest {
        DownloadRequest {
            url: url.to_string(),
            kind,
            container: container.to_string(),
            preset: QualityPreset::Best,
        }
    }

    fn succeeding_engine() -> Arc<ScriptedEngine> {
        Arc::new(ScriptedEngine::new(vec![], None))
    }

    #[test]
    fn empty_url_never_reaches_engine_or_picker() {
        let engine = succeeding_engine();
        let orchestrator = Orchestrator::new(engine.clone());
        let prompter = ScriptedPrompter::new(vec![Some("/downloads")], false);
        let mut remembered = RememberedFolder::default();

        for url in ["", "   "] {
            let result = orchestrator.submit(&request(url, MediaKind::Video, "mp4"), &mut remembered, &prompter);
            assert_eq!(result.err(), Some(SubmitError::EmptyUrl));
        }
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
        assert_eq!(prompter.picks.get(), 0);
        assert_eq!(remembered, RememberedFolder::default());
    }

    #[test]
    fn cancelled_picker_aborts_submission() {
        let engine = succeeding_engine();
        let orchestrator = Orchestrator::new(engine.clone());
        let prompter = ScriptedPrompter::new(vec![None], false);
        let mut remembered = RememberedFolder::default();

        let result = orchestrator.submit(
            &request("https://example.com/v", MediaKind::Video, "mp4"),
            &mut remembered,
            &prompter,
        );
        assert_eq!(result.err(), Some(SubmitError::FolderSelectionCancelled));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
        assert_eq!(remembered.folder(), None);
    }

    #[test]
    fn audio_request_builds_extraction_options() {
        let engine = succeeding_engine();
        let orchestrator = Orchestrator::new(engine.clone());
        let prompter = ScriptedPrompter::new(vec![Some("/music")], false);
        let mut remembered = RememberedFolder::default();

        let handle = orchestrator
            .submit(
                &request(" https://example.com/song ", MediaKind::Audio, "flac"),
                &mut remembered,
                &prompter,
            )
            .unwrap();
        assert_eq!(handle.destination(), Path::new("/music"));
        assert_eq!(handle.wait(), vec![JobEvent::Finished(None)]);

        let seen = engine.seen.lock().unwrap();
        let (url, options) = &seen[0];
        assert_eq!(url, "https://example.com/song");
        assert_eq!(
            *options,
            DownloadOptions {
                output_template: PathBuf::from("/music/%(title)s.%(ext)s"),
                format: "bestaudio/flac".to_string(),
                no_playlist: true,
                quiet: true,
                no_warnings: true,
                extract_audio: true,
                audio_format: Some("flac".to_string()),
            }
        );
    }

    #[test]
    fn video_request_has_no_audio_extraction() {
        let options = build_options(&request("u", MediaKind::Video, "webm"), Path::new("/v"));
        assert_eq!(options.format, "bestvideo[ext=webm]+bestaudio/best[ext=webm]");
        assert!(!options.extract_audio);
        assert_eq!(options.audio_format, None);
    }

    #[test]
    fn declined_offer_prompts_again_next_time() {
        let orchestrator = Orchestrator::new(succeeding_engine());
        let prompter = ScriptedPrompter::new(vec![Some("/first"), Some("/second")], false);
        let mut remembered = RememberedFolder::default();
        let req = request("https://example.com/v", MediaKind::Video, "mp4");

        let handle = orchestrator.submit(&req, &mut remembered, &prompter).unwrap();
        let folder = handle.destination().to_path_buf();
        handle.wait();
        assert!(!remembered.offer_after_success(&folder, &prompter));
        assert_eq!(prompter.confirms.get(), 1);

        let handle = orchestrator.submit(&req, &mut remembered, &prompter).unwrap();
        assert_eq!(prompter.picks.get(), 2);
        assert_eq!(handle.destination(), Path::new("/second"));
        handle.wait();
    }

    #[test]
    fn accepted_offer_skips_picker_afterwards() {
        let orchestrator = Orchestrator::new(succeeding_engine());
        let prompter = ScriptedPrompter::new(vec![Some("/first")], true);
        let mut remembered = RememberedFolder::default();
        let req = request("https://example.com/v", MediaKind::Video, "mp4");

        let handle = orchestrator.submit(&req, &mut remembered, &prompter).unwrap();
        let folder = handle.destination().to_path_buf();
        handle.wait();
        assert!(remembered.offer_after_success(&folder, &prompter));

        for _ in 0..2 {
            let handle = orchestrator.submit(&req, &mut remembered, &prompter).unwrap();
            assert_eq!(handle.destination(), Path::new("/first"));
            handle.wait();
        }
        assert_eq!(prompter.picks.get(), 1);

        // no second offer once remembered
        assert!(remembered.offer_after_success(&folder, &prompter));
        assert_eq!(prompter.confirms.get(), 1);
    }

    #[test]
    fn toggle_before_success_reuses_last_picked_folder() {
        let orchestrator = Orchestrator::new(succeeding_engine());
        let prompter = ScriptedPrompter::new(vec![Some("/picked")], false);
        let mut remembered = RememberedFolder::default();
        let req = request("https://example.com/v", MediaKind::Audio, "mp3");

        // enabling with nothing picked yet still prompts once
        remembered.set_enabled(true);
        orchestrator.submit(&req, &mut remembered, &prompter).unwrap().wait();
        orchestrator.submit(&req, &mut remembered, &prompter).unwrap().wait();
        assert_eq!(prompter.picks.get(), 1);
        assert_eq!(remembered.folder(), Some(Path::new("/picked")));

        remembered.set_enabled(false);
        assert_eq!(prompter.folders.borrow().len(), 0);
        let result = orchestrator.submit(&req, &mut remembered, &prompter);
        assert_eq!(result.err(), Some(SubmitError::FolderSelectionCancelled));
        assert_eq!(prompter.picks.get(), 2);
    }
}
