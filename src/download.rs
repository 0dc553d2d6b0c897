use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::engine::{DownloadEngine, EngineEvent};
use crate::models::DownloadOptions;

/// Notification sent from a job's worker thread to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Progress(f32),
    /// Last file the engine reported finished, if it reported any.
    Finished(Option<PathBuf>),
    Failed(String),
}

impl JobEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

pub fn start_download(
    engine: Arc<dyn DownloadEngine>,
    url: String,
    options: DownloadOptions,
    tx: Sender<JobEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut last_filename: Option<PathBuf> = None;
        let result = engine.download(&url, &options, &mut |event: EngineEvent| match event {
            EngineEvent::Downloading { .. } => {
                if let Some(percent) = event.percent() {
                    let _ = tx.send(JobEvent::Progress(percent));
                }
            }
            EngineEvent::Finished { filename } => {
                if filename.is_some() {
                    last_filename = filename;
                }
            }
        });

        let terminal = match result {
            Ok(()) => {
                match &last_filename {
                    Some(path) => log::info!("Download of {} finished: {}", url, path.display()),
                    None => log::info!("Download of {} finished", url),
                }
                JobEvent::Finished(last_filename)
            }
            Err(e) => {
                log::error!("Download of {} failed: {}", url, e);
                JobEvent::Failed(e.to_string())
            }
        };

        if let Err(e) = tx.send(terminal) {
            log::warn!("Failed to send download result: {}", e);
        }
    })
}

/// Receiving end of one running download.
pub struct JobHandle {
    destination: PathBuf,
    receiver: Receiver<JobEvent>,
    worker: Option<thread::JoinHandle<()>>,
    done: bool,
}

impl JobHandle {
    pub fn spawn(
        engine: Arc<dyn DownloadEngine>,
        url: String,
        options: DownloadOptions,
        destination: PathBuf,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = start_download(engine, url, options, tx);
        Self {
            destination,
            receiver: rx,
            worker: Some(worker),
            done: false,
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Drains pending events without blocking. Nothing is returned after the
    /// terminal event.
    pub fn poll(&mut self) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while !self.done {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.done = event.is_terminal();
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.done = true;
                    events.push(JobEvent::Failed("download worker stopped unexpectedly".into()));
                }
            }
        }
        if self.done {
            if let Some(worker) = self.worker.take() {
                let _ = worker.join();
            }
        }
        events
    }

    /// Blocks until the job ends and returns every event it produced.
    pub fn wait(mut self) -> Vec<JobEvent> {
        let mut events = Vec::new();
        while !self.done {
            match self.receiver.recv() {
                Ok(event) => {
                    self.done = event.is_terminal();
                    events.push(event);
                }
                Err(_) => {
                    self.done = true;
                    events.push(JobEvent::Failed("download worker stopped unexpectedly".into()));
                }
            }
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        events
    }
}
