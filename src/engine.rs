use std::ffi::OsString;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;

use thiserror::Error;

use crate::models::DownloadOptions;

const PROGRESS_PREFIX: &str = "quickfile|";
const PROGRESS_TEMPLATE: &str = "download:quickfile|%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|%(progress.filename)s";

/// Status report delivered by the engine while a download runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Downloading {
        downloaded_bytes: u64,
        total_bytes: Option<u64>,
        total_bytes_estimate: Option<u64>,
    },
    Finished {
        filename: Option<PathBuf>,
    },
}

impl EngineEvent {
    /// Percentage of the best size estimate. Without any estimate the total is
    /// taken as one byte, so the value is not bounded by 100.
    pub fn percent(&self) -> Option<f32> {
        match *self {
            Self::Downloading {
                downloaded_bytes,
                total_bytes,
                total_bytes_estimate,
            } => {
                let total = total_bytes
                    .filter(|t| *t > 0)
                    .or(total_bytes_estimate.filter(|t| *t > 0))
                    .unwrap_or(1);
                Some((downloaded_bytes as f64 / total as f64 * 100.0) as f32)
            }
            Self::Finished { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Failed(String),
}

/// The external media-download engine. One call performs one blocking download.
pub trait DownloadEngine: Send + Sync {
    fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        hook: &mut dyn FnMut(EngineEvent),
    ) -> Result<(), EngineError>;
}

pub struct YtDlpEngine {
    program: PathBuf,
}

impl YtDlpEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Uses the configured program if any, otherwise looks `yt-dlp` up on PATH.
    pub fn locate(configured: Option<PathBuf>) -> anyhow::Result<Self> {
        let program = match configured {
            Some(path) => path,
            None => which::which("yt-dlp")?,
        };
        Ok(Self::new(program))
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    pub fn args(options: &DownloadOptions, url: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-o".into(),
            options.output_template.clone().into_os_string(),
            "-f".into(),
            options.format.clone().into(),
        ];
        if options.no_playlist {
            args.push("--no-playlist".into());
        }
        if options.quiet {
            args.push("--quiet".into());
        }
        if options.no_warnings {
            args.push("--no-warnings".into());
        }
        if options.extract_audio {
            args.push("-x".into());
            if let Some(format) = &options.audio_format {
                args.push("--audio-format".into());
                args.push(format.into());
            }
        }
        args.extend(
            ["--progress", "--newline", "--progress-template", PROGRESS_TEMPLATE]
                .into_iter()
                .map(OsString::from),
        );
        args.push(url.into());
        args
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

fn forward_lines<R: Read + Send + 'static>(
    reader: R,
    stream: Stream,
    tx: Sender<(Stream, String)>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(reader).lines().map_while(Result::ok) {
            if tx.send((stream, line)).is_err() {
                break;
            }
        }
    })
}

impl DownloadEngine for YtDlpEngine {
    fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        hook: &mut dyn FnMut(EngineEvent),
    ) -> Result<(), EngineError> {
        let mut command = Command::new(&self.program);
        command
            .args(Self::args(options, url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        log::debug!("Command: {:?}", command);

        let mut child = command.spawn().map_err(|source| EngineError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        // yt-dlp prints progress to stderr in quiet mode, so both streams are scanned.
        // Order between the two streams is not kept; progress comes on one of them.
        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward_lines(stdout, Stream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward_lines(stderr, Stream::Stderr, tx.clone()));
        }
        drop(tx);

        let mut stderr_lines = Vec::new();
        for (stream, line) in rx {
            if let Some(event) = parse_progress_line(&line) {
                hook(event);
            } else if stream == Stream::Stderr {
                stderr_lines.push(line);
            } else {
                log::debug!("yt-dlp: {}", line);
            }
        }
        for reader in readers {
            let _ = reader.join();
        }

        let status = child.wait().map_err(|source| EngineError::Wait {
            program: self.program.display().to_string(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(EngineError::Failed(failure_reason(&stderr_lines, status)))
        }
    }
}

fn field(value: &str) -> Option<&str> {
    match value.trim() {
        "" | "NA" | "None" => None,
        v => Some(v),
    }
}

fn bytes(value: &str) -> Option<u64> {
    // estimates are printed as floats
    field(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}

/// Parses one line produced by the progress template.
pub fn parse_progress_line(line: &str) -> Option<EngineEvent> {
    let rest = line.trim_start().strip_prefix(PROGRESS_PREFIX)?;
    let mut parts = rest.splitn(5, '|');
    let status = parts.next()?;
    let downloaded = parts.next().unwrap_or("NA");
    let total = parts.next().unwrap_or("NA");
    let estimate = parts.next().unwrap_or("NA");
    let filename = parts.next().unwrap_or("NA");

    match status.trim() {
        "downloading" => Some(EngineEvent::Downloading {
            downloaded_bytes: bytes(downloaded).unwrap_or(0),
            total_bytes: bytes(total),
            total_bytes_estimate: bytes(estimate),
        }),
        "finished" => Some(EngineEvent::Finished {
            filename: field(filename).map(PathBuf::from),
        }),
        _ => None,
    }
}

fn failure_reason(stderr_lines: &[String], status: ExitStatus) -> String {
    stderr_lines
        .iter()
        .rev()
        .find(|line| line.starts_with("ERROR:"))
        .or_else(|| stderr_lines.iter().rev().find(|line| !line.trim().is_empty()))
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| format!("yt-dlp exited with {}", status))
}
