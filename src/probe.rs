//! Advisory playback-status probe. Only feeds the HUD; the gesture logic never reads it.

use std::io;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Active,
    Inactive,
}

impl MediaStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MediaStatus::Active => "On",
            MediaStatus::Inactive => "Off",
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no active media session")]
    NoSession,
    #[error("status query could not start: {0}")]
    Spawn(#[from] io::Error),
    #[error("status query exited with {code:?}: {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },
    #[error("status query timed out after {0:?}")]
    TimedOut(Duration),
    #[error("unrecognized status output {0:?}")]
    Unreadable(String),
}

impl ProbeError {
    /// Expected in normal use; not worth a warning.
    fn is_routine(&self) -> bool {
        matches!(self, ProbeError::NoSession)
    }
}

pub trait StatusProbe {
    fn poll_status(&mut self) -> MediaStatus;
}

/// Maps `playerctl status` output to a status.
pub fn parse_player_status(stdout: &str) -> Result<MediaStatus, ProbeError> {
    match stdout.trim() {
        "Playing" => Ok(MediaStatus::Active),
        "Paused" | "Stopped" => Ok(MediaStatus::Inactive),
        "" => Err(ProbeError::NoSession),
        other => Err(ProbeError::Unreadable(other.to_string())),
    }
}

/// Runs the status command once, killing it if it outlives `timeout`.
pub fn query_command(program: &str, args: &[String], timeout: Duration) -> Result<MediaStatus, ProbeError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let started = Instant::now();
    loop {
        if child.try_wait()?.is_some() {
            break;
        }
        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ProbeError::TimedOut(timeout));
        }
        thread::sleep(Duration::from_millis(5));
    }

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() {
        if stderr.contains("No players found") {
            return Err(ProbeError::NoSession);
        }
        return Err(ProbeError::CommandFailed {
            code: output.status.code(),
            stderr,
        });
    }
    parse_player_status(&String::from_utf8_lossy(&output.stdout))
}

/// Collapses a query result to a status, logging failures once per streak.
#[derive(Debug, Default)]
pub struct FailureLog {
    last_failure: Option<String>,
}

impl FailureLog {
    pub fn resolve(&mut self, result: Result<MediaStatus, ProbeError>) -> MediaStatus {
        match result {
            Ok(status) => {
                if self.last_failure.take().is_some() {
                    debug!("Status probe recovered: {:?}", status);
                }
                status
            }
            Err(e) => {
                let text = e.to_string();
                if self.last_failure.as_deref() != Some(text.as_str()) {
                    if e.is_routine() {
                        debug!("Status probe: {}", text);
                    } else {
                        warn!("Status probe failed: {}", text);
                    }
                    self.last_failure = Some(text);
                }
                MediaStatus::Inactive
            }
        }
    }
}

/// Polls the status command on its own thread; the frame loop reads the latest value.
pub struct BackgroundProbe {
    rx: Receiver<MediaStatus>,
    latest: MediaStatus,
}

impl BackgroundProbe {
    pub fn spawn(command: Vec<String>, interval: Duration, timeout: Duration) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("status-probe".to_string())
            .spawn(move || {
                let mut log = FailureLog::default();
                loop {
                    let result = match command.split_first() {
                        Some((program, args)) => query_command(program, args, timeout),
                        None => Err(ProbeError::NoSession),
                    };
                    if tx.send(log.resolve(result)).is_err() {
                        break;
                    }
                    thread::sleep(interval);
                }
            })?;

        Ok(Self {
            rx,
            latest: MediaStatus::Inactive,
        })
    }
}

impl StatusProbe for BackgroundProbe {
    fn poll_status(&mut self) -> MediaStatus {
        while let Ok(status) = self.rx.try_recv() {
            self.latest = status;
        }
        self.latest
    }
}

/// Used when the probe is switched off in config.
pub struct DisabledProbe;

impl StatusProbe for DisabledProbe {
    fn poll_status(&mut self) -> MediaStatus {
        MediaStatus::Inactive
    }
}
