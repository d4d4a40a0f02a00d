use anyhow::{anyhow, Context, Result};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Side effect run once per confirmed gesture.
pub trait ActionDispatcher {
    fn name(&self) -> String;
    /// Called on the frame loop; must return quickly.
    fn on_toggle(&mut self);
}

/// Runs an external command (e.g. `playerctl play-pause`) on a worker thread.
pub struct CommandAction {
    label: String,
    tx: Sender<()>,
}

impl CommandAction {
    /// Each run is killed once it outlives `timeout`.
    pub fn spawn(command: &[String], timeout: Duration) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| anyhow!("action command is empty"))?;
        let program = program.clone();
        let args = args.to_vec();
        let label = command.join(" ");

        let (tx, rx) = mpsc::channel::<()>();
        let worker_label = label.clone();
        thread::Builder::new()
            .name("toggle-action".to_string())
            .spawn(move || {
                while rx.recv().is_ok() {
                    if let Err(e) = run_once(&program, &args, timeout) {
                        warn!("Toggle action `{}` failed: {:#}", worker_label, e);
                    }
                }
                debug!("Toggle action worker stopped");
            })
            .context("Failed to start toggle action worker")?;

        Ok(Self { label, tx })
    }
}

fn run_once(program: &str, args: &[String], timeout: Duration) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("could not run {}", program))?;

    let started = Instant::now();
    while child.try_wait()?.is_none() {
        if started.elapsed() >= timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Err(anyhow!("timed out after {:?}", timeout));
        }
        thread::sleep(Duration::from_millis(5));
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("exited with {}: {}", output.status, stderr.trim()));
    }
    debug!("Toggle action `{}` completed", program);
    Ok(())
}

impl ActionDispatcher for CommandAction {
    fn name(&self) -> String {
        format!("Command ({})", self.label)
    }

    fn on_toggle(&mut self) {
        // Unbounded: every confirmed gesture must reach the command.
        if self.tx.send(()).is_err() {
            warn!("Toggle action worker is gone; dropping toggle");
        }
    }
}

/// Dry-run dispatcher: only logs.
#[derive(Debug, Default)]
pub struct LogAction {
    pub toggles: u64,
}

impl ActionDispatcher for LogAction {
    fn name(&self) -> String {
        "Dry run (log only)".to_string()
    }

    fn on_toggle(&mut self) {
        self.toggles += 1;
        info!("Toggle #{} (dry run, no action taken)", self.toggles);
    }
}
