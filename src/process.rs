//! redshift process management and monitoring.
//!
//! This module starts, stops and queries the external `redshift` utility.
//! All process access goes through the [`CommandRunner`] trait so the
//! controller logic can be exercised without spawning anything.
//!
//! Stopping and restarting redshift is not atomic: `killall` returns before
//! the old instance has released the gamma ramps. The controller waits a
//! fixed settle delay after every stop that precedes a launch instead of
//! polling for exit.

use std::io;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use crate::command::{auto_mode_args, describe, manual_effect_args, reset_args};
use crate::constants::*;
use crate::error::ControlError;
use crate::logger::Log;
use crate::status::{LiveStatus, parse_process_listing};
use crate::validation::{AutoModeSettings, ManualEffect};

/// Captured result of a synchronous command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Seam between the controller and the operating system.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `program` to completion and capture its output.
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;

    /// Start `program` without waiting and without capturing output.
    ///
    /// Returns the PID of the spawned process.
    fn spawn_detached(&self, program: &str, args: &[String]) -> io::Result<u32>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> io::Result<u32> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null()) // Long-running; nobody reads its output
            .stderr(Stdio::null())
            .spawn()?;
        Ok(child.id())
    }
}

/// Starts, stops and inspects redshift.
pub struct RedshiftController<R: CommandRunner> {
    runner: R,
    settle_delay: Duration,
    own_pid: u32,
}

impl RedshiftController<SystemRunner> {
    pub fn system() -> Self {
        Self::new(SystemRunner)
    }
}

impl<R: CommandRunner> RedshiftController<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            own_pid: std::process::id(),
        }
    }

    /// Override the pause between stopping an old instance and starting a new one.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run redshift with `args`.
    ///
    /// In the background the process is spawned and forgotten; failures after
    /// a successful spawn only show up in a later status query. In the
    /// foreground the call waits and fails on a non-zero exit.
    pub fn start(&self, args: &[String], background: bool) -> Result<(), ControlError> {
        Log::log_debug(&format!("Running: {}", describe(REDSHIFT_BIN, args)));

        if background {
            let pid = self
                .runner
                .spawn_detached(REDSHIFT_BIN, args)
                .map_err(|e| launch_error(REDSHIFT_BIN, &e))?;
            Log::log_debug(&format!("redshift started with PID: {}", pid));
            return Ok(());
        }

        let output = self
            .runner
            .run(REDSHIFT_BIN, args)
            .map_err(|e| launch_error(REDSHIFT_BIN, &e))?;

        if output.success() {
            Ok(())
        } else {
            let code = output
                .status
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            let detail = output.stderr.trim();
            Err(ControlError::ProcessLaunch(if detail.is_empty() {
                format!("{} exited with status {}", REDSHIFT_BIN, code)
            } else {
                format!("{} exited with status {}: {}", REDSHIFT_BIN, code, detail)
            }))
        }
    }

    /// Terminate every running redshift instance. Never fails.
    pub fn stop(&self) {
        self.kill_by_name(REDSHIFT_BIN);
    }

    /// Terminate the redshift tray applet, which would otherwise restart its
    /// own redshift and override ours. Never fails.
    pub fn stop_tray_applet(&self) {
        self.kill_by_name(TRAY_APPLET_BIN);
    }

    fn kill_by_name(&self, name: &str) {
        match self.runner.run(KILL_BY_NAME_BIN, &[name.to_string()]) {
            Ok(output) if output.success() => {
                Log::log_debug(&format!("Stopped running {} instances", name));
            }
            Ok(_) => {
                Log::log_debug(&format!("No running {} instance", name));
            }
            Err(e) => {
                Log::log_debug(&format!("Could not run {}: {}", KILL_BY_NAME_BIN, e));
            }
        }
    }

    /// Inspect the process listing for a running redshift.
    pub fn query_status(&self) -> Result<LiveStatus, ControlError> {
        let args = ["-a".to_string(), REDSHIFT_BIN.to_string()];
        let output = self
            .runner
            .run(PROCESS_LIST_BIN, &args)
            .map_err(|e| launch_error(PROCESS_LIST_BIN, &e))?;

        match output.status {
            Some(0) => Ok(parse_process_listing(&output.stdout, Some(self.own_pid))),
            // pgrep exits with 1 when nothing matched
            Some(1) => Ok(LiveStatus::NotRunning),
            other => Err(ControlError::ProcessLaunch(format!(
                "{} failed with status {:?}: {}",
                PROCESS_LIST_BIN,
                other,
                output.stderr.trim()
            ))),
        }
    }

    /// Replace any running instance with automatic mode.
    pub fn launch_auto(&self, settings: &AutoModeSettings) -> Result<(), ControlError> {
        self.stop_and_settle();
        self.start(&auto_mode_args(settings), true)
    }

    /// Replace any running instance with a one-shot effect.
    pub fn apply_manual(&self, effect: &ManualEffect) -> Result<(), ControlError> {
        self.stop_and_settle();
        self.start(&manual_effect_args(effect), false)
    }

    /// Stop everything and restore the default gamma ramps.
    pub fn reset(&self) -> Result<(), ControlError> {
        self.stop();
        self.start(&reset_args(), false)
    }

    fn stop_and_settle(&self) {
        self.stop();
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
    }
}

fn launch_error(program: &str, error: &io::Error) -> ControlError {
    if error.kind() == io::ErrorKind::NotFound {
        ControlError::ProcessLaunch(format!("{} is not installed or not in PATH", program))
    } else {
        ControlError::ProcessLaunch(format!("failed to run {}: {}", program, error))
    }
}
