use std::ffi::{OsStr, OsString};
use std::process::Command;
use std::thread;
use std::time::Duration;

use crate::error::{BackupError, Result};
use crate::signal::bridge;
use crate::types::RunMode;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn command_line(&self) -> String {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        if args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, args.join(" "))
        }
    }
}

impl From<&Invocation> for Command {
    fn from(invocation: &Invocation) -> Self {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd
    }
}

pub trait Runner {
    fn status(&mut self, invocation: &Invocation) -> Result<i32>;

    fn sleep(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

pub struct SystemRunner {
    run_mode: RunMode,
}

impl SystemRunner {
    pub fn new(run_mode: RunMode) -> Self {
        Self { run_mode }
    }
}

impl Runner for SystemRunner {
    fn status(&mut self, invocation: &Invocation) -> Result<i32> {
        maybe_print_command(invocation, self.run_mode);
        if self.run_mode.dry_run {
            return Ok(0);
        }
        let mut cmd = Command::from(invocation);
        let mut child = cmd
            .spawn()
            .map_err(|e| BackupError::message(format!("{}: {}", invocation.program(), e)))?;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status.code().unwrap_or(1));
            }
            // the slot is left for the caller's checkpoint
            if let Some(signum) = bridge::pending() {
                tracing::warn!(
                    "signal {} while {} (pid {}) runs, not waiting for it",
                    signum,
                    invocation.program(),
                    child.id()
                );
                return Err(BackupError::Interrupted(signum));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn sleep(&mut self, delay: Duration) {
        if !self.run_mode.dry_run {
            thread::sleep(delay);
        }
    }
}

pub fn maybe_print_command(invocation: &Invocation, run_mode: RunMode) {
    if !run_mode.dry_run && !run_mode.verbose {
        return;
    }
    println!("{}", invocation.command_line());
}

pub fn run_checked<R: Runner + ?Sized>(runner: &mut R, invocation: &Invocation) -> Result<()> {
    tracing::debug!("running {}", invocation.command_line());
    let code = runner.status(invocation)?;
    if code != 0 {
        return Err(BackupError::ToolFailed {
            program: invocation.program().to_string(),
            code,
        });
    }
    Ok(())
}
