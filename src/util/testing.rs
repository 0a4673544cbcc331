use std::collections::{HashMap, VecDeque};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use nix::sys::signal::{raise, Signal};

use crate::error::Result;
use crate::util::command::{Invocation, Runner};

static PROCESS_LOCK: Mutex<()> = Mutex::new(());

// cwd and signal dispositions are process-wide
pub fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Clone)]
pub struct Call {
    pub invocation: Invocation,
    pub cwd: PathBuf,
}

impl Call {
    pub fn program(&self) -> &str {
        self.invocation.program()
    }

    pub fn args(&self) -> Vec<String> {
        self.invocation
            .get_args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }
}

// Unscripted programs exit 0. A successful mount fills the mount point with
// the configured entries.
#[derive(Default)]
pub struct ScriptedRunner {
    pub calls: Vec<Call>,
    pub sleeps: Vec<Duration>,
    statuses: HashMap<String, VecDeque<i32>>,
    mount_entries: Vec<String>,
    raise_on: Option<(String, Signal)>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(mut self, program: &str, codes: &[i32]) -> Self {
        self.statuses
            .entry(program.to_string())
            .or_default()
            .extend(codes.iter().copied());
        self
    }

    pub fn with_mount_entries(mut self, names: &[&str]) -> Self {
        self.mount_entries = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn raising_on(mut self, program: &str, signal: Signal) -> Self {
        self.raise_on = Some((program.to_string(), signal));
        self
    }

    pub fn programs(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.program()).collect()
    }

    pub fn calls_to(&self, program: &str) -> Vec<&Call> {
        self.calls.iter().filter(|c| c.program() == program).collect()
    }

    fn populate(&self, mountpoint: &Path) {
        for name in &self.mount_entries {
            let path = mountpoint.join(name);
            if name.contains('.') && !name.starts_with('.') {
                fs::write(&path, b"").expect("write entry");
            } else {
                fs::create_dir(&path).expect("create entry");
            }
        }
    }
}

impl Runner for ScriptedRunner {
    fn status(&mut self, invocation: &Invocation) -> Result<i32> {
        let cwd = env::current_dir()?;
        self.calls.push(Call {
            invocation: invocation.clone(),
            cwd,
        });
        let code = self
            .statuses
            .get_mut(invocation.program())
            .and_then(|codes| codes.pop_front())
            .unwrap_or(0);
        if invocation.program() == "mount.s3ql" && code == 0 {
            if let Some(mountpoint) = invocation.get_args().last() {
                self.populate(Path::new(mountpoint));
            }
        }
        if let Some((program, signal)) = &self.raise_on {
            if program == invocation.program() {
                raise(*signal).expect("raise");
            }
        }
        Ok(code)
    }

    fn sleep(&mut self, delay: Duration) {
        self.sleeps.push(delay);
    }
}
