use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BackupError, Result};
use crate::util::paths::create_temp_dir;

// Never removed recursively: a failed unmount leaves the filesystem here.
pub struct ScopedDir {
    path: PathBuf,
}

impl ScopedDir {
    pub fn create(base: &Path, prefix: &str) -> Result<Self> {
        let path = create_temp_dir(base, prefix)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir(&self.path) {
            tracing::warn!("could not remove {}: {}", self.path.display(), err);
        }
    }
}

pub struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    pub fn enter(target: &Path) -> Result<Self> {
        let original = env::current_dir()
            .map_err(|e| BackupError::message(format!("current directory: {}", e)))?;
        env::set_current_dir(target)
            .map_err(|e| BackupError::message(format!("chdir {}: {}", target.display(), e)))?;
        Ok(Self { original })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.original) {
            tracing::error!("could not return to {}: {}", self.original.display(), err);
        }
    }
}
