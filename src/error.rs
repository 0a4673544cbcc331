use std::io;
use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("received signal {0}")]
    Interrupted(i32),
    #[error("{program} failed with exit code {code}")]
    ToolFailed { program: String, code: i32 },
    #[error("unmounting {mountpoint:?} failed with exit code {code}")]
    UnmountFailed { mountpoint: PathBuf, code: i32 },
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Config(ConfigError),
    #[error("signal disposition: {0}")]
    Signal(#[from] Errno),
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse config: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, BackupError>;

impl BackupError {
    pub fn message(msg: impl Into<String>) -> Self {
        BackupError::Message(msg.into())
    }
}

impl From<ConfigError> for BackupError {
    fn from(err: ConfigError) -> Self {
        BackupError::Config(err)
    }
}
