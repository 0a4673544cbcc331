pub mod backup;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod mount;
pub mod signal;
pub mod types;
pub mod util;

pub use backup::{Orchestrator, Snapshot};
pub use error::{BackupError, Result};
pub use types::{BackupId, RetentionCycles, RunMode};
