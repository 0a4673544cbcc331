use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::RetentionCycles;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub cycles: Option<Vec<u32>>,
    #[serde(default)]
    pub fsck: Option<bool>,
    #[serde(default, rename = "maxTries")]
    pub max_tries: Option<u32>,
    #[serde(default)]
    pub ssl: Option<bool>,
    #[serde(default, rename = "mountBase")]
    pub mount_base: Option<PathBuf>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub rsync: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct BackupSettings {
    pub storage_url: String,
    pub source: String,
    pub cycles: RetentionCycles,
    pub fsck: bool,
    pub no_interruptions: bool,
    pub max_tries: u32,
    pub ssl: bool,
    pub mount_base: PathBuf,
    pub mount_prefix: String,
    pub excludes: Vec<String>,
    pub rsync_extra: Vec<String>,
    pub retry_delay: Duration,
}
