use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::config::model::{BackupSettings, Config};
use crate::error::{BackupError, ConfigError, Result};
use crate::types::RetentionCycles;

pub const DEFAULT_CONFIG_FILE: &str = "/etc/s3ql-backup.yaml";
pub const DEFAULT_MAX_TRIES: u32 = 5;
pub const MOUNT_PREFIX: &str = "s3ql-backup-mnt";
const RETRY_DELAY: Duration = Duration::from_secs(1);

pub fn load_config(path: &Path) -> Result<Config> {
    let mut contents = String::new();
    File::open(path)
        .map_err(BackupError::Io)?
        .read_to_string(&mut contents)
        .map_err(BackupError::Io)?;
    parse_config(&contents)
}

pub fn load_optional(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_config(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config =
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &Config) -> Result<()> {
    if let Some(cycles) = &cfg.cycles {
        if cycles.is_empty() {
            return Err(ConfigError::Invalid("cycles must not be empty".to_string()).into());
        }
    }
    if cfg.max_tries == Some(0) {
        return Err(ConfigError::Invalid("maxTries must be at least 1".to_string()).into());
    }
    for exclude in &cfg.excludes {
        if exclude.trim().is_empty() {
            return Err(ConfigError::Invalid("exclude pattern is empty".to_string()).into());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cycles: Option<RetentionCycles>,
    pub no_fsck: bool,
    pub no_interruptions: bool,
    pub max_tries: Option<u32>,
    pub ssl: bool,
}

pub fn resolve_settings(
    storage_url: &str,
    source: &str,
    cfg: Config,
    overrides: Overrides,
) -> Result<BackupSettings> {
    if storage_url.trim().is_empty() {
        return Err(ConfigError::Invalid("storage URL is empty".to_string()).into());
    }
    if source.trim().is_empty() {
        return Err(ConfigError::Invalid("backup directory is empty".to_string()).into());
    }
    let cycles = match (overrides.cycles, cfg.cycles) {
        (Some(cycles), _) => cycles,
        (None, Some(days)) => RetentionCycles::new(days),
        (None, None) => RetentionCycles::default(),
    };
    let max_tries = overrides
        .max_tries
        .or(cfg.max_tries)
        .unwrap_or(DEFAULT_MAX_TRIES);
    if max_tries == 0 {
        return Err(ConfigError::Invalid("maxtries must be at least 1".to_string()).into());
    }
    Ok(BackupSettings {
        storage_url: storage_url.to_string(),
        source: source.to_string(),
        cycles,
        fsck: !overrides.no_fsck && cfg.fsck.unwrap_or(true),
        no_interruptions: overrides.no_interruptions,
        max_tries,
        ssl: overrides.ssl || cfg.ssl.unwrap_or(false),
        mount_base: cfg.mount_base.unwrap_or_else(env::temp_dir),
        mount_prefix: MOUNT_PREFIX.to_string(),
        excludes: cfg.excludes,
        rsync_extra: cfg.rsync,
        retry_delay: RETRY_DELAY,
    })
}
