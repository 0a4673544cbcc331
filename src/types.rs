use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

const BACKUP_ID_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";
const DEFAULT_CYCLES: [u32; 7] = [1, 7, 14, 31, 90, 180, 360];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackupId(String);

impl BackupId {
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        BackupId(ts.format(BACKUP_ID_FORMAT).to_string())
    }

    // ten digits/dashes, an underscore, eight digits/colons
    pub fn is_backup_name(name: &str) -> bool {
        let bytes = name.as_bytes();
        if bytes.len() != 19 || bytes[10] != b'_' {
            return false;
        }
        bytes[..10].iter().all(|b| b.is_ascii_digit() || *b == b'-')
            && bytes[11..].iter().all(|b| b.is_ascii_digit() || *b == b':')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BackupId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !BackupId::is_backup_name(s) {
            return Err(format!("{} is not a backup name", s));
        }
        Ok(BackupId(s.to_string()))
    }
}

impl fmt::Display for BackupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionCycles(Vec<u32>);

impl RetentionCycles {
    pub fn new(days: impl IntoIterator<Item = u32>) -> Self {
        let set: BTreeSet<u32> = days.into_iter().collect();
        RetentionCycles(set.into_iter().collect())
    }

    pub fn days(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_args(&self) -> Vec<String> {
        self.0.iter().map(|d| d.to_string()).collect()
    }
}

impl Default for RetentionCycles {
    fn default() -> Self {
        RetentionCycles::new(DEFAULT_CYCLES)
    }
}

impl FromStr for RetentionCycles {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut days = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let day = part
                .parse::<u32>()
                .map_err(|_| format!("invalid cycle {:?}; expected a non-negative integer", part))?;
            days.push(day);
        }
        Ok(RetentionCycles::new(days))
    }
}

impl fmt::Display for RetentionCycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args().join(","))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunMode {
    pub dry_run: bool,
    pub verbose: bool,
}
