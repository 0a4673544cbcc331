use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::error::{BackupError, Result};

pub fn create_temp_dir(base: &Path, prefix: &str) -> Result<PathBuf> {
    let ts = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");
    for attempt in 0..100u32 {
        let candidate = base.join(format!("{}-{}-{}-{}", prefix, std::process::id(), ts, attempt));
        match fs::create_dir(&candidate) {
            Ok(()) => {
                let mut perms = fs::metadata(&candidate)
                    .map_err(|e| BackupError::message(format!("stat {}: {}", candidate.display(), e)))?
                    .permissions();
                perms.set_mode(0o700);
                fs::set_permissions(&candidate, perms).map_err(|e| {
                    BackupError::message(format!("chmod {}: {}", candidate.display(), e))
                })?;
                return Ok(candidate);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => {
                return Err(BackupError::message(format!(
                    "create {}: {}",
                    candidate.display(),
                    err
                )))
            }
        }
    }
    Err(BackupError::message(format!(
        "could not create a unique directory under {}",
        base.display()
    )))
}

pub fn list_entries(path: &Path) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(path)
        .map_err(|e| BackupError::message(format!("read {}: {}", path.display(), e)))?
    {
        let entry =
            entry.map_err(|e| BackupError::message(format!("read {}: {}", path.display(), e)))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "." || name == ".." {
            continue;
        }
        out.push(name);
    }
    Ok(out)
}
