use std::path::Path;
use std::time::Duration;

use crate::command::{Mount, UnMount, UNMOUNT_BUSY};
use crate::error::{BackupError, Result};
use crate::mount::MountSession;
use crate::signal::guarded;
use crate::util::command::{run_checked, Invocation, Runner};

pub fn mount_storage<R: Runner + ?Sized>(
    runner: &mut R,
    session: &mut MountSession,
    storage_url: &str,
    ssl: bool,
) -> Result<()> {
    guarded(|| {
        let inv: Invocation = Mount {
            storage_url,
            mountpoint: session.mountpoint(),
            ssl,
        }
        .into();
        run_checked(runner, &inv)?;
        session.mark_mounted();
        Ok(())
    })
}

pub fn unmount_storage<R: Runner + ?Sized>(
    runner: &mut R,
    session: &mut MountSession,
    max_tries: u32,
    delay: Duration,
) -> Result<()> {
    guarded(|| {
        let attempts = unmount_with_retry(runner, session.mountpoint(), max_tries, delay)?;
        session.mark_unmounted();
        tracing::info!(
            "unmounted {} after {} attempt(s)",
            session.mountpoint().display(),
            attempts
        );
        Ok(())
    })
}

pub fn unmount_with_retry<R: Runner + ?Sized>(
    runner: &mut R,
    mountpoint: &Path,
    max_tries: u32,
    delay: Duration,
) -> Result<u32> {
    let inv: Invocation = UnMount(mountpoint).into();
    let mut code = UNMOUNT_BUSY;
    let mut attempts = 0;
    while attempts < max_tries {
        attempts += 1;
        code = runner.status(&inv)?;
        if code != UNMOUNT_BUSY {
            break;
        }
        if attempts < max_tries {
            tracing::warn!(
                "mount point {} in use; trying again in {:?}",
                mountpoint.display(),
                delay
            );
            runner.sleep(delay);
        }
    }
    if code != 0 {
        return Err(BackupError::UnmountFailed {
            mountpoint: mountpoint.to_path_buf(),
            code,
        });
    }
    Ok(attempts)
}
