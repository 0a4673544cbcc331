use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::backup::rsync::rsync_invocation;
use crate::command::{CopyTree, ExpireBackups, Fsck, Lock};
use crate::config::BackupSettings;
use crate::error::Result;
use crate::mount::ops::{mount_storage, unmount_storage};
use crate::mount::MountSession;
use crate::signal::{checkpoint, guarded};
use crate::types::BackupId;
use crate::util::command::{run_checked, Invocation, Runner};
use crate::util::paths::list_entries;
use crate::util::scope::{ScopedDir, WorkdirGuard};

pub mod rsync;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub created: BackupId,
    pub previous: Option<BackupId>,
}

pub struct Orchestrator<'a, R: Runner + ?Sized> {
    settings: &'a BackupSettings,
    runner: &'a mut R,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<'a, R: Runner + ?Sized> Orchestrator<'a, R> {
    pub fn new(settings: &'a BackupSettings, runner: &'a mut R) -> Self {
        Self {
            settings,
            runner,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn run(&mut self) -> Result<Snapshot> {
        checkpoint()?;
        if self.settings.fsck {
            // recovers the cache after e.g. a crash while mounted
            let inv: Invocation = Fsck(&self.settings.storage_url).into();
            guarded(|| run_checked(self.runner, &inv))?;
            checkpoint()?;
        }

        let mountpoint = ScopedDir::create(&self.settings.mount_base, &self.settings.mount_prefix)?;
        let mut session = MountSession::new(mountpoint.path().to_path_buf());
        let outcome = self.run_mounted(&mut session);
        let cleanup = if session.is_mounted() {
            unmount_storage(
                self.runner,
                &mut session,
                self.settings.max_tries,
                self.settings.retry_delay,
            )
        } else {
            Ok(())
        };
        drop(mountpoint);

        match (outcome, cleanup) {
            (outcome, Err(err)) => {
                if let Err(cause) = outcome {
                    tracing::error!("backup failed: {}", cause);
                }
                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(snapshot), Ok(())) => {
                checkpoint()?;
                Ok(snapshot)
            }
        }
    }

    fn run_mounted(&mut self, session: &mut MountSession) -> Result<Snapshot> {
        mount_storage(
            self.runner,
            session,
            &self.settings.storage_url,
            self.settings.ssl,
        )?;
        checkpoint()?;
        let mountpoint = session.mountpoint();

        let previous = latest_backup(list_entries(mountpoint)?);
        let created = BackupId::from_timestamp((self.clock)());
        let new_path = backup_path(mountpoint, &created);

        if let Some(previous) = &previous {
            let previous_path = backup_path(mountpoint, previous);
            tracing::info!("copying {} to {}", previous, created);
            self.step(
                CopyTree {
                    from: &previous_path,
                    to: &new_path,
                }
                .into(),
            )?;
            // the previous run may have been interrupted before locking
            self.step(Lock(&previous_path).into())?;
        } else {
            tracing::info!("no previous backup; creating {} from scratch", created);
        }

        self.step(rsync_invocation(
            &self.settings.source,
            &new_path,
            &self.settings.excludes,
            &self.settings.rsync_extra,
        ))?;
        self.step(Lock(&new_path).into())?;
        self.expire(mountpoint)?;

        tracing::info!("backup {} completed without errors, now unmounting", created);
        Ok(Snapshot { created, previous })
    }

    fn expire(&mut self, mountpoint: &Path) -> Result<()> {
        let _cwd = WorkdirGuard::enter(mountpoint)?;
        self.step(ExpireBackups(&self.settings.cycles).into())
    }

    fn step(&mut self, inv: Invocation) -> Result<()> {
        let result = run_checked(self.runner, &inv);
        checkpoint()?;
        result
    }
}

pub fn latest_backup<I, S>(entries: I) -> Option<BackupId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|name| name.as_ref().parse::<BackupId>().ok())
        .max()
}

pub fn backup_path(mountpoint: &Path, id: &BackupId) -> PathBuf {
    mountpoint.join(id.as_str())
}
