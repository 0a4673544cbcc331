use std::path::Path;

use crate::types::RetentionCycles;
use crate::util::command::Invocation;

pub const FSCK: &str = "fsck.s3ql";
pub const MOUNT: &str = "mount.s3ql";
pub const UNMOUNT: &str = "umount.s3ql";
pub const COPY: &str = "s3qlcp";
pub const LOCK: &str = "s3qllock";
pub const EXPIRE: &str = "s3ql-expire_backups";

/// Exit status of `umount.s3ql` while the mount point is still in use.
pub const UNMOUNT_BUSY: i32 = 4;

pub struct Fsck<'a>(pub &'a str);

pub struct Mount<'a> {
    pub storage_url: &'a str,
    pub mountpoint: &'a Path,
    pub ssl: bool,
}

pub struct UnMount<'a>(pub &'a Path);

pub struct CopyTree<'a> {
    pub from: &'a Path,
    pub to: &'a Path,
}

pub struct Lock<'a>(pub &'a Path);

pub struct ExpireBackups<'a>(pub &'a RetentionCycles);

impl<'a> From<Fsck<'a>> for Invocation {
    fn from(fsck: Fsck<'a>) -> Self {
        Invocation::new(FSCK).arg("--batch").arg(fsck.0)
    }
}

impl<'a> From<Mount<'a>> for Invocation {
    fn from(mount: Mount<'a>) -> Self {
        let mut inv = Invocation::new(MOUNT);
        if mount.ssl {
            inv = inv.arg("--ssl");
        }
        inv.arg(mount.storage_url).arg(mount.mountpoint)
    }
}

impl<'a> From<UnMount<'a>> for Invocation {
    fn from(unmount: UnMount<'a>) -> Self {
        Invocation::new(UNMOUNT).arg(unmount.0)
    }
}

impl<'a> From<CopyTree<'a>> for Invocation {
    fn from(copy: CopyTree<'a>) -> Self {
        Invocation::new(COPY).arg(copy.from).arg(copy.to)
    }
}

impl<'a> From<Lock<'a>> for Invocation {
    fn from(lock: Lock<'a>) -> Self {
        Invocation::new(LOCK).arg(lock.0)
    }
}

impl<'a> From<ExpireBackups<'a>> for Invocation {
    fn from(expire: ExpireBackups<'a>) -> Self {
        Invocation::new(EXPIRE)
            .arg("--use-s3qlrm")
            .args(expire.0.to_args())
    }
}
