use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::util::command::Invocation;

pub const RSYNC: &str = "rsync";

const RSYNC_FLAGS: [&str; 5] = [
    "-aHAXx",
    "--delete-during",
    "--delete-excluded",
    "--partial",
    "-v",
];

const FIXED_EXCLUDES: [&str; 4] = ["/.cache/", "/.s3ql/", "/.thumbnails/", "/tmp/"];

pub fn rsync_invocation(
    source: &str,
    backup_dir: &Path,
    excludes: &[String],
    extra: &[String],
) -> Invocation {
    let mut inv = Invocation::new(RSYNC).args(RSYNC_FLAGS);
    for exclude in FIXED_EXCLUDES.iter().copied().chain(excludes.iter().map(String::as_str)) {
        inv = inv.arg("--exclude").arg(exclude);
    }
    inv.args(extra).arg(source).arg(with_trailing_separator(backup_dir))
}

// exactly one trailing separator, so rsync copies the contents of the source
fn with_trailing_separator(dir: &Path) -> OsString {
    let normalized: PathBuf = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let mut out = normalized.into_os_string();
    out.push("/");
    out
}
