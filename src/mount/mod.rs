use std::path::{Path, PathBuf};

pub mod ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    NotMounted,
    Mounted,
    Unmounted,
}

/// The filesystem mounted for one run. Cleanup unmounts only what this
/// session recorded as mounted.
#[derive(Debug)]
pub struct MountSession {
    mountpoint: PathBuf,
    state: MountState,
}

impl MountSession {
    pub fn new(mountpoint: PathBuf) -> Self {
        Self {
            mountpoint,
            state: MountState::NotMounted,
        }
    }

    pub fn mountpoint(&self) -> &Path {
        &self.mountpoint
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.state == MountState::Mounted
    }

    pub(crate) fn mark_mounted(&mut self) {
        debug_assert_eq!(self.state, MountState::NotMounted);
        self.state = MountState::Mounted;
    }

    pub(crate) fn mark_unmounted(&mut self) {
        self.state = MountState::Unmounted;
    }
}
