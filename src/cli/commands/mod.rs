pub mod backup;

use crate::error::BackupError;

pub fn exit_code(err: &BackupError) -> i32 {
    match err {
        BackupError::Interrupted(signum) => 128 + signum,
        BackupError::UnmountFailed { .. } => 14,
        BackupError::Config(_) => 2,
        BackupError::ToolFailed { .. }
        | BackupError::Message(_)
        | BackupError::Signal(_)
        | BackupError::Io(_) => 1,
    }
}

pub fn exit_for_error(err: &BackupError) -> ! {
    println!("{}", err);
    std::process::exit(exit_code(err));
}
