use chrono::Local;

use crate::backup::Orchestrator;
use crate::config::BackupSettings;
use crate::error::Result;
use crate::signal::bridge;
use crate::types::RunMode;
use crate::util::command::SystemRunner;

pub fn run_backup_command(settings: &BackupSettings, run_mode: RunMode) -> Result<()> {
    println!("{}", Local::now().format("%d-%m-%Y %H:%M"));
    tracing::info!(
        "backing up {} to {} (cycles {})",
        settings.source,
        settings.storage_url,
        settings.cycles
    );

    let _signals = bridge::protect_run(settings.no_interruptions)?;

    let mut runner = SystemRunner::new(run_mode);
    let snapshot = Orchestrator::new(settings, &mut runner).run()?;
    match &snapshot.previous {
        Some(previous) => println!("created backup {} from {}", snapshot.created, previous),
        None => println!("created first backup {}", snapshot.created),
    }
    println!("{}", Local::now().format("%d-%m-%Y %H:%M"));
    Ok(())
}
