use anyhow::Result;
use clap::Parser;

use crate::cli::args::Cli;
use crate::cli::commands::{backup, exit_for_error};
use crate::config::{load_optional, resolve_settings, Overrides};
use crate::types::RunMode;

pub mod args;
pub mod commands;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let run_mode = RunMode {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };
    let cfg = match load_optional(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => exit_for_error(&err),
    };
    let overrides = Overrides {
        cycles: cli.cycles,
        no_fsck: cli.no_fsck,
        no_interruptions: cli.no_interruptions,
        max_tries: cli.maxtries,
        ssl: cli.ssl,
    };
    let settings = match resolve_settings(&cli.storage_url, &cli.backup_dir, cfg, overrides) {
        Ok(settings) => settings,
        Err(err) => exit_for_error(&err),
    };

    if let Err(err) = backup::run_backup_command(&settings, run_mode) {
        exit_for_error(&err);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
