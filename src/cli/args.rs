use std::path::PathBuf;

use clap::Parser;

use crate::types::RetentionCycles;

#[derive(Parser, Debug)]
#[command(name = "s3ql-backup", version, about = "Runs an s3ql backup")]
pub struct Cli {
    #[arg(help = "s3ql storage URL")]
    pub storage_url: String,
    #[arg(help = "The directory to be backed up")]
    pub backup_dir: String,

    #[arg(
        long,
        short = 'c',
        value_name = "LIST",
        help = "Comma-separated list of cycles, in days, to pass on to s3ql-expire_backups"
    )]
    pub cycles: Option<RetentionCycles>,
    #[arg(long = "no-fsck", short = 'F', help = "Do not perform the initial fsck")]
    pub no_fsck: bool,
    #[arg(long, short = 'I', help = "Ignore termination signals for the whole run")]
    pub no_interruptions: bool,
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum amount of unmount tries"
    )]
    pub maxtries: Option<u32>,
    #[arg(long, help = "Pass --ssl to mount.s3ql")]
    pub ssl: bool,

    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub dry_run: bool,
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
