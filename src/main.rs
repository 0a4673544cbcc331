fn main() -> anyhow::Result<()> {
    s3ql_backup::cli::run()
}
