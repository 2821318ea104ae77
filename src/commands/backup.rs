use crate::{
    db::db::Db,
    libs::export::{Backup, Exporter},
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Output file (default: backup_<timestamp>.xlsx in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: BackupArgs) -> Result<()> {
    let db = Db::new()?;
    let backup = Backup::load(&db.conn)?;
    Exporter::new(args.output).write_backup(&backup)?;
    Ok(())
}
