//! Command-line interface.
//!
//! | Command | Purpose |
//! |---|---|
//! | `serve` | run the HTTP server |
//! | `init` | configuration wizard |
//! | `admin` | create and list administrator accounts |
//! | `backup` | write the backup workbook |
//! | `report` | print or export the training report |
//! | `migrations` | schema version and history |

pub mod admin;
pub mod backup;
pub mod init;
pub mod migrations;
pub mod report;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the training records server")]
    Serve(serve::ServeArgs),
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage administrator accounts", arg_required_else_help = true)]
    Admin(admin::AdminArgs),
    #[command(about = "Export a backup workbook")]
    Backup(backup::BackupArgs),
    #[command(about = "Prepare a training report")]
    Report(report::ReportArgs),
    #[command(about = "Database migration status", arg_required_else_help = true)]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Init(args) => init::cmd(args),
            Commands::Admin(args) => admin::cmd(args),
            Commands::Backup(args) => backup::cmd(args),
            Commands::Report(args) => report::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
