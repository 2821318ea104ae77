//! # cmetrack
//!
//! Training records for a hospital's continuing medical education office.
//!
//! ## Features
//!
//! - **Records**: employees, training records and the links between them
//! - **Reports**: per-window training reports as xlsx, csv or json
//! - **Certificates**: printable HTML and Word-compatible documents
//! - **Backups**: a four-sheet workbook snapshot of the database
//! - **HTTP API**: axum server with session authentication
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmetrack::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
