//! Persistence layer on SQLite.
//!
//! [`db::Db`] owns the connection and applies migrations when it is opened.
//! The repositories borrow that connection, so one handle can serve the whole
//! HTTP server or a single CLI command:
//!
//! ```rust,no_run
//! use cmetrack::db::{db::Db, employees::Employees, trainings::{TrainingOrder, Trainings}};
//!
//! let db = Db::in_memory()?;
//! let staff = Employees::new(&db.conn).list(true)?;
//! let by_index = Trainings::new(&db.conn).list(TrainingOrder::IndexAsc, true)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Multi-statement writes (training creation, association replacement, bulk
//! import) run in a transaction opened on the borrowed connection and are
//! rolled back on any error.

/// Connection management.
pub mod db;

/// Versioned schema changes and their history.
pub mod migrations;

/// Administrator accounts.
pub mod admins;

/// Employee CRUD and bulk import.
pub mod employees;

/// Training record CRUD, display index assignment and employee links.
pub mod trainings;
