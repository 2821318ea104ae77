//! Core library modules for cmetrack.
//!
//! ## Features
//!
//! - **Records**: employees, training records, admins and their input shapes
//! - **Aggregation**: date filters, per-employee totals, the training report
//! - **Documents**: backup workbook, report exports, certificates
//! - **Infrastructure**: configuration, data storage, messages, errors
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmetrack::db::db::Db;
//! use cmetrack::db::employees::Employees;
//! use cmetrack::libs::employee::EmployeeInput;
//!
//! let db = Db::in_memory()?;
//! let employee = Employees::new(&db.conn).create(EmployeeInput::with_name("Jane Doe"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod admin;
pub mod certificate;
pub mod config;
pub mod data_storage;
pub mod employee;
pub mod error;
pub mod export;
pub mod fields;
pub mod filter;
pub mod formatter;
pub mod messages;
pub mod secret;
pub mod summary;
pub mod training;
pub mod view;
