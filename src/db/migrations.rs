//! Versioned schema migrations.
//!
//! Each migration is a numbered function run inside one transaction together
//! with every other pending migration. Applied versions are recorded in the
//! `migrations` table, so opening an up-to-date database is a single
//! `SELECT MAX(version)`.
//!
//! ## Schema history
//!
//! | Version | Name | Change |
//! |---|---|---|
//! | 1 | `create_base_tables` | employees, training records, the join table, admins |
//! | 2 | `add_sequences` | named counters, seeded with `training_index` |
//! | 3 | `add_indices` | unique display index plus lookup indices |
//!
//! New migrations are appended with the next version number. Existing ones
//! are never edited once released.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_base_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS employees (
        id INTEGER PRIMARY KEY,
        full_name TEXT NOT NULL,
        birth_date TEXT,
        gender TEXT,
        position TEXT,
        specialization TEXT,
        department TEXT,
        join_date TEXT,
        license_number TEXT,
        license_issue_date TEXT,
        license_issuer TEXT,
        practice_scope TEXT,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS training_records (
        id INTEGER PRIMARY KEY,
        training_index INTEGER NOT NULL,
        training_type TEXT NOT NULL,
        content TEXT,
        organizer TEXT,
        total_hour REAL CHECK (total_hour IS NULL OR total_hour >= 0),
        time_description TEXT,
        start_date TIMESTAMP,
        end_date TIMESTAMP,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )",
                [],
            )?;

            // Link rows go away with either side; the other side survives.
            tx.execute(
                "CREATE TABLE IF NOT EXISTS employee_trainings (
        employee_id INTEGER NOT NULL,
        training_id INTEGER NOT NULL,
        PRIMARY KEY (employee_id, training_id),
        FOREIGN KEY (employee_id) REFERENCES employees(id) ON DELETE CASCADE,
        FOREIGN KEY (training_id) REFERENCES training_records(id) ON DELETE CASCADE
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS admins (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )",
                [],
            )?;

            Ok(())
        });

        self.add_migration(2, "add_sequences", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS sequences (
                    name TEXT PRIMARY KEY,
                    value INTEGER NOT NULL DEFAULT 0
                )",
                [],
            )?;
            // Start from whatever the table already holds.
            tx.execute(
                "INSERT OR IGNORE INTO sequences (name, value)
                 SELECT 'training_index', COALESCE(MAX(training_index), 0) FROM training_records",
                [],
            )?;
            Ok(())
        });

        self.add_migration(3, "add_indices", |tx| {
            tx.execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_training_records_index ON training_records(training_index)",
                [],
            )?;
            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_training_records_start ON training_records(start_date)",
                [],
            )?;
            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_employee_trainings_training ON employee_trainings(training_id)",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_employees_full_name ON employees(full_name)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_debug!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        // A database that predates the migrations table reports version 0.
        let exists: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Ok(0);
        }

        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
