use crate::libs::admin::{Admin, AdminSummary};
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use crate::libs::secret::{hash_password, verify_password};
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_ADMIN: &str = "INSERT INTO admins (username, password_hash) VALUES (?1, ?2)";
const SELECT_ALL_ADMINS: &str = "SELECT id, username FROM admins ORDER BY username";
const SELECT_ADMIN_BY_USERNAME: &str = "SELECT id, username, password_hash FROM admins WHERE username = ?1";

pub struct Admins<'a> {
    conn: &'a Connection,
}

impl<'a> Admins<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Hashes `password` and stores a new admin. A taken username is a storage error.
    pub fn create(&self, username: &str, password: &str) -> RecordResult<AdminSummary> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RecordError::validation(Message::AdminUsernameRequired));
        }
        let password_hash = hash_password(password)?;

        self.conn.execute(INSERT_ADMIN, params![username, password_hash])?;
        Ok(AdminSummary {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
        })
    }

    pub fn list(&self) -> RecordResult<Vec<AdminSummary>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_ADMINS)?;
        let admins = stmt
            .query_map([], |row| {
                Ok(AdminSummary {
                    id: row.get(0)?,
                    username: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(admins)
    }

    pub fn find_by_username(&self, username: &str) -> RecordResult<Option<Admin>> {
        let admin = self
            .conn
            .query_row(SELECT_ADMIN_BY_USERNAME, params![username], |row| {
                Ok(Admin {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                })
            })
            .optional()?;
        Ok(admin)
    }

    /// Checks a login. Unknown user and wrong password fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> RecordResult<AdminSummary> {
        match self.find_by_username(username.trim())? {
            Some(admin) if verify_password(password, &admin.password_hash) => Ok(AdminSummary::from(&admin)),
            _ => Err(RecordError::Auth(Message::InvalidCredentials)),
        }
    }
}
