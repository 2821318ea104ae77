use super::auth::SessionKeys;
use crate::db::db::Db;
use crate::libs::config::CertificateConfig;
use crate::libs::error::{RecordError, RecordResult};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

/// Shared handler state. The database handle is opened once by `serve` and
/// dropped with the last clone of this state.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Db>>,
    pub keys: Arc<SessionKeys>,
    pub certificate: Arc<CertificateConfig>,
}

impl AppState {
    pub fn new(db: Db, keys: SessionKeys, certificate: CertificateConfig) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            keys: Arc::new(keys),
            certificate: Arc::new(certificate),
        }
    }

    /// Runs `f` against the connection on the blocking pool.
    pub async fn with_db<T, F>(&self, f: F) -> RecordResult<T>
    where
        F: FnOnce(&Connection) -> RecordResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            f(&db.conn)
        })
        .await
        .map_err(RecordError::internal)?
    }
}
