//! Error taxonomy shared by the record layer, the aggregations and the HTTP
//! surface.
//!
//! | Variant | HTTP |
//! |---|---|
//! | `NotFound` | 404 |
//! | `Validation` | 400 |
//! | `Storage` | 500 |
//! | `Auth` | 401 |
//! | `Export` | 500 |
//! | `Internal` | 500 |
//!
//! The status mapping itself lives in `server::error`; this module only
//! knows the categories.

use crate::libs::messages::Message;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0}")]
    NotFound(Message),

    #[error("{0}")]
    Validation(Message),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    Auth(Message),

    #[error("{0}")]
    Export(Message),

    #[error("{0}")]
    Internal(Message),
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;

impl RecordError {
    pub fn validation(message: Message) -> Self {
        RecordError::Validation(message)
    }

    pub fn internal(reason: impl ToString) -> Self {
        RecordError::Internal(Message::InternalError(reason.to_string()))
    }

    pub fn export(reason: impl ToString) -> Self {
        RecordError::Export(Message::ExportFailed(reason.to_string()))
    }
}

impl From<rust_xlsxwriter::XlsxError> for RecordError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        RecordError::export(e)
    }
}

impl From<csv::Error> for RecordError {
    fn from(e: csv::Error) -> Self {
        RecordError::export(e)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::export(e)
    }
}
