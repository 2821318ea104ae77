//! HTTP mapping of [`RecordError`].
//!
//! Every failure is answered as `{"error": "<message>"}`. Server-side
//! failures are logged before they leave the process.

use crate::libs::error::RecordError;
use crate::libs::messages::Message;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

impl RecordError {
    pub fn status(&self) -> StatusCode {
        match self {
            RecordError::NotFound(_) => StatusCode::NOT_FOUND,
            RecordError::Validation(_) => StatusCode::BAD_REQUEST,
            RecordError::Auth(_) => StatusCode::UNAUTHORIZED,
            RecordError::Storage(_) | RecordError::Export(_) | RecordError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<JsonRejection> for RecordError {
    fn from(rejection: JsonRejection) -> Self {
        RecordError::Validation(Message::InvalidRequestBody(rejection.body_text()))
    }
}

impl From<QueryRejection> for RecordError {
    fn from(rejection: QueryRejection) -> Self {
        RecordError::Validation(Message::InvalidRequestBody(rejection.body_text()))
    }
}

impl From<PathRejection> for RecordError {
    fn from(rejection: PathRejection) -> Self {
        RecordError::Validation(Message::InvalidRequestBody(rejection.body_text()))
    }
}
