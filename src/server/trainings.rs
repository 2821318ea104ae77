//! Handlers for the two training-record route families.
//!
//! `/api/training-records` lists by start date (newest first) and its update
//! ignores `employeeIds`. `/api/training` lists by display index and its
//! update replaces the association set when `employeeIds` is present.

use super::state::AppState;
use crate::db::trainings::{TrainingOrder, Trainings};
use crate::libs::error::RecordResult;
use crate::libs::messages::Message;
use crate::libs::training::{TrainingInput, TrainingRecord};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn list_by_start_date(State(state): State<AppState>) -> RecordResult<Json<Vec<TrainingRecord>>> {
    list(state, TrainingOrder::StartDateDesc).await
}

pub async fn list_by_index(State(state): State<AppState>) -> RecordResult<Json<Vec<TrainingRecord>>> {
    list(state, TrainingOrder::IndexAsc).await
}

pub async fn get(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> RecordResult<Json<TrainingRecord>> {
    let Path(id) = id?;
    let record = state.with_db(move |conn| Trainings::new(conn).get(id)).await?;
    Ok(Json(record))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TrainingInput>, JsonRejection>,
) -> RecordResult<(StatusCode, Json<TrainingRecord>)> {
    let Json(input) = body?;
    let record = state.with_db(move |conn| Trainings::new(conn).create(input)).await?;
    tracing::info!(id = record.id, index = record.training_index, "training record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Field patch only.
pub async fn update_fields(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TrainingInput>, JsonRejection>,
) -> RecordResult<Json<TrainingRecord>> {
    update(state, id, body, false).await
}

/// Field patch plus association replacement.
pub async fn update_with_employees(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TrainingInput>, JsonRejection>,
) -> RecordResult<Json<TrainingRecord>> {
    update(state, id, body, true).await
}

pub async fn delete(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> RecordResult<Json<Value>> {
    let Path(id) = id?;
    state.with_db(move |conn| Trainings::new(conn).delete(id)).await?;
    Ok(Json(json!({ "message": Message::TrainingDeleted.to_string() })))
}

async fn list(state: AppState, order: TrainingOrder) -> RecordResult<Json<Vec<TrainingRecord>>> {
    let records = state.with_db(move |conn| Trainings::new(conn).list(order, true)).await?;
    Ok(Json(records))
}

async fn update(
    state: AppState,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TrainingInput>, JsonRejection>,
    replace_employees: bool,
) -> RecordResult<Json<TrainingRecord>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let record = state
        .with_db(move |conn| Trainings::new(conn).update(id, &input, replace_employees))
        .await?;
    Ok(Json(record))
}
