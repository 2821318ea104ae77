use super::state::AppState;
use crate::db::employees::Employees;
use crate::libs::employee::{Employee, EmployeeInput};
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub include_associations: Option<bool>,
}

pub async fn list(State(state): State<AppState>, query: Result<Query<ListQuery>, QueryRejection>) -> RecordResult<Json<Vec<Employee>>> {
    let Query(query) = query?;
    let include = query.include_associations.unwrap_or(true);
    let employees = state.with_db(move |conn| Employees::new(conn).list(include)).await?;
    Ok(Json(employees))
}

pub async fn get(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> RecordResult<Json<Employee>> {
    let Path(id) = id?;
    let employee = state.with_db(move |conn| Employees::new(conn).get(id)).await?;
    Ok(Json(employee))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> RecordResult<(StatusCode, Json<Employee>)> {
    let Json(input) = body?;
    let employee = state.with_db(move |conn| Employees::new(conn).create(input)).await?;
    tracing::info!(id = employee.id, "{}", Message::EmployeeCreated(employee.full_name.clone()));
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> RecordResult<Json<Employee>> {
    let Path(id) = id?;
    let Json(input) = body?;
    let employee = state.with_db(move |conn| Employees::new(conn).update(id, input)).await?;
    Ok(Json(employee))
}

pub async fn delete(State(state): State<AppState>, id: Result<Path<i64>, PathRejection>) -> RecordResult<Json<Value>> {
    let Path(id) = id?;
    state.with_db(move |conn| Employees::new(conn).delete(id)).await?;
    Ok(Json(json!({ "message": Message::EmployeeDeleted.to_string() })))
}

/// `POST /api/import` with `{"employees": [...]}`.
pub async fn import(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> RecordResult<(StatusCode, Json<Value>)> {
    let Json(body) = body?;
    let rows = import_rows(body)?;
    let count = state.with_db(move |conn| Employees::new(conn).import(rows)).await?;
    tracing::info!(count, "employees imported");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": Message::EmployeesImported(count).to_string(), "count": count })),
    ))
}

fn import_rows(mut body: Value) -> RecordResult<Vec<EmployeeInput>> {
    let rows = match body.get_mut("employees").map(Value::take) {
        Some(Value::Array(rows)) => rows,
        _ => return Err(RecordError::validation(Message::ImportInvalidFormat)),
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row)
                .map_err(|e| RecordError::validation(Message::ImportRowInvalid(i + 1, e.to_string())))
        })
        .collect()
}
