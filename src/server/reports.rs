use super::state::AppState;
use crate::libs::certificate::{Certificate, CertificateFormat};
use crate::libs::error::RecordResult;
use crate::libs::export::{Backup, ExportFormat, XLSX_CONTENT_TYPE};
use crate::libs::fields::parse_optional_date;
use crate::libs::filter::{CertificateRange, DateWindow};
use crate::libs::summary::TrainingReport;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

const DOC_CONTENT_TYPE: &str = "application/msword";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateQuery {
    pub filter_start_date: Option<String>,
    pub filter_end_date: Option<String>,
    pub print_date: Option<String>,
    pub format: Option<CertificateFormat>,
}

pub async fn report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> RecordResult<Json<TrainingReport>> {
    let Query(query) = query?;
    let window = DateWindow::parse(query.start_date.as_deref(), query.end_date.as_deref())?;
    let report = state.with_db(move |conn| TrainingReport::load(conn, window)).await?;
    Ok(Json(report))
}

pub async fn export(State(state): State<AppState>, query: Result<Query<ReportQuery>, QueryRejection>) -> RecordResult<Response> {
    let Query(query) = query?;
    let window = DateWindow::parse(query.start_date.as_deref(), query.end_date.as_deref())?;
    let format = query.format.unwrap_or_default();

    let report = state.with_db(move |conn| TrainingReport::load(conn, window)).await?;
    let bytes = report.render(format)?;
    Ok(attachment(format.content_type(), &report.file_name(format), bytes))
}

pub async fn certificate(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<CertificateQuery>, QueryRejection>,
) -> RecordResult<Response> {
    let Path(employee_id) = employee_id?;
    let Query(query) = query?;
    let range = CertificateRange::parse(query.filter_start_date.as_deref(), query.filter_end_date.as_deref())?;
    let print_date = parse_optional_date(query.print_date.as_deref())?.unwrap_or_else(|| Utc::now().date_naive());
    let issuer = (*state.certificate).clone();

    let certificate = state
        .with_db(move |conn| Certificate::load(conn, employee_id, range, print_date, issuer))
        .await?;

    Ok(match query.format.unwrap_or_default() {
        CertificateFormat::Json => Json(certificate).into_response(),
        CertificateFormat::Html => Html(certificate.to_html()).into_response(),
        CertificateFormat::Doc => attachment(DOC_CONTENT_TYPE, &certificate.file_name(), certificate.to_doc().into_bytes()),
    })
}

pub async fn backup(State(state): State<AppState>) -> RecordResult<Response> {
    let backup = state.with_db(Backup::load).await?;
    let bytes = backup.to_xlsx()?;
    tracing::info!(
        employees = backup.employees.len(),
        trainings = backup.trainings.len(),
        "backup generated"
    );
    Ok(attachment(XLSX_CONTENT_TYPE, &backup.file_name(), bytes))
}

fn attachment(content_type: &str, file_name: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file_name);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
