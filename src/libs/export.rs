//! Workbook, CSV and JSON exports.
//!
//! Two documents are produced here:
//!
//! - the **backup** workbook: a point-in-time snapshot with the sheets
//!   `Employees`, `Training Records`, `Training Summary` and `Admins`;
//! - the **training report** for a date window, as xlsx, csv or json.
//!
//! Everything is rendered into an in-memory buffer. The HTTP layer streams
//! that buffer as an attachment; [`Exporter`] writes it to a file for the CLI.
//!
//! Header rows are always written, so an empty database still yields a
//! workbook whose sheets have their column titles.

use crate::db::admins::Admins;
use crate::db::employees::Employees;
use crate::db::trainings::{TrainingOrder, Trainings};
use crate::libs::admin::AdminSummary;
use crate::libs::employee::Employee;
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::fields::DATE_FORMAT;
use crate::libs::messages::Message;
use crate::libs::summary::{summarize, EmployeeSummary, TrainingReport};
use crate::libs::training::TrainingRecord;
use crate::msg_success;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const EMPLOYEE_HEADERS: [&str; 14] = [
    "id",
    "fullName",
    "birthDate",
    "gender",
    "position",
    "specialization",
    "department",
    "joinDate",
    "licenseNumber",
    "licenseIssueDate",
    "licenseIssuer",
    "practiceScope",
    "createdAt",
    "updatedAt",
];
pub const TRAINING_HEADERS: [&str; 12] = [
    "id",
    "trainingIndex",
    "trainingType",
    "content",
    "organizer",
    "totalHour",
    "timeDescription",
    "startDate",
    "endDate",
    "createdAt",
    "updatedAt",
    "employees",
];
pub const SUMMARY_HEADERS: [&str; 3] = ["fullName", "totalTrainingHours", "trainingList"];
pub const ADMIN_HEADERS: [&str; 2] = ["id", "username"];
pub const REPORT_HEADERS: [&str; 7] = ["No.", "Full name", "Date of birth", "Position", "Department", "Training types", "Total hours"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_CONTENT_TYPE,
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// Everything the backup workbook contains, read in one go.
#[derive(Debug, Clone)]
pub struct Backup {
    pub created_at: DateTime<Utc>,
    pub employees: Vec<Employee>,
    pub trainings: Vec<TrainingRecord>,
    pub summaries: Vec<EmployeeSummary>,
    pub admins: Vec<AdminSummary>,
}

impl Backup {
    pub fn load(conn: &rusqlite::Connection) -> RecordResult<Self> {
        let employees = Employees::new(conn).list(false)?;
        let trainings_repo = Trainings::new(conn);
        let trainings = trainings_repo.list(TrainingOrder::IndexAsc, true)?;
        let summaries = summarize(&employees, &trainings_repo.by_employee()?);
        let admins = Admins::new(conn).list()?;

        Ok(Self {
            created_at: Utc::now(),
            employees,
            trainings,
            summaries,
            admins,
        })
    }

    /// `backup_<timestamp>.xlsx`, with `:` replaced so the name is valid everywhere.
    pub fn file_name(&self) -> String {
        format!("backup_{}.xlsx", self.created_at.format("%Y-%m-%dT%H-%M-%SZ"))
    }

    pub fn to_xlsx(&self) -> RecordResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = header_format();

        let sheet = workbook.add_worksheet().set_name("Employees")?;
        write_headers(sheet, &EMPLOYEE_HEADERS, &header_format)?;
        for (i, employee) in self.employees.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, employee.id as f64)?;
            sheet.write_string(row, 1, &employee.full_name)?;
            let optional = [
                &employee.birth_date,
                &employee.gender,
                &employee.position,
                &employee.specialization,
                &employee.department,
                &employee.join_date,
                &employee.license_number,
                &employee.license_issue_date,
                &employee.license_issuer,
                &employee.practice_scope,
            ];
            for (offset, value) in optional.iter().enumerate() {
                write_optional(sheet, row, 2 + offset as u16, value.as_deref())?;
            }
            sheet.write_string(row, 12, &iso(&employee.created_at))?;
            sheet.write_string(row, 13, &iso(&employee.updated_at))?;
        }
        sheet.autofit();

        let sheet = workbook.add_worksheet().set_name("Training Records")?;
        write_headers(sheet, &TRAINING_HEADERS, &header_format)?;
        for (i, record) in self.trainings.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, record.id as f64)?;
            sheet.write_number(row, 1, record.training_index as f64)?;
            sheet.write_string(row, 2, &record.training_type)?;
            write_optional(sheet, row, 3, record.content.as_deref())?;
            write_optional(sheet, row, 4, record.organizer.as_deref())?;
            if let Some(hours) = record.total_hour {
                sheet.write_number(row, 5, hours)?;
            }
            write_optional(sheet, row, 6, record.time_description.as_deref())?;
            write_optional(sheet, row, 7, record.start_date.as_ref().map(iso).as_deref())?;
            write_optional(sheet, row, 8, record.end_date.as_ref().map(iso).as_deref())?;
            sheet.write_string(row, 9, &iso(&record.created_at))?;
            sheet.write_string(row, 10, &iso(&record.updated_at))?;
            let names = record
                .employees
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|employee| employee.full_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            sheet.write_string(row, 11, &names)?;
        }
        sheet.autofit();

        let sheet = workbook.add_worksheet().set_name("Training Summary")?;
        write_headers(sheet, &SUMMARY_HEADERS, &header_format)?;
        for (i, summary) in self.summaries.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &summary.full_name)?;
            sheet.write_number(row, 1, summary.total_training_hours)?;
            sheet.write_string(row, 2, &summary.training_list)?;
        }
        sheet.autofit();

        let sheet = workbook.add_worksheet().set_name("Admins")?;
        write_headers(sheet, &ADMIN_HEADERS, &header_format)?;
        for (i, admin) in self.admins.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, admin.id as f64)?;
            sheet.write_string(row, 1, &admin.username)?;
        }
        sheet.autofit();

        Ok(workbook.save_to_buffer()?)
    }
}

impl TrainingReport {
    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "training_report_{}_{}.{}",
            self.window.start.format(DATE_FORMAT),
            self.window.end.format(DATE_FORMAT),
            format.extension()
        )
    }

    pub fn render(&self, format: ExportFormat) -> RecordResult<Vec<u8>> {
        match format {
            ExportFormat::Xlsx => self.to_xlsx(),
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(self)?),
        }
    }

    fn to_xlsx(&self) -> RecordResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = header_format();

        let sheet = workbook.add_worksheet().set_name("Training Report")?;
        write_headers(sheet, &REPORT_HEADERS, &header_format)?;
        for (i, row) in self.rows.iter().enumerate() {
            let line = i as u32 + 1;
            sheet.write_number(line, 0, row.no as f64)?;
            sheet.write_string(line, 1, &row.full_name)?;
            write_optional(sheet, line, 2, row.birth_date.as_deref())?;
            write_optional(sheet, line, 3, row.position.as_deref())?;
            write_optional(sheet, line, 4, row.department.as_deref())?;
            sheet.write_string(line, 5, &row.training_types)?;
            sheet.write_number(line, 6, row.total_hours)?;
        }
        sheet.autofit();

        Ok(workbook.save_to_buffer()?)
    }

    fn to_csv(&self) -> RecordResult<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(REPORT_HEADERS)?;
        for row in &self.rows {
            wtr.write_record([
                row.no.to_string(),
                row.full_name.clone(),
                row.birth_date.clone().unwrap_or_default(),
                row.position.clone().unwrap_or_default(),
                row.department.clone().unwrap_or_default(),
                row.training_types.clone(),
                row.total_hours.to_string(),
            ])?;
        }
        wtr.into_inner().map_err(|e| RecordError::export(e.to_string()))
    }
}

/// Writes rendered exports to disk for the CLI.
pub struct Exporter {
    output_path: Option<PathBuf>,
}

impl Exporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn write_backup(&self, backup: &Backup) -> anyhow::Result<PathBuf> {
        let path = self.resolve(backup.file_name());
        self.write(&path, &backup.to_xlsx()?)?;
        msg_success!(Message::BackupSaved(path.display().to_string()));
        Ok(path)
    }

    pub fn write_report(&self, report: &TrainingReport, format: ExportFormat) -> anyhow::Result<PathBuf> {
        let path = self.resolve(report.file_name(format));
        self.write(&path, &report.render(format)?)?;
        msg_success!(Message::ReportSaved(path.display().to_string()));
        Ok(path)
    }

    fn resolve(&self, default_name: String) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| PathBuf::from(default_name))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        File::create(path)?.write_all(bytes)?;
        Ok(())
    }
}

fn header_format() -> Format {
    Format::new().set_bold().set_background_color(Color::Gray)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> RecordResult<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

fn write_optional(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&str>) -> RecordResult<()> {
    if let Some(value) = value {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
