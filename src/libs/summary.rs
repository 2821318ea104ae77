use crate::db::employees::Employees;
use crate::db::trainings::Trainings;
use crate::libs::employee::Employee;
use crate::libs::error::RecordResult;
use crate::libs::filter::DateWindow;
use crate::libs::training::TrainingRecord;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;

/// Roll-ups over a set of training records.
pub trait TrainingTotals {
    /// Sum of `totalHour`; missing values count as zero.
    fn total_hours(&self) -> f64;
    /// Distinct training types in order of first appearance, joined with `", "`.
    fn training_types(&self) -> String;
    /// `"type - content"` (or just `"type"`) per record, joined with `"; "`.
    fn training_list(&self) -> String;
}

impl TrainingTotals for [TrainingRecord] {
    fn total_hours(&self) -> f64 {
        self.iter().map(TrainingRecord::hours).sum()
    }

    fn training_types(&self) -> String {
        let mut seen: Vec<&str> = Vec::new();
        for record in self {
            if !seen.contains(&record.training_type.as_str()) {
                seen.push(&record.training_type);
            }
        }
        seen.join(", ")
    }

    fn training_list(&self) -> String {
        self.iter()
            .map(|record| match record.content.as_deref() {
                Some(content) if !content.is_empty() => format!("{} - {}", record.training_type, content),
                _ => record.training_type.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// One row of the backup's summary sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub full_name: String,
    pub total_training_hours: f64,
    pub training_list: String,
}

/// One row of the training report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub no: usize,
    pub full_name: String,
    pub birth_date: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub training_types: String,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub window: DateWindow,
    pub rows: Vec<ReportRow>,
}

/// Summary rows for every employee, including those with no training.
pub fn summarize(employees: &[Employee], trainings: &HashMap<i64, Vec<TrainingRecord>>) -> Vec<EmployeeSummary> {
    employees
        .iter()
        .map(|employee| {
            let records = trainings.get(&employee.id).map(Vec::as_slice).unwrap_or_default();
            EmployeeSummary {
                full_name: employee.full_name.clone(),
                total_training_hours: records.total_hours(),
                training_list: records.training_list(),
            }
        })
        .collect()
}

/// Report rows for employees with at least one record overlapping `window`,
/// numbered from 1 in the order of `employees`.
pub fn report_rows(employees: &[Employee], trainings: &HashMap<i64, Vec<TrainingRecord>>, window: &DateWindow) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for employee in employees {
        let matching: Vec<TrainingRecord> = trainings
            .get(&employee.id)
            .map(|records| records.iter().filter(|record| window.overlaps(record)).cloned().collect())
            .unwrap_or_default();
        if matching.is_empty() {
            continue;
        }

        rows.push(ReportRow {
            no: rows.len() + 1,
            full_name: employee.full_name.clone(),
            birth_date: employee.birth_date.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            training_types: matching.training_types(),
            total_hours: matching.total_hours(),
        });
    }
    rows
}

impl TrainingReport {
    /// Reads current rows and builds the report for `window`.
    pub fn load(conn: &Connection, window: DateWindow) -> RecordResult<Self> {
        let employees = Employees::new(conn).list(false)?;
        let trainings = Trainings::new(conn).by_employee()?;
        let rows = report_rows(&employees, &trainings, &window);
        tracing::debug!(start = %window.start, end = %window.end, rows = rows.len(), "training report built");
        Ok(Self { window, rows })
    }
}
