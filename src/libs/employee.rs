//! Employee records and the payload used to create or patch them.
//!
//! Date-like employee fields (`birthDate`, `joinDate`, `licenseIssueDate`)
//! are kept as the text the office typed. They are printed verbatim on
//! certificates and reports and never compared.

use super::fields::nullable;
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use crate::libs::training::TrainingRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub position: Option<String>,
    pub specialization: Option<String>,
    pub department: Option<String>,
    pub join_date: Option<String>,
    pub license_number: Option<String>,
    pub license_issue_date: Option<String>,
    pub license_issuer: Option<String>,
    pub practice_scope: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_records: Option<Vec<TrainingRecord>>,
}

/// The `{id, fullName}` projection embedded in training records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub id: i64,
    pub full_name: String,
}

impl Employee {
    /// An unsaved employee with only a name. `id` stays 0 until inserted.
    pub fn new(full_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            full_name: full_name.to_string(),
            birth_date: None,
            gender: None,
            position: None,
            specialization: None,
            department: None,
            join_date: None,
            license_number: None,
            license_issue_date: None,
            license_issuer: None,
            practice_scope: None,
            created_at: now,
            updated_at: now,
            training_records: None,
        }
    }
}

/// Create/patch payload. Absent keys leave a field untouched, `null` clears it.
///
/// `id`, `createdAt`, `updatedAt` and `trainingRecords` are not listed here, so
/// serde drops them if a client sends them back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub position: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub specialization: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub join_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub license_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub license_issue_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub license_issuer: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub practice_scope: Option<Option<String>>,
}

impl EmployeeInput {
    pub fn with_name(full_name: &str) -> Self {
        Self {
            full_name: Some(Some(full_name.to_string())),
            ..Default::default()
        }
    }

    /// Builds a new employee. Fails when `fullName` is missing or blank.
    pub fn into_employee(self) -> RecordResult<Employee> {
        let mut employee = Employee::new("");
        if self.full_name.is_none() {
            return Err(RecordError::validation(Message::EmployeeNameRequired));
        }
        self.apply_to(&mut employee)?;
        Ok(employee)
    }

    /// Patches `employee` in place and refreshes `updated_at`.
    pub fn apply_to(self, employee: &mut Employee) -> RecordResult<()> {
        if let Some(full_name) = self.full_name {
            match full_name {
                Some(name) if !name.trim().is_empty() => employee.full_name = name.trim().to_string(),
                _ => return Err(RecordError::validation(Message::EmployeeNameRequired)),
            }
        }

        patch(&mut employee.birth_date, self.birth_date);
        patch(&mut employee.gender, self.gender);
        patch(&mut employee.position, self.position);
        patch(&mut employee.specialization, self.specialization);
        patch(&mut employee.department, self.department);
        patch(&mut employee.join_date, self.join_date);
        patch(&mut employee.license_number, self.license_number);
        patch(&mut employee.license_issue_date, self.license_issue_date);
        patch(&mut employee.license_issuer, self.license_issuer);
        patch(&mut employee.practice_scope, self.practice_scope);

        employee.updated_at = Utc::now();
        Ok(())
    }
}

fn patch<T>(field: &mut Option<T>, value: Option<Option<T>>) {
    if let Some(value) = value {
        *field = value;
    }
}
