//! Training records and their create/patch payload.

use super::fields::{nullable, parse_instant, HourValue};
use crate::libs::employee::EmployeeRef;
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRecord {
    pub id: i64,
    pub training_index: i64,
    pub training_type: String,
    pub content: Option<String>,
    pub organizer: Option<String>,
    pub total_hour: Option<f64>,
    pub time_description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<EmployeeRef>>,
}

impl TrainingRecord {
    /// An unsaved record. `id` and `training_index` are assigned on insert.
    pub fn new(training_type: &str) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            training_index: 0,
            training_type: training_type.to_string(),
            content: None,
            organizer: None,
            total_hour: None,
            time_description: None,
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
            employees: None,
        }
    }

    /// Hours counted in sums; a missing value counts as zero.
    pub fn hours(&self) -> f64 {
        self.total_hour.unwrap_or(0.0)
    }
}

/// Create/patch payload for a training record.
///
/// Dates accept RFC 3339 or `YYYY-MM-DD`; `totalHour` accepts a number or a
/// numeric string. An empty string clears either. `employeeIds` is only
/// honoured by callers that manage associations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingInput {
    #[serde(default, deserialize_with = "nullable")]
    pub training_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub organizer: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_hour: Option<Option<HourValue>>,
    #[serde(default, deserialize_with = "nullable")]
    pub time_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default)]
    pub employee_ids: Option<Vec<i64>>,
}

impl TrainingInput {
    pub fn with_type(training_type: &str) -> Self {
        Self {
            training_type: Some(Some(training_type.to_string())),
            ..Default::default()
        }
    }

    pub fn into_record(self) -> RecordResult<TrainingRecord> {
        let mut record = TrainingRecord::new("");
        if self.training_type.is_none() {
            return Err(RecordError::validation(Message::TrainingTypeRequired));
        }
        self.apply_to(&mut record)?;
        Ok(record)
    }

    /// Patches `record` in place. Nothing is modified if any field is invalid.
    pub fn apply_to(&self, record: &mut TrainingRecord) -> RecordResult<()> {
        let training_type = match &self.training_type {
            Some(Some(value)) if !value.trim().is_empty() => Some(value.trim().to_string()),
            Some(_) => return Err(RecordError::validation(Message::TrainingTypeRequired)),
            None => None,
        };
        let total_hour = match &self.total_hour {
            Some(Some(value)) => Some(value.to_hours()?),
            Some(None) => Some(None),
            None => None,
        };
        let start_date = parse_patch_instant(&self.start_date)?;
        let end_date = parse_patch_instant(&self.end_date)?;

        if let Some(training_type) = training_type {
            record.training_type = training_type;
        }
        if let Some(content) = &self.content {
            record.content = content.clone();
        }
        if let Some(organizer) = &self.organizer {
            record.organizer = organizer.clone();
        }
        if let Some(time_description) = &self.time_description {
            record.time_description = time_description.clone();
        }
        if let Some(total_hour) = total_hour {
            record.total_hour = total_hour;
        }
        if let Some(start_date) = start_date {
            record.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            record.end_date = end_date;
        }

        record.updated_at = Utc::now();
        Ok(())
    }

    /// Employee ids to connect, deduplicated in first-seen order.
    pub fn employee_ids(&self) -> Option<Vec<i64>> {
        self.employee_ids.as_ref().map(|ids| {
            let mut unique = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(id) {
                    unique.push(*id);
                }
            }
            unique
        })
    }
}

fn parse_patch_instant(value: &Option<Option<String>>) -> RecordResult<Option<Option<DateTime<Utc>>>> {
    match value {
        Some(Some(text)) => parse_instant(text).map(Some),
        Some(None) => Ok(Some(None)),
        None => Ok(None),
    }
}
