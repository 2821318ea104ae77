//! Parsing helpers for loosely typed request fields.
//!
//! Form clients post dates as `YYYY-MM-DD`, API clients as RFC 3339, and
//! hours either as numbers or as the text of an input box. These helpers
//! turn all of that into typed values or a `Validation` error.

use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Distinguishes an absent key from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>` field: absent gives `None`, `null` gives `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Hours as posted by a client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HourValue {
    Number(f64),
    Text(String),
}

impl HourValue {
    /// Resolves to a non-negative number, `None` for an empty string.
    pub fn to_hours(&self) -> RecordResult<Option<f64>> {
        let value = match self {
            HourValue::Number(n) => *n,
            HourValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| RecordError::validation(Message::InvalidTotalHour(text.clone())))?
            }
        };

        if !value.is_finite() {
            return Err(RecordError::validation(Message::InvalidTotalHour(value.to_string())));
        }
        if value < 0.0 {
            return Err(RecordError::validation(Message::NegativeTotalHour(value)));
        }
        Ok(Some(value))
    }
}

/// Parses an instant from RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as
/// UTC) or a bare `YYYY-MM-DD` (midnight UTC). Empty input is `None`.
pub fn parse_instant(value: &str) -> RecordResult<Option<DateTime<Utc>>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()));
    }

    Err(RecordError::validation(Message::InvalidDate(value.to_string())))
}

/// Parses a calendar date. Full instants are reduced to their UTC date.
pub fn parse_date(value: &str) -> RecordResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    match parse_instant(trimmed)? {
        Some(instant) => Ok(instant.date_naive()),
        None => Err(RecordError::validation(Message::InvalidDate(value.to_string()))),
    }
}

/// Parses an optional query parameter; blank counts as absent.
pub fn parse_optional_date(value: Option<&str>) -> RecordResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text).map(Some),
    }
}
