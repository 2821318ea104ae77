//! Date filters for reports and certificates.
//!
//! Records carry instants; filters compare the UTC calendar date of each
//! instant against inclusive date bounds.

use crate::libs::error::{RecordError, RecordResult};
use crate::libs::fields::{parse_optional_date, DATE_FORMAT};
use crate::libs::messages::Message;
use crate::libs::training::TrainingRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// An inclusive `[start, end]` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> RecordResult<Self> {
        if start > end {
            return Err(RecordError::validation(Message::InvalidDateWindow(
                start.format(DATE_FORMAT).to_string(),
                end.format(DATE_FORMAT).to_string(),
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds a window from query text. Both bounds are required.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> RecordResult<Self> {
        match (parse_optional_date(start)?, parse_optional_date(end)?) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(RecordError::validation(Message::ReportWindowRequired)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A record overlaps when its start or end date falls in the window, or
    /// when it has both dates and spans the whole window. Records with neither
    /// date never match.
    pub fn overlaps(&self, record: &TrainingRecord) -> bool {
        let start = record.start_date.map(|instant| instant.date_naive());
        let end = record.end_date.map(|instant| instant.date_naive());

        if start.is_some_and(|date| self.contains(date)) || end.is_some_and(|date| self.contains(date)) {
            return true;
        }
        matches!((start, end), (Some(start), Some(end)) if start <= self.start && end >= self.end)
    }

    pub fn filter(&self, records: Vec<TrainingRecord>) -> Vec<TrainingRecord> {
        records.into_iter().filter(|record| self.overlaps(record)).collect()
    }
}

/// The optional range printed on a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateRange {
    All,
    Window(DateWindow),
    /// Records starting on or after the date.
    From(NaiveDate),
    /// Records ending on or before the date.
    Until(NaiveDate),
}

impl CertificateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> RecordResult<Self> {
        Ok(match (start, end) {
            (Some(start), Some(end)) => CertificateRange::Window(DateWindow::new(start, end)?),
            (Some(start), None) => CertificateRange::From(start),
            (None, Some(end)) => CertificateRange::Until(end),
            (None, None) => CertificateRange::All,
        })
    }

    pub fn parse(start: Option<&str>, end: Option<&str>) -> RecordResult<Self> {
        Self::new(parse_optional_date(start)?, parse_optional_date(end)?)
    }

    pub fn matches(&self, record: &TrainingRecord) -> bool {
        match self {
            CertificateRange::All => true,
            CertificateRange::Window(window) => window.overlaps(record),
            CertificateRange::From(start) => record.start_date.is_some_and(|instant| instant.date_naive() >= *start),
            CertificateRange::Until(end) => record.end_date.is_some_and(|instant| instant.date_naive() <= *end),
        }
    }

    pub fn filter(&self, records: Vec<TrainingRecord>) -> Vec<TrainingRecord> {
        records.into_iter().filter(|record| self.matches(record)).collect()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self {
            CertificateRange::Window(window) => Some(window.start),
            CertificateRange::From(start) => Some(*start),
            _ => None,
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self {
            CertificateRange::Window(window) => Some(window.end),
            CertificateRange::Until(end) => Some(*end),
            _ => None,
        }
    }
}
