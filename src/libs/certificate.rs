//! Training certificates.
//!
//! A certificate lists one employee's training records inside an optional
//! date range, numbers the rows, and totals the credit hours. It can be
//! returned as JSON, rendered as printable HTML, or as Word-compatible HTML
//! that opens in a word processor as a `.doc` file.
//!
//! Range semantics:
//!
//! | Bounds given | Kept records |
//! |---|---|
//! | both | records overlapping the window (same rule as the report) |
//! | start only | start date on or after it |
//! | end only | end date on or before it |
//! | neither | all |

use crate::db::employees::Employees;
use crate::libs::config::CertificateConfig;
use crate::libs::employee::Employee;
use crate::libs::error::RecordResult;
use crate::libs::filter::CertificateRange;
use crate::libs::formatter::{escape_html, format_date, format_hours, format_instant};
use crate::libs::messages::Message;
use crate::libs::summary::TrainingTotals;
use crate::libs::training::TrainingRecord;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

const WORD_NAMESPACES: &str = r#"xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:w="urn:schemas-microsoft-com:office:word" xmlns="http://www.w3.org/TR/REC-html40""#;

const STYLE: &str = "body { font-family: 'Times New Roman', serif; font-size: 13pt; margin: 2cm; }
.header { display: flex; justify-content: space-between; text-align: center; }
.title { text-align: center; font-size: 18pt; font-weight: bold; margin-top: 24pt; }
.subtitle { text-align: center; font-weight: bold; margin-bottom: 18pt; }
table { width: 100%; border-collapse: collapse; margin: 12pt 0; }
th, td { border: 1px solid #000; padding: 4pt 6pt; vertical-align: top; }
th { font-weight: bold; text-align: center; }
td.num { text-align: center; }
tr.total td { font-weight: bold; }
.signature { margin-top: 24pt; text-align: right; }";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateFormat {
    #[default]
    Json,
    Html,
    Doc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRow {
    pub no: usize,
    pub training_type: String,
    pub content: Option<String>,
    pub organizer: Option<String>,
    /// `timeDescription`, else "From dd/mm/yyyy to dd/mm/yyyy" when both dates exist.
    pub time: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub employee_id: i64,
    pub full_name: String,
    pub birth_date: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub filter_start_date: Option<NaiveDate>,
    pub filter_end_date: Option<NaiveDate>,
    pub print_date: NaiveDate,
    pub range_text: String,
    pub rows: Vec<CertificateRow>,
    pub total_hours: f64,
    #[serde(skip)]
    pub issuer: CertificateConfig,
}

impl Certificate {
    /// Builds a certificate from an employee and their (unfiltered) records.
    pub fn build(
        employee: &Employee,
        records: Vec<TrainingRecord>,
        range: CertificateRange,
        print_date: NaiveDate,
        issuer: CertificateConfig,
    ) -> Self {
        let kept = range.filter(records);
        let rows = kept
            .iter()
            .enumerate()
            .map(|(i, record)| CertificateRow {
                no: i + 1,
                training_type: record.training_type.clone(),
                content: record.content.clone(),
                organizer: record.organizer.clone(),
                time: time_column(record),
                hours: record.hours(),
            })
            .collect();

        Self {
            employee_id: employee.id,
            full_name: employee.full_name.clone(),
            birth_date: employee.birth_date.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            filter_start_date: range.start(),
            filter_end_date: range.end(),
            print_date,
            range_text: range_text(&range),
            rows,
            total_hours: kept.total_hours(),
            issuer,
        }
    }

    pub fn load(
        conn: &Connection,
        employee_id: i64,
        range: CertificateRange,
        print_date: NaiveDate,
        issuer: CertificateConfig,
    ) -> RecordResult<Self> {
        let mut employee = Employees::new(conn).get(employee_id)?;
        let records = employee.training_records.take().unwrap_or_default();
        Ok(Self::build(&employee, records, range, print_date, issuer))
    }

    /// `certificate_<name>.doc` with every non-ASCII-alphanumeric character
    /// replaced by `_`, so the name is a valid header value.
    pub fn file_name(&self) -> String {
        let slug: String = self
            .full_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("certificate_{}.doc", slug)
    }

    /// Printable HTML page.
    pub fn to_html(&self) -> String {
        self.render("<html>")
    }

    /// HTML with Office namespaces so word processors open it as a document.
    pub fn to_doc(&self) -> String {
        self.render(&format!("<html {}>", WORD_NAMESPACES))
    }

    fn render(&self, html_open: &str) -> String {
        let issuer = &self.issuer;
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str(html_open);
        html.push_str("\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&Message::CertificateTitle.to_string())));
        html.push_str(&format!("<style>\n{}\n</style>\n</head>\n<body>\n", STYLE));

        html.push_str("<div class=\"header\">\n<div>");
        html.push_str(&format!(
            "<div>{}</div><div><b>{}</b></div>",
            escape_html(&issuer.parent_organization),
            escape_html(&issuer.organization)
        ));
        html.push_str("</div>\n</div>\n");

        html.push_str(&format!("<div class=\"title\">{}</div>\n", escape_html(&Message::CertificateTitle.to_string())));
        html.push_str(&format!(
            "<div class=\"subtitle\">{}</div>\n",
            escape_html(&Message::CertificateSubtitle.to_string())
        ));

        html.push_str(&format!("<p>{}</p>\n", escape_html(&Message::CertificateRecipient(self.full_name.clone()).to_string())));
        if let Some(birth_date) = &self.birth_date {
            html.push_str(&format!("<p>{}</p>\n", escape_html(&Message::CertificateBirthDate(birth_date.clone()).to_string())));
        }
        let workplace = match (&self.position, &self.department) {
            (Some(position), Some(department)) => format!("{}, {}", position, department),
            (Some(position), None) => position.clone(),
            (None, Some(department)) => department.clone(),
            (None, None) => issuer.organization.clone(),
        };
        html.push_str(&format!("<p>{}</p>\n", escape_html(&Message::CertificateWorkplace(workplace).to_string())));
        html.push_str(&format!("<p>{}</p>\n", escape_html(&Message::CertificateCompleted.to_string())));

        html.push_str("<table>\n<thead><tr>");
        for column in [
            Message::CertificateColumnNo,
            Message::CertificateColumnType,
            Message::CertificateColumnContent,
            Message::CertificateColumnOrganizer,
            Message::CertificateColumnTime,
            Message::CertificateColumnHours,
        ] {
            html.push_str(&format!("<th>{}</th>", escape_html(&column.to_string())));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        if self.rows.is_empty() {
            html.push_str(&format!(
                "<tr><td colspan=\"6\" class=\"num\">{}</td></tr>\n",
                escape_html(&Message::CertificateNoData.to_string())
            ));
        }
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><td class=\"num\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td></tr>\n",
                row.no,
                escape_html(&row.training_type),
                escape_html(row.content.as_deref().unwrap_or_default()),
                escape_html(row.organizer.as_deref().unwrap_or_default()),
                escape_html(&row.time),
                format_hours(row.hours)
            ));
        }
        html.push_str(&format!(
            "<tr class=\"total\"><td colspan=\"5\" class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            escape_html(&Message::CertificateTotalRow.to_string()),
            format_hours(self.total_hours)
        ));
        html.push_str("</tbody>\n</table>\n");

        html.push_str(&format!(
            "<p>{}</p>\n",
            escape_html(&Message::CertificateSummary(self.range_text.clone(), format_hours(self.total_hours)).to_string())
        ));

        html.push_str(&format!(
            "<div class=\"signature\"><p><i>{}</i></p><p><b>{}</b></p></div>\n",
            escape_html(
                &Message::CertificateDateLine(
                    issuer.city.clone(),
                    self.print_date.day(),
                    self.print_date.month(),
                    self.print_date.year()
                )
                .to_string()
            ),
            escape_html(&issuer.signatory)
        ));

        html.push_str("</body>\n</html>\n");
        html
    }
}

fn time_column(record: &TrainingRecord) -> String {
    if let Some(description) = record.time_description.as_deref().filter(|text| !text.trim().is_empty()) {
        return description.to_string();
    }
    match (&record.start_date, &record.end_date) {
        (Some(start), Some(end)) => Message::CertificateTimeSpan(format_instant(start), format_instant(end)).to_string(),
        _ => String::new(),
    }
}

fn range_text(range: &CertificateRange) -> String {
    match (range.start(), range.end()) {
        (Some(start), Some(end)) => Message::CertificateRangeBoth(format_date(start), format_date(end)).to_string(),
        (Some(start), None) => Message::CertificateRangeFrom(format_date(start)).to_string(),
        (None, Some(end)) => Message::CertificateRangeTo(format_date(end)).to_string(),
        (None, None) => String::new(),
    }
}
