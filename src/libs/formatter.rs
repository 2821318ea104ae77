//! Small text formatters shared by exports, certificates and the CLI.

use chrono::{DateTime, NaiveDate, Utc};

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Hours without a trailing `.0`: `8`, `4.5`, `1.25`.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}", hours)
    } else {
        let text = format!("{:.2}", hours);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// The UTC calendar date of an instant as `dd/mm/yyyy`.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    format_date(instant.date_naive())
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_drop_trailing_zeros() {
        assert_eq!(format_hours(8.0), "8");
        assert_eq!(format_hours(4.5), "4.5");
        assert_eq!(format_hours(1.25), "1.25");
        assert_eq!(format_hours(0.0), "0");
    }

    #[test]
    fn dates_are_day_first() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 9).unwrap();
        assert_eq!(format_date(date), "09/02/2024");
        let instant = DateTime::parse_from_rfc3339("2024-02-09T23:30:00Z").unwrap().with_timezone(&Utc);
        assert_eq!(format_instant(&instant), "09/02/2024");
    }

    #[test]
    fn html_special_characters_are_escaped() {
        assert_eq!(escape_html(r#"<b>"A&B"</b>"#), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("O'Neil"), "O&#39;Neil");
    }
}
