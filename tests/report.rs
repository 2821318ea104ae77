#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use cmetrack::libs::employee::Employee;
    use cmetrack::libs::error::RecordError;
    use cmetrack::libs::filter::{CertificateRange, DateWindow};
    use cmetrack::libs::summary::{report_rows, summarize, TrainingTotals};
    use cmetrack::libs::training::TrainingRecord;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(kind: &str, start: Option<(i32, u32, u32)>, end: Option<(i32, u32, u32)>, hours: Option<f64>) -> TrainingRecord {
        let mut record = TrainingRecord::new(kind);
        record.start_date = start.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap());
        record.end_date = end.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 17, 0, 0).unwrap());
        record.total_hour = hours;
        record
    }

    fn employee(id: i64, name: &str) -> Employee {
        let mut employee = Employee::new(name);
        employee.id = id;
        employee
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        assert!(matches!(DateWindow::new(date(2024, 2, 1), date(2024, 1, 1)), Err(RecordError::Validation(_))));
        assert!(DateWindow::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
        assert!(matches!(DateWindow::parse(Some("2024-01-01"), None), Err(RecordError::Validation(_))));
    }

    #[test]
    fn test_window_overlap_rule() {
        let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();

        assert!(window.overlaps(&record("start inside", Some((2024, 3, 15)), None, None)));
        assert!(window.overlaps(&record("end inside", Some((2024, 2, 1)), Some((2024, 3, 1)), None)));
        assert!(window.overlaps(&record("spans", Some((2024, 1, 1)), Some((2024, 5, 1)), None)));
        assert!(window.overlaps(&record("last day", None, Some((2024, 3, 31)), None)));
        assert!(!window.overlaps(&record("before", Some((2024, 1, 1)), Some((2024, 2, 29)), None)));
        assert!(!window.overlaps(&record("after", Some((2024, 4, 1)), None, None)));
        assert!(!window.overlaps(&record("undated", None, None, None)));
        assert!(!window.overlaps(&record("open start", Some((2024, 1, 1)), None, None)));
    }

    #[test]
    fn test_certificate_range_one_sided_bounds() {
        let from = CertificateRange::new(Some(date(2024, 3, 1)), None).unwrap();
        assert!(from.matches(&record("a", Some((2024, 3, 1)), None, None)));
        assert!(!from.matches(&record("b", Some((2024, 2, 28)), Some((2024, 3, 5)), None)));
        assert!(!from.matches(&record("c", None, Some((2024, 3, 5)), None)));

        let until = CertificateRange::new(None, Some(date(2024, 3, 1))).unwrap();
        assert!(until.matches(&record("d", None, Some((2024, 3, 1)), None)));
        assert!(!until.matches(&record("e", Some((2024, 2, 1)), None, None)));

        let all = CertificateRange::parse(None, Some("")).unwrap();
        assert_eq!(all, CertificateRange::All);
        assert!(all.matches(&record("f", None, None, None)));

        assert!(CertificateRange::parse(Some("2024-05-01"), Some("2024-04-01")).is_err());
    }

    #[test]
    fn test_totals_and_rollups() {
        let records = vec![
            record("Workshop", None, None, Some(4.0)),
            record("Conference", None, None, None),
            record("Workshop", None, None, Some(2.5)),
        ];
        assert_eq!(records.total_hours(), 6.5);
        assert_eq!(records.training_types(), "Workshop, Conference");

        let mut with_content = record("Course", None, None, None);
        with_content.content = Some("Sepsis".into());
        let listed = vec![with_content, record("Workshop", None, None, None)];
        assert_eq!(listed.training_list(), "Course - Sepsis; Workshop");

        let empty: Vec<TrainingRecord> = Vec::new();
        assert_eq!(empty.total_hours(), 0.0);
        assert_eq!(empty.training_types(), "");
    }

    #[test]
    fn test_summarize_includes_untrained_employees() {
        let employees = vec![employee(1, "Alice"), employee(2, "Bob")];
        let mut trainings = HashMap::new();
        trainings.insert(1, vec![record("Workshop", None, None, Some(3.0))]);

        let summaries = summarize(&employees, &trainings);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].total_training_hours, 3.0);
        assert_eq!(summaries[0].training_list, "Workshop");
        assert_eq!(summaries[1].total_training_hours, 0.0);
        assert_eq!(summaries[1].training_list, "");
    }

    #[test]
    fn test_report_rows_keep_matching_employees_only() {
        let employees = vec![employee(1, "Alice"), employee(2, "Bob"), employee(3, "Carol")];
        let mut trainings = HashMap::new();
        trainings.insert(
            1,
            vec![
                record("Workshop", Some((2024, 3, 2)), Some((2024, 3, 3)), Some(8.0)),
                record("Old course", Some((2023, 1, 1)), Some((2023, 1, 2)), Some(99.0)),
            ],
        );
        trainings.insert(2, vec![record("Old course", Some((2023, 1, 1)), None, Some(5.0))]);
        trainings.insert(3, vec![record("Conference", None, Some((2024, 3, 31)), Some(1.5))]);

        let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        let rows = report_rows(&employees, &trainings, &window);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].no, rows[0].full_name.as_str()), (1, "Alice"));
        assert_eq!(rows[0].total_hours, 8.0);
        assert_eq!(rows[0].training_types, "Workshop");
        assert_eq!((rows[1].no, rows[1].full_name.as_str()), (2, "Carol"));
    }
}
