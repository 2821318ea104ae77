#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use cmetrack::db::admins::Admins;
    use cmetrack::db::db::Db;
    use cmetrack::db::employees::Employees;
    use cmetrack::db::trainings::Trainings;
    use cmetrack::libs::employee::EmployeeInput;
    use cmetrack::libs::export::{
        Backup, ExportFormat, Exporter, ADMIN_HEADERS, EMPLOYEE_HEADERS, SUMMARY_HEADERS, TRAINING_HEADERS,
    };
    use std::io::{Cursor, Read};
    use cmetrack::libs::filter::DateWindow;
    use cmetrack::libs::summary::TrainingReport;
    use cmetrack::libs::training::TrainingInput;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("export.db")).unwrap();

            let jane = Employees::new(&db.conn)
                .create(serde_json::from_str::<EmployeeInput>(r#"{"fullName": "Jane Doe", "department": "ICU"}"#).unwrap())
                .unwrap();
            Employees::new(&db.conn).create(EmployeeInput::with_name("Adam Smith")).unwrap();
            let mut training: TrainingInput = serde_json::from_str(
                r#"{"trainingType": "Workshop", "content": "Sepsis", "totalHour": 8, "startDate": "2024-03-04", "endDate": "2024-03-05"}"#,
            )
            .unwrap();
            training.employee_ids = Some(vec![jane.id]);
            Trainings::new(&db.conn).create(training).unwrap();
            Admins::new(&db.conn).create("admin", "secret").unwrap();

            ExportTestContext { temp_dir, db }
        }
    }

    fn read_part(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }

    fn between<'a>(text: &'a str, open: &str, close: &str) -> &'a str {
        let start = text.find(open).unwrap() + open.len();
        let end = text[start..].find(close).unwrap();
        &text[start..start + end]
    }

    fn sheet_names(workbook_xml: &str) -> Vec<String> {
        workbook_xml
            .split("<sheet ")
            .skip(1)
            .map(|sheet| between(sheet, "name=\"", "\"").to_string())
            .collect()
    }

    fn shared_strings(xml: &str) -> Vec<String> {
        xml.split("<si>")
            .skip(1)
            .map(|item| between(item, ">", "</t>").to_string())
            .collect()
    }

    /// Texts of the first row, resolved through the shared string table.
    fn header_row(sheet_xml: &str, strings: &[String]) -> Vec<String> {
        between(sheet_xml, "<row r=\"1\"", "</row>")
            .split("<v>")
            .skip(1)
            .map(|cell| strings[between(cell, "", "</v>").parse::<usize>().unwrap()].clone())
            .collect()
    }

    fn march() -> DateWindow {
        DateWindow::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()).unwrap()
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_backup_snapshot(ctx: &mut ExportTestContext) {
        let backup = Backup::load(&ctx.db.conn).unwrap();

        assert_eq!(backup.employees.len(), 2);
        assert_eq!(backup.trainings.len(), 1);
        assert_eq!(backup.admins.len(), 1);
        let jane = backup.summaries.iter().find(|s| s.full_name == "Jane Doe").unwrap();
        assert_eq!(jane.total_training_hours, 8.0);
        assert_eq!(jane.training_list, "Workshop - Sepsis");

        let bytes = backup.to_xlsx().unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(backup.file_name().starts_with("backup_"));
        assert!(backup.file_name().ends_with(".xlsx"));
        assert!(!backup.file_name().contains(':'));
    }

    #[test]
    fn test_backup_of_empty_database() {
        let db = Db::in_memory().unwrap();
        let backup = Backup::load(&db.conn).unwrap();
        assert!(backup.employees.is_empty());

        let mut archive = zip::ZipArchive::new(Cursor::new(backup.to_xlsx().unwrap())).unwrap();
        assert_eq!(
            sheet_names(&read_part(&mut archive, "xl/workbook.xml")),
            vec!["Employees", "Training Records", "Training Summary", "Admins"]
        );

        let strings = shared_strings(&read_part(&mut archive, "xl/sharedStrings.xml"));
        let expected: [&[&str]; 4] = [&EMPLOYEE_HEADERS, &TRAINING_HEADERS, &SUMMARY_HEADERS, &ADMIN_HEADERS];
        for (i, headers) in expected.iter().enumerate() {
            let sheet = read_part(&mut archive, &format!("xl/worksheets/sheet{}.xml", i + 1));
            assert_eq!(header_row(&sheet, &strings), headers.to_vec(), "sheet {}", i + 1);
            assert!(!sheet.contains("<row r=\"2\""), "sheet {} has data rows", i + 1);
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_report_csv(ctx: &mut ExportTestContext) {
        let report = TrainingReport::load(&ctx.db.conn, march()).unwrap();
        assert_eq!(report.rows.len(), 1);

        let csv = String::from_utf8(report.render(ExportFormat::Csv).unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("No.,Full name,Date of birth,Position,Department,Training types,Total hours")
        );
        assert_eq!(lines.next(), Some("1,Jane Doe,,,ICU,Workshop,8"));
        assert_eq!(report.file_name(ExportFormat::Csv), "training_report_2024-03-01_2024-03-31.csv");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_report_json(ctx: &mut ExportTestContext) {
        let report = TrainingReport::load(&ctx.db.conn, march()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&report.render(ExportFormat::Json).unwrap()).unwrap();

        assert_eq!(value["window"]["start"], "2024-03-01");
        assert_eq!(value["rows"][0]["fullName"], "Jane Doe");
        assert_eq!(value["rows"][0]["totalHours"], 8.0);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_exporter_writes_files(ctx: &mut ExportTestContext) {
        let backup_path = ctx.temp_dir.path().join("backup.xlsx");
        let written = Exporter::new(Some(backup_path.clone()))
            .write_backup(&Backup::load(&ctx.db.conn).unwrap())
            .unwrap();
        assert_eq!(written, backup_path);
        assert!(backup_path.exists());

        let report_path = ctx.temp_dir.path().join("report.xlsx");
        let report = TrainingReport::load(&ctx.db.conn, march()).unwrap();
        Exporter::new(Some(report_path.clone())).write_report(&report, ExportFormat::Xlsx).unwrap();
        assert!(std::fs::read(&report_path).unwrap().starts_with(b"PK"));
    }
}
