#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use cmetrack::libs::employee::EmployeeInput;
    use cmetrack::libs::error::RecordError;
    use cmetrack::libs::fields::{parse_date, parse_instant, parse_optional_date, HourValue};
    use cmetrack::libs::training::TrainingInput;

    #[test]
    fn test_hour_value_accepts_numbers_and_numeric_text() {
        assert_eq!(HourValue::Number(8.0).to_hours().unwrap(), Some(8.0));
        assert_eq!(HourValue::Text("4.5".into()).to_hours().unwrap(), Some(4.5));
        assert_eq!(HourValue::Text(" 12 ".into()).to_hours().unwrap(), Some(12.0));
        assert_eq!(HourValue::Text("".into()).to_hours().unwrap(), None);
        assert_eq!(HourValue::Text("   ".into()).to_hours().unwrap(), None);
    }

    #[test]
    fn test_hour_value_rejects_garbage_and_negatives() {
        assert!(matches!(HourValue::Text("abc".into()).to_hours(), Err(RecordError::Validation(_))));
        assert!(matches!(HourValue::Number(-1.0).to_hours(), Err(RecordError::Validation(_))));
        assert!(matches!(HourValue::Text("-0.5".into()).to_hours(), Err(RecordError::Validation(_))));
    }

    #[test]
    fn test_parse_instant_shapes() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-03-01").unwrap(), Some(midnight));
        assert_eq!(parse_instant("2024-03-01T00:00:00Z").unwrap(), Some(midnight));
        assert_eq!(parse_instant("2024-03-01T07:00:00+07:00").unwrap(), Some(midnight));
        assert_eq!(parse_instant("2024-03-01T00:00:00.000").unwrap(), Some(midnight));
        assert_eq!(parse_instant("").unwrap(), None);
        assert!(parse_instant("01/03/2024").is_err());
    }

    #[test]
    fn test_parse_date_reduces_instants() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_date("2024-02-29").unwrap(), date);
        assert_eq!(parse_date("2024-02-29T23:00:00Z").unwrap(), date);
        assert_eq!(parse_optional_date(Some(" ")).unwrap(), None);
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_nullable_distinguishes_absent_and_null() {
        let input: EmployeeInput = serde_json::from_str(r#"{"position": null, "department": "ICU"}"#).unwrap();
        assert_eq!(input.full_name, None);
        assert_eq!(input.position, Some(None));
        assert_eq!(input.department, Some(Some("ICU".to_string())));
    }

    #[test]
    fn test_training_input_accepts_string_hours() {
        let input: TrainingInput =
            serde_json::from_str(r#"{"trainingType": "Workshop", "totalHour": "4.5", "employeeIds": [2, 1, 2]}"#).unwrap();
        let record = input.clone().into_record().unwrap();
        assert_eq!(record.total_hour, Some(4.5));
        assert_eq!(input.employee_ids(), Some(vec![2, 1]));
    }

    #[test]
    fn test_training_input_rejects_bad_hours_without_mutating() {
        let input: TrainingInput = serde_json::from_str(r#"{"trainingType": "Changed", "totalHour": "lots"}"#).unwrap();
        let mut record = TrainingInput::with_type("Original").into_record().unwrap();
        assert!(input.apply_to(&mut record).is_err());
        assert_eq!(record.training_type, "Original");
    }
}
