#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use cmetrack::db::db::Db;
    use cmetrack::db::employees::Employees;
    use cmetrack::db::trainings::{TrainingOrder, Trainings};
    use cmetrack::libs::employee::EmployeeInput;
    use cmetrack::libs::error::RecordError;
    use cmetrack::libs::training::TrainingInput;
    use test_context::{test_context, TestContext};

    struct TrainingsTestContext {
        db: Db,
    }

    impl TestContext for TrainingsTestContext {
        fn setup() -> Self {
            TrainingsTestContext {
                db: Db::in_memory().unwrap(),
            }
        }
    }

    fn input(json: &str) -> TrainingInput {
        serde_json::from_str(json).unwrap()
    }

    fn employee(ctx: &TrainingsTestContext, name: &str) -> i64 {
        Employees::new(&ctx.db.conn).create(EmployeeInput::with_name(name)).unwrap().id
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_display_index_starts_at_one_and_increments(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        let first = trainings.create(TrainingInput::with_type("A")).unwrap();
        let second = trainings.create(TrainingInput::with_type("B")).unwrap();

        assert_eq!(first.training_index, 1);
        assert_eq!(second.training_index, 2);
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_display_index_is_not_reused_after_delete(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        trainings.create(TrainingInput::with_type("A")).unwrap();
        let last = trainings.create(TrainingInput::with_type("B")).unwrap();
        trainings.delete(last.id).unwrap();

        let next = trainings.create(TrainingInput::with_type("C")).unwrap();
        assert_eq!(next.training_index, 3);
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_create_parses_fields(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        let record = trainings
            .create(input(
                r#"{"trainingType": "Conference", "totalHour": "4.5", "startDate": "2024-03-01", "endDate": "2024-03-02T12:00:00Z", "content": ""}"#,
            ))
            .unwrap();

        assert_eq!(record.total_hour, Some(4.5));
        assert_eq!(record.start_date, Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(record.end_date, Some(Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap()));
        assert_eq!(record.employees, Some(vec![]));
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_create_rejects_invalid_input(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        assert!(matches!(trainings.create(input(r#"{"content": "x"}"#)), Err(RecordError::Validation(_))));
        assert!(matches!(
            trainings.create(input(r#"{"trainingType": "A", "totalHour": "abc"}"#)),
            Err(RecordError::Validation(_))
        ));
        assert!(matches!(
            trainings.create(input(r#"{"trainingType": "A", "totalHour": -2}"#)),
            Err(RecordError::Validation(_))
        ));
        assert!(matches!(
            trainings.create(input(r#"{"trainingType": "A", "startDate": "yesterday"}"#)),
            Err(RecordError::Validation(_))
        ));
        assert!(trainings.list(TrainingOrder::IndexAsc, false).unwrap().is_empty());
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_create_connects_employees(ctx: &mut TrainingsTestContext) {
        let jane = employee(ctx, "Jane");
        let adam = employee(ctx, "Adam");
        let trainings = Trainings::new(&ctx.db.conn);

        let mut training = TrainingInput::with_type("Workshop");
        training.employee_ids = Some(vec![jane, adam, jane]);
        let record = trainings.create(training).unwrap();

        let names: Vec<String> = record.employees.unwrap().into_iter().map(|e| e.full_name).collect();
        assert_eq!(names, vec!["Adam", "Jane"]);

        let jane_records = Employees::new(&ctx.db.conn).get(jane).unwrap().training_records.unwrap();
        assert_eq!(jane_records.len(), 1);
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_create_with_unknown_employee_inserts_nothing(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        let mut training = TrainingInput::with_type("Workshop");
        training.employee_ids = Some(vec![404]);

        assert!(matches!(trainings.create(training), Err(RecordError::NotFound(_))));
        assert!(trainings.list(TrainingOrder::IndexAsc, false).unwrap().is_empty());

        // The rolled-back attempt did not consume an index.
        let record = trainings.create(TrainingInput::with_type("Workshop")).unwrap();
        assert_eq!(record.training_index, 1);
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_update_replaces_associations_only_when_asked(ctx: &mut TrainingsTestContext) {
        let jane = employee(ctx, "Jane");
        let adam = employee(ctx, "Adam");
        let trainings = Trainings::new(&ctx.db.conn);

        let mut training = TrainingInput::with_type("Workshop");
        training.employee_ids = Some(vec![jane]);
        let record = trainings.create(training).unwrap();

        let patch = input(&format!(r#"{{"content": "Sepsis", "employeeIds": [{}]}}"#, adam));
        let updated = trainings.update(record.id, &patch, false).unwrap();
        assert_eq!(updated.content.as_deref(), Some("Sepsis"));
        assert_eq!(updated.employees.as_ref().unwrap()[0].id, jane);

        let updated = trainings.update(record.id, &patch, true).unwrap();
        let ids: Vec<i64> = updated.employees.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![adam]);
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_update_keeps_index_and_clears_with_null(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        let record = trainings
            .create(input(r#"{"trainingType": "A", "organizer": "MoH", "totalHour": 3}"#))
            .unwrap();

        let updated = trainings
            .update(record.id, &input(r#"{"organizer": null, "trainingIndex": 99, "totalHour": ""}"#), false)
            .unwrap();
        assert_eq!(updated.training_index, record.training_index);
        assert_eq!(updated.organizer, None);
        assert_eq!(updated.total_hour, None);
        assert_eq!(updated.training_type, "A");
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_replacing_employees_is_all_or_nothing(ctx: &mut TrainingsTestContext) {
        let jane = employee(ctx, "Jane");
        let trainings = Trainings::new(&ctx.db.conn);
        let mut training = TrainingInput::with_type("Workshop");
        training.employee_ids = Some(vec![jane]);
        let record = trainings.create(training).unwrap();

        let patch = input(&format!(r#"{{"content": "Sepsis", "employeeIds": [{}, 777]}}"#, jane));
        assert!(matches!(trainings.update(record.id, &patch, true), Err(RecordError::NotFound(_))));
        let kept = trainings.get(record.id).unwrap();
        assert_eq!(kept.content, None);
        let ids: Vec<i64> = kept.employees.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![jane]);

        trainings.update(record.id, &input(r#"{"employeeIds": []}"#), true).unwrap();
        assert_eq!(trainings.get(record.id).unwrap().employees, Some(vec![]));
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_delete_keeps_employees(ctx: &mut TrainingsTestContext) {
        let jane = employee(ctx, "Jane");
        let trainings = Trainings::new(&ctx.db.conn);
        let mut training = TrainingInput::with_type("Workshop");
        training.employee_ids = Some(vec![jane]);
        let record = trainings.create(training).unwrap();

        trainings.delete(record.id).unwrap();
        assert!(matches!(trainings.get(record.id), Err(RecordError::NotFound(_))));
        assert!(matches!(trainings.delete(record.id), Err(RecordError::NotFound(_))));

        let jane = Employees::new(&ctx.db.conn).get(jane).unwrap();
        assert_eq!(jane.training_records, Some(vec![]));
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_list_orders(ctx: &mut TrainingsTestContext) {
        let trainings = Trainings::new(&ctx.db.conn);
        trainings.create(input(r#"{"trainingType": "Old", "startDate": "2023-01-01"}"#)).unwrap();
        trainings.create(input(r#"{"trainingType": "Undated"}"#)).unwrap();
        trainings.create(input(r#"{"trainingType": "New", "startDate": "2024-06-01"}"#)).unwrap();

        let by_start: Vec<String> = trainings
            .list(TrainingOrder::StartDateDesc, false)
            .unwrap()
            .into_iter()
            .map(|r| r.training_type)
            .collect();
        assert_eq!(by_start, vec!["New", "Old", "Undated"]);

        let by_index: Vec<i64> = trainings
            .list(TrainingOrder::IndexAsc, true)
            .unwrap()
            .into_iter()
            .map(|r| r.training_index)
            .collect();
        assert_eq!(by_index, vec![1, 2, 3]);
    }

    #[test_context(TrainingsTestContext)]
    #[test]
    fn test_for_employee_is_chronological(ctx: &mut TrainingsTestContext) {
        let jane = employee(ctx, "Jane");
        let trainings = Trainings::new(&ctx.db.conn);
        for (kind, start) in [("Late", "2024-05-01"), ("Early", "2024-01-01")] {
            let mut training = input(&format!(r#"{{"trainingType": "{}", "startDate": "{}"}}"#, kind, start));
            training.employee_ids = Some(vec![jane]);
            trainings.create(training).unwrap();
        }

        let kinds: Vec<String> = trainings.for_employee(jane).unwrap().into_iter().map(|r| r.training_type).collect();
        assert_eq!(kinds, vec!["Early", "Late"]);
    }
}
