use crate::libs::employee::EmployeeRef;
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use crate::libs::training::{TrainingInput, TrainingRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

pub(crate) const TRAINING_COLUMNS: &str = "t.id, t.training_index, t.training_type, t.content, t.organizer, \
    t.total_hour, t.time_description, t.start_date, t.end_date, t.created_at, t.updated_at";

const SELECT_TRAINING_BY_ID: &str = "SELECT t.id, t.training_index, t.training_type, t.content, t.organizer, \
    t.total_hour, t.time_description, t.start_date, t.end_date, t.created_at, t.updated_at \
    FROM training_records t WHERE t.id = ?1";
const INSERT_TRAINING: &str = "INSERT INTO training_records
    (training_index, training_type, content, organizer, total_hour, time_description, start_date, end_date, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_TRAINING: &str = "UPDATE training_records SET
    training_type = ?2, content = ?3, organizer = ?4, total_hour = ?5, time_description = ?6,
    start_date = ?7, end_date = ?8, updated_at = ?9
    WHERE id = ?1";
const DELETE_TRAINING: &str = "DELETE FROM training_records WHERE id = ?1";
// One statement, so two writers can never read the same counter value.
const NEXT_TRAINING_INDEX: &str = "UPDATE sequences
    SET value = MAX(value, (SELECT COALESCE(MAX(training_index), 0) FROM training_records)) + 1
    WHERE name = 'training_index'
    RETURNING value";
const SELECT_EMPLOYEE_EXISTS: &str = "SELECT 1 FROM employees WHERE id = ?1";
const INSERT_LINK: &str = "INSERT OR IGNORE INTO employee_trainings (employee_id, training_id) VALUES (?1, ?2)";
const DELETE_LINKS_OF_TRAINING: &str = "DELETE FROM employee_trainings WHERE training_id = ?1";
const SELECT_EMPLOYEES_OF_TRAINING: &str = "
    SELECT e.id, e.full_name FROM employees e
    JOIN employee_trainings et ON e.id = et.employee_id
    WHERE et.training_id = ?1
    ORDER BY e.full_name COLLATE NOCASE, e.id
";
const SELECT_ALL_LINKED_EMPLOYEES: &str = "
    SELECT et.training_id, e.id, e.full_name FROM employees e
    JOIN employee_trainings et ON e.id = et.employee_id
    ORDER BY e.full_name COLLATE NOCASE, e.id
";
const CHRONOLOGICAL: &str = "t.start_date IS NULL, t.start_date ASC, t.training_index ASC";

/// Sort orders for training listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOrder {
    /// Newest start date first, undated records last.
    StartDateDesc,
    /// Display index ascending (the management view).
    IndexAsc,
}

impl TrainingOrder {
    fn clause(self) -> &'static str {
        match self {
            TrainingOrder::StartDateDesc => "t.start_date IS NULL, t.start_date DESC, t.training_index ASC",
            TrainingOrder::IndexAsc => "t.training_index ASC",
        }
    }
}

pub struct Trainings<'a> {
    conn: &'a Connection,
}

impl<'a> Trainings<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self, order: TrainingOrder, include_employees: bool) -> RecordResult<Vec<TrainingRecord>> {
        let sql = format!("SELECT {} FROM training_records t ORDER BY {}", TRAINING_COLUMNS, order.clause());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut records = stmt
            .query_map([], |row| training_from_row(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if include_employees {
            let mut links = self.employees_by_training()?;
            for record in &mut records {
                record.employees = Some(links.remove(&record.id).unwrap_or_default());
            }
        }
        Ok(records)
    }

    /// A single record with its employees embedded.
    pub fn get(&self, id: i64) -> RecordResult<TrainingRecord> {
        let mut record = self.find(id)?;
        record.employees = Some(self.employees_of(id)?);
        Ok(record)
    }

    /// Inserts a record under the next display index and connects `employeeIds`.
    pub fn create(&self, input: TrainingInput) -> RecordResult<TrainingRecord> {
        let employee_ids = input.employee_ids().unwrap_or_default();
        let record = input.into_record()?;

        let tx = self.conn.unchecked_transaction()?;
        let index: i64 = tx.query_row(NEXT_TRAINING_INDEX, [], |row| row.get(0))?;
        tx.execute(
            INSERT_TRAINING,
            params![
                index,
                record.training_type,
                record.content,
                record.organizer,
                record.total_hour,
                record.time_description,
                record.start_date,
                record.end_date,
                record.created_at,
                record.updated_at,
            ],
        )?;
        let id = tx.last_insert_rowid();
        connect_employees(&tx, id, &employee_ids)?;
        tx.commit()?;

        tracing::debug!(id, index, linked = employee_ids.len(), "training record created");
        self.get(id)
    }

    /// Patches the record's fields. With `replace_employees`, a supplied
    /// `employeeIds` also replaces the association set in the same transaction;
    /// otherwise `employeeIds` is ignored.
    ///
    /// All-or-nothing: an unknown employee id leaves fields and set untouched.
    pub fn update(&self, id: i64, input: &TrainingInput, replace_employees: bool) -> RecordResult<TrainingRecord> {
        let tx = self.conn.unchecked_transaction()?;
        let mut record = self.find(id)?;
        input.apply_to(&mut record)?;

        tx.execute(
            UPDATE_TRAINING,
            params![
                id,
                record.training_type,
                record.content,
                record.organizer,
                record.total_hour,
                record.time_description,
                record.start_date,
                record.end_date,
                record.updated_at,
            ],
        )?;

        if replace_employees {
            if let Some(employee_ids) = input.employee_ids() {
                replace_employees_of(&tx, id, &employee_ids)?;
            }
        }
        tx.commit()?;

        self.get(id)
    }

    /// Deletes the record. Its association rows cascade; employees stay.
    pub fn delete(&self, id: i64) -> RecordResult<()> {
        let affected = self.conn.execute(DELETE_TRAINING, params![id])?;
        if affected == 0 {
            return Err(RecordError::NotFound(Message::TrainingNotFound(id)));
        }
        Ok(())
    }

    /// An employee's records, oldest start date first.
    pub fn for_employee(&self, employee_id: i64) -> RecordResult<Vec<TrainingRecord>> {
        let sql = format!(
            "SELECT {} FROM training_records t
             JOIN employee_trainings et ON t.id = et.training_id
             WHERE et.employee_id = ?1
             ORDER BY {}",
            TRAINING_COLUMNS, CHRONOLOGICAL
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![employee_id], |row| training_from_row(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Every employee's records in one pass, keyed by employee id.
    pub fn by_employee(&self) -> RecordResult<HashMap<i64, Vec<TrainingRecord>>> {
        let sql = format!(
            "SELECT et.employee_id, {} FROM training_records t
             JOIN employee_trainings et ON t.id = et.training_id
             ORDER BY {}",
            TRAINING_COLUMNS, CHRONOLOGICAL
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, training_from_row(row, 1)?)))?;

        let mut map: HashMap<i64, Vec<TrainingRecord>> = HashMap::new();
        for row in rows {
            let (employee_id, record) = row?;
            map.entry(employee_id).or_default().push(record);
        }
        Ok(map)
    }

    fn find(&self, id: i64) -> RecordResult<TrainingRecord> {
        self.conn
            .query_row(SELECT_TRAINING_BY_ID, params![id], |row| training_from_row(row, 0))
            .optional()?
            .ok_or(RecordError::NotFound(Message::TrainingNotFound(id)))
    }

    fn employees_of(&self, id: i64) -> RecordResult<Vec<EmployeeRef>> {
        let mut stmt = self.conn.prepare(SELECT_EMPLOYEES_OF_TRAINING)?;
        let employees = stmt
            .query_map(params![id], |row| {
                Ok(EmployeeRef {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    fn employees_by_training(&self) -> RecordResult<HashMap<i64, Vec<EmployeeRef>>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_LINKED_EMPLOYEES)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                EmployeeRef {
                    id: row.get(1)?,
                    full_name: row.get(2)?,
                },
            ))
        })?;

        let mut map: HashMap<i64, Vec<EmployeeRef>> = HashMap::new();
        for row in rows {
            let (training_id, employee) = row?;
            map.entry(training_id).or_default().push(employee);
        }
        Ok(map)
    }
}

/// Maps the `TRAINING_COLUMNS` projection starting at column `offset`.
pub(crate) fn training_from_row(row: &Row, offset: usize) -> rusqlite::Result<TrainingRecord> {
    Ok(TrainingRecord {
        id: row.get(offset)?,
        training_index: row.get(offset + 1)?,
        training_type: row.get(offset + 2)?,
        content: row.get(offset + 3)?,
        organizer: row.get(offset + 4)?,
        total_hour: row.get(offset + 5)?,
        time_description: row.get(offset + 6)?,
        start_date: row.get(offset + 7)?,
        end_date: row.get(offset + 8)?,
        created_at: row.get(offset + 9)?,
        updated_at: row.get(offset + 10)?,
        employees: None,
    })
}

fn connect_employees(conn: &Connection, training_id: i64, employee_ids: &[i64]) -> RecordResult<()> {
    for employee_id in employee_ids {
        let exists = conn
            .query_row(SELECT_EMPLOYEE_EXISTS, params![employee_id], |_| Ok(()))
            .optional()?;
        if exists.is_none() {
            return Err(RecordError::NotFound(Message::EmployeeNotFound(*employee_id)));
        }
        conn.execute(INSERT_LINK, params![employee_id, training_id])?;
    }
    Ok(())
}

fn replace_employees_of(conn: &Connection, training_id: i64, employee_ids: &[i64]) -> RecordResult<()> {
    conn.execute(DELETE_LINKS_OF_TRAINING, params![training_id])?;
    connect_employees(conn, training_id, employee_ids)
}
