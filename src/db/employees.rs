use super::trainings::Trainings;
use crate::libs::employee::{Employee, EmployeeInput};
use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_COLUMNS: &str = "id, full_name, birth_date, gender, position, specialization, department, join_date, \
    license_number, license_issue_date, license_issuer, practice_scope, created_at, updated_at";

const SELECT_ALL_EMPLOYEES: &str = "SELECT id, full_name, birth_date, gender, position, specialization, department, join_date, \
    license_number, license_issue_date, license_issuer, practice_scope, created_at, updated_at \
    FROM employees ORDER BY full_name COLLATE NOCASE, id";
const INSERT_EMPLOYEE: &str = "INSERT INTO employees
    (full_name, birth_date, gender, position, specialization, department, join_date,
     license_number, license_issue_date, license_issuer, practice_scope, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_EMPLOYEE: &str = "UPDATE employees SET
    full_name = ?2, birth_date = ?3, gender = ?4, position = ?5, specialization = ?6, department = ?7,
    join_date = ?8, license_number = ?9, license_issue_date = ?10, license_issuer = ?11,
    practice_scope = ?12, updated_at = ?13
    WHERE id = ?1";
const DELETE_EMPLOYEE: &str = "DELETE FROM employees WHERE id = ?1";

pub struct Employees<'a> {
    conn: &'a Connection,
}

impl<'a> Employees<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All employees by name. `include_trainings` embeds each one's records.
    pub fn list(&self, include_trainings: bool) -> RecordResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_EMPLOYEES)?;
        let mut employees = stmt.query_map([], employee_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;

        if include_trainings {
            let mut trainings = Trainings::new(self.conn).by_employee()?;
            for employee in &mut employees {
                employee.training_records = Some(trainings.remove(&employee.id).unwrap_or_default());
            }
        }
        Ok(employees)
    }

    pub fn get(&self, id: i64) -> RecordResult<Employee> {
        let mut employee = self.find(id)?;
        employee.training_records = Some(Trainings::new(self.conn).for_employee(id)?);
        Ok(employee)
    }

    pub fn create(&self, input: EmployeeInput) -> RecordResult<Employee> {
        let employee = input.into_employee()?;
        let id = insert(self.conn, &employee)?;
        tracing::debug!(id, "employee created");
        self.find(id)
    }

    /// Applies a partial update. Absent fields stay as they are.
    pub fn update(&self, id: i64, input: EmployeeInput) -> RecordResult<Employee> {
        let mut employee = self.find(id)?;
        input.apply_to(&mut employee)?;

        self.conn.execute(
            UPDATE_EMPLOYEE,
            params![
                id,
                employee.full_name,
                employee.birth_date,
                employee.gender,
                employee.position,
                employee.specialization,
                employee.department,
                employee.join_date,
                employee.license_number,
                employee.license_issue_date,
                employee.license_issuer,
                employee.practice_scope,
                employee.updated_at,
            ],
        )?;
        self.find(id)
    }

    /// Deletes the employee and its association rows. Training records stay.
    pub fn delete(&self, id: i64) -> RecordResult<()> {
        let affected = self.conn.execute(DELETE_EMPLOYEE, params![id])?;
        if affected == 0 {
            return Err(RecordError::NotFound(Message::EmployeeNotFound(id)));
        }
        Ok(())
    }

    /// Inserts every row or none of them.
    ///
    /// A bad row aborts the batch with a `Validation` error naming its
    /// 1-based position.
    pub fn import(&self, rows: Vec<EmployeeInput>) -> RecordResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let count = rows.len();

        for (position, row) in rows.into_iter().enumerate() {
            let employee = row
                .into_employee()
                .map_err(|e| RecordError::validation(Message::ImportRowInvalid(position + 1, e.to_string())))?;
            insert(&tx, &employee).inspect_err(|e| tracing::error!(row = position + 1, error = %e, "import aborted"))?;
        }

        tx.commit()?;
        tracing::info!(count, "employees imported");
        Ok(count)
    }

    fn find(&self, id: i64) -> RecordResult<Employee> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS);
        self.conn
            .query_row(&sql, params![id], employee_from_row)
            .optional()?
            .ok_or(RecordError::NotFound(Message::EmployeeNotFound(id)))
    }
}

fn insert(conn: &Connection, employee: &Employee) -> RecordResult<i64> {
    conn.execute(
        INSERT_EMPLOYEE,
        params![
            employee.full_name,
            employee.birth_date,
            employee.gender,
            employee.position,
            employee.specialization,
            employee.department,
            employee.join_date,
            employee.license_number,
            employee.license_issue_date,
            employee.license_issuer,
            employee.practice_scope,
            employee.created_at,
            employee.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn employee_from_row(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        full_name: row.get(1)?,
        birth_date: row.get(2)?,
        gender: row.get(3)?,
        position: row.get(4)?,
        specialization: row.get(5)?,
        department: row.get(6)?,
        join_date: row.get(7)?,
        license_number: row.get(8)?,
        license_issue_date: row.get(9)?,
        license_issuer: row.get(10)?,
        practice_scope: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
        training_records: None,
    })
}
