use rusqlite::Connection;
use serde::Serialize;
use sql_nullable::prelude::*;
use sql_nullable::sqlite;

use crate::args::DemoConfig;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER,
    enrolled_at TEXT
);
DELETE FROM students;
";

/// A score that also accepts booleans, counting `true` as one point.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Score {
    points: i64,
}

impl Scannable for Score {
    fn scan(value: &DriverValue) -> Result<Self, ConversionError> {
        match value {
            DriverValue::Int(points) => Ok(Score { points: *points }),
            DriverValue::Bool(passed) => Ok(Score {
                points: i64::from(*passed),
            }),
            other => Err(ConversionError::unsupported(other.kind(), "Score")),
        }
    }
}

impl Bindable for Score {
    fn bind(&self) -> DriverValue {
        DriverValue::Int(self.points)
    }
}

#[derive(Debug)]
struct Student {
    first_name: String,
    last_name: String,
    age: Nullable<u32>,
    enrolled_at: Nullable<chrono::NaiveDate>,
}

impl FromRow for Student {
    fn from_row(row: &Row) -> Result<Self, SqlNullableError> {
        Ok(Student {
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            age: row.try_get("age")?,
            enrolled_at: row.try_get("enrolled_at")?,
        })
    }
}

#[derive(Serialize)]
struct NameFilter<'a> {
    first_name: &'a str,
    last_name: &'a str,
}

pub(crate) fn run(config: &DemoConfig) -> Result<(), SqlNullableError> {
    let conn = Connection::open(&config.database)?;
    seed(&conn)?;

    scan_null(&conn)?;
    single_row(&conn)?;
    filtered(&conn, config.min_age)?;
    named(&conn, config)?;
    custom_type(&conn)?;
    exec_and_transaction(&conn)?;
    Ok(())
}

fn seed(conn: &Connection) -> Result<(), SqlNullableError> {
    conn.execute_batch(SCHEMA)?;
    let insert = "INSERT INTO students (first_name, last_name, age, enrolled_at) \
                  VALUES (?1, ?2, ?3, ?4)";
    let enrolled = chrono::NaiveDate::from_ymd_opt(2023, 9, 1);
    let students: [(&str, &str, Nullable<u32>, Option<chrono::NaiveDate>); 4] = [
        ("Bob", "Brown", Nullable::Present(21), enrolled),
        ("Alice", "Smith", Nullable::Present(17), enrolled),
        ("Carol", "Brown", Nullable::Absent, None),
        ("Dave", "Jones", Nullable::Present(0), enrolled),
    ];
    for (first_name, last_name, age, enrolled_at) in &students {
        sqlite::execute(conn, insert, &bind_all(&[first_name, last_name, age, enrolled_at]))?;
    }
    tracing::info!(students = students.len(), "seeded students table");
    Ok(())
}

fn scan_null(conn: &Connection) -> Result<(), SqlNullableError> {
    // A plain integer cannot hold NULL.
    if let Err(err) = conn.query_row("SELECT NULL", [], |row| row.get::<_, i64>(0)) {
        tracing::info!(error = %err, "error scan into i64");
    }
    if let Err(err) = scan::<i64>(&DriverValue::Null) {
        tracing::info!(error = %err, "error scan into i64 via adapter");
    }

    let number: i64 = conn.query_row("SELECT COALESCE(NULL, -1) AS some_field", [], |row| {
        row.get(0)
    })?;
    tracing::info!(number, "COALESCE substitutes a default");

    let optional: Option<i64> = conn.query_row("SELECT NULL", [], |row| row.get(0))?;
    tracing::info!(?optional, "Option<i64> needs a check before use");

    let nullable: Nullable<i64> = conn.query_row("SELECT NULL", [], |row| row.get(0))?;
    tracing::info!(
        nullable = %nullable,
        present = nullable.is_present(),
        "Nullable<i64> keeps NULL apart from zero"
    );

    let ages = sqlite::select(conn, "SELECT age FROM students ORDER BY id", &[])?;
    for (age,) in ages.map_rows::<(Nullable<u32>,)>()? {
        match age.value() {
            Some(age) => tracing::info!(age, "value of age"),
            None => tracing::info!("age is NULL"),
        }
    }
    Ok(())
}

fn single_row(conn: &Connection) -> Result<(), SqlNullableError> {
    let (total,): (u32,) = sqlite::select(conn, "SELECT count(*) FROM students", &[])?.first()?;
    tracing::info!(total, "total students");

    let rs = sqlite::select(
        conn,
        "SELECT id FROM students WHERE age = ?1",
        &bind_all(&[&10_000_u32]),
    )?;
    match rs.first::<(i64,)>() {
        Ok((id,)) => tracing::info!(id, "found a long-lived student"),
        Err(SqlNullableError::NoRows) => tracing::info!("no student with age = 10000"),
        Err(err) => return Err(err),
    }
    Ok(())
}

fn filtered(conn: &Connection, min_age: u32) -> Result<(), SqlNullableError> {
    let rs = sqlite::select(
        conn,
        "SELECT first_name, last_name, age, enrolled_at FROM students \
         WHERE age >= ?1 ORDER BY id",
        &bind_all(&[&min_age]),
    )?;
    let students: Vec<Student> = rs.map_rows()?;
    for student in &students {
        tracing::info!(
            first_name = %student.first_name,
            last_name = %student.last_name,
            age = %student.age,
            enrolled_at = %student.enrolled_at,
            "student"
        );
    }
    tracing::info!(min_age, count = students.len(), "students at or above age");
    Ok(())
}

fn named(conn: &Connection, config: &DemoConfig) -> Result<(), SqlNullableError> {
    let query = NamedQuery::parse(
        "SELECT first_name, last_name, age, enrolled_at FROM students \
         WHERE first_name = :first_name OR last_name = :last_name ORDER BY id",
        config.placeholder_style,
    )?;
    if query.style() != PlaceholderStyle::Sqlite {
        tracing::info!(sql = query.sql(), "rewritten query, not executed against SQLite");
        return Ok(());
    }
    let args = NamedArgs::from_serialize(&NameFilter {
        first_name: &config.first_name,
        last_name: &config.last_name,
    })?;
    let students: Vec<Student> = sqlite::select_named(conn, &query, &args)?.map_rows()?;
    tracing::info!(sql = query.sql(), matches = students.len(), "named query");
    for student in students {
        tracing::info!(?student, "named match");
    }
    Ok(())
}

fn custom_type(conn: &Connection) -> Result<(), SqlNullableError> {
    let rs = sqlite::select(conn, "SELECT 5, NULL, x'00'", &[])?;
    let row = rs.rows().first().ok_or(SqlNullableError::NoRows)?;

    let score: Nullable<Score> = row.try_get_by_index(0)?;
    tracing::info!(?score, "custom type from an integer");
    let missing: Nullable<Score> = row.try_get_by_index(1)?;
    tracing::info!(?missing, "custom type from NULL");
    if let Err(err) = row.try_get_by_index::<Nullable<Score>>(2) {
        tracing::info!(error = %err, "custom type rejects a blob");
    }

    match scan::<Score>(&DriverValue::Bool(true)) {
        Ok(passed) => tracing::info!(points = passed.points, "a passed check counts as one point"),
        Err(err) => tracing::warn!(error = %err, "boolean score rejected"),
    }
    Ok(())
}

fn exec_and_transaction(conn: &Connection) -> Result<(), SqlNullableError> {
    let update = NamedQuery::parse(
        "UPDATE students SET age = age + 1 WHERE id = :id",
        PlaceholderStyle::Sqlite,
    )?;

    let missing = update.bind(&NamedArgs::new().with("id", &1_234_567_i64))?;
    let rows_affected = sqlite::execute(conn, update.sql(), &missing)?;
    tracing::info!(rows_affected, "update of an unknown student");

    conn.execute_batch("BEGIN")?;
    let existing = update.bind(&NamedArgs::new().with("id", &1_i64))?;
    let rows_affected = match sqlite::execute(conn, update.sql(), &existing) {
        Ok(rows_affected) => rows_affected,
        Err(err) => {
            conn.execute_batch("ROLLBACK")?;
            return Err(err);
        }
    };
    conn.execute_batch("COMMIT")?;
    tracing::info!(rows_affected, "transaction is committed");
    Ok(())
}
