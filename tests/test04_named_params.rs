use std::collections::HashMap;

use serde::Serialize;
use sql_nullable::prelude::*;

#[derive(Serialize)]
struct Filter {
    first_name: String,
    #[serde(rename = "min_age")]
    age: Nullable<u8>,
    #[serde(skip)]
    #[allow(dead_code)]
    internal: u32,
}

#[test]
fn struct_fields_become_parameters() {
    let args = NamedArgs::from_serialize(&Filter {
        first_name: "Bob".into(),
        age: Nullable::Absent,
        internal: 9,
    })
    .unwrap();
    assert_eq!(args.len(), 2);

    let query = NamedQuery::parse(
        "SELECT * FROM students WHERE first_name = :first_name AND (:min_age IS NULL OR age >= :min_age)",
        PlaceholderStyle::Postgres,
    )
    .unwrap();
    assert_eq!(
        query.sql(),
        "SELECT * FROM students WHERE first_name = $1 AND ($2 IS NULL OR age >= $2)"
    );
    assert_eq!(query.names(), ["first_name", "min_age"]);
    assert_eq!(
        query.bind(&args).unwrap(),
        vec![DriverValue::Text("Bob".into()), DriverValue::Null]
    );
}

#[test]
fn literals_comments_and_casts_are_left_alone() {
    let sql = "SELECT ':skip', \":quoted\", id::text -- :comment\n\
               FROM t /* :block */ WHERE a = :a AND b = $$ :body $$";
    let query = NamedQuery::parse(sql, PlaceholderStyle::Sqlite).unwrap();
    assert_eq!(
        query.sql(),
        "SELECT ':skip', \":quoted\", id::text -- :comment\n\
         FROM t /* :block */ WHERE a = ?1 AND b = $$ :body $$"
    );
    assert_eq!(query.names(), ["a"]);
}

#[test]
fn missing_parameter_is_reported_by_name() {
    let query =
        NamedQuery::parse("SELECT :present, :missing", PlaceholderStyle::Sqlite).unwrap();
    let mut values = HashMap::new();
    values.insert("present".to_string(), DriverValue::Int(1));
    let err = query.bind(&values).unwrap_err();
    assert!(matches!(err, SqlNullableError::MissingParameter(name) if name == "missing"));
}

#[test]
fn non_struct_parameters_are_rejected() {
    assert!(matches!(
        NamedArgs::from_serialize(&[1, 2, 3]),
        Err(SqlNullableError::ParameterError(_))
    ));
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use rusqlite::Connection;
    use sql_nullable::prelude::*;
    use sql_nullable::sqlite::select_named;

    #[test]
    fn named_select_runs_against_sqlite() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE students (first_name TEXT, age INTEGER);
             INSERT INTO students VALUES ('Bob', 20), ('Bob', NULL), ('Eve', 30);",
        )
        .unwrap();

        let query = NamedQuery::parse(
            "SELECT age FROM students WHERE first_name = :name ORDER BY age",
            PlaceholderStyle::Sqlite,
        )
        .unwrap();
        let args = NamedArgs::new().with("name", "Bob");
        let ages: Vec<(Nullable<i64>,)> = select_named(&conn, &query, &args)
            .unwrap()
            .map_rows()
            .unwrap();
        assert_eq!(ages, vec![(Nullable::Absent,), (Nullable::Present(20),)]);
    }

    #[test]
    fn postgres_placeholders_are_refused() {
        let conn = Connection::open_in_memory().unwrap();
        let query = NamedQuery::parse("SELECT :x", PlaceholderStyle::Postgres).unwrap();
        let args = NamedArgs::new().with("x", &1_i64);
        assert!(matches!(
            select_named(&conn, &query, &args),
            Err(SqlNullableError::ParameterError(_))
        ));
    }
}
