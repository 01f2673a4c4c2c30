//! Named query parameters.
//!
//! Rewrites `:name` parameters into the numbered positional placeholders a
//! driver understands, then binds values looked up by name in placeholder
//! order.
//! ```rust
//! use sql_nullable::prelude::*;
//!
//! let query = NamedQuery::parse(
//!     "SELECT age FROM students WHERE first_name = :first_name OR last_name = :last_name",
//!     PlaceholderStyle::Postgres,
//! )?;
//! assert_eq!(
//!     query.sql(),
//!     "SELECT age FROM students WHERE first_name = $1 OR last_name = $2"
//! );
//!
//! let args = NamedArgs::new()
//!     .with("last_name", "Brown")
//!     .with("first_name", "Bob");
//! let params = query.bind(&args)?;
//! assert_eq!(params[0], DriverValue::Text("Bob".into()));
//! # Ok::<(), SqlNullableError>(())
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value as JsonValue;

mod scanner;

use scanner::{State, matches_dollar_tag, scan_name, starts_with_at, try_start_dollar_quote};

use crate::adapter::Bindable;
use crate::error::SqlNullableError;
use crate::value::DriverValue;

/// Target placeholder style for rewritten queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// PostgreSQL-style placeholders like `$1`.
    Postgres,
    /// SQLite-style placeholders like `?1`.
    Sqlite,
}

impl PlaceholderStyle {
    fn push_placeholder(self, out: &mut String, position: usize) {
        out.push(match self {
            PlaceholderStyle::Postgres => '$',
            PlaceholderStyle::Sqlite => '?',
        });
        out.push_str(&position.to_string());
    }
}

/// A query whose named parameters were rewritten to positional ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    sql: String,
    names: Vec<String>,
    style: PlaceholderStyle,
}

impl NamedQuery {
    /// Rewrite every `:name` outside literals and comments.
    ///
    /// Quoted strings and identifiers, `--` and nested `/* */` comments,
    /// dollar-quoted bodies and `::` casts pass through untouched. A repeated
    /// name reuses its first placeholder number.
    ///
    /// # Errors
    ///
    /// Returns `SqlNullableError::ParameterError` if the query already holds
    /// a numbered positional placeholder (`$1`, `?1`), whose number would
    /// collide with the rewritten ones.
    pub fn parse(sql: &str, style: PlaceholderStyle) -> Result<Self, SqlNullableError> {
        let bytes = sql.as_bytes();
        let mut out = String::with_capacity(sql.len());
        let mut names: Vec<String> = Vec::new();
        let mut state = State::Normal;
        let mut copied = 0;
        let mut idx = 0;

        while idx < bytes.len() {
            let b = bytes[idx];
            match state {
                State::Normal => match b {
                    b'\'' => state = State::SingleQuoted,
                    b'"' => state = State::DoubleQuoted,
                    _ if starts_with_at(bytes, idx, b"--") => {
                        state = State::LineComment;
                        idx += 2;
                        continue;
                    }
                    _ if starts_with_at(bytes, idx, b"/*") => {
                        state = State::BlockComment(1);
                        idx += 2;
                        continue;
                    }
                    b'$' | b'?' if bytes.get(idx + 1).is_some_and(u8::is_ascii_digit) => {
                        return Err(SqlNullableError::ParameterError(format!(
                            "positional placeholder at byte {idx} cannot be mixed with named parameters"
                        )));
                    }
                    b'$' => {
                        if let Some((tag, end)) = try_start_dollar_quote(bytes, idx) {
                            state = State::DollarQuoted(tag);
                            idx = end + 1;
                            continue;
                        }
                    }
                    b':' if bytes.get(idx + 1) == Some(&b':') => {
                        idx += 2;
                        continue;
                    }
                    b':' => {
                        if let Some(end) = scan_name(bytes, idx + 1) {
                            let name = &sql[idx + 1..end];
                            let position = match names.iter().position(|n| n == name) {
                                Some(existing) => existing + 1,
                                None => {
                                    names.push(name.to_string());
                                    names.len()
                                }
                            };
                            out.push_str(&sql[copied..idx]);
                            style.push_placeholder(&mut out, position);
                            copied = end;
                            idx = end;
                            continue;
                        }
                    }
                    _ => {}
                },
                State::SingleQuoted | State::DoubleQuoted => {
                    let quote = if matches!(state, State::SingleQuoted) {
                        b'\''
                    } else {
                        b'"'
                    };
                    if b == quote {
                        if bytes.get(idx + 1) == Some(&quote) {
                            idx += 2; // escaped quote
                            continue;
                        }
                        state = State::Normal;
                    }
                }
                State::LineComment => {
                    if b == b'\n' {
                        state = State::Normal;
                    }
                }
                State::BlockComment(depth) => {
                    if starts_with_at(bytes, idx, b"/*") {
                        state = State::BlockComment(depth + 1);
                        idx += 2;
                        continue;
                    }
                    if starts_with_at(bytes, idx, b"*/") {
                        state = if depth == 1 {
                            State::Normal
                        } else {
                            State::BlockComment(depth - 1)
                        };
                        idx += 2;
                        continue;
                    }
                }
                State::DollarQuoted(ref tag) => {
                    if matches_dollar_tag(bytes, idx, tag) {
                        idx += tag.len() + 2;
                        state = State::Normal;
                        continue;
                    }
                }
            }
            idx += 1;
        }
        out.push_str(&sql[copied..]);

        tracing::trace!(parameters = names.len(), ?style, "rewrote named parameters");
        Ok(NamedQuery {
            sql: out,
            names,
            style,
        })
    }

    /// The rewritten SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Distinct parameter names, in placeholder order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Look up every parameter and return them positionally.
    ///
    /// # Errors
    ///
    /// Returns `SqlNullableError::MissingParameter` naming the first
    /// parameter `params` has no value for.
    pub fn bind<P: NamedParams + ?Sized>(
        &self,
        params: &P,
    ) -> Result<Vec<DriverValue>, SqlNullableError> {
        self.names
            .iter()
            .map(|name| {
                params
                    .lookup(name)
                    .ok_or_else(|| SqlNullableError::MissingParameter(name.clone()))
            })
            .collect()
    }
}

/// A source of parameter values keyed by name.
pub trait NamedParams {
    fn lookup(&self, name: &str) -> Option<DriverValue>;
}

impl<S: BuildHasher> NamedParams for HashMap<String, DriverValue, S> {
    fn lookup(&self, name: &str) -> Option<DriverValue> {
        self.get(name).cloned()
    }
}

impl NamedParams for BTreeMap<String, DriverValue> {
    fn lookup(&self, name: &str) -> Option<DriverValue> {
        self.get(name).cloned()
    }
}

/// Named parameter values, built by hand or from a serializable struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedArgs {
    values: BTreeMap<String, DriverValue>,
}

impl NamedArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: &(impl Bindable + ?Sized)) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: &(impl Bindable + ?Sized)) {
        self.values.insert(name.into(), value.bind());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take parameter values from the fields of a serializable struct.
    ///
    /// Field names follow serde (`#[serde(rename)]` sets the parameter name,
    /// `#[serde(skip)]` leaves a field out). Integers bind as `Int`, other
    /// numbers as `Float`, nested arrays and objects as JSON `Text`.
    ///
    /// # Errors
    ///
    /// Returns `SqlNullableError::Json` if serialization fails, or
    /// `SqlNullableError::ParameterError` if `value` is not a struct or map,
    /// or holds an unsigned integer beyond `i64::MAX`.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, SqlNullableError> {
        let JsonValue::Object(fields) = serde_json::to_value(value)? else {
            return Err(SqlNullableError::ParameterError(
                "named parameters must serialize to a struct or map".to_string(),
            ));
        };
        let mut values = BTreeMap::new();
        for (name, field) in fields {
            let value = json_to_driver_value(&name, field)?;
            values.insert(name, value);
        }
        Ok(NamedArgs { values })
    }
}

impl NamedParams for NamedArgs {
    fn lookup(&self, name: &str) -> Option<DriverValue> {
        self.values.get(name).cloned()
    }
}

fn json_to_driver_value(name: &str, value: JsonValue) -> Result<DriverValue, SqlNullableError> {
    Ok(match value {
        JsonValue::Null => DriverValue::Null,
        JsonValue::Bool(b) => DriverValue::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DriverValue::Int(i)
            } else if n.is_f64() {
                DriverValue::Float(n.as_f64().unwrap_or(f64::NAN))
            } else {
                return Err(SqlNullableError::ParameterError(format!(
                    "parameter `{name}` does not fit a 64-bit signed integer"
                )));
            }
        }
        JsonValue::String(s) => DriverValue::Text(s),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => DriverValue::Text(nested.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nullable::Nullable;

    #[test]
    fn rewrites_to_sqlite_style() {
        let query = NamedQuery::parse(
            "UPDATE students SET age = :age WHERE id = :id",
            PlaceholderStyle::Sqlite,
        )
        .unwrap();
        assert_eq!(query.sql(), "UPDATE students SET age = ?1 WHERE id = ?2");
        assert_eq!(query.names(), ["age", "id"]);
    }

    #[test]
    fn repeated_names_share_a_placeholder() {
        let query = NamedQuery::parse(
            "SELECT * FROM t WHERE a = :v OR b = :v OR c = :w",
            PlaceholderStyle::Postgres,
        )
        .unwrap();
        assert_eq!(query.sql(), "SELECT * FROM t WHERE a = $1 OR b = $1 OR c = $2");
        assert_eq!(query.names().len(), 2);
    }

    #[test]
    fn skips_literals_comments_and_casts() {
        let sql = "SELECT ':a', \"x:b\", age::text -- :c\n/* :d /* :e */ */ FROM t WHERE id = :id";
        let query = NamedQuery::parse(sql, PlaceholderStyle::Postgres).unwrap();
        assert_eq!(
            query.sql(),
            "SELECT ':a', \"x:b\", age::text -- :c\n/* :d /* :e */ */ FROM t WHERE id = $1"
        );
        assert_eq!(query.names(), ["id"]);
    }

    #[test]
    fn skips_dollar_quoted_bodies() {
        let sql = "SELECT $body$ :inside $1 $body$, $$ ?2 $$, :outside";
        let query = NamedQuery::parse(sql, PlaceholderStyle::Postgres).unwrap();
        assert_eq!(query.sql(), "SELECT $body$ :inside $1 $body$, $$ ?2 $$, $1");
        assert_eq!(query.names(), ["outside"]);
    }

    #[test]
    fn rejects_existing_positional_placeholders() {
        for sql in ["SELECT $1, :outside", "SELECT :a WHERE b = ?1"] {
            for style in [PlaceholderStyle::Postgres, PlaceholderStyle::Sqlite] {
                assert!(
                    matches!(
                        NamedQuery::parse(sql, style),
                        Err(SqlNullableError::ParameterError(_))
                    ),
                    "{sql}"
                );
            }
        }
        let query = NamedQuery::parse("SELECT '$1', \"?2\" -- $3\n, :x", PlaceholderStyle::Sqlite)
            .unwrap();
        assert_eq!(query.sql(), "SELECT '$1', \"?2\" -- $3\n, ?1");
    }

    #[test]
    fn escaped_quotes_and_non_ascii_text() {
        let sql = "SELECT 'it''s :no', 'привет' WHERE n = :n";
        let query = NamedQuery::parse(sql, PlaceholderStyle::Sqlite).unwrap();
        assert_eq!(query.sql(), "SELECT 'it''s :no', 'привет' WHERE n = ?1");
    }

    #[test]
    fn lone_colons_stay_literal() {
        let query =
            NamedQuery::parse("SELECT arr[1:2], ': ' FROM t", PlaceholderStyle::Postgres).unwrap();
        assert_eq!(query.sql(), "SELECT arr[1:2], ': ' FROM t");
        assert!(query.names().is_empty());
    }

    #[test]
    fn bind_reports_missing_names() {
        let query = NamedQuery::parse("SELECT :a, :b", PlaceholderStyle::Sqlite).unwrap();
        let mut params = HashMap::new();
        params.insert("a".to_string(), DriverValue::Int(1));
        let err = query.bind(&params).unwrap_err();
        assert!(matches!(err, SqlNullableError::MissingParameter(ref name) if name == "b"));
    }

    #[test]
    fn args_from_struct_follow_serde_names() {
        #[derive(Serialize)]
        struct Student {
            #[serde(rename = "first_name")]
            first: String,
            last_name: String,
            age: Nullable<u32>,
            #[serde(skip)]
            #[allow(dead_code)]
            other_field: String,
        }

        let args = NamedArgs::from_serialize(&Student {
            first: "Bob".into(),
            last_name: "Brown".into(),
            age: Nullable::Absent,
            other_field: "ignored".into(),
        })
        .unwrap();

        assert_eq!(args.len(), 3);
        assert_eq!(args.lookup("first_name"), Some(DriverValue::Text("Bob".into())));
        assert_eq!(args.lookup("age"), Some(DriverValue::Null));
        assert_eq!(args.lookup("other_field"), None);
    }

    #[test]
    fn args_reject_non_maps_and_huge_unsigned() {
        assert!(matches!(
            NamedArgs::from_serialize(&[1, 2]),
            Err(SqlNullableError::ParameterError(_))
        ));

        let mut big = BTreeMap::new();
        big.insert("n", u64::MAX);
        assert!(matches!(
            NamedArgs::from_serialize(&big),
            Err(SqlNullableError::ParameterError(_))
        ));
    }

    #[test]
    fn nested_values_bind_as_json_text() {
        let mut map = BTreeMap::new();
        map.insert("tags", vec!["a", "b"]);
        let args = NamedArgs::from_serialize(&map).unwrap();
        assert_eq!(args.lookup("tags"), Some(DriverValue::Text(r#"["a","b"]"#.into())));
    }
}
