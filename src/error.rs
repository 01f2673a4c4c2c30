use std::borrow::Cow;

use thiserror::Error;

use crate::value::ValueKind;

/// A driver value whose representation has no mapping onto the target domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot scan {found} into {target}{}", reason_suffix(.reason))]
pub struct ConversionError {
    found: ValueKind,
    target: &'static str,
    reason: Option<Cow<'static, str>>,
}

fn reason_suffix(reason: &Option<Cow<'static, str>>) -> String {
    reason
        .as_deref()
        .map(|reason| format!(": {reason}"))
        .unwrap_or_default()
}

impl ConversionError {
    /// The representation is not in the recognized set for `target`.
    #[must_use]
    pub fn unsupported(found: ValueKind, target: &'static str) -> Self {
        Self {
            found,
            target,
            reason: None,
        }
    }

    /// The representation is recognized, but this particular value is not
    /// representable in `target`.
    #[must_use]
    pub fn invalid(
        found: ValueKind,
        target: &'static str,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            found,
            target,
            reason: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn found(&self) -> ValueKind {
        self.found
    }

    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum SqlNullableError {
    #[error("column `{column}`: {source}")]
    Conversion {
        column: String,
        #[source]
        source: ConversionError,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column index out of range: {0}")]
    ColumnIndexOutOfRange(usize),

    #[error("Query returned no rows")]
    NoRows,

    #[error("Missing named parameter: {0}")]
    MissingParameter(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),
}

impl SqlNullableError {
    pub(crate) fn conversion(column: impl Into<String>, source: ConversionError) -> Self {
        SqlNullableError::Conversion {
            column: column.into(),
            source,
        }
    }

    /// The underlying conversion failure, if this error wraps one.
    #[must_use]
    pub fn as_conversion(&self) -> Option<&ConversionError> {
        match self {
            SqlNullableError::Conversion { source, .. } => Some(source),
            _ => None,
        }
    }
}
