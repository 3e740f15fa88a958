//! Table introspection from `PRAGMA table_info`.

use std::fmt;

use ddlite_core::ddl::{ColumnSpec, DefaultValue};
use ddlite_core::SqlValue;
use serde::Serialize;

use crate::error::{DatabaseError, Result};
use crate::row::Row;

/// Key role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyKind {
    /// Part of the primary key.
    #[serde(rename = "PRI")]
    Primary,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "PRI"),
        }
    }
}

/// Description of one table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name.
    pub field: String,
    /// Declared type, exactly as written in the table definition.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Default value as SQL text (`'post'`, `1`, `CURRENT_TIMESTAMP`).
    pub default: Option<String>,
    /// Whether NULL is accepted.
    pub nullable: bool,
    /// Key role, if any.
    pub key: Option<KeyKind>,
}

impl ColumnInfo {
    /// Reads one row of `PRAGMA table_info`.
    pub(crate) fn from_pragma(row: &Row) -> Result<Self> {
        let field = required_text(row, "name")?;
        let data_type = row.get_text("type").unwrap_or_default().to_string();
        let default = match row.get("dflt_value") {
            Some(SqlValue::Text(text)) => Some(text.clone()),
            Some(SqlValue::Int(n)) => Some(n.to_string()),
            Some(SqlValue::Float(f)) => Some(f.to_string()),
            _ => None,
        };
        let not_null = required_int(row, "notnull")?;
        let pk = required_int(row, "pk")?;

        Ok(Self {
            field,
            data_type,
            default,
            nullable: not_null != 1,
            key: (pk >= 1).then_some(KeyKind::Primary),
        })
    }

    /// Returns `true` when the column is part of the primary key.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.key == Some(KeyKind::Primary)
    }

    /// Rebuilds a column specification from this description.
    ///
    /// A declared type like `VARCHAR(255)` is split into type and length.
    /// Nullable columns leave nullability unset so their default survives.
    #[must_use]
    pub fn to_column_spec(&self) -> ColumnSpec {
        let mut spec = ColumnSpec::new(&self.field);

        if !self.data_type.is_empty() {
            spec = match split_length(&self.data_type) {
                Some((data_type, length)) => spec.data_type(data_type).length(length),
                None => spec.data_type(&self.data_type),
            };
        }
        if self.is_primary() {
            spec = spec.primary_key();
        }
        if !self.nullable {
            spec = spec.not_null();
        }
        if let Some(default) = self.default.as_deref().and_then(parse_default) {
            spec.default = Some(default);
        }
        spec
    }
}

fn required_text(row: &Row, column: &str) -> Result<String> {
    row.get_text(column)
        .map(str::to_string)
        .ok_or_else(|| missing(column, "text"))
}

fn required_int(row: &Row, column: &str) -> Result<i64> {
    row.get_int(column).ok_or_else(|| missing(column, "integer"))
}

fn missing(column: &str, expected: &str) -> DatabaseError {
    DatabaseError::Decode {
        column: column.to_string(),
        message: format!("missing or not {expected}"),
    }
}

/// Splits `NAME(len)` into its parts.
fn split_length(declared: &str) -> Option<(&str, u32)> {
    let (name, rest) = declared.split_once('(')?;
    let length = rest.strip_suffix(')')?.trim().parse().ok()?;
    Some((name.trim(), length))
}

/// Parses a default as stored by SQLite back into a [`DefaultValue`].
fn parse_default(raw: &str) -> Option<DefaultValue> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("null") {
        return None;
    }
    if let Some(inner) = raw
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return Some(DefaultValue::Text(inner.replace("''", "'")));
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(DefaultValue::Integer(n));
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Some(DefaultValue::Float(f));
    }
    Some(DefaultValue::Expression(raw.to_string()))
}
