//! Result rows and value binding.

use ddlite_core::SqlValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column as _, Row as _, Sqlite, TypeInfo as _, ValueRef as _};

use crate::error::{DatabaseError, Result};

/// A result row: column names paired with their values, in select order.
///
/// Duplicate column names are kept; [`Row::get`] returns the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Returns the value of `column`, if present.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the text value of `column`, if present and textual.
    #[must_use]
    pub fn get_text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(SqlValue::as_text)
    }

    /// Returns the integer value of `column`, if present and integral.
    #[must_use]
    pub fn get_int(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(SqlValue::as_int)
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the values in column order.
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.columns.iter().map(|(_, value)| value)
    }

    /// Iterates over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Converts a driver row into a [`Row`], following each value's storage class.
pub(crate) fn decode_row(row: &SqliteRow) -> Result<Row> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let name = column.name().to_string();
            let value = decode_value(row, index, &name)?;
            Ok((name, value))
        })
        .collect()
}

fn decode_value(row: &SqliteRow, index: usize, name: &str) -> Result<SqlValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
        "INTEGER" => SqlValue::Int(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => SqlValue::Float(row.try_get_unchecked::<f64, _>(index)?),
        "TEXT" => SqlValue::Text(row.try_get_unchecked::<String, _>(index)?),
        "BLOB" => SqlValue::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        other => {
            return Err(DatabaseError::Decode {
                column: name.to_string(),
                message: format!("unsupported storage class {other}"),
            });
        }
    };
    Ok(value)
}

/// Binds a value to a query.
pub(crate) fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}
