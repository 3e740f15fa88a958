//! INSERT statement builder.

use super::value::{SqlValue, ToSqlValue};
use crate::error::{check_identifier, BuildError, Result};
use crate::quote_identifier;

/// An INSERT statement builder.
///
/// Rows are either assembled column by column with [`Insert::set`] (single
/// row) or given positionally with [`Insert::columns`] and [`Insert::values`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    table: Option<String>,
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl Insert {
    /// Creates a new INSERT builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new INSERT builder targeting `table`.
    #[must_use]
    pub fn into_table(table: &str) -> Self {
        Self::new().table(table)
    }

    /// Sets the table to insert into.
    #[must_use]
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(String::from(table));
        self
    }

    /// Sets a column value on the first row.
    ///
    /// Setting the same column twice overwrites the earlier value.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        let value = value.to_sql_value();
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        match self.columns.iter().position(|c| c == column) {
            Some(index) => {
                if let Some(slot) = self.rows[0].get_mut(index) {
                    *slot = value;
                }
            }
            None => {
                self.columns.push(String::from(column));
                self.rows[0].push(value);
            }
        }
        self
    }

    /// Sets the column list for positional rows.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Appends a positional row of values.
    #[must_use]
    pub fn values<T: ToSqlValue>(mut self, vals: Vec<T>) -> Self {
        self.rows
            .push(vals.into_iter().map(ToSqlValue::to_sql_value).collect());
        self
    }

    fn validate(&self) -> Result<&str> {
        let table = self.table.as_deref().ok_or(BuildError::MissingTableName)?;
        check_identifier("table name", table)?;
        if self.columns.is_empty() {
            return Err(BuildError::invalid("insert", "no columns were set"));
        }
        for column in &self.columns {
            check_identifier("column name", column)?;
        }
        if self.rows.is_empty() {
            return Err(BuildError::invalid("insert", "no rows were set"));
        }
        if let Some(row) = self.rows.iter().find(|r| r.len() != self.columns.len()) {
            return Err(BuildError::invalid(
                "insert",
                format!(
                    "row has {} values for {} columns",
                    row.len(),
                    self.columns.len()
                ),
            ));
        }
        Ok(table)
    }

    fn head(&self, table: &str) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ",
            quote_identifier(table),
            columns.join(", ")
        )
    }

    /// Builds the INSERT statement and returns SQL with parameters.
    pub fn build(&self) -> Result<(String, Vec<SqlValue>)> {
        let table = self.validate()?;
        let mut sql = self.head(table);

        let row_strs: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let placeholders: Vec<&str> = row.iter().map(|_| "?").collect();
                format!("({})", placeholders.join(", "))
            })
            .collect();
        sql.push_str(&row_strs.join(", "));

        let params = self.rows.iter().flatten().cloned().collect();
        Ok((sql, params))
    }

    /// Builds the INSERT statement with every value inlined (escaped).
    ///
    /// Used for schema dumps; prefer [`Insert::build`] for execution.
    pub fn build_inline(&self) -> Result<String> {
        let table = self.validate()?;
        let mut sql = self.head(table);

        let row_strs: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let values: Vec<String> = row.iter().map(SqlValue::to_sql_inline).collect();
                format!("({})", values.join(", "))
            })
            .collect();
        sql.push_str(&row_strs.join(",\n"));
        Ok(sql)
    }
}
