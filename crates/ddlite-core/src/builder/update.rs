//! UPDATE statement builder.

use super::expr::Condition;
use super::value::{SqlValue, ToSqlValue};
use crate::error::{check_identifier, BuildError, Result};
use crate::quote_identifier;

/// An assignment in the SET clause.
#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    column: String,
    value: SqlValue,
}

/// An UPDATE statement builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    table: Option<String>,
    assignments: Vec<Assignment>,
    filter: Option<Condition>,
}

impl Update {
    /// Creates a new UPDATE builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table to update.
    #[must_use]
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(String::from(table));
        self
    }

    /// Adds a SET assignment.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.assignments.push(Assignment {
            column: String::from(column),
            value: value.to_sql_value(),
        });
        self
    }

    /// Restricts the rows to update. Without a filter every row is updated.
    /// A later call replaces the earlier condition.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    /// Builds the UPDATE statement and returns SQL with parameters.
    pub fn build(&self) -> Result<(String, Vec<SqlValue>)> {
        let table = self.table.as_deref().ok_or(BuildError::MissingTableName)?;
        check_identifier("table name", table)?;
        if self.assignments.is_empty() {
            return Err(BuildError::invalid("update", "no columns were set"));
        }

        let mut params = Vec::with_capacity(self.assignments.len());
        let mut sets = Vec::with_capacity(self.assignments.len());
        for assignment in &self.assignments {
            check_identifier("column name", &assignment.column)?;
            sets.push(format!("{} = ?", quote_identifier(&assignment.column)));
            params.push(assignment.value.clone());
        }

        let mut sql = format!("UPDATE {} SET {}", quote_identifier(table), sets.join(", "));
        if let Some(ref filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter.sql());
            params.extend(filter.params().iter().cloned());
        }

        Ok((sql, params))
    }
}
