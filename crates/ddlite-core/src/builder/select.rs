//! SELECT statement builder.

use super::expr::Condition;
use super::value::SqlValue;
use crate::error::{check_identifier, BuildError, Result};
use crate::quote_identifier;

/// Column list used when none is given: the implicit row id plus every column.
pub const DEFAULT_COLUMNS: &str = "ROWID,*";

/// A SELECT statement builder.
///
/// The column list is raw SQL (`*`, `ROWID,*`, `COUNT(*)`, ...), the table
/// and ordering columns are quoted.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    columns: String,
    table: Option<String>,
    filter: Option<Condition>,
    order_by: Vec<(String, bool)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Default for Select {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl Select {
    /// Creates a SELECT builder with a raw column list.
    #[must_use]
    pub fn new(columns: &str) -> Self {
        Self {
            columns: String::from(columns),
            table: None,
            filter: None,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Sets the FROM table.
    #[must_use]
    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(String::from(table));
        self
    }

    /// Sets the WHERE condition, replacing any earlier one. Combine
    /// conditions with [`Condition::and`] first.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    /// Adds an ascending ORDER BY column.
    #[must_use]
    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push((String::from(column), false));
        self
    }

    /// Adds a descending ORDER BY column.
    #[must_use]
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.order_by.push((String::from(column), true));
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET. Only rendered together with a limit.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Builds the SELECT statement and returns SQL with parameters.
    pub fn build(&self) -> Result<(String, Vec<SqlValue>)> {
        let table = self.table.as_deref().ok_or(BuildError::MissingTableName)?;
        check_identifier("table name", table)?;
        if self.columns.trim().is_empty() {
            return Err(BuildError::invalid("column list", "must not be empty"));
        }

        let mut sql = format!("SELECT {} FROM {}", self.columns, quote_identifier(table));
        let mut params = vec![];

        if let Some(ref filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter.sql());
            params.extend(filter.params().iter().cloned());
        }

        if !self.order_by.is_empty() {
            let orders: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, desc)| {
                    let dir = if *desc { "DESC" } else { "ASC" };
                    format!("{} {dir}", quote_identifier(column))
                })
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
            if let Some(offset) = self.offset {
                sql.push_str(&format!(" OFFSET {offset}"));
            }
        }

        Ok((sql, params))
    }
}
