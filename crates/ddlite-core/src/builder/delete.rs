//! DELETE statement builder.

use super::expr::Condition;
use super::value::SqlValue;
use crate::error::{check_identifier, BuildError, Result};
use crate::quote_identifier;

/// A DELETE statement builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delete {
    table: Option<String>,
    filter: Option<Condition>,
}

impl Delete {
    /// Creates a new DELETE builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DELETE builder for `table`.
    #[must_use]
    pub fn from_table(table: &str) -> Self {
        Self::new().table(table)
    }

    /// Sets the table to delete from.
    #[must_use]
    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(String::from(table));
        self
    }

    /// Restricts the rows to delete. Without a filter every row is deleted.
    /// A later call replaces the earlier condition.
    #[must_use]
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(condition);
        self
    }

    /// Builds the DELETE statement and returns SQL with parameters.
    pub fn build(&self) -> Result<(String, Vec<SqlValue>)> {
        let table = self.table.as_deref().ok_or(BuildError::MissingTableName)?;
        check_identifier("table name", table)?;

        let mut sql = format!("DELETE FROM {}", quote_identifier(table));
        let mut params = vec![];
        if let Some(ref filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter.sql());
            params.extend(filter.params().iter().cloned());
        }

        Ok((sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::expr::col;

    #[test]
    fn test_delete_with_filter() {
        let (sql, params) = Delete::from_table("unit_post")
            .filter(col("post_slug").like("unit-test-%"))
            .build()
            .unwrap();

        assert_eq!(sql, "DELETE FROM \"unit_post\" WHERE \"post_slug\" LIKE ?");
        assert_eq!(params, vec![SqlValue::Text("unit-test-%".into())]);
    }

    #[test]
    fn test_delete_all() {
        let (sql, params) = Delete::from_table("logs").build().unwrap();
        assert_eq!(sql, "DELETE FROM \"logs\"");
        assert!(params.is_empty());
    }

    #[test]
    fn test_delete_missing_table() {
        assert_eq!(
            Delete::new().build().unwrap_err(),
            BuildError::MissingTableName
        );
    }
}
