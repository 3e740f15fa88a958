//! Foreign and unique key specifications.

use crate::error::{check_identifier, Result};
use crate::quote_identifier;

/// A named foreign key pointing at `referenced_table(referenced_column)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeySpec {
    /// Key name.
    pub name: String,
    /// Referenced table, rendered unquoted.
    pub referenced_table: String,
    /// Referenced column, rendered unquoted.
    pub referenced_column: String,
}

impl ForeignKeySpec {
    /// Creates a foreign key specification.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }

    /// Renders `FOREIGN KEY "<name>" REFERENCES <table>(<column>)`.
    pub(crate) fn to_sql(&self) -> Result<String> {
        check_identifier("foreign key name", &self.name)?;
        check_identifier("referenced table", &self.referenced_table)?;
        check_identifier("referenced column", &self.referenced_column)?;
        Ok(format!(
            "FOREIGN KEY {} REFERENCES {}({})",
            quote_identifier(&self.name),
            self.referenced_table,
            self.referenced_column
        ))
    }
}

/// A named unique key over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKeySpec {
    /// Key name.
    pub name: String,
    /// Covered columns, in order.
    pub columns: Vec<String>,
}

impl UniqueKeySpec {
    /// Creates a unique key specification.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
        }
    }

    /// Renders `UNIQUE "<name>" ("<c1>", "<c2>")`.
    pub(crate) fn to_sql(&self) -> Result<String> {
        check_identifier("unique key name", &self.name)?;
        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        Ok(format!(
            "UNIQUE {} ({})",
            quote_identifier(&self.name),
            columns.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_sql() {
        let key = ForeignKeySpec::new("post_user", "user", "user_id");
        assert_eq!(
            key.to_sql().unwrap(),
            "FOREIGN KEY \"post_user\" REFERENCES user(user_id)"
        );
    }

    #[test]
    fn test_unique_key_sql() {
        let key = UniqueKeySpec::new("slug_type", &["post_slug", "post_type"]);
        assert_eq!(
            key.to_sql().unwrap(),
            "UNIQUE \"slug_type\" (\"post_slug\", \"post_type\")"
        );
    }

    #[test]
    fn test_foreign_key_requires_target() {
        assert!(ForeignKeySpec::new("fk", "", "id").to_sql().is_err());
    }
}
