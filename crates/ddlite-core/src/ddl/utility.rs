//! Single-statement utility queries.

use crate::error::{check_identifier, BuildError, Result};
use crate::quote_identifier;

/// Schema name used by [`Utility::show_tables`].
pub const DEFAULT_SCHEMA: &str = "dbname";

/// A utility statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtilityStatement {
    /// `DROP TABLE "<table>"`.
    DropTable(String),
    /// `RENAME TABLE "<from>" TO "<to>"`.
    RenameTable {
        /// Current table name.
        from: String,
        /// New table name.
        to: String,
    },
    /// `PRAGMA table_info(<table>)`.
    ShowColumns(String),
    /// `SELECT * FROM <schema>.sqlite_master WHERE type='table'`.
    ShowTables {
        /// Schema holding `sqlite_master`.
        schema: String,
    },
    /// `TRUNCATE "<table>"`. SQLite itself has no TRUNCATE.
    Truncate(String),
}

impl UtilityStatement {
    /// Renders the statement, terminated by `;`.
    pub fn to_sql(&self) -> Result<String> {
        let sql = match self {
            Self::DropTable(table) => {
                check_identifier("table name", table)?;
                format!("DROP TABLE {}", quote_identifier(table))
            }
            Self::RenameTable { from, to } => {
                check_identifier("table name", from)?;
                check_identifier("new table name", to)?;
                format!(
                    "RENAME TABLE {} TO {}",
                    quote_identifier(from),
                    quote_identifier(to)
                )
            }
            Self::ShowColumns(table) => {
                check_identifier("table name", table)?;
                format!("PRAGMA table_info({table})")
            }
            Self::ShowTables { schema } => {
                check_identifier("schema name", schema)?;
                format!("SELECT * FROM {schema}.sqlite_master WHERE type='table'")
            }
            Self::Truncate(table) => {
                check_identifier("table name", table)?;
                format!("TRUNCATE {}", quote_identifier(table))
            }
        };
        Ok(sql + ";")
    }
}

/// Utility query builder. Holds one statement at a time; each setter
/// replaces the previous one.
///
/// # Example
///
/// ```rust
/// use ddlite_core::ddl::Utility;
///
/// let sql = Utility::new().drop_table("users").query().unwrap();
/// assert_eq!(sql, "DROP TABLE \"users\";");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Utility {
    statement: Option<UtilityStatement>,
}

impl Utility {
    /// Creates a builder with no statement selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `DROP TABLE`.
    #[must_use]
    pub fn drop_table(mut self, table: impl Into<String>) -> Self {
        self.statement = Some(UtilityStatement::DropTable(table.into()));
        self
    }

    /// Selects `RENAME TABLE`.
    #[must_use]
    pub fn rename_table(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.statement = Some(UtilityStatement::RenameTable {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Selects `PRAGMA table_info`.
    #[must_use]
    pub fn show_columns(mut self, table: impl Into<String>) -> Self {
        self.statement = Some(UtilityStatement::ShowColumns(table.into()));
        self
    }

    /// Selects the table listing from the `dbname` schema.
    #[must_use]
    pub fn show_tables(self) -> Self {
        self.show_tables_in(DEFAULT_SCHEMA)
    }

    /// Selects the table listing from an attached schema such as `main`.
    #[must_use]
    pub fn show_tables_in(mut self, schema: impl Into<String>) -> Self {
        self.statement = Some(UtilityStatement::ShowTables {
            schema: schema.into(),
        });
        self
    }

    /// Selects `TRUNCATE`.
    #[must_use]
    pub fn truncate(mut self, table: impl Into<String>) -> Self {
        self.statement = Some(UtilityStatement::Truncate(table.into()));
        self
    }

    /// Returns the selected statement, if any.
    #[must_use]
    pub const fn statement(&self) -> Option<&UtilityStatement> {
        self.statement.as_ref()
    }

    /// Renders the selected statement.
    pub fn query(&self) -> Result<String> {
        self.statement
            .as_ref()
            .ok_or(BuildError::NoStatement)?
            .to_sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_table() {
        assert_eq!(
            Utility::new().drop_table("users").query().unwrap(),
            "DROP TABLE \"users\";"
        );
    }

    #[test]
    fn test_rename_table() {
        assert_eq!(
            Utility::new().rename_table("old", "new").query().unwrap(),
            "RENAME TABLE \"old\" TO \"new\";"
        );
    }

    #[test]
    fn test_show_columns() {
        assert_eq!(
            Utility::new().show_columns("unit_post").query().unwrap(),
            "PRAGMA table_info(unit_post);"
        );
    }

    #[test]
    fn test_show_tables() {
        assert_eq!(
            Utility::new().show_tables().query().unwrap(),
            "SELECT * FROM dbname.sqlite_master WHERE type='table';"
        );
        assert_eq!(
            Utility::new().show_tables_in("main").query().unwrap(),
            "SELECT * FROM main.sqlite_master WHERE type='table';"
        );
    }

    #[test]
    fn test_truncate_is_literal() {
        assert_eq!(
            Utility::new().truncate("logs").query().unwrap(),
            "TRUNCATE \"logs\";"
        );
    }

    #[test]
    fn test_last_statement_wins() {
        let utility = Utility::new().truncate("a").drop_table("b");
        assert_eq!(
            utility.statement(),
            Some(&UtilityStatement::DropTable("b".into()))
        );
        assert_eq!(utility.query().unwrap(), "DROP TABLE \"b\";");
    }

    #[test]
    fn test_no_statement() {
        assert_eq!(Utility::new().query().unwrap_err(), BuildError::NoStatement);
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            Utility::new().drop_table("").query(),
            Err(BuildError::InvalidArgument { .. })
        ));
    }
}
