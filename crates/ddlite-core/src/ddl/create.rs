//! CREATE TABLE builder.

use super::column::ColumnSpec;
use super::keys::{ForeignKeySpec, UniqueKeySpec};
use super::{clause_group, upsert};
use crate::error::{BuildError, Result};
use crate::quote_identifier;

/// An immutable snapshot of a table to create.
///
/// Column, foreign key and unique key order is the order in which they were
/// added to the [`Create`] builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns in output order.
    pub columns: Vec<ColumnSpec>,
    /// Foreign keys in output order.
    pub foreign_keys: Vec<ForeignKeySpec>,
    /// Unique keys in output order.
    pub unique_keys: Vec<UniqueKeySpec>,
    /// Table comment. SQLite has no table comments, so it is never rendered.
    pub comment: Option<String>,
}

impl TableDefinition {
    /// Renders
    /// `CREATE TABLE "<name>" (<columns>[, <foreign keys>][, <unique keys>])`.
    pub fn to_sql(&self) -> Result<String> {
        if self.name.trim().is_empty() {
            return Err(BuildError::MissingTableName);
        }

        let fields = self
            .columns
            .iter()
            .map(ColumnSpec::to_sql)
            .collect::<Result<Vec<_>>>()?
            .join(", ");

        let keys = self
            .foreign_keys
            .iter()
            .map(ForeignKeySpec::to_sql)
            .collect::<Result<Vec<_>>>()?;

        let uniques = self
            .unique_keys
            .iter()
            .map(UniqueKeySpec::to_sql)
            .collect::<Result<Vec<_>>>()?;

        Ok(format!(
            "CREATE TABLE {} ({fields}{}{})",
            quote_identifier(&self.name),
            clause_group(&keys),
            clause_group(&uniques)
        ))
    }
}

/// CREATE TABLE builder.
///
/// # Example
///
/// ```rust
/// use ddlite_core::ddl::{integer, varchar, Create};
///
/// let sql = Create::named("users")
///     .column(integer("id").primary_key())
///     .column(varchar("name", Some(255)).not_null())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     sql,
///     "CREATE TABLE \"users\" (\"id\" INTEGER PRIMARY KEY, \"name\" VARCHAR(255) NOT NULL)"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Create {
    name: Option<String>,
    comment: Option<String>,
    columns: Vec<ColumnSpec>,
    foreign_keys: Vec<ForeignKeySpec>,
    unique_keys: Vec<UniqueKeySpec>,
}

impl Create {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for the table `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    /// Sets the table name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the table comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Adds a column; a column with the same name is replaced in place.
    #[must_use]
    pub fn column(mut self, column: ColumnSpec) -> Self {
        upsert(&mut self.columns, column);
        self
    }

    /// Replaces every column.
    #[must_use]
    pub fn columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = Vec::with_capacity(columns.len());
        for column in columns {
            upsert(&mut self.columns, column);
        }
        self
    }

    /// Adds a foreign key `name` referencing `table(key)`.
    #[must_use]
    pub fn foreign_key(
        mut self,
        name: impl Into<String>,
        table: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        upsert(&mut self.foreign_keys, ForeignKeySpec::new(name, table, key));
        self
    }

    /// Replaces every foreign key.
    #[must_use]
    pub fn foreign_keys(mut self, keys: Vec<ForeignKeySpec>) -> Self {
        self.foreign_keys = Vec::with_capacity(keys.len());
        for key in keys {
            upsert(&mut self.foreign_keys, key);
        }
        self
    }

    /// Adds a unique key over `columns`.
    #[must_use]
    pub fn unique_key(mut self, name: impl Into<String>, columns: &[&str]) -> Self {
        upsert(&mut self.unique_keys, UniqueKeySpec::new(name, columns));
        self
    }

    /// Replaces every unique key.
    #[must_use]
    pub fn unique_keys(mut self, keys: Vec<UniqueKeySpec>) -> Self {
        self.unique_keys = Vec::with_capacity(keys.len());
        for key in keys {
            upsert(&mut self.unique_keys, key);
        }
        self
    }

    /// Returns the table name, if set.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the columns added so far.
    #[must_use]
    pub fn column_specs(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Snapshots the builder into a [`TableDefinition`].
    pub fn definition(&self) -> Result<TableDefinition> {
        let name = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or(BuildError::MissingTableName)?;
        Ok(TableDefinition {
            name,
            columns: self.columns.clone(),
            foreign_keys: self.foreign_keys.clone(),
            unique_keys: self.unique_keys.clone(),
            comment: self.comment.clone(),
        })
    }

    /// Renders the CREATE TABLE statement.
    pub fn build(&self) -> Result<String> {
        self.definition()?.to_sql()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::column::{datetime, integer, smallint, text, varchar};

    #[test]
    fn test_users_table() {
        let sql = Create::named("users")
            .column(integer("id").primary_key())
            .column(varchar("name", Some(255)).not_null())
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "CREATE TABLE \"users\" (\"id\" INTEGER PRIMARY KEY, \"name\" VARCHAR(255) NOT NULL)"
        );
    }

    #[test]
    fn test_missing_name() {
        let err = Create::new().column(integer("id")).build().unwrap_err();
        assert_eq!(err, BuildError::MissingTableName);

        let err = Create::named("").build().unwrap_err();
        assert_eq!(err, BuildError::MissingTableName);
    }

    #[test]
    fn test_empty_columns() {
        assert_eq!(
            Create::named("empty").build().unwrap(),
            "CREATE TABLE \"empty\" ()"
        );
    }

    #[test]
    fn test_foreign_and_unique_keys() {
        let sql = Create::named("post")
            .column(integer("post_id").primary_key())
            .column(integer("post_user"))
            .column(varchar("post_slug", None).not_null())
            .foreign_key("post_user", "user", "user_id")
            .unique_key("post_slug", &["post_slug"])
            .unique_key("slug_user", &["post_slug", "post_user"])
            .build()
            .unwrap();

        assert_eq!(
            sql,
            "CREATE TABLE \"post\" (\"post_id\" INTEGER PRIMARY KEY, \"post_user\" INTEGER, \
             \"post_slug\" VARCHAR NOT NULL, \
             FOREIGN KEY \"post_user\" REFERENCES user(user_id), \
             UNIQUE \"post_slug\" (\"post_slug\"), \n\
             UNIQUE \"slug_user\" (\"post_slug\", \"post_user\"))"
        );
    }

    #[test]
    fn test_redefining_column_keeps_position() {
        let sql = Create::named("t")
            .column(integer("a"))
            .column(text("b"))
            .column(smallint("a").not_null())
            .build()
            .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE \"t\" (\"a\" SMALLINT NOT NULL, \"b\" TEXT)"
        );
    }

    #[test]
    fn test_columns_replaces() {
        let create = Create::named("t")
            .column(integer("old"))
            .columns(vec![datetime("created"), datetime("updated")]);
        let names: Vec<&str> = create.column_specs().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["created", "updated"]);
    }

    #[test]
    fn test_comment_not_rendered() {
        let create = Create::named("t").comment("hello").column(integer("a"));
        assert_eq!(create.build().unwrap(), "CREATE TABLE \"t\" (\"a\" INTEGER)");
        assert_eq!(create.definition().unwrap().comment.as_deref(), Some("hello"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let create = Create::named("t")
            .column(varchar("a", Some(10)).default_value("x"))
            .unique_key("a", &["a"]);
        assert_eq!(create.build().unwrap(), create.build().unwrap());
    }

    #[test]
    fn test_nullable_column_drops_default() {
        let sql = Create::named("t")
            .column(text("note").nullable().default_value("x"))
            .build()
            .unwrap();
        assert!(!sql.contains("DEFAULT 'x'"));
        assert!(sql.contains("\"note\" TEXT DEFAULT NULL"));
    }
}
