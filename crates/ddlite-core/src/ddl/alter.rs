//! ALTER TABLE builder.

use super::column::ColumnSpec;
use super::keys::ForeignKeySpec;
use super::upsert;
use crate::error::{check_identifier, BuildError, Result};
use crate::quote_identifier;

/// An immutable snapshot of the changes to apply to a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterPlan {
    /// Table name.
    pub table: String,
    /// Columns to add.
    pub columns_to_add: Vec<ColumnSpec>,
    /// Columns to change, keyed by their current name. The [`ColumnSpec`]
    /// carries the new name.
    pub columns_to_change: Vec<(String, ColumnSpec)>,
    /// Names of columns to drop.
    pub columns_to_remove: Vec<String>,
    /// Foreign keys to add.
    pub foreign_keys_to_add: Vec<ForeignKeySpec>,
    /// Names of foreign keys to drop.
    pub foreign_keys_to_remove: Vec<String>,
    /// Names of unique keys to add.
    pub unique_keys_to_add: Vec<String>,
    /// Names of unique keys to drop.
    pub unique_keys_to_remove: Vec<String>,
}

impl AlterPlan {
    /// Returns `true` when the plan has no clause to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns_to_add.is_empty()
            && self.columns_to_change.is_empty()
            && self.columns_to_remove.is_empty()
            && self.foreign_keys_to_add.is_empty()
            && self.foreign_keys_to_remove.is_empty()
            && self.unique_keys_to_add.is_empty()
            && self.unique_keys_to_remove.is_empty()
    }

    /// Renders `ALTER TABLE "<name>" <clauses>;`.
    ///
    /// Clauses always come out in the same order: dropped columns, added
    /// columns, changed columns, dropped foreign keys, added foreign keys,
    /// dropped unique keys, then a single `ADD UNIQUE` clause. Unique key
    /// names in that last clause are not quoted. An empty plan renders
    /// `ALTER TABLE "<name>" ;`.
    pub fn to_sql(&self) -> Result<String> {
        if self.table.trim().is_empty() {
            return Err(BuildError::MissingTableName);
        }

        let mut clauses = Vec::new();

        for name in &self.columns_to_remove {
            check_identifier("column name", name)?;
            clauses.push(format!("DROP {}", quote_identifier(name)));
        }

        for column in &self.columns_to_add {
            check_identifier("column name", &column.name)?;
            let mut tokens = vec![format!("ADD {}", quote_identifier(&column.name))];
            tokens.extend(column.definition_tokens(false));
            clauses.push(tokens.join(" "));
        }

        for (old_name, column) in &self.columns_to_change {
            check_identifier("column name", old_name)?;
            check_identifier("column name", &column.name)?;
            let mut tokens = vec![format!(
                "CHANGE {} {}",
                quote_identifier(old_name),
                quote_identifier(&column.name)
            )];
            tokens.extend(column.definition_tokens(false));
            clauses.push(tokens.join(" "));
        }

        for name in &self.foreign_keys_to_remove {
            check_identifier("foreign key name", name)?;
            clauses.push(format!("DROP FOREIGN KEY {}", quote_identifier(name)));
        }

        for key in &self.foreign_keys_to_add {
            clauses.push(format!("ADD {}", key.to_sql()?));
        }

        for name in &self.unique_keys_to_remove {
            check_identifier("unique key name", name)?;
            clauses.push(format!("DROP UNIQUE {}", quote_identifier(name)));
        }

        if !self.unique_keys_to_add.is_empty() {
            let mut names = Vec::with_capacity(self.unique_keys_to_add.len());
            for name in &self.unique_keys_to_add {
                check_identifier("unique key name", name)?;
                names.push(name.clone());
            }
            clauses.push(format!("ADD UNIQUE ({})", names.join(", ")));
        }

        Ok(format!(
            "ALTER TABLE {} {};",
            quote_identifier(&self.table),
            clauses.join(", \n")
        ))
    }
}

/// ALTER TABLE builder.
///
/// # Example
///
/// ```rust
/// use ddlite_core::ddl::{varchar, Alter};
///
/// let sql = Alter::named("users")
///     .add_column(varchar("email", None))
///     .drop_column("legacy_id")
///     .build()
///     .unwrap();
///
/// assert_eq!(sql, "ALTER TABLE \"users\" DROP \"legacy_id\", \nADD \"email\" VARCHAR;");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alter {
    name: Option<String>,
    plan: AlterPlan,
}

impl Alter {
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

    /// Adds a column; a pending addition with the same name is replaced.
    #[must_use]
    pub fn add_column(mut self, column: ColumnSpec) -> Self {
        upsert(&mut self.plan.columns_to_add, column);
        self
    }

    /// Changes the column currently called `name`. Give `column` a different
    /// name to rename it.
    #[must_use]
    pub fn change_column(mut self, name: impl Into<String>, column: ColumnSpec) -> Self {
        let name = name.into();
        match self
            .plan
            .columns_to_change
            .iter()
            .position(|(existing, _)| *existing == name)
        {
            Some(index) => self.plan.columns_to_change[index].1 = column,
            None => self.plan.columns_to_change.push((name, column)),
        }
        self
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column(mut self, name: impl Into<String>) -> Self {
        self.plan.columns_to_remove.push(name.into());
        self
    }

    /// Adds a foreign key `name` referencing `table(key)`.
    #[must_use]
    pub fn add_foreign_key(
        mut self,
        name: impl Into<String>,
        table: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        upsert(
            &mut self.plan.foreign_keys_to_add,
            ForeignKeySpec::new(name, table, key),
        );
        self
    }

    /// Drops a foreign key.
    #[must_use]
    pub fn drop_foreign_key(mut self, name: impl Into<String>) -> Self {
        self.plan.foreign_keys_to_remove.push(name.into());
        self
    }

    /// Adds a unique key on the column `name`.
    #[must_use]
    pub fn add_unique_key(mut self, name: impl Into<String>) -> Self {
        self.plan.unique_keys_to_add.push(name.into());
        self
    }

    /// Drops a unique key.
    #[must_use]
    pub fn drop_unique_key(mut self, name: impl Into<String>) -> Self {
        self.plan.unique_keys_to_remove.push(name.into());
        self
    }

    /// Returns the table name, if set.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Snapshots the builder into an [`AlterPlan`].
    pub fn plan(&self) -> Result<AlterPlan> {
        let table = self
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .ok_or(BuildError::MissingTableName)?;
        Ok(AlterPlan {
            table,
            ..self.plan.clone()
        })
    }

    /// Renders the ALTER TABLE statement.
    pub fn build(&self) -> Result<String> {
        self.plan()?.to_sql()
    }
}
