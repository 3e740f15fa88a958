//! Table-level statement builders: CREATE TABLE, ALTER TABLE and the
//! single-statement utilities (DROP, RENAME, PRAGMA, ...).
//!
//! Builders are mutated through consuming setters and rendered by `build()`
//! (or `query()` for [`Utility`]). Rendering only borrows the builder, so
//! rendering twice yields the same text.

mod alter;
mod column;
mod create;
mod keys;
mod utility;

pub use alter::{Alter, AlterPlan};
pub use column::{
    blob, column, date, datetime, integer, real, smallint, text, varchar, ColumnSpec,
    DefaultValue,
};
pub use create::{Create, TableDefinition};
pub use keys::{ForeignKeySpec, UniqueKeySpec};
pub use utility::{Utility, UtilityStatement, DEFAULT_SCHEMA};

/// Something keyed by name inside a builder.
pub(crate) trait Named {
    fn name(&self) -> &str;
}

impl Named for ColumnSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for ForeignKeySpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for UniqueKeySpec {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Inserts `item`, replacing an entry with the same name in place.
///
/// Keeps the first insertion position so output order stays stable.
pub(crate) fn upsert<T: Named>(items: &mut Vec<T>, item: T) {
    match items.iter().position(|existing| existing.name() == item.name()) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}

/// Prefixes a non-empty group of clauses with `, ` and joins it.
pub(crate) fn clause_group(clauses: &[String]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!(", {}", clauses.join(", \n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_keeps_position() {
        let mut columns = vec![column("a"), column("b")];
        upsert(&mut columns, integer("a"));
        upsert(&mut columns, column("c"));

        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(columns[0].data_type.as_deref(), Some("INTEGER"));
    }

    #[test]
    fn test_clause_group() {
        assert_eq!(clause_group(&[]), "");
        assert_eq!(
            clause_group(&["A".to_string(), "B".to_string()]),
            ", A, \nB"
        );
    }
}
