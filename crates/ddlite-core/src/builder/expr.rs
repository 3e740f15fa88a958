//! WHERE-clause conditions with bound parameters.

use super::value::{SqlValue, ToSqlValue};
use crate::quote_identifier;

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        name: String::from(name),
    }
}

/// A column reference.
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name.
    pub name: String,
}

impl Column {
    /// Returns the quoted column name.
    #[must_use]
    pub fn to_sql(&self) -> String {
        quote_identifier(&self.name)
    }

    /// Creates an equality condition.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "=", value.to_sql_value().into())
    }

    /// Creates an inequality condition.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "!=", value.to_sql_value().into())
    }

    /// Creates a less-than condition.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "<", value.to_sql_value().into())
    }

    /// Creates a less-than-or-equal condition.
    #[must_use]
    pub fn lt_eq<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), "<=", value.to_sql_value().into())
    }

    /// Creates a greater-than condition.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), ">", value.to_sql_value().into())
    }

    /// Creates a greater-than-or-equal condition.
    #[must_use]
    pub fn gt_eq<T: ToSqlValue>(self, value: T) -> Condition {
        Condition::binary(self.into(), ">=", value.to_sql_value().into())
    }

    /// Creates a LIKE condition.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> Condition {
        Condition::binary(self.into(), "LIKE", pattern.to_sql_value().into())
    }

    /// Creates an IS NULL condition.
    #[must_use]
    pub fn is_null(self) -> Condition {
        Condition::postfix(self.into(), "IS NULL")
    }

    /// Creates an IS NOT NULL condition.
    #[must_use]
    pub fn is_not_null(self) -> Condition {
        Condition::postfix(self.into(), "IS NOT NULL")
    }

    /// Creates an IN condition.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Condition {
        let values: Vec<SqlValue> = values.into_iter().map(ToSqlValue::to_sql_value).collect();
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        Condition {
            sql: format!("{} IN ({})", self.to_sql(), placeholders.join(", ")),
            params: values,
        }
    }
}

/// A SQL condition fragment and the parameters it binds.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    sql: String,
    params: Vec<SqlValue>,
}

impl Condition {
    /// Creates a condition from raw SQL and its parameters.
    ///
    /// **Warning**: Only use this for SQL fragments that don't contain user input;
    /// pass user input through `params` with `?` placeholders.
    #[must_use]
    pub fn raw(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    fn binary(left: Self, op: &str, right: Self) -> Self {
        let mut params = left.params;
        params.extend(right.params);
        Self {
            sql: format!("{} {op} {}", left.sql, right.sql),
            params,
        }
    }

    fn postfix(operand: Self, op: &str) -> Self {
        Self {
            sql: format!("{} {op}", operand.sql),
            params: operand.params,
        }
    }

    /// Combines two conditions with AND.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::binary(self, "AND", other)
    }

    /// Combines two conditions with OR.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::binary(self, "OR", other)
    }

    /// Wraps the condition in parentheses.
    #[must_use]
    pub fn paren(self) -> Self {
        Self {
            sql: format!("({})", self.sql),
            params: self.params,
        }
    }

    /// Returns the SQL fragment.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound parameters.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Consumes the condition and returns the SQL and parameters.
    #[must_use]
    pub fn build(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

impl From<Column> for Condition {
    fn from(col: Column) -> Self {
        Self {
            sql: col.to_sql(),
            params: vec![],
        }
    }
}

impl From<SqlValue> for Condition {
    fn from(value: SqlValue) -> Self {
        Self {
            sql: String::from("?"),
            params: vec![value],
        }
    }
}
