//! Column specifications and their rendering.
//!
//! A [`ColumnSpec`] is rendered as space-separated tokens in a fixed order:
//! type (with optional length), `PRIMARY KEY`, the raw attribute,
//! nullability, and finally the default value.

use crate::builder::quote_text;
use crate::error::{check_identifier, Result};
use crate::quote_identifier;

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Text default, rendered quoted.
    Text(String),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// Raw SQL expression (e.g. `CURRENT_TIMESTAMP`), rendered verbatim.
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of the default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Text(s) => quote_text(s),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A column and its attributes.
///
/// Every attribute is optional; unset attributes render nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Declared type, e.g. `VARCHAR`.
    pub data_type: Option<String>,
    /// Length rendered as `TYPE(length)`. Ignored without a type.
    pub length: Option<u32>,
    /// Whether to render `PRIMARY KEY`.
    pub primary: bool,
    /// Raw attribute string, e.g. `AUTOINCREMENT`.
    pub attribute: Option<String>,
    /// `Some(false)` renders `NOT NULL`, `Some(true)` renders `DEFAULT NULL`.
    pub nullable: Option<bool>,
    /// Default value. Never rendered when `nullable` is `Some(true)`.
    pub default: Option<DefaultValue>,
}

impl ColumnSpec {
    /// Creates a column with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            length: None,
            primary: false,
            attribute: None,
            nullable: None,
            default: None,
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Sets the type length.
    #[must_use]
    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Marks the column as PRIMARY KEY.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Sets the raw attribute string.
    #[must_use]
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Shorthand for the `AUTOINCREMENT` attribute.
    #[must_use]
    pub fn autoincrement(self) -> Self {
        self.attribute("AUTOINCREMENT")
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    /// Marks the column as explicitly nullable (`DEFAULT NULL`).
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets a raw SQL expression as default (e.g. `CURRENT_TIMESTAMP`).
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Renders the type, constraints and default as tokens.
    pub(crate) fn definition_tokens(&self, with_primary: bool) -> Vec<String> {
        let mut tokens = Vec::new();

        if let Some(ref data_type) = self.data_type {
            tokens.push(match self.length {
                Some(length) => format!("{data_type}({length})"),
                None => data_type.clone(),
            });
        }

        if with_primary && self.primary {
            tokens.push(String::from("PRIMARY KEY"));
        }

        if let Some(ref attribute) = self.attribute {
            if !attribute.is_empty() {
                tokens.push(attribute.clone());
            }
        }

        match self.nullable {
            Some(false) => tokens.push(String::from("NOT NULL")),
            Some(true) => tokens.push(String::from("DEFAULT NULL")),
            None => {}
        }

        // An explicitly nullable column already carries DEFAULT NULL.
        if self.nullable != Some(true) {
            if let Some(ref default) = self.default {
                tokens.push(format!("DEFAULT {}", default.to_sql()));
            }
        }

        tokens
    }

    /// Renders the full column definition used by CREATE TABLE.
    pub(crate) fn to_sql(&self) -> Result<String> {
        check_identifier("column name", &self.name)?;
        let mut tokens = vec![quote_identifier(&self.name)];
        tokens.extend(self.definition_tokens(true));
        Ok(tokens.join(" "))
    }
}

// =============================================================================
// Shorthand Functions for Common Types
// =============================================================================

/// Creates a column with no type.
#[must_use]
pub fn column(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name)
}

/// Creates an INTEGER column.
#[must_use]
pub fn integer(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("INTEGER")
}

/// Creates a SMALLINT column.
#[must_use]
pub fn smallint(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("SMALLINT")
}

/// Creates a REAL column.
#[must_use]
pub fn real(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("REAL")
}

/// Creates a VARCHAR column; pass `None` for an unbounded one.
#[must_use]
pub fn varchar(name: impl Into<String>, length: Option<u32>) -> ColumnSpec {
    let spec = ColumnSpec::new(name).data_type("VARCHAR");
    match length {
        Some(len) => spec.length(len),
        None => spec,
    }
}

/// Creates a TEXT column.
#[must_use]
pub fn text(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("TEXT")
}

/// Creates a BLOB column.
#[must_use]
pub fn blob(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("BLOB")
}

/// Creates a DATE column.
#[must_use]
pub fn date(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("DATE")
}

/// Creates a DATETIME column.
#[must_use]
pub fn datetime(name: impl Into<String>) -> ColumnSpec {
    ColumnSpec::new(name).data_type("DATETIME")
}
