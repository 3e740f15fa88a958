//! # ddlite-core
//!
//! SQL statement builders for SQLite.
//!
//! This crate provides:
//! - Table-level builders ([`ddl::Create`], [`ddl::Alter`], [`ddl::Utility`])
//!   that accumulate table, column and key metadata and render it into DDL text
//! - Row-level builders ([`builder::Insert`], [`builder::Update`],
//!   [`builder::Delete`], [`builder::Select`]) that produce parameterized SQL
//!
//! Nothing here talks to a database; rendered strings are handed to a driver
//! such as `ddlite-sqlite`.
//!
//! ## Creating a table
//!
//! ```rust
//! use ddlite_core::ddl::{integer, varchar, Create};
//!
//! let sql = Create::named("unit_post")
//!     .column(integer("post_id").primary_key().autoincrement().not_null())
//!     .column(varchar("post_slug", None).not_null())
//!     .column(varchar("post_type", None).not_null().default_value("post"))
//!     .unique_key("post_slug", &["post_slug"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE \"unit_post\" (\
//!      \"post_id\" INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
//!      \"post_slug\" VARCHAR NOT NULL, \
//!      \"post_type\" VARCHAR NOT NULL DEFAULT 'post', \
//!      UNIQUE \"post_slug\" (\"post_slug\"))"
//! );
//! ```
//!
//! ## Identifier quoting
//!
//! Table, column and key names are wrapped in double quotes. Names are not
//! escaped; they are expected to come from the program, not from user input.
//! Values always travel as bound parameters, except for column defaults and
//! [`builder::Insert::build_inline`], which quote text by doubling `'`.

pub mod builder;
pub mod ddl;
pub mod error;

pub use builder::{col, Condition, Delete, Insert, Select, SqlValue, ToSqlValue, Update};
pub use ddl::{Alter, ColumnSpec, Create, DefaultValue, Utility};
pub use error::{BuildError, Result};

/// Wraps an identifier in double quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{name}\"")
}
