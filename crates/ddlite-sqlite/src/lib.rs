//! # ddlite-sqlite
//!
//! Async SQLite driver for the `ddlite-core` statement builders.
//!
//! [`Database`] wraps a single-connection `sqlx` pool and adds:
//! - Statement execution with bound [`SqlValue`](ddlite_core::SqlValue)s
//! - Table introspection through `PRAGMA table_info`
//! - Schema dumps (rebuilt CREATE TABLE plus inlined rows)
//! - Row helpers: insert, update, delete, lookup and upsert by column
//!
//! ## Example
//!
//! ```rust,no_run
//! use ddlite_core::builder::col;
//! use ddlite_core::ddl::{integer, varchar};
//! use ddlite_sqlite::Database;
//!
//! # async fn example() -> ddlite_sqlite::Result<()> {
//! let db = Database::connect(":memory:").await?;
//!
//! let sql = db
//!     .create("unit_user")
//!     .column(integer("user_id").primary_key())
//!     .column(varchar("user_name", Some(255)).not_null())
//!     .build()?;
//! db.execute_statement(&sql, Vec::new()).await?;
//!
//! db.insert_row("unit_user", [("user_name", "alice")]).await?;
//! db.update_rows("unit_user", [("user_name", "bob")], col("user_name").eq("alice"))
//!     .await?;
//!
//! let row = db.get_row("unit_user", "user_name", "bob").await?;
//! assert!(row.is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod introspect;
pub mod row;

pub use config::DatabaseConfig;
pub use database::Database;
pub use error::{DatabaseError, Result};
pub use introspect::{ColumnInfo, KeyKind};
pub use row::Row;
