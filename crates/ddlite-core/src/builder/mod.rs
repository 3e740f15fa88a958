//! Row-level statement builders.
//!
//! These produce parameterized SQL (`?` placeholders) together with the
//! values to bind, ready to hand to a driver.
//!
//! # Example
//!
//! ```rust
//! use ddlite_core::builder::{col, Update};
//!
//! let (sql, params) = Update::new()
//!     .table("unit_post")
//!     .set("post_title", "Unit Test 2")
//!     .filter(col("post_slug").eq("unit-test-1"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     sql,
//!     "UPDATE \"unit_post\" SET \"post_title\" = ? WHERE \"post_slug\" = ?"
//! );
//! assert_eq!(params.len(), 2);
//! ```

mod delete;
mod expr;
mod insert;
mod select;
mod update;
pub mod value;

pub use delete::Delete;
pub use expr::{col, Column, Condition};
pub use insert::Insert;
pub use select::{Select, DEFAULT_COLUMNS};
pub use update::Update;
pub use value::{quote_text, SqlValue, ToSqlValue};
