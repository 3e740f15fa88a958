//! Connection configuration.

use std::str::FromStr;

use sqlx::sqlite::SqliteConnectOptions;

use crate::error::Result;

/// Location understood as a private in-memory database.
pub const MEMORY: &str = ":memory:";

/// How to open a database.
///
/// `url` is either a `sqlite:` URL, [`MEMORY`], or a plain file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database location.
    pub url: String,
    /// Create the database file when it does not exist.
    pub create_if_missing: bool,
    /// Enforce foreign key constraints.
    pub foreign_keys: bool,
}

impl DatabaseConfig {
    /// Creates a configuration for `url` that creates missing files and
    /// enforces foreign keys.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            create_if_missing: true,
            foreign_keys: true,
        }
    }

    /// Creates a configuration for a private in-memory database.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(MEMORY)
    }

    /// Sets whether a missing database file is created.
    #[must_use]
    pub const fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Sets whether foreign key constraints are enforced.
    #[must_use]
    pub const fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Returns `true` when the configuration points at an in-memory database.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        matches!(self.url.as_str(), MEMORY | "sqlite::memory:" | "sqlite://:memory:")
    }

    pub(crate) fn connect_options(&self) -> Result<SqliteConnectOptions> {
        let options = if self.is_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else if self.url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&self.url)?
        } else {
            SqliteConnectOptions::new().filename(&self.url)
        };

        Ok(options
            .create_if_missing(self.create_if_missing)
            .foreign_keys(self.foreign_keys))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::memory()
    }
}
