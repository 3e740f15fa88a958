//! Database handle: statement execution, introspection and row helpers.

use ddlite_core::builder::{col, Condition, Delete, Insert, Select, Update};
use ddlite_core::ddl::{Alter, Create, Utility};
use ddlite_core::{SqlValue, ToSqlValue};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteQueryResult};
use sqlx::Sqlite;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::introspect::ColumnInfo;
use crate::row::{bind_value, decode_row, Row};

/// Schema queried by [`Database::get_tables`].
const MAIN_SCHEMA: &str = "main";

/// Statement prefixes SQLite does not understand.
const UNSUPPORTED_PREFIXES: [&str; 2] = ["TRUNCATE", "RENAME TABLE"];

/// A connected SQLite database.
///
/// The pool holds a single connection, so `last_insert_rowid()` and
/// in-memory databases see every statement issued through this handle.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    config: DatabaseConfig,
}

impl Database {
    /// Opens the database at `url` (a file path, `:memory:` or a `sqlite:` URL).
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(DatabaseConfig::new(url)).await
    }

    /// Opens a database from an explicit configuration.
    pub async fn connect_with(config: DatabaseConfig) -> Result<Self> {
        let options = config.connect_options()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        info!(url = %config.url, "Connected to SQLite database");
        Ok(Self { pool, config })
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the configuration used to connect.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Closes the connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Runs `sql` with `bindings` and returns every result row.
    pub async fn execute(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<Vec<Row>> {
        trace_statement(sql, bindings.len());
        let rows = prepare(sql, bindings).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    /// Runs `sql` with `bindings` and returns the number of rows affected.
    pub async fn execute_statement(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<u64> {
        Ok(self.run(sql, bindings).await?.rows_affected())
    }

    /// Returns the ROWID of the most recent successful INSERT.
    pub async fn last_inserted_id(&self) -> Result<i64> {
        let id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn run(&self, sql: &str, bindings: Vec<SqlValue>) -> Result<SqliteQueryResult> {
        trace_statement(sql, bindings.len());
        Ok(prepare(sql, bindings).execute(&self.pool).await?)
    }

    // =========================================================================
    // Builder factories
    // =========================================================================

    /// Starts a CREATE TABLE statement.
    #[must_use]
    pub fn create(&self, name: &str) -> Create {
        Create::named(name)
    }

    /// Starts an ALTER TABLE statement.
    #[must_use]
    pub fn alter(&self, name: &str) -> Alter {
        Alter::named(name)
    }

    /// Starts a utility statement.
    #[must_use]
    pub fn utility(&self) -> Utility {
        Utility::new()
    }

    /// Starts a SELECT of `ROWID,*`.
    #[must_use]
    pub fn select(&self) -> Select {
        Select::default()
    }

    /// Starts a SELECT of the given raw column list.
    #[must_use]
    pub fn select_columns(&self, columns: &str) -> Select {
        Select::new(columns)
    }

    /// Starts an INSERT into `table`.
    #[must_use]
    pub fn insert(&self, table: &str) -> Insert {
        Insert::into_table(table)
    }

    /// Starts an UPDATE of `table`.
    #[must_use]
    pub fn update(&self, table: &str) -> Update {
        Update::new().table(table)
    }

    /// Starts a DELETE from `table`.
    #[must_use]
    pub fn delete(&self, table: &str) -> Delete {
        Delete::from_table(table)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Describes the columns of `table`. Unknown tables yield no columns.
    pub async fn get_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let sql = Utility::new().show_columns(table).query()?;
        self.execute(&sql, Vec::new())
            .await?
            .iter()
            .map(ColumnInfo::from_pragma)
            .collect()
    }

    /// Returns the first primary key column of `table`.
    pub async fn get_primary_key(&self, table: &str) -> Result<Option<String>> {
        Ok(self
            .get_columns(table)
            .await?
            .into_iter()
            .find(ColumnInfo::is_primary)
            .map(|column| column.field))
    }

    /// Lists user tables in creation order. SQLite's internal tables are skipped.
    ///
    /// `like` restricts the result to names matching a `LIKE` pattern.
    pub async fn get_tables(&self, like: Option<&str>) -> Result<Vec<String>> {
        let mut sql = Utility::new().show_tables_in(MAIN_SCHEMA).query()?;
        let mut params = Vec::new();
        if let Some(pattern) = like {
            let condition = col("name").like(pattern);
            sql.truncate(sql.trim_end_matches(';').len());
            sql = format!("{sql} AND {};", condition.sql());
            params.extend(condition.params().iter().cloned());
        }
        Ok(self
            .execute(&sql, params)
            .await?
            .iter()
            .filter_map(|row| row.get_text("name"))
            .filter(|name| !name.starts_with("sqlite_"))
            .map(str::to_string)
            .collect())
    }

    /// Dumps `table` as a CREATE TABLE rebuilt from its columns followed by
    /// one INSERT carrying every row, separated by a blank line.
    pub async fn get_table_schema(&self, table: &str) -> Result<String> {
        let mut parts = Vec::new();

        let columns = self.get_columns(table).await?;
        if !columns.is_empty() {
            let create = Create::named(table)
                .columns(columns.iter().map(ColumnInfo::to_column_spec).collect());
            parts.push(create.build()?);
        }

        let (sql, params) = Select::new("*").from(table).build()?;
        let rows = self.execute(&sql, params).await?;
        if let Some(first) = rows.first() {
            let names: Vec<&str> = first.columns().collect();
            let insert = rows
                .iter()
                .fold(Insert::into_table(table).columns(&names), |insert, row| {
                    insert.values(row.values().cloned().collect::<Vec<SqlValue>>())
                });
            parts.push(insert.build_inline()?);
        }

        debug!(table = %table, statements = parts.len(), "Dumped table");
        Ok(parts.join("\n\n"))
    }

    /// Dumps every user table, see [`Database::get_table_schema`].
    pub async fn get_schema(&self) -> Result<String> {
        let mut dumps = Vec::new();
        for table in self.get_tables(None).await? {
            let dump = self.get_table_schema(&table).await?;
            if !dump.is_empty() {
                dumps.push(dump);
            }
        }
        Ok(dumps.join("\n\n"))
    }

    // =========================================================================
    // Row helpers
    // =========================================================================

    /// Inserts one row and returns its ROWID.
    pub async fn insert_row<I, K, V>(&self, table: &str, row: I) -> Result<i64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let (sql, params) = row
            .into_iter()
            .fold(Insert::into_table(table), |insert, (column, value)| {
                insert.set(column.as_ref(), value)
            })
            .build()?;
        Ok(self.run(&sql, params).await?.last_insert_rowid())
    }

    /// Inserts each row with its own INSERT and returns how many were inserted.
    pub async fn insert_rows<R, I, K, V>(&self, table: &str, rows: R) -> Result<u64>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let mut inserted = 0;
        for row in rows {
            self.insert_row(table, row).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Updates the rows of `table` matching `filter`.
    pub async fn update_rows<I, K, V>(
        &self,
        table: &str,
        settings: I,
        filter: Condition,
    ) -> Result<u64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let (sql, params) = settings
            .into_iter()
            .fold(Update::new().table(table), |update, (column, value)| {
                update.set(column.as_ref(), value)
            })
            .filter(filter)
            .build()?;
        self.execute_statement(&sql, params).await
    }

    /// Deletes the rows of `table` matching `filter`.
    pub async fn delete_rows(&self, table: &str, filter: Condition) -> Result<u64> {
        let (sql, params) = Delete::from_table(table).filter(filter).build()?;
        self.execute_statement(&sql, params).await
    }

    /// Returns the first row of `table` whose `column` equals `value`.
    pub async fn get_row<T: ToSqlValue>(
        &self,
        table: &str,
        column: &str,
        value: T,
    ) -> Result<Option<Row>> {
        let (sql, params) = Select::default()
            .from(table)
            .filter(col(column).eq(value))
            .limit(1)
            .build()?;
        Ok(self.execute(&sql, params).await?.into_iter().next())
    }

    /// Updates the rows whose `column` equals `value`, or inserts `settings`
    /// as a new row when none exists. The inserted row always carries
    /// `column = value`.
    pub async fn set_row<T, I, K, V>(
        &self,
        table: &str,
        column: &str,
        value: T,
        settings: I,
    ) -> Result<()>
    where
        T: ToSqlValue,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToSqlValue,
    {
        let value = value.to_sql_value();
        let mut settings: Vec<(String, SqlValue)> = settings
            .into_iter()
            .map(|(key, setting)| (key.as_ref().to_string(), setting.to_sql_value()))
            .collect();

        if self.get_row(table, column, &value).await?.is_some() {
            self.update_rows(table, settings, col(column).eq(value))
                .await?;
        } else {
            if !settings.iter().any(|(key, _)| key == column) {
                settings.push((column.to_string(), value));
            }
            self.insert_row(table, settings).await?;
        }
        Ok(())
    }
}

fn prepare(sql: &str, bindings: Vec<SqlValue>) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    bindings.into_iter().fold(sqlx::query(sql), bind_value)
}

fn trace_statement(sql: &str, bindings: usize) {
    debug!(sql = %sql, bindings, "Executing SQL");

    let head = sql.trim_start().to_ascii_uppercase();
    if let Some(prefix) = UNSUPPORTED_PREFIXES
        .iter()
        .find(|prefix| head.starts_with(*prefix))
    {
        warn!(statement = %prefix, "SQLite has no such statement, expect a syntax error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;
    use crate::introspect::KeyKind;
    use ddlite_core::ddl::{date, datetime, integer, smallint, text, varchar};

    async fn unit_database() -> Database {
        let db = Database::connect(":memory:").await.unwrap();
        let sql = db
            .create("unit_post")
            .column(integer("post_id").primary_key().autoincrement().not_null())
            .column(varchar("post_slug", None).not_null())
            .column(varchar("post_title", None))
            .column(text("post_detail"))
            .column(smallint("post_active").not_null().default_value(1))
            .column(varchar("post_type", None).not_null().default_value("post"))
            .column(date("post_published"))
            .column(datetime("post_created").not_null())
            .build()
            .unwrap();
        db.execute_statement(&sql, Vec::new()).await.unwrap();
        db
    }

    async fn total(db: &Database) -> i64 {
        db.execute("SELECT COUNT(*) AS total FROM unit_post", Vec::new())
            .await
            .unwrap()[0]
            .get_int("total")
            .unwrap()
    }

    fn post(slug: &str, title: &str) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("post_slug", slug.to_sql_value()),
            ("post_title", title.to_sql_value()),
            ("post_detail", "Unit Test Detail".to_sql_value()),
            ("post_published", "2024-01-01".to_sql_value()),
            ("post_created", "2024-01-01 00:00:00".to_sql_value()),
        ]
    }

    #[tokio::test]
    async fn test_insert_row_and_last_id() {
        let db = unit_database().await;
        let before = total(&db).await;

        let id = db
            .insert_row("unit_post", post("unit-test-1", "Unit Test 1"))
            .await
            .unwrap();

        assert!(id > 0);
        assert_eq!(db.last_inserted_id().await.unwrap(), id);
        assert_eq!(total(&db).await, before + 1);
    }

    #[tokio::test]
    async fn test_get_row() {
        let db = unit_database().await;
        db.insert_row("unit_post", post("unit-test-1", "Unit Test 1"))
            .await
            .unwrap();

        let row = db
            .get_row("unit_post", "post_slug", "unit-test-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get_text("post_title"), Some("Unit Test 1"));
        assert_eq!(row.get_int("post_active"), Some(1));
        assert_eq!(row.get_text("post_type"), Some("post"));

        let missing = db.get_row("unit_post", "post_slug", "nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_rows() {
        let db = unit_database().await;
        db.insert_row("unit_post", post("unit-test-1", "Unit Test 1"))
            .await
            .unwrap();

        let affected = db
            .update_rows(
                "unit_post",
                [("post_title", "Unit Test 2")],
                col("post_slug").eq("unit-test-1"),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let row = db
            .get_row("unit_post", "post_slug", "unit-test-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get_text("post_title"), Some("Unit Test 2"));
    }

    #[tokio::test]
    async fn test_insert_rows() {
        let db = unit_database().await;
        let before = total(&db).await;

        let inserted = db
            .insert_rows(
                "unit_post",
                vec![post("unit-test-2", "Unit Test 2"), post("unit-test-3", "Unit Test 3")],
            )
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(total(&db).await, before + 2);
    }

    #[tokio::test]
    async fn test_set_row_upserts() {
        let db = unit_database().await;
        let before = total(&db).await;

        db.set_row("unit_post", "post_slug", "unit-test-4", post("unit-test-4", "Unit Test 4"))
            .await
            .unwrap();
        assert_eq!(total(&db).await, before + 1);

        db.set_row("unit_post", "post_slug", "unit-test-4", post("unit-test-4", "Unit Test 5"))
            .await
            .unwrap();
        assert_eq!(total(&db).await, before + 1);

        let row = db
            .get_row("unit_post", "post_slug", "unit-test-4")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get_text("post_title"), Some("Unit Test 5"));
    }

    #[tokio::test]
    async fn test_set_row_inserts_key_column() {
        let db = unit_database().await;
        db.set_row(
            "unit_post",
            "post_slug",
            "unit-test-6",
            [("post_created", "2024-01-01 00:00:00")],
        )
        .await
        .unwrap();

        let row = db.get_row("unit_post", "post_slug", "unit-test-6").await.unwrap();
        assert!(row.is_some());
    }

    #[tokio::test]
    async fn test_delete_rows_like() {
        let db = unit_database().await;
        db.insert_rows(
            "unit_post",
            vec![
                post("unit-test-1", "Unit Test 1"),
                post("unit-test-2", "Unit Test 2"),
                post("other", "Other"),
            ],
        )
        .await
        .unwrap();

        let deleted = db
            .delete_rows("unit_post", col("post_slug").like("unit-test-%"))
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(total(&db).await, 1);
    }

    #[tokio::test]
    async fn test_get_columns() {
        let db = unit_database().await;
        let columns = db.get_columns("unit_post").await.unwrap();

        assert_eq!(columns.len(), 8);
        assert_eq!(columns[0].field, "post_id");
        assert_eq!(columns[0].key, Some(KeyKind::Primary));
        assert!(!columns[0].nullable);

        let title = columns.iter().find(|c| c.field == "post_title").unwrap();
        assert_eq!(title.data_type, "VARCHAR");
        assert!(title.nullable);
        assert_eq!(title.key, None);

        let post_type = columns.iter().find(|c| c.field == "post_type").unwrap();
        assert_eq!(post_type.default.as_deref(), Some("'post'"));

        assert_eq!(
            db.get_primary_key("unit_post").await.unwrap().as_deref(),
            Some("post_id")
        );
        assert!(db.get_columns("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_tables_skips_internal() {
        let db = unit_database().await;
        db.insert_row("unit_post", post("unit-test-1", "Unit Test 1"))
            .await
            .unwrap();
        let sql = db
            .create("unit_user")
            .column(integer("user_id").primary_key())
            .build()
            .unwrap();
        db.execute_statement(&sql, Vec::new()).await.unwrap();

        assert_eq!(
            db.get_tables(None).await.unwrap(),
            vec!["unit_post", "unit_user"]
        );
    }

    #[tokio::test]
    async fn test_get_tables_like() {
        let db = unit_database().await;
        let sql = db
            .create("unit_user")
            .column(integer("user_id").primary_key())
            .build()
            .unwrap();
        db.execute_statement(&sql, Vec::new()).await.unwrap();

        assert_eq!(
            db.get_tables(Some("unit_p%")).await.unwrap(),
            vec!["unit_post"]
        );
        assert_eq!(
            db.get_tables(Some("%user")).await.unwrap(),
            vec!["unit_user"]
        );
        assert!(db.get_tables(Some("missing%")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_table_schema_recreates_table() {
        let source = unit_database().await;
        source
            .insert_rows(
                "unit_post",
                vec![post("unit-test-1", "It's one"), post("unit-test-2", "Two")],
            )
            .await
            .unwrap();

        let dump = source.get_table_schema("unit_post").await.unwrap();
        let statements: Vec<&str> = dump.split("\n\n").collect();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE \"unit_post\" ("));
        assert!(statements[1].starts_with("INSERT INTO \"unit_post\""));

        let target = Database::connect(":memory:").await.unwrap();
        for statement in statements {
            target.execute_statement(statement, Vec::new()).await.unwrap();
        }

        assert_eq!(
            target.get_columns("unit_post").await.unwrap(),
            source.get_columns("unit_post").await.unwrap()
        );
        assert_eq!(total(&target).await, 2);
        let row = target
            .get_row("unit_post", "post_slug", "unit-test-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get_text("post_title"), Some("It's one"));
    }

    #[tokio::test]
    async fn test_empty_table_schema_has_no_insert() {
        let db = unit_database().await;
        let dump = db.get_table_schema("unit_post").await.unwrap();
        assert!(dump.starts_with("CREATE TABLE"));
        assert!(!dump.contains("INSERT"));

        assert_eq!(db.get_schema().await.unwrap(), dump);
    }

    #[tokio::test]
    async fn test_alter_add_column() {
        let db = unit_database().await;
        let sql = db
            .alter("unit_post")
            .add_column(smallint("post_flag").not_null().default_value(0))
            .build()
            .unwrap();
        db.execute_statement(&sql, Vec::new()).await.unwrap();

        let columns = db.get_columns("unit_post").await.unwrap();
        let flag = columns.iter().find(|c| c.field == "post_flag").unwrap();
        assert_eq!(flag.default.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_drop_table() {
        let db = unit_database().await;
        let sql = db.utility().drop_table("unit_post").query().unwrap();
        db.execute_statement(&sql, Vec::new()).await.unwrap();
        assert!(db.get_tables(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_truncate_is_rejected_by_sqlite() {
        let db = unit_database().await;
        let sql = db.utility().truncate("unit_post").query().unwrap();
        let result = db.execute_statement(&sql, Vec::new()).await;
        assert!(matches!(result, Err(DatabaseError::Database(_))));
    }

    #[tokio::test]
    async fn test_build_errors_surface() {
        let db = unit_database().await;
        let result = db
            .update_rows("", [("post_title", "x")], col("post_id").eq(1))
            .await;
        assert!(matches!(result, Err(DatabaseError::Build(_))));
    }

    #[tokio::test]
    async fn test_values_round_trip() {
        let db = Database::connect(":memory:").await.unwrap();
        db.execute_statement("CREATE TABLE v (i INTEGER, r REAL, t TEXT, b BLOB, n TEXT)", Vec::new())
            .await
            .unwrap();
        db.insert_row(
            "v",
            [
                ("i", SqlValue::Int(7)),
                ("r", SqlValue::Float(1.5)),
                ("t", SqlValue::Text("x".into())),
                ("b", SqlValue::Blob(vec![1, 2])),
                ("n", SqlValue::Null),
            ],
        )
        .await
        .unwrap();

        let rows = db
            .execute("SELECT i, r, t, b, n FROM v", Vec::new())
            .await
            .unwrap();
        let values: Vec<&SqlValue> = rows[0].values().collect();
        assert_eq!(
            values,
            vec![
                &SqlValue::Int(7),
                &SqlValue::Float(1.5),
                &SqlValue::Text("x".into()),
                &SqlValue::Blob(vec![1, 2]),
                &SqlValue::Null,
            ]
        );
    }

    #[tokio::test]
    async fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.db");
        let url = path.to_str().unwrap();

        {
            let db = Database::connect(url).await.unwrap();
            let sql = db
                .create("unit_user")
                .column(integer("user_id").primary_key())
                .column(varchar("user_name", Some(255)).not_null())
                .build()
                .unwrap();
            db.execute_statement(&sql, Vec::new()).await.unwrap();
            db.insert_row("unit_user", [("user_name", "alice")])
                .await
                .unwrap();
            db.close().await;
        }

        let db = Database::connect(url).await.unwrap();
        let row = db
            .get_row("unit_user", "user_name", "alice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.get_text("user_name"), Some("alice"));
        assert_eq!(
            db.get_columns("unit_user").await.unwrap()[1].data_type,
            "VARCHAR(255)"
        );
    }
}
