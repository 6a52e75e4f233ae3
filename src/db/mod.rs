use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Connection, Pool, Sqlite, SqliteConnection};

use crate::error::Result;

pub mod package_store;
pub mod tables;
pub mod user_store;

use tables::{PackageTable, UserTable};

pub type DbPool = Pool<Sqlite>;

/// Ensure the `users` and `packages` tables exist in the database file at
/// `database_path`, creating the file and its parent directory if needed.
///
/// The connection is opened for this call only and closed before returning,
/// on the error path as well. Both statements run in one transaction, so a
/// failure leaves neither table half-applied. Running it again against an
/// initialized file is a no-op.
pub async fn initialize_schema(database_path: impl AsRef<Path>) -> Result<()> {
    let path = database_path.as_ref();
    tracing::info!("Initializing schema at {}", path.display());

    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    let created = create_tables(&mut conn).await;
    let closed = conn.close().await;

    if let Err(e) = &created {
        tracing::error!("Schema initialization failed for {}: {}", path.display(), e);
    }
    created?;
    closed?;

    tracing::info!("Schema ready at {}", path.display());
    Ok(())
}

async fn create_tables(conn: &mut SqliteConnection) -> Result<()> {
    let mut tx = conn.begin().await?;

    sqlx::query(&UserTable::create_table())
        .execute(&mut *tx)
        .await?;
    sqlx::query(&PackageTable::create_table())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Open a connection pool on an existing database file.
pub async fn open_pool(database_path: impl AsRef<Path>) -> Result<DbPool> {
    let options = SqliteConnectOptions::new().filename(database_path.as_ref());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await?;

    Ok(pool)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// List user tables (SQLite's own `sqlite_*` tables excluded) with their
/// columns in declaration order. The file must already exist.
pub async fn describe_schema(database_path: impl AsRef<Path>) -> Result<Vec<TableSchema>> {
    let options = SqliteConnectOptions::new()
        .filename(database_path.as_ref())
        .read_only(true);
    let mut conn = SqliteConnection::connect_with(&options).await?;

    let described = read_tables(&mut conn).await;
    let closed = conn.close().await;
    let tables = described?;
    closed?;

    Ok(tables)
}

async fn read_tables(conn: &mut SqliteConnection) -> Result<Vec<TableSchema>> {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut tables = Vec::with_capacity(names.len());
    for (name,) in names {
        let unique: Vec<(String,)> = sqlx::query_as(
            r#"SELECT ii.name
               FROM pragma_index_list(?1) AS il
               JOIN pragma_index_info(il.name) AS ii
               WHERE il."unique" = 1"#,
        )
        .bind(&name)
        .fetch_all(&mut *conn)
        .await?;

        let rows: Vec<(String, String, i64, i64)> = sqlx::query_as(
            r#"SELECT name, type, "notnull", pk
               FROM pragma_table_info(?1)
               ORDER BY cid"#,
        )
        .bind(&name)
        .fetch_all(&mut *conn)
        .await?;

        let columns = rows
            .into_iter()
            .map(|(column, declared_type, not_null, pk)| ColumnInfo {
                unique: unique.iter().any(|(u,)| *u == column),
                name: column,
                declared_type,
                not_null: not_null != 0,
                primary_key: pk != 0,
            })
            .collect();

        tables.push(TableSchema { name, columns });
    }

    Ok(tables)
}

/// Number of rows in `table`.
pub async fn count_rows(pool: &DbPool, table: &str) -> Result<i64> {
    let query = format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\""));
    let (count,): (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
    Ok(count)
}
