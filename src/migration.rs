//! Database bootstrap: create the database if missing, then the `books` table.
//! Both steps are idempotent and run at startup.

use crate::store::StoreError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Table (and hosted REST resource) holding books.
pub const BOOKS_TABLE: &str = "books";

/// Create `books` if it does not exist and bring older layouts up to date.
/// Ids come from an identity column so concurrent inserts never collide.
pub async fn ensure_books_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            published_date TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )
        "#,
        BOOKS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;

    for (column, def) in [
        ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ("deleted_at", "TIMESTAMPTZ"),
    ] {
        let alter = format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
            BOOKS_TABLE, column, def
        );
        sqlx::query(&alter).execute(pool).await?;
    }

    let index = format!(
        "CREATE INDEX IF NOT EXISTS {0}_active_idx ON {0} (id) WHERE deleted_at IS NULL",
        BOOKS_TABLE
    );
    sqlx::query(&index).execute(pool).await?;
    tracing::info!(table = BOOKS_TABLE, "books table ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| StoreError::Validation("DATABASE_URL: no database path".into()))?;
    let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}postgres", &url[..path_start]);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
