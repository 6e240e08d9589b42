use crate::types::errors::ImportResult;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;

/// Read-only handle on an extracted collection database.
///
/// The underlying connection is released when the handle is dropped, so an
/// early `?` return never leaks it. `close` is the orderly path.
pub struct CollectionDb {
    conn: SqliteConnection,
}

impl CollectionDb {
    pub async fn open(path: &Path) -> ImportResult<Self> {
        let conn = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            // Current-generation schemas declare `name ... COLLATE unicase`.
            .collation("unicase", |a: &str, b: &str| {
                a.to_lowercase().cmp(&b.to_lowercase())
            })
            .connect()
            .await?;
        log::debug!("Opened collection database {}", path.display());
        Ok(Self { conn })
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    pub async fn close(self) -> ImportResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}

pub async fn table_exists(conn: &mut SqliteConnection, table: &str) -> ImportResult<bool> {
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_optional(conn)
            .await?;

    Ok(existing.is_some())
}
