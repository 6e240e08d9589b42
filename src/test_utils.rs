use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Shape of a fixture collection database.
pub struct FixtureDb<'a> {
    /// `Some` creates a current-schema `decks` table (possibly empty).
    pub decks_table: Option<Vec<(i64, &'a str)>>,
    /// Raw JSON stored in `col.decks`.
    pub col_decks: &'a str,
    pub notes: Vec<(i64, &'a str, &'a str)>,
    pub cards: Vec<(i64, i64, i64)>,
}

impl Default for FixtureDb<'_> {
    fn default() -> Self {
        Self {
            decks_table: None,
            col_decks: "{}",
            notes: Vec::new(),
            cards: Vec::new(),
        }
    }
}

/// Write a collection database to `path` and return its bytes.
pub async fn build_collection_db(path: &Path, fixture: &FixtureDb<'_>) -> Vec<u8> {
    init_test_logging();

    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .collation("unicase", |a: &str, b: &str| a.to_lowercase().cmp(&b.to_lowercase()))
        .connect()
        .await
        .expect("create fixture db");

    create_schema(&mut conn, fixture).await;
    conn.close().await.expect("close fixture db");

    std::fs::read(path).expect("read fixture db")
}

async fn create_schema(conn: &mut SqliteConnection, fixture: &FixtureDb<'_>) {
    sqlx::query("CREATE TABLE col (id INTEGER PRIMARY KEY, decks TEXT NOT NULL)")
        .execute(&mut *conn)
        .await
        .expect("create col");
    sqlx::query("INSERT INTO col (id, decks) VALUES (1, ?)")
        .bind(fixture.col_decks)
        .execute(&mut *conn)
        .await
        .expect("insert col");

    sqlx::query(
        "CREATE TABLE notes (id INTEGER PRIMARY KEY, flds TEXT NOT NULL, tags TEXT NOT NULL)",
    )
    .execute(&mut *conn)
    .await
    .expect("create notes");
    sqlx::query(
        "CREATE TABLE cards (id INTEGER PRIMARY KEY, nid INTEGER NOT NULL, did INTEGER NOT NULL)",
    )
    .execute(&mut *conn)
    .await
    .expect("create cards");

    if let Some(decks) = &fixture.decks_table {
        sqlx::query(
            "CREATE TABLE decks (id INTEGER PRIMARY KEY NOT NULL, name TEXT NOT NULL COLLATE unicase)",
        )
        .execute(&mut *conn)
        .await
        .expect("create decks");
        for (id, name) in decks {
            sqlx::query("INSERT INTO decks (id, name) VALUES (?, ?)")
                .bind(*id)
                .bind(*name)
                .execute(&mut *conn)
                .await
                .expect("insert deck");
        }
    }

    for (id, flds, tags) in &fixture.notes {
        sqlx::query("INSERT INTO notes (id, flds, tags) VALUES (?, ?, ?)")
            .bind(*id)
            .bind(*flds)
            .bind(*tags)
            .execute(&mut *conn)
            .await
            .expect("insert note");
    }

    for (id, nid, did) in &fixture.cards {
        sqlx::query("INSERT INTO cards (id, nid, did) VALUES (?, ?, ?)")
            .bind(*id)
            .bind(*nid)
            .bind(*did)
            .execute(&mut *conn)
            .await
            .expect("insert card");
    }
}

/// Zip `entries` into an in-memory archive, deflated like real exports.
pub fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        writer.start_file(name.to_string(), options).expect("start entry");
        writer.write_all(content).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}
