#![allow(dead_code)]

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::io::Write;
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Which schema generation a fixture collection uses for decks.
#[derive(Clone, Copy, Debug)]
pub enum DeckSchema {
    /// Decks as a JSON document in `col.decks`.
    Legacy,
    /// A dedicated `decks` table with `\x1f`-separated names.
    Current,
}

/// A small collection: two top-level decks, one nested deck, four notes.
pub struct SampleCollection {
    pub decks: Vec<(i64, &'static str)>,
    pub notes: Vec<(i64, &'static str, &'static str)>,
    pub cards: Vec<(i64, i64, i64)>,
}

impl Default for SampleCollection {
    fn default() -> Self {
        Self {
            decks: vec![
                (1, "Default"),
                (1001, "Languages"),
                (1002, "Languages::Spanish"),
            ],
            notes: vec![
                (10, "hola\u{1f}hello", "spanish vocab"),
                (11, "gato<img src=\"cat.jpg\">\u{1f}cat[sound:gato.mp3]", "spanish"),
                (12, "What is 2+2?\u{1f}4", ""),
                (13, "orphan\u{1f}never shown", ""),
            ],
            cards: vec![
                (100, 10, 1002),
                (101, 11, 1002),
                (102, 12, 1),
                // References a note that does not exist.
                (103, 99, 1),
            ],
        }
    }
}

/// Build a collection database at `path` and return its bytes.
pub async fn build_collection(path: &Path, sample: &SampleCollection, schema: DeckSchema) -> Vec<u8> {
    init_test_logging();

    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .collation("unicase", |a: &str, b: &str| a.to_lowercase().cmp(&b.to_lowercase()))
        .connect()
        .await
        .expect("create collection db");

    let legacy_decks = match schema {
        DeckSchema::Legacy => legacy_deck_document(&sample.decks),
        DeckSchema::Current => "{}".to_string(),
    };

    sqlx::query("CREATE TABLE col (id INTEGER PRIMARY KEY, decks TEXT NOT NULL)")
        .execute(&mut conn)
        .await
        .expect("create col");
    sqlx::query("INSERT INTO col (id, decks) VALUES (1, ?)")
        .bind(legacy_decks)
        .execute(&mut conn)
        .await
        .expect("insert col");
    sqlx::query(
        "CREATE TABLE notes (id INTEGER PRIMARY KEY, flds TEXT NOT NULL, tags TEXT NOT NULL)",
    )
    .execute(&mut conn)
    .await
    .expect("create notes");
    sqlx::query(
        "CREATE TABLE cards (id INTEGER PRIMARY KEY, nid INTEGER NOT NULL, did INTEGER NOT NULL)",
    )
    .execute(&mut conn)
    .await
    .expect("create cards");

    if let DeckSchema::Current = schema {
        sqlx::query(
            "CREATE TABLE decks (id INTEGER PRIMARY KEY NOT NULL, name TEXT NOT NULL COLLATE unicase)",
        )
        .execute(&mut conn)
        .await
        .expect("create decks");
        for (id, name) in &sample.decks {
            sqlx::query("INSERT INTO decks (id, name) VALUES (?, ?)")
                .bind(*id)
                .bind(name.replace("::", "\u{1f}"))
                .execute(&mut conn)
                .await
                .expect("insert deck");
        }
    }

    for (id, flds, tags) in &sample.notes {
        sqlx::query("INSERT INTO notes (id, flds, tags) VALUES (?, ?, ?)")
            .bind(*id)
            .bind(*flds)
            .bind(*tags)
            .execute(&mut conn)
            .await
            .expect("insert note");
    }
    for (id, nid, did) in &sample.cards {
        sqlx::query("INSERT INTO cards (id, nid, did) VALUES (?, ?, ?)")
            .bind(*id)
            .bind(*nid)
            .bind(*did)
            .execute(&mut conn)
            .await
            .expect("insert card");
    }

    conn.close().await.expect("close collection db");
    std::fs::read(path).expect("read collection db")
}

fn legacy_deck_document(decks: &[(i64, &str)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = decks
        .iter()
        .map(|(id, name)| {
            (
                id.to_string(),
                serde_json::json!({ "id": id, "name": name }),
            )
        })
        .collect();
    serde_json::Value::Object(map).to_string()
}

pub fn zstd(bytes: &[u8]) -> Vec<u8> {
    zstd::stream::encode_all(bytes, 3).expect("zstd encode")
}

/// Zip `entries` into an in-memory archive.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        writer.start_file(name.to_string(), options).expect("start entry");
        writer.write_all(content).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

/// The JSON media index matching the sample collection's references.
pub const SAMPLE_MEDIA_INDEX: &str = r#"{"0": "cat.jpg", "1": "gato.mp3"}"#;
pub const CAT_JPG: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";
pub const GATO_MP3: &[u8] = b"ID3 not really audio";
