use super::connection::table_exists;
use super::models::Deck;
use crate::types::errors::ImportResult;
use futures_util::TryStreamExt;
use serde_json::Value;
use sqlx::SqliteConnection;

/// Read every deck, preferring the dedicated `decks` table and falling back to
/// the JSON document in `col.decks`. Sorted by name (ordinal).
pub async fn read_decks(conn: &mut SqliteConnection) -> ImportResult<Vec<Deck>> {
    let mut decks = match read_deck_table(conn).await? {
        Some(decks) => decks,
        None => {
            log::debug!("No rows in decks table, falling back to col.decks");
            read_legacy_decks(conn).await?
        }
    };

    decks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(decks)
}

/// Current schema: `decks(id, name)` with the native separator in names.
/// `None` when the table is missing or has no rows.
pub async fn read_deck_table(conn: &mut SqliteConnection) -> ImportResult<Option<Vec<Deck>>> {
    if !table_exists(conn, "decks").await? {
        return Ok(None);
    }

    let mut decks = Vec::new();
    let mut rows =
        sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM decks").fetch(&mut *conn);
    while let Some((id, name)) = rows.try_next().await? {
        decks.push(Deck::from_native(id, &name));
    }

    Ok((!decks.is_empty()).then_some(decks))
}

/// Legacy schema: a single `col` row whose `decks` column holds a JSON object.
pub async fn read_legacy_decks(conn: &mut SqliteConnection) -> ImportResult<Vec<Deck>> {
    let document: Option<String> = sqlx::query_scalar("SELECT decks FROM col LIMIT 1")
        .fetch_optional(conn)
        .await?;

    Ok(document
        .map(|doc| parse_legacy_decks(&doc))
        .unwrap_or_default())
}

/// Parse `{"<id>": {"name": "..."}, ...}`. Entries with a non-numeric id or
/// without a string name are skipped.
pub fn parse_legacy_decks(document: &str) -> Vec<Deck> {
    let root: Value = match serde_json::from_str(document) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Legacy deck document is not valid JSON (non-fatal): {e}");
            return Vec::new();
        }
    };

    let Some(entries) = root.as_object() else {
        log::warn!("Legacy deck document is not a JSON object (non-fatal)");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(key, entry)| {
            let id = match key.parse::<i64>() {
                Ok(id) => id,
                Err(_) => {
                    log::debug!("Skipping legacy deck with non-numeric id {key:?}");
                    return None;
                }
            };
            match entry.get("name").and_then(Value::as_str) {
                Some(name) => Some(Deck::new(id, name)),
                None => {
                    log::debug!("Skipping legacy deck {id}: missing name");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/deck_repo_tests.rs"]
mod tests;
