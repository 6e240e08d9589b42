use super::models::{Card, Note};
use crate::types::errors::ImportResult;
use futures_util::TryStreamExt;
use sqlx::SqliteConnection;
use std::collections::HashMap;

/// First pass: every note, keyed by id.
pub(crate) async fn read_notes(conn: &mut SqliteConnection) -> ImportResult<HashMap<i64, Note>> {
    let mut notes = HashMap::new();
    let mut rows = sqlx::query_as::<_, (i64, String, String)>("SELECT id, flds, tags FROM notes")
        .fetch(&mut *conn);

    while let Some((id, flds, tags)) = rows.try_next().await? {
        notes.insert(id, Note::from_row(id, &flds, &tags));
    }

    Ok(notes)
}

pub async fn count_cards(conn: &mut SqliteConnection) -> ImportResult<usize> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards")
        .fetch_one(conn)
        .await?;
    Ok(total.max(0) as usize)
}

/// Second pass: scan `cards` and join each row against `notes`.
///
/// Rows whose note is missing are dropped. `on_scanned` receives the running
/// number of rows scanned (joined or not).
pub(crate) async fn read_cards<F>(
    conn: &mut SqliteConnection,
    notes: &HashMap<i64, Note>,
    mut on_scanned: F,
) -> ImportResult<Vec<Card>>
where
    F: FnMut(usize),
{
    let mut cards = Vec::new();
    let mut scanned = 0usize;
    let mut dropped = 0usize;
    let mut rows = sqlx::query_as::<_, (i64, i64, i64)>("SELECT id, nid, did FROM cards")
        .fetch(&mut *conn);

    while let Some((id, nid, did)) = rows.try_next().await? {
        scanned += 1;
        match notes.get(&nid) {
            Some(note) => cards.push(note.clone().into_card(id, did)),
            None => dropped += 1,
        }
        on_scanned(scanned);
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} card(s) whose note is missing");
    }

    Ok(cards)
}

/// Both passes in sequence.
pub async fn read_all_cards<F>(
    conn: &mut SqliteConnection,
    on_scanned: F,
) -> ImportResult<Vec<Card>>
where
    F: FnMut(usize),
{
    let notes = read_notes(conn).await?;
    read_cards(conn, &notes, on_scanned).await
}

#[cfg(test)]
#[path = "tests/card_repo_tests.rs"]
mod tests;
