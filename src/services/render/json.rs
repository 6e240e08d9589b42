use crate::database::models::Card;
use crate::services::collections::{Collection, DeckNode};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionDocument<'a> {
    decks: Vec<DeckEntry<'a>>,
    deck_tree: Vec<DeckNode>,
    cards: Vec<CardEntry<'a>>,
    media: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckEntry<'a> {
    id: i64,
    name: &'a str,
    short_name: &'a str,
    parent_path: Option<&'a str>,
    is_subdeck: bool,
    card_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardEntry<'a> {
    #[serde(flatten)]
    card: &'a Card,
    media_references: Vec<String>,
}

/// Pretty-printed JSON of decks, deck tree, cards and media filenames.
pub fn render_json(collection: &Collection) -> serde_json::Result<String> {
    let by_deck = collection.cards_by_deck();
    let document = CollectionDocument {
        decks: collection
            .decks()
            .iter()
            .map(|deck| DeckEntry {
                id: deck.id,
                name: &deck.name,
                short_name: deck.short_name(),
                parent_path: deck.parent_path(),
                is_subdeck: deck.is_subdeck(),
                card_count: by_deck.get(&deck.id).map_or(0, Vec::len),
            })
            .collect(),
        deck_tree: collection.deck_tree(),
        cards: collection
            .cards()
            .iter()
            .map(|card| CardEntry {
                card,
                media_references: card.media_references(),
            })
            .collect(),
        media: collection.media().list_filenames(),
    };

    serde_json::to_string_pretty(&document)
}
