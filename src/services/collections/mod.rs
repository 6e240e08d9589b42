//! The imported collection and its derived views.

mod hierarchy;
mod types;

pub use hierarchy::build_deck_tree;
pub use types::{Collection, DeckNode};

use crate::database::models::{Card, Deck, DECK_SEPARATOR};
use crate::services::media::MediaStore;
use std::collections::BTreeMap;
use std::sync::Arc;

impl Collection {
    /// `decks` are sorted by name here; `cards` keep their scan order.
    pub fn new(mut decks: Vec<Deck>, cards: Vec<Card>, media: Arc<MediaStore>) -> Self {
        decks.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            decks,
            cards,
            media,
        }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn media(&self) -> &Arc<MediaStore> {
        &self.media
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn deck(&self, id: i64) -> Option<&Deck> {
        self.decks.iter().find(|deck| deck.id == id)
    }

    pub fn deck_by_name(&self, name: &str) -> Option<&Deck> {
        self.decks
            .binary_search_by(|deck| deck.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.decks[idx])
    }

    pub fn cards_in_deck(&self, deck_id: i64) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |card| card.deck_id == deck_id)
    }

    /// Cards grouped by deck id, including ids with no matching deck.
    pub fn cards_by_deck(&self) -> BTreeMap<i64, Vec<&Card>> {
        let mut groups: BTreeMap<i64, Vec<&Card>> = BTreeMap::new();
        for card in &self.cards {
            groups.entry(card.deck_id).or_default().push(card);
        }
        groups
    }

    pub fn root_decks(&self) -> impl Iterator<Item = &Deck> {
        self.decks.iter().filter(|deck| !deck.is_subdeck())
    }

    /// Direct children of the deck named `parent`.
    pub fn subdecks_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Deck> {
        self.decks
            .iter()
            .filter(move |deck| deck.parent_path() == Some(parent))
    }

    /// Decks at or below `name` in the hierarchy.
    pub fn deck_subtree<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Deck> {
        self.decks.iter().filter(move |deck| {
            deck.name == name
                || deck
                    .name
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with(DECK_SEPARATOR))
        })
    }

    pub fn deck_tree(&self) -> Vec<DeckNode> {
        build_deck_tree(&self.decks)
    }

    /// Every media filename referenced by a card, de-duplicated, in first-seen order.
    pub fn referenced_media(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.cards
            .iter()
            .flat_map(Card::media_references)
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
