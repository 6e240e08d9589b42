use super::types::DeckNode;
use crate::database::models::{Deck, DECK_SEPARATOR};
use std::collections::BTreeMap;

#[derive(Default)]
struct Level {
    deck_id: Option<i64>,
    children: BTreeMap<String, Level>,
}

/// Build the deck forest from flat `::` names. Missing intermediate levels
/// become nodes without a deck id. Siblings are ordered by name.
pub fn build_deck_tree(decks: &[Deck]) -> Vec<DeckNode> {
    let mut root = Level::default();
    for deck in decks {
        let mut level = &mut root;
        for segment in deck.path_components() {
            level = level.children.entry(segment.to_string()).or_default();
        }
        level.deck_id = Some(deck.id);
    }

    into_nodes(root.children, None)
}

fn into_nodes(children: BTreeMap<String, Level>, parent: Option<&str>) -> Vec<DeckNode> {
    children
        .into_iter()
        .map(|(name, level)| {
            let full_name = match parent {
                Some(parent) => format!("{parent}{DECK_SEPARATOR}{name}"),
                None => name.clone(),
            };
            let children = into_nodes(level.children, Some(&full_name));
            DeckNode {
                name,
                full_name,
                deck_id: level.deck_id,
                children,
            }
        })
        .collect()
}
