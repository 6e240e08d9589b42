use crate::database::models::{Card, Deck};
use crate::services::media::MediaStore;
use serde::Serialize;
use std::sync::Arc;

/// Everything recovered from one export archive. Read-only.
///
/// Cloning is cheap for the media handle; the extraction directory lives as
/// long as any clone of the store does.
#[derive(Debug, Clone)]
pub struct Collection {
    pub(super) decks: Vec<Deck>,
    pub(super) cards: Vec<Card>,
    pub(super) media: Arc<MediaStore>,
}

/// One level of the deck hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckNode {
    /// Last path segment.
    pub name: String,
    /// Full `::`-joined path.
    pub full_name: String,
    /// `None` when the level is only implied by a deeper deck's name.
    pub deck_id: Option<i64>,
    pub children: Vec<DeckNode>,
}

impl DeckNode {
    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(DeckNode::size).sum::<usize>()
    }
}
