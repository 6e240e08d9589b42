//! Import progress contract.
//!
//! Stages are emitted strictly in declaration order; `ReadingCards` may repeat
//! with a growing `current` count.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "stage", content = "data")]
pub enum ImportProgress {
    /// Archive entries are being unpacked into the working directory.
    Extracting,
    /// Deck rows (current or legacy schema) are being read.
    ReadingDecks,
    /// Card rows are being joined against notes.
    #[serde(rename_all = "camelCase")]
    ReadingCards { current: usize, total: usize },
    /// The media index is being decoded.
    ParsingMedia,
}

impl ImportProgress {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Extracting => "extracting",
            Self::ReadingDecks => "reading-decks",
            Self::ReadingCards { .. } => "reading-cards",
            Self::ParsingMedia => "parsing-media",
        }
    }
}
