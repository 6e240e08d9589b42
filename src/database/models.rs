use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Public hierarchy separator used in deck names.
pub const DECK_SEPARATOR: &str = "::";

/// Separator used by current-generation databases inside `decks.name`.
pub const NATIVE_DECK_SEPARATOR: char = '\u{1f}';

/// Separator between fields inside `notes.flds`.
pub const FIELD_SEPARATOR: char = '\u{1f}';

static IMAGE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).expect("valid image reference regex"));
static SOUND_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[sound:([^\]]+)\]").expect("valid sound reference regex"));

/// A deck as stored in the collection. Names always use `::` for hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: i64,
    pub name: String,
}

impl Deck {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build a deck from a current-schema row, translating the native separator.
    pub fn from_native(id: i64, raw_name: &str) -> Self {
        Self::new(
            id,
            raw_name.replace(NATIVE_DECK_SEPARATOR, DECK_SEPARATOR),
        )
    }

    pub fn path_components(&self) -> Vec<&str> {
        self.name.split(DECK_SEPARATOR).collect()
    }

    pub fn short_name(&self) -> &str {
        self.name
            .rsplit(DECK_SEPARATOR)
            .next()
            .unwrap_or(self.name.as_str())
    }

    /// Everything before the last segment, or `None` for a root deck.
    pub fn parent_path(&self) -> Option<&str> {
        self.name
            .rfind(DECK_SEPARATOR)
            .map(|idx| &self.name[..idx])
    }

    pub fn is_subdeck(&self) -> bool {
        self.name.contains(DECK_SEPARATOR)
    }

    /// Nesting depth, 0 for a root deck.
    pub fn depth(&self) -> usize {
        self.name.matches(DECK_SEPARATOR).count()
    }
}

/// A card joined with the note that owns its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub note_id: i64,
    pub deck_id: i64,
    pub fields: Vec<String>,
    pub tags: BTreeSet<String>,
}

impl Card {
    pub fn front(&self) -> Option<&str> {
        self.fields.first().map(String::as_str)
    }

    pub fn back(&self) -> Option<&str> {
        self.fields.get(1).map(String::as_str)
    }

    /// Media filenames referenced from field content.
    ///
    /// Image references (`src="..."`) come first, then sound references
    /// (`[sound:...]`); each group follows field order.
    pub fn media_references(&self) -> Vec<String> {
        let images = self.fields.iter().flat_map(|field| {
            IMAGE_REF_RE
                .captures_iter(field)
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        });
        let sounds = self.fields.iter().flat_map(|field| {
            SOUND_REF_RE
                .captures_iter(field)
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        });
        images.chain(sounds).collect()
    }
}

/// Raw note row, only used to join cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Note {
    pub id: i64,
    pub fields: Vec<String>,
    pub tags: BTreeSet<String>,
}

impl Note {
    pub fn from_row(id: i64, raw_fields: &str, raw_tags: &str) -> Self {
        Self {
            id,
            fields: split_fields(raw_fields),
            tags: split_tags(raw_tags),
        }
    }

    pub fn into_card(self, card_id: i64, deck_id: i64) -> Card {
        Card {
            id: card_id,
            note_id: self.id,
            deck_id,
            fields: self.fields,
            tags: self.tags,
        }
    }
}

/// Split `notes.flds` on the field separator only. Whitespace is content.
pub fn split_fields(raw: &str) -> Vec<String> {
    raw.split(FIELD_SEPARATOR).map(str::to_string).collect()
}

/// Split `notes.tags` on runs of plain spaces, dropping empty tokens.
pub fn split_tags(raw: &str) -> BTreeSet<String> {
    raw.split(' ')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/models_tests.rs"]
mod tests;
