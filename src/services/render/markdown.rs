use crate::database::models::Card;
use crate::services::collections::{Collection, DeckNode};
use std::collections::BTreeMap;
use std::fmt::Write;

const MAX_HEADING_LEVEL: usize = 6;

/// Decks become nested headings; each card lists its fields, tags and media.
pub fn render_markdown(collection: &Collection, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}\n");
    let _ = writeln!(
        out,
        "_{} decks, {} cards, {} media files_\n",
        collection.deck_count(),
        collection.card_count(),
        collection.media().len()
    );

    let by_deck = collection.cards_by_deck();
    for node in collection.deck_tree() {
        write_node(&mut out, &node, 2, &by_deck);
    }

    let orphans: Vec<&Card> = by_deck
        .iter()
        .filter(|(deck_id, _)| collection.deck(**deck_id).is_none())
        .flat_map(|(_, cards)| cards.iter().copied())
        .collect();
    if !orphans.is_empty() {
        let _ = writeln!(out, "## (Unknown deck)\n");
        for card in orphans {
            write_card(&mut out, card);
        }
    }

    out
}

fn write_node(
    out: &mut String,
    node: &DeckNode,
    level: usize,
    by_deck: &BTreeMap<i64, Vec<&Card>>,
) {
    let hashes = "#".repeat(level.min(MAX_HEADING_LEVEL));
    let _ = writeln!(out, "{hashes} {}\n", node.name);

    if let Some(cards) = node.deck_id.and_then(|id| by_deck.get(&id)) {
        for card in cards {
            write_card(out, card);
        }
    }
    for child in &node.children {
        write_node(out, child, level + 1, by_deck);
    }
}

fn write_card(out: &mut String, card: &Card) {
    let _ = writeln!(out, "- **Front:** {}", inline(card.front().unwrap_or_default()));
    if let Some(back) = card.back() {
        let _ = writeln!(out, "  **Back:** {}", inline(back));
    }
    for (i, extra) in card.fields.iter().enumerate().skip(2) {
        let _ = writeln!(out, "  **Field {}:** {}", i + 1, inline(extra));
    }
    if !card.tags.is_empty() {
        let tags: Vec<&str> = card.tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  Tags: {}", tags.join(", "));
    }
    let media = card.media_references();
    if !media.is_empty() {
        let _ = writeln!(out, "  Media: {}", media.join(", "));
    }
    out.push('\n');
}

/// Collapse line breaks so a field stays inside its list item.
fn inline(field: &str) -> String {
    field
        .replace("<br>", " ")
        .replace("<br/>", " ")
        .replace("<br />", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
