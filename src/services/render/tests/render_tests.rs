use super::*;
use crate::database::models::{Card, Deck};
use crate::services::collections::Collection;
use crate::services::media::{MediaIndex, MediaStore};
use std::collections::BTreeSet;
use std::sync::Arc;

fn sample_collection() -> Collection {
    let index: MediaIndex = [("0".to_string(), "cat.png".to_string())]
        .into_iter()
        .collect();
    let media = Arc::new(MediaStore::new(&index, "/nonexistent", 4));
    let tags: BTreeSet<String> = ["animal".to_string(), "n5".to_string()].into_iter().collect();

    Collection::new(
        vec![Deck::new(1, "Lang"), Deck::new(2, "Lang::Japanese")],
        vec![
            Card {
                id: 10,
                note_id: 100,
                deck_id: 2,
                fields: vec![
                    "neko<br>猫".to_string(),
                    r#"cat <img src="cat.png">"#.to_string(),
                    "noun".to_string(),
                ],
                tags,
            },
            Card {
                id: 11,
                note_id: 101,
                deck_id: 77,
                fields: vec!["lost".to_string()],
                tags: BTreeSet::new(),
            },
        ],
        media,
    )
}

#[test]
fn test_format_parsing() {
    assert_eq!("md".parse::<RenderFormat>().unwrap(), RenderFormat::Markdown);
    assert_eq!("JSON".parse::<RenderFormat>().unwrap(), RenderFormat::Json);
    assert!("html".parse::<RenderFormat>().is_err());
}

#[test]
fn test_markdown_nests_decks_and_lists_cards() {
    let md = render_markdown(&sample_collection(), "Export");

    assert!(md.starts_with("# Export\n"));
    assert!(md.contains("_2 decks, 2 cards, 1 media files_"));
    assert!(md.contains("## Lang\n"));
    assert!(md.contains("### Japanese\n"));
    assert!(md.contains("- **Front:** neko 猫"));
    assert!(md.contains(r#"**Back:** cat <img src="cat.png">"#));
    assert!(md.contains("**Field 3:** noun"));
    assert!(md.contains("Tags: animal, n5"));
    assert!(md.contains("Media: cat.png"));
    assert!(md.find("### Japanese").unwrap() < md.find("neko").unwrap());
}

#[test]
fn test_markdown_keeps_cards_of_unknown_decks() {
    let md = render_markdown(&sample_collection(), "Export");
    let unknown = md.find("## (Unknown deck)").unwrap();
    assert!(md[unknown..].contains("- **Front:** lost"));
}

#[test]
fn test_json_document_shape() {
    let json = render_json(&sample_collection()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["decks"][1]["name"], "Lang::Japanese");
    assert_eq!(value["decks"][1]["shortName"], "Japanese");
    assert_eq!(value["decks"][1]["parentPath"], "Lang");
    assert_eq!(value["decks"][1]["cardCount"], 1);
    assert_eq!(value["decks"][0]["parentPath"], serde_json::Value::Null);
    assert_eq!(value["deckTree"][0]["children"][0]["fullName"], "Lang::Japanese");
    assert_eq!(value["cards"][0]["noteId"], 100);
    assert_eq!(value["cards"][0]["mediaReferences"][0], "cat.png");
    assert_eq!(value["media"][0], "cat.png");
}
