use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GameState` value the client reports while a match is running.
pub const IN_PROGRESS: &str = "InProgress";

/// Deck payload returned by `static-decklist`.
///
/// Unknown fields are kept in `extra` so the artifact written to disk
/// reproduces the payload exactly as the game client reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckInfo {
    #[serde(rename = "DeckCode")]
    pub deck_code: Option<String>,
    #[serde(rename = "CardsInDeck")]
    pub cards_in_deck: Option<BTreeMap<String, u32>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DeckInfo {
    /// A deck is usable only once the client reports a code and at least
    /// one card. Outside a match both fields come back null.
    pub fn is_valid(&self) -> bool {
        self.deck_code.is_some()
            && self
                .cards_in_deck
                .as_ref()
                .is_some_and(|cards| !cards.is_empty())
    }
}

/// Opaque board payload returned by `positional-rectangles`.
///
/// Only the `GameState` field is interpreted; the rest of the payload is
/// carried as-is for persistence and change detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot(Value);

impl BoardSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn game_state(&self) -> Option<&str> {
        self.0.get("GameState").and_then(Value::as_str)
    }

    pub fn in_progress(&self) -> bool {
        self.game_state() == Some(IN_PROGRESS)
    }

    /// Compact serialization used both as the artifact body and as the
    /// comparison key for duplicate suppression.
    pub fn to_payload(&self) -> String {
        self.0.to_string()
    }
}

/// Opaque result payload returned by `game-result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameResult(Value);

impl GameResult {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn to_payload(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deck_validity_requires_code_and_cards() {
        let empty: DeckInfo = serde_json::from_value(json!({
            "DeckCode": null,
            "CardsInDeck": null,
        }))
        .expect("parse empty deck");
        assert!(!empty.is_valid());

        let no_cards: DeckInfo = serde_json::from_value(json!({
            "DeckCode": "CEBAIAIFB4WDANQIAEAQGDAUDAQSIJZUAIAQCBIFAEAQCBAA",
            "CardsInDeck": {},
        }))
        .expect("parse deck without cards");
        assert!(!no_cards.is_valid());

        let valid: DeckInfo = serde_json::from_value(json!({
            "DeckCode": "CEBAIAIFB4WDANQIAEAQGDAUDAQSIJZUAIAQCBIFAEAQCBAA",
            "CardsInDeck": { "01DE002": 3, "01DE012": 2 },
        }))
        .expect("parse valid deck");
        assert!(valid.is_valid());
    }

    #[test]
    fn deck_round_trip_preserves_unknown_fields() {
        let raw = json!({
            "DeckCode": "CEBAIAIFB4WDANQIAEAQGDAUDAQSIJZUAIAQCBIFAEAQCBAA",
            "CardsInDeck": { "01DE002": 3 },
            "FormatVersion": 5,
        });
        let deck: DeckInfo = serde_json::from_value(raw.clone()).expect("parse deck");
        assert_eq!(serde_json::to_value(&deck).expect("serialize deck"), raw);
    }

    #[test]
    fn board_snapshot_reads_game_state() {
        let active = BoardSnapshot::new(json!({
            "GameState": "InProgress",
            "Rectangles": [],
        }));
        assert!(active.in_progress());

        let menus = BoardSnapshot::new(json!({ "GameState": "Menus" }));
        assert_eq!(menus.game_state(), Some("Menus"));
        assert!(!menus.in_progress());

        let missing = BoardSnapshot::new(json!({ "Rectangles": [] }));
        assert!(!missing.in_progress());
    }

    #[test]
    fn identical_boards_share_a_payload() {
        let a = BoardSnapshot::new(json!({ "GameState": "InProgress", "Rectangles": [1, 2] }));
        let b = BoardSnapshot::new(json!({ "GameState": "InProgress", "Rectangles": [1, 2] }));
        let c = BoardSnapshot::new(json!({ "GameState": "InProgress", "Rectangles": [1, 3] }));
        assert_eq!(a.to_payload(), b.to_payload());
        assert_ne!(a.to_payload(), c.to_payload());
    }
}
