//! Game client status API abstraction layer.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use runetrack_types::{
    game::{BoardSnapshot, DeckInfo, GameResult},
    Result, TrackerError,
};
use tracing::info;

mod http;

pub use http::HttpGameClient;

/// Read-only view of the game client's local status API.
///
/// Each operation issues one request; a failed or unparsable call comes back
/// as a network error, which callers treat as "no information this cycle".
#[async_trait]
pub trait GameClient: Send + Sync {
    async fn fetch_deck(&self) -> Result<DeckInfo>;
    async fn fetch_board(&self) -> Result<BoardSnapshot>;
    async fn fetch_result(&self) -> Result<GameResult>;
}

/// Queue-driven client used for early integration and testing.
///
/// Responses are scripted per endpoint; an exhausted queue behaves like an
/// unreachable client.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    decks: Arc<Mutex<VecDeque<Result<DeckInfo>>>>,
    boards: Arc<Mutex<VecDeque<Result<BoardSnapshot>>>>,
    results: Arc<Mutex<VecDeque<Result<GameResult>>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_deck(&self, response: Result<DeckInfo>) {
        self.push(&self.decks, response);
    }

    pub fn push_board(&self, response: Result<BoardSnapshot>) {
        self.push(&self.boards, response);
    }

    pub fn push_result(&self, response: Result<GameResult>) {
        self.push(&self.results, response);
    }

    fn push<T>(&self, queue: &Arc<Mutex<VecDeque<Result<T>>>>, response: Result<T>) {
        if let Ok(mut guard) = queue.lock() {
            guard.push_back(response);
        }
    }

    fn pop<T>(&self, queue: &Arc<Mutex<VecDeque<Result<T>>>>, endpoint: &str) -> Result<T> {
        let mut guard = queue
            .lock()
            .map_err(|_| client_error(format!("failed to lock {endpoint} script")))?;
        guard
            .pop_front()
            .unwrap_or_else(|| Err(client_error(format!("{endpoint} script exhausted"))))
    }
}

#[async_trait]
impl GameClient for ScriptedClient {
    async fn fetch_deck(&self) -> Result<DeckInfo> {
        info!("Scripted client serving {}", http::DECKLIST_ENDPOINT);
        self.pop(&self.decks, http::DECKLIST_ENDPOINT)
    }

    async fn fetch_board(&self) -> Result<BoardSnapshot> {
        self.pop(&self.boards, http::POSITIONS_ENDPOINT)
    }

    async fn fetch_result(&self) -> Result<GameResult> {
        info!("Scripted client serving {}", http::RESULT_ENDPOINT);
        self.pop(&self.results, http::RESULT_ENDPOINT)
    }
}

/// Generate an error aligned with client semantics.
pub fn client_error(message: impl Into<String>) -> TrackerError {
    TrackerError::Network(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn scripted_client_serves_in_order_then_fails() {
        let client = ScriptedClient::new();
        client.push_board(Ok(BoardSnapshot::new(json!({ "GameState": "Menus" }))));
        client.push_board(Err(client_error("connection refused")));

        let first = client.fetch_board().await.expect("scripted board");
        assert_eq!(first.game_state(), Some("Menus"));

        let second = client.fetch_board().await;
        assert!(matches!(second, Err(TrackerError::Network(_))));

        // Exhausted queue behaves like an unreachable client.
        let third = client.fetch_board().await;
        assert!(matches!(third, Err(TrackerError::Network(_))));
    }
}
