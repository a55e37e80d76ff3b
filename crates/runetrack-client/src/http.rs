use std::time::Duration;

use async_trait::async_trait;
use runetrack_types::{
    config::ClientConfig,
    game::{BoardSnapshot, DeckInfo, GameResult},
    Result,
};
use serde_json::Value;
use tracing::debug;

use crate::{client_error, GameClient};

pub(crate) const DECKLIST_ENDPOINT: &str = "static-decklist";
pub(crate) const POSITIONS_ENDPOINT: &str = "positional-rectangles";
pub(crate) const RESULT_ENDPOINT: &str = "game-result";

/// Client for the local status API exposed by the running game client.
pub struct HttpGameClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGameClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let http = builder
            .build()
            .map_err(|err| client_error(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn fetch_json(&self, endpoint: &str) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| client_error(format!("request to {endpoint} failed: {err}")))?;
        let value = response
            .json::<Value>()
            .await
            .map_err(|err| client_error(format!("unparsable body from {endpoint}: {err}")))?;
        debug!("Called endpoint {endpoint}");
        Ok(value)
    }
}

#[async_trait]
impl GameClient for HttpGameClient {
    async fn fetch_deck(&self) -> Result<DeckInfo> {
        let value = self.fetch_json(DECKLIST_ENDPOINT).await?;
        serde_json::from_value(value)
            .map_err(|err| client_error(format!("unexpected {DECKLIST_ENDPOINT} shape: {err}")))
    }

    async fn fetch_board(&self) -> Result<BoardSnapshot> {
        Ok(BoardSnapshot::new(self.fetch_json(POSITIONS_ENDPOINT).await?))
    }

    async fn fetch_result(&self) -> Result<GameResult> {
        Ok(GameResult::new(self.fetch_json(RESULT_ENDPOINT).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_join_without_double_slashes() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:21337/".into(),
            timeout_ms: 0,
        };
        let client = HttpGameClient::new(&config).expect("build client");
        assert_eq!(
            client.endpoint_url(POSITIONS_ENDPOINT),
            "http://127.0.0.1:21337/positional-rectangles"
        );
    }

    #[tokio::test]
    async fn unreachable_client_maps_to_network_error() {
        // Port 9 (discard) is a safe never-listening target on loopback.
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_ms: 250,
        };
        let client = HttpGameClient::new(&config).expect("build client");
        let err = client.fetch_board().await.expect_err("expected failure");
        assert!(err.is_recoverable());
    }
}
