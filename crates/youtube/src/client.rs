use async_trait::async_trait;
use journal_relay_common::http::{build_http_client, ensure_success, transport_error};
use journal_relay_common::{AppConfig, RelayError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{SearchResponse, VideoHit};

const SERVICE: &str = "YouTube";

/// Video lookup by free-text query
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Best match for `query`, if any
    async fn search_first(&self, query: &str) -> Result<Option<VideoHit>>;
}

/// YouTube Data API v3 client
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl YouTubeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = build_http_client(timeout)?;

        info!("YouTube client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .youtube_api_key
            .as_deref()
            .ok_or_else(|| RelayError::config("YOUTUBE_API_KEY is not set"))?;

        Self::new(&config.youtube_base_url, api_key, config.request_timeout())
    }

    fn search_params<'a>(&'a self, query: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", "1"),
            ("q", query),
            ("key", self.api_key.as_str()),
        ]
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_first(&self, query: &str) -> Result<Option<VideoHit>> {
        let url = format!("{}/search", self.base_url);
        debug!("Searching YouTube - Query: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&self.search_params(query))
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let parsed: SearchResponse = ensure_success(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::internal(format!("Failed to parse YouTube response: {}", e)))?;

        let hit = parsed.first_video();
        debug!("YouTube search returned {}", hit.as_ref().map_or("nothing", |h| h.video_id.as_str()));
        Ok(hit)
    }
}
