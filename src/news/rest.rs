//! REST client for the Seeking Alpha news API (RapidAPI gateway)

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::messages::NewsListResponse;
use crate::common::errors::{Result, ScreenerError};
use crate::common::traits::NewsFetcher;
use crate::common::types::Article;
use crate::config::types::NewsConfig;

/// Path of the per-symbol news listing
const LIST_BY_SYMBOL_PATH: &str = "/news/v2/list-by-symbol";
/// Header carrying the RapidAPI key
const API_KEY_HEADER: &str = "x-rapidapi-key";
/// Articles requested per ticker unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// REST client for Seeking Alpha news
#[derive(Debug, Clone)]
pub struct SeekingAlphaClient {
    /// HTTP client
    client: Client,
    /// Base URL of the API gateway
    base_url: String,
    /// Optional RapidAPI key
    api_key: Option<String>,
    /// Number of articles to request per ticker
    page_size: u32,
}

impl SeekingAlphaClient {
    /// Create a new client with the default 30s timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScreenerError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Build a client from the `news` config section
    pub fn from_config(config: &NewsConfig, timeout: Duration) -> Result<Self> {
        let client = Self::with_timeout(&config.base_url, timeout)?.with_page_size(config.page_size);
        Ok(match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        })
    }

    /// Set the RapidAPI key sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set how many articles to request per ticker
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// List the most recent articles for a ticker
    #[instrument(skip(self))]
    pub async fn list_by_symbol(&self, ticker: &str) -> Result<Vec<Article>> {
        let url = format!("{}{}", self.base_url, LIST_BY_SYMBOL_PATH);
        let size = self.page_size.to_string();
        debug!("Fetching news from: {} (id={})", url, ticker);

        let mut request = self
            .client
            .get(&url)
            .query(&[("size", size.as_str()), ("id", ticker)]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ScreenerError::Timeout(format!("news request for {}", ticker))
            } else {
                ScreenerError::HttpRequest(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScreenerError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let news: NewsListResponse = serde_json::from_str(&body)?;
        Ok(news.into_articles())
    }
}

#[async_trait]
impl NewsFetcher for SeekingAlphaClient {
    async fn fetch(&self, ticker: &str) -> Result<Vec<Article>> {
        self.list_by_symbol(ticker).await
    }

    fn source_name(&self) -> &'static str {
        "seeking-alpha"
    }
}
