//! Naver News Search client.
//!
//! One authenticated GET per keyword against the JSON search endpoint. The
//! keyword is wrapped in quotes for an exact-phrase match and results are
//! requested newest-first. A non-success response is logged and treated as
//! "no results"; transport errors propagate to the caller, which skips the
//! keyword for this run. No retries either way.

use crate::models::NewsItem;
use crate::pipeline::NewsSource;
use crate::utils::truncate_for_log;
use itertools::Itertools;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const SEARCH_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news.json";

/// Fixed page size requested from the API. The number of items kept is
/// capped separately by `max_results`.
const SEARCH_PAGE_SIZE: u32 = 30;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<NewsItem>,
}

/// Client for the news-search API.
///
/// Holds the key pair issued for the Naver application and a reqwest client
/// with a request timeout, so a stalled endpoint cannot hang the run forever.
#[derive(Debug)]
pub struct NaverClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    max_results: usize,
}

impl NaverClient {
    pub fn new(client_id: String, client_secret: String, max_results: usize) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            client_id,
            client_secret,
            max_results,
        }
    }
}

impl NewsSource for NaverClient {
    /// Search recent news for a keyword.
    #[instrument(level = "info", skip(self))]
    async fn search(&self, keyword: &str) -> Result<Vec<NewsItem>, Box<dyn Error>> {
        let query = format!("\"{keyword}\"");
        let url = format!(
            "{}?query={}&display={}&sort=date",
            SEARCH_ENDPOINT,
            urlencoding::encode(&query),
            SEARCH_PAGE_SIZE
        );

        let response = self
            .http
            .get(&url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                %status,
                body = %truncate_for_log(&body, 300),
                "Search request failed; treating as no results"
            );
            return Ok(Vec::new());
        }

        let parsed: SearchResponse = response.json().await?;
        debug!(raw_count = parsed.items.len(), "Search response parsed");

        let items = dedup_and_cap(parsed.items, self.max_results);
        info!(count = items.len(), "Search results ready");
        Ok(items)
    }
}

/// Drop repeated (title, link) pairs, keeping the first occurrence, then cap
/// the list length. The API occasionally returns the same syndicated article
/// more than once within a single page.
pub fn dedup_and_cap(items: Vec<NewsItem>, max: usize) -> Vec<NewsItem> {
    let mut items = items
        .into_iter()
        .unique_by(|item| (item.title.clone(), item.link.clone()))
        .collect::<Vec<_>>();
    items.truncate(max);
    items
}
