//! Notion destination client: the existing-clip query and the page insert.
//!
//! Two operations against the REST API (`Notion-Version: 2022-06-28`):
//!
//! - `databases/{id}/query`, filtered to a trailing date window, to learn
//!   which clips a database already holds
//! - `pages` create, one call per clip
//!
//! Each destination database carries the same five properties: `Title`
//! (title), `Link` (url), `Keyword` (rich_text), `Summary` (rich_text),
//! `Date` (date).

use crate::models::{ClipKey, NewsClip};
use crate::pipeline::ClipStore;
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

const API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Single query page. With a two-day window and at most a handful of inserts
/// per run this comfortably covers everything the dedup check needs.
const QUERY_PAGE_SIZE: u32 = 100;

// Query-response shape, kept as narrow as the dedup key requires. Unknown
// properties are ignored; a page missing Title or Link deserializes with
// `None` and is skipped.

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    properties: PageProperties,
}

#[derive(Debug, Deserialize)]
struct PageProperties {
    #[serde(rename = "Title")]
    title: Option<TitleProperty>,
    #[serde(rename = "Link")]
    link: Option<UrlProperty>,
}

#[derive(Debug, Deserialize)]
struct TitleProperty {
    #[serde(default)]
    title: Vec<RichText>,
}

#[derive(Debug, Deserialize)]
struct RichText {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize)]
struct UrlProperty {
    url: Option<String>,
}

/// Client for the destination database API.
#[derive(Debug)]
pub struct NotionClient {
    http: reqwest::Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            token,
        }
    }
}

impl ClipStore for NotionClient {
    /// Collect the identity keys of clips recorded on or after `since`.
    ///
    /// Stored records missing a usable title or link are skipped. Errors
    /// propagate as `Err`; what a failed fetch means for deduplication is the
    /// caller's decision.
    #[instrument(level = "info", skip(self))]
    async fn existing_keys(
        &self,
        database_id: &str,
        since: NaiveDate,
    ) -> Result<HashSet<ClipKey>, Box<dyn Error>> {
        let url = format!("{API_BASE}/databases/{database_id}/query");
        let body = json!({
            "filter": {
                "property": "Date",
                "date": { "on_or_after": since.to_string() }
            },
            "page_size": QUERY_PAGE_SIZE,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!(
                "database query returned {}: {}",
                status,
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let parsed: QueryResponse = response.json().await?;
        let total = parsed.results.len();
        let keys = parsed
            .results
            .iter()
            .filter_map(page_key)
            .collect::<HashSet<_>>();
        debug!(total, usable = keys.len(), "Existing records examined");
        info!(count = keys.len(), "Collected existing clip keys");
        Ok(keys)
    }

    /// Insert one clip as a page of `database_id`.
    #[instrument(level = "info", skip(self, clip), fields(title = %clip.title))]
    async fn insert(&self, clip: &NewsClip, database_id: &str) -> Result<(), Box<dyn Error>> {
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": {
                "Title": { "title": [{ "text": { "content": clip.title } }] },
                "Link": { "url": clip.link },
                "Keyword": { "rich_text": [{ "text": { "content": clip.keyword } }] },
                "Summary": { "rich_text": [{ "text": { "content": clip.summary } }] },
                "Date": { "date": { "start": clip.date } }
            }
        });

        let response = self
            .http
            .post(format!("{API_BASE}/pages"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                %status,
                body = %truncate_for_log(&body, 300),
                "Clip insert rejected"
            );
            return Err(format!("page insert returned {status}").into());
        }

        info!(
            source = clip.source_tag().as_deref().unwrap_or("unknown"),
            "Clip uploaded"
        );
        Ok(())
    }
}

/// Extract the dedup key from a stored page, if it carries both fields.
fn page_key(page: &Page) -> Option<ClipKey> {
    let title = page
        .properties
        .title
        .as_ref()?
        .title
        .iter()
        .map(|rt| rt.plain_text.as_str())
        .collect::<String>();
    let link = page.properties.link.as_ref()?.url.clone()?;
    if title.is_empty() {
        return None;
    }
    Some(ClipKey { title, link })
}
