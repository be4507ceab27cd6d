//! The per-keyword clip pipeline.
//!
//! For each configured keyword, in declaration order: fetch the identity keys
//! already present in its destination database, search for news, drop
//! anything already clipped, normalize the remainder, and upload it one item
//! at a time. Execution is strictly sequential: one outbound request awaited
//! at a time.
//!
//! Every failure is absorbed and counted rather than propagated:
//!
//! - search failure skips the keyword
//! - existing-clip query failure disables deduplication for that keyword
//!   (uploads proceed, at the risk of duplicates, rather than halting)
//! - insert failure skips that single item
//!
//! The run itself never returns an error; callers read the [`RunSummary`].

use crate::config::Config;
use crate::models::{ClipKey, NewsClip, NewsItem};
use crate::normalize::{clean_text, normalize_pub_date};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use std::error::Error;
use tracing::{info, instrument, warn};

/// Source of raw news items for a keyword.
#[allow(async_fn_in_trait)]
pub trait NewsSource {
    async fn search(&self, keyword: &str) -> Result<Vec<NewsItem>, Box<dyn Error>>;
}

/// Destination holding clipped items, one database per keyword.
#[allow(async_fn_in_trait)]
pub trait ClipStore {
    /// Identity keys of records stored on or after `since`.
    async fn existing_keys(
        &self,
        database_id: &str,
        since: NaiveDate,
    ) -> Result<HashSet<ClipKey>, Box<dyn Error>>;

    /// Write one clip as a new record.
    async fn insert(&self, clip: &NewsClip, database_id: &str) -> Result<(), Box<dyn Error>>;
}

/// Counters for one complete run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Keywords configured for the run.
    pub keywords: usize,
    /// Keywords whose search call failed outright.
    pub keywords_failed: usize,
    /// Items returned by search, across all keywords, after dedup and cap.
    pub found: usize,
    /// Items inserted into a destination database.
    pub uploaded: usize,
    /// Items skipped because their key was already present.
    pub duplicates: usize,
    /// Items whose insert was rejected.
    pub failed: usize,
}

impl RunSummary {
    /// True when no keyword got past its search call.
    pub fn all_failed(&self) -> bool {
        self.keywords > 0 && self.keywords_failed == self.keywords
    }
}

/// Run the pipeline over every configured keyword.
///
/// `today` anchors both the dedup lookback window and the date-parse
/// fallback. Callers pass the current date; tests pass a fixed one.
#[instrument(level = "info", skip_all, fields(keywords = config.keywords.len()))]
pub async fn run<S, D>(source: &S, store: &D, config: &Config, today: NaiveDate) -> RunSummary
where
    S: NewsSource,
    D: ClipStore,
{
    let since = today - Duration::days(config.lookback_days);
    let mut summary = RunSummary::default();

    for mapping in &config.keywords {
        summary.keywords += 1;
        let keyword = mapping.keyword.as_str();
        let database_id = mapping.database_id.as_str();

        // Fail open: a failed fetch disables deduplication for this keyword
        // instead of blocking its uploads.
        let mut known = match store.existing_keys(database_id, since).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(
                    keyword,
                    error = %e,
                    "Existing-clip query failed; assuming no duplicates this run"
                );
                HashSet::new()
            }
        };

        let items = match source.search(keyword).await {
            Ok(items) => items,
            Err(e) => {
                warn!(keyword, error = %e, "Search failed; skipping keyword");
                summary.keywords_failed += 1;
                continue;
            }
        };

        if items.is_empty() {
            info!(keyword, "No search results");
            continue;
        }
        summary.found += items.len();

        for item in &items {
            let clip = normalize_item(item, keyword, today);
            let key = ClipKey::new(clip.title.clone(), clip.link.clone());

            if known.contains(&key) {
                info!(keyword, title = %clip.title, "Already clipped; skipping");
                summary.duplicates += 1;
                continue;
            }

            match store.insert(&clip, database_id).await {
                Ok(()) => {
                    summary.uploaded += 1;
                    // Guard against the same key surfacing twice in one run.
                    known.insert(key);
                }
                Err(e) => {
                    warn!(keyword, title = %clip.title, error = %e, "Insert failed; item skipped");
                    summary.failed += 1;
                }
            }
        }
    }

    summary
}

/// Turn a raw search hit into the record its destination receives.
fn normalize_item(item: &NewsItem, keyword: &str, today: NaiveDate) -> NewsClip {
    NewsClip {
        title: clean_text(&item.title),
        link: item.link.clone(),
        keyword: keyword.to_string(),
        summary: clean_text(&item.description),
        date: normalize_pub_date(&item.pub_date, today),
    }
}
