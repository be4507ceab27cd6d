//! Data models for search results and their normalized representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NewsItem`]: a raw search hit as returned by the news-search API
//! - [`NewsClip`]: the normalized record written to a destination database
//! - [`ClipKey`]: the (title, link) identity used for deduplication

use serde::Deserialize;

/// A raw news search hit.
///
/// Titles and descriptions arrive markup-bearing: the search API wraps query
/// matches in `<b>` tags and escapes reserved characters as HTML entities.
/// Cleanup happens later, in one place, so this struct stays faithful to the
/// wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    /// The article headline, possibly containing markup.
    pub title: String,
    /// The article URL.
    pub link: String,
    /// A short excerpt, possibly containing markup.
    #[serde(default)]
    pub description: String,
    /// The vendor's publication timestamp, unparsed.
    #[serde(rename = "pubDate", default)]
    pub pub_date: String,
}

/// A normalized item ready to be written to a destination database.
///
/// Derived deterministically from a [`NewsItem`] plus the keyword that found
/// it. Written at most once per run and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct NewsClip {
    /// Plain-text headline.
    pub title: String,
    /// The article URL.
    pub link: String,
    /// The search keyword that produced this clip.
    pub keyword: String,
    /// Plain-text excerpt.
    pub summary: String,
    /// Publication date in `YYYY-MM-DD` form.
    pub date: String,
}

impl NewsClip {
    /// Extract the domain name (before .com/.co.kr/etc) from the link.
    /// For example: "https://n.news.naver.com/article/052/0002222962" -> "naver"
    pub fn source_tag(&self) -> Option<String> {
        if let Ok(parsed) = url::Url::parse(&self.link) {
            if let Some(host) = parsed.host_str() {
                let parts: Vec<&str> = host.split('.').collect();
                // Handle cases like "n.news.naver.com" -> "naver" or "hani.co.kr" -> "hani"
                if parts.len() >= 2 {
                    return Some(parts[parts.len() - 2].to_string());
                }
            }
        }
        None
    }
}

/// The identity of a clip for deduplication: cleaned title plus link.
///
/// Recomputed on every run, both from freshly fetched items and from records
/// already stored in the destination. Never persisted as its own entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipKey {
    pub title: String,
    pub link: String,
}

impl ClipKey {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn clip(link: &str) -> NewsClip {
        NewsClip {
            title: "Test".to_string(),
            link: link.to_string(),
            keyword: "keyword".to_string(),
            summary: "Summary".to_string(),
            date: "2025-03-03".to_string(),
        }
    }

    #[test]
    fn test_news_item_deserializes_vendor_shape() {
        let json = r#"{
            "title": "<b>기업교육</b> 시장 확대",
            "originallink": "https://example.com/original",
            "link": "https://n.news.naver.com/article/052/0002222962",
            "description": "기업교육 전문기업이 &quot;성장&quot;을 발표했다.",
            "pubDate": "Mon, 03 Mar 2025 10:15:30 +0900"
        }"#;

        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.title, "<b>기업교육</b> 시장 확대");
        assert_eq!(item.link, "https://n.news.naver.com/article/052/0002222962");
        assert_eq!(item.pub_date, "Mon, 03 Mar 2025 10:15:30 +0900");
    }

    #[test]
    fn test_news_item_missing_optional_fields() {
        let json = r#"{"title": "T", "link": "https://example.com"}"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.pub_date, "");
    }

    #[test]
    fn test_source_tag_subdomain() {
        assert_eq!(
            clip("https://n.news.naver.com/article/052/0002222962").source_tag(),
            Some("naver".to_string())
        );
    }

    #[test]
    fn test_source_tag_simple_domain() {
        assert_eq!(
            clip("https://example.com/article").source_tag(),
            Some("example".to_string())
        );
    }

    #[test]
    fn test_source_tag_unparseable_link() {
        assert_eq!(clip("not a url").source_tag(), None);
    }

    #[test]
    fn test_clip_key_equality_and_hashing() {
        let a = ClipKey::new("Title", "https://example.com/1");
        let b = ClipKey::new("Title", "https://example.com/1");
        let c = ClipKey::new("Title", "https://example.com/2");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }
}
