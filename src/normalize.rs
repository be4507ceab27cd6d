//! Text and date normalization for raw search results.
//!
//! The search API returns titles and excerpts with inline `<b>` markup around
//! query matches and HTML-entity-escaped reserved characters, and publication
//! timestamps in a handful of RFC-2822-ish shapes. Everything the pipeline
//! writes goes through this module first.
//!
//! # Fallback policy
//!
//! Date parsing never fails the pipeline: an unparseable or empty timestamp
//! becomes the current date (logged at `warn`). Text cleanup is best-effort:
//! unmatched `<` or `>` characters can leave residue, which is accepted.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Publication-timestamp formats, attempted in priority order. The search API
/// emits the zoned form; older feeds drop the zone or the time entirely.
const ZONED_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
const DATETIME_FORMATS: &[&str] = &["%a, %d %b %Y %H:%M:%S", "%a, %d %b %Y %H:%M"];
const DATE_FORMATS: &[&str] = &["%a, %d %b %Y"];

/// Strip tag fragments and decode HTML entities.
///
/// Every substring matching `<[^>]+>` is removed, then entities (`&quot;`,
/// `&amp;`, `&lt;`, numeric references, ...) are decoded to their literal
/// characters.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("<b>A &amp; B</b>"), "A & B");
/// ```
pub fn clean_text(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, "");
    html_escape::decode_html_entities(&without_tags).to_string()
}

/// Reduce a raw publication timestamp to a `YYYY-MM-DD` date string.
///
/// Known formats are tried in a fixed order; the first successful parse is
/// truncated to its calendar date. Anything unparseable (including empty
/// input) falls back to `today`. Callers pass the current date; tests pass a
/// fixed one, which keeps the fallback deterministic.
pub fn normalize_pub_date(raw: &str, today: NaiveDate) -> String {
    if let Ok(dt) = DateTime::parse_from_str(raw, ZONED_FORMAT) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.date().format("%Y-%m-%d").to_string();
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    warn!(%raw, "Publication date matched no known format; using today");
    today.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
    }

    #[test]
    fn test_clean_text_strips_tags_and_decodes_entities() {
        assert_eq!(clean_text("<b>A &amp; B</b>"), "A & B");
    }

    #[test]
    fn test_clean_text_decodes_standard_entities() {
        assert_eq!(
            clean_text("&quot;&amp;&apos;&lt;&gt;"),
            "\"&'<>"
        );
    }

    #[test]
    fn test_clean_text_removes_every_tag_fragment() {
        let cleaned = clean_text("<em>기업교육</em> 시장 <b>확대</b>");
        assert_eq!(cleaned, "기업교육 시장 확대");
        assert!(!Regex::new(r"<[^>]+>").unwrap().is_match(&cleaned));
    }

    #[test]
    fn test_clean_text_passes_unmatched_brackets_through() {
        // Best-effort: a lone bracket is not a tag and is left alone.
        assert_eq!(clean_text("3 < 5 points"), "3 < 5 points");
    }

    #[test]
    fn test_clean_text_plain_input_unchanged() {
        assert_eq!(clean_text("plain headline"), "plain headline");
    }

    #[test]
    fn test_date_zoned_timestamp() {
        assert_eq!(
            normalize_pub_date("Mon, 03 Mar 2025 10:15:30 +0900", today()),
            "2025-03-03"
        );
    }

    #[test]
    fn test_date_without_zone() {
        assert_eq!(
            normalize_pub_date("Mon, 03 Mar 2025 10:15", today()),
            "2025-03-03"
        );
    }

    #[test]
    fn test_date_without_time() {
        assert_eq!(normalize_pub_date("Fri, 01 Aug 2025", today()), "2025-08-01");
    }

    #[test]
    fn test_date_garbage_falls_back_to_today() {
        assert_eq!(normalize_pub_date("garbage", today()), "2025-08-07");
    }

    #[test]
    fn test_date_empty_falls_back_to_today() {
        assert_eq!(normalize_pub_date("", today()), "2025-08-07");
    }
}
