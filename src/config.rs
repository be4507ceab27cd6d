//! Runtime configuration assembled once at startup.
//!
//! Credentials come from the command line or its backing environment
//! variables; the keyword table comes from a YAML file. Nothing here is
//! global or mutable after construction; the [`Config`] is built in `main`
//! and passed by reference into the pipeline.

use crate::cli::Cli;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use tracing::info;

/// One keyword and the destination database receiving its clips.
///
/// The keywords file is a YAML list of these, e.g.:
///
/// ```yaml
/// - keyword: "기업교육"
///   database_id: "203240f858be8003af3dc9f287d530cc"
/// ```
///
/// List order is preserved and becomes the pipeline's processing order.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordMapping {
    pub keyword: String,
    pub database_id: String,
}

/// Everything the pipeline needs for one run.
#[derive(Debug)]
pub struct Config {
    pub naver_client_id: String,
    pub naver_client_secret: String,
    pub notion_token: String,
    /// Keyword → destination mapping, in declaration order.
    pub keywords: Vec<KeywordMapping>,
    /// Cap on search results kept per keyword.
    pub max_results: usize,
    /// Trailing window, in days, for the existing-clip query.
    pub lookback_days: i64,
}

impl Config {
    /// Build the run configuration from parsed CLI arguments.
    ///
    /// Fails on an unreadable, malformed, or empty keywords file. An
    /// unconfigured run exiting zero would go unnoticed by whatever
    /// schedules it, so this is the one place that is allowed to abort.
    pub fn from_cli(cli: Cli) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(&cli.keywords_file)?;
        let keywords: Vec<KeywordMapping> = serde_yaml::from_str(&raw)?;
        if keywords.is_empty() {
            return Err(format!("keywords file {} has no entries", cli.keywords_file).into());
        }
        info!(
            count = keywords.len(),
            path = %cli.keywords_file,
            "Loaded keyword mappings"
        );

        Ok(Self {
            naver_client_id: cli.naver_client_id,
            naver_client_secret: cli.naver_client_secret,
            notion_token: cli.notion_token,
            keywords,
            max_results: cli.max_results,
            lookback_days: cli.lookback_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_file_parses_in_order() {
        let yaml = r#"
- keyword: "기업교육"
  database_id: "aaaa0000aaaa0000aaaa0000aaaa0000"
- keyword: "휴넷"
  database_id: "bbbb1111bbbb1111bbbb1111bbbb1111"
"#;
        let mappings: Vec<KeywordMapping> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].keyword, "기업교육");
        assert_eq!(mappings[1].database_id, "bbbb1111bbbb1111bbbb1111bbbb1111");
    }

    #[test]
    fn test_keywords_file_rejects_missing_fields() {
        let yaml = r#"
- keyword: "기업교육"
"#;
        let parsed: Result<Vec<KeywordMapping>, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_keywords_file_is_an_empty_list() {
        let parsed: Vec<KeywordMapping> = serde_yaml::from_str("[]").unwrap();
        assert!(parsed.is_empty());
    }
}
