//! Command-line interface definitions for the news clipper.
//!
//! All arguments can be provided via command-line flags or environment
//! variables. Credentials have no defaults and are never read from anywhere
//! but these two sources.

use clap::Parser;

/// Command-line arguments for the news clipper.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment, keywords from a file
/// news_clipper --keywords-file ./keywords.yaml
///
/// # Everything explicit
/// news_clipper --keywords-file ./keywords.yaml \
///     --naver-client-id ID --naver-client-secret SECRET \
///     --notion-token TOKEN --max-results 5
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// YAML file mapping each keyword to its destination database id
    #[arg(short, long, env = "CLIPPER_KEYWORDS_FILE")]
    pub keywords_file: String,

    /// Naver application client id
    #[arg(long, env = "NAVER_CLIENT_ID", hide_env_values = true)]
    pub naver_client_id: String,

    /// Naver application client secret
    #[arg(long, env = "NAVER_CLIENT_SECRET", hide_env_values = true)]
    pub naver_client_secret: String,

    /// Notion integration token
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: String,

    /// Maximum number of search results kept per keyword
    #[arg(long, default_value_t = 10)]
    pub max_results: usize,

    /// Days to look back when collecting already-clipped items
    #[arg(long, default_value_t = 2)]
    pub lookback_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "news_clipper",
            "--keywords-file",
            "./keywords.yaml",
            "--naver-client-id",
            "id",
            "--naver-client-secret",
            "secret",
            "--notion-token",
            "token",
        ]);

        assert_eq!(cli.keywords_file, "./keywords.yaml");
        assert_eq!(cli.max_results, 10);
        assert_eq!(cli.lookback_days, 2);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "news_clipper",
            "-k",
            "/tmp/keywords.yaml",
            "--naver-client-id",
            "id",
            "--naver-client-secret",
            "secret",
            "--notion-token",
            "token",
            "--max-results",
            "5",
            "--lookback-days",
            "7",
        ]);

        assert_eq!(cli.keywords_file, "/tmp/keywords.yaml");
        assert_eq!(cli.max_results, 5);
        assert_eq!(cli.lookback_days, 7);
    }
}
