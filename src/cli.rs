//! Command-line interface definitions for Blog Digest.
//!
//! Global options override the configuration file; subcommand options
//! override both.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Blog Digest application.
///
/// # Examples
///
/// ```sh
/// # Scrape, summarize and write both JSON files to ./public
/// blog_digest -o ./public generate
///
/// # Smaller run with a config file
/// blog_digest --config digest.yaml generate --max-articles 50 --max-pages 15
///
/// # Rotate the daily selection from the existing feed
/// blog_digest -o ./public daily --count 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output directory for the JSON files
    #[arg(short, long, global = true)]
    pub output_dir: Option<String>,

    /// OpenAI API key; without a usable key summaries come from templates
    #[arg(long, env = "OPENAI_API_KEY", global = true, hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Seed for the daily selection, for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Scrape the blog, summarize every article and write the feed
    Generate {
        /// Stop after this many unique articles
        #[arg(long)]
        max_articles: Option<usize>,

        /// Stop after this many listing pages
        #[arg(long)]
        max_pages: Option<u32>,

        /// Do not refresh the daily selection afterwards
        #[arg(long)]
        skip_daily: bool,
    },
    /// Pick the daily articles from the existing feed
    Daily {
        /// Number of articles to pick
        #[arg(long)]
        count: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_generate_parsing() {
        let cli = Cli::parse_from([
            "blog_digest",
            "--output-dir",
            "./public",
            "generate",
            "--max-articles",
            "50",
            "--max-pages",
            "15",
        ]);

        assert_eq!(cli.output_dir.as_deref(), Some("./public"));
        assert_eq!(
            cli.command,
            Command::Generate {
                max_articles: Some(50),
                max_pages: Some(15),
                skip_daily: false,
            }
        );
    }

    #[test]
    fn test_cli_short_flags_and_globals_after_subcommand() {
        let cli = Cli::parse_from([
            "blog_digest",
            "daily",
            "-o",
            "/tmp/out",
            "-c",
            "digest.yaml",
            "--seed",
            "7",
            "--count",
            "5",
        ]);

        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/out"));
        assert_eq!(cli.config.as_deref(), Some("digest.yaml"));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.command, Command::Daily { count: Some(5) });
    }

    #[test]
    fn test_cli_skip_daily_flag() {
        let cli = Cli::parse_from(["blog_digest", "generate", "--skip-daily"]);
        assert!(matches!(cli.command, Command::Generate { skip_daily: true, .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["blog_digest"]).is_err());
    }
}
