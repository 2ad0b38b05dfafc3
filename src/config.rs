//! Runtime configuration.
//!
//! Every tunable of a run lives in one [`AppConfig`] value that is built once in
//! `main` and passed down explicitly. It can be loaded from a YAML file where
//! any subset of keys may be given; missing keys take the defaults below.
//!
//! ```yaml
//! scrape:
//!   max_articles: 50
//!   max_pages: 15
//! openai:
//!   model: gpt-4o-mini
//! output:
//!   dir: ./public
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

const PLACEHOLDER_API_KEY: &str = "tu_api_key_aqui";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub scrape: ScrapeConfig,
    pub openai: OpenAiConfig,
    pub output: OutputConfig,
    pub daily: DailyConfig,
}

/// Listing pages, politeness delays and ceilings for the scraping pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Page 1 lives here; page `n` at `{base_url}page/{n}/`.
    pub base_url: String,
    /// Relative links and images are resolved against this origin.
    pub origin: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub page_delay_ms: u64,
    pub backoff_delay_ms: u64,
    pub max_articles: usize,
    pub max_pages: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.isotools.us/blog-corporativo/".to_string(),
            origin: "https://www.isotools.us".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            timeout_secs: 15,
            page_delay_ms: 1000,
            backoff_delay_ms: 2000,
            max_articles: 300,
            max_pages: 363,
        }
    }
}

impl ScrapeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn backoff_delay(&self) -> Duration {
        Duration::from_millis(self.backoff_delay_ms)
    }
}

/// Chat-completions endpoint and sampling parameters for summary fabrication.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub retry_base_delay_ms: u64,
    /// Pause between two consecutive summary requests.
    pub request_pause_ms: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 280,
            temperature: 0.95,
            presence_penalty: 0.8,
            frequency_penalty: 0.9,
            timeout_secs: 60,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            request_pause_ms: 500,
        }
    }
}

impl OpenAiConfig {
    /// The API key, if it looks like a real one.
    ///
    /// Empty keys, the documentation placeholder and keys without the `sk-`
    /// prefix all count as "not configured".
    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_API_KEY && k.starts_with("sk-"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_pause(&self) -> Duration {
        Duration::from_millis(self.request_pause_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub feed_file: String,
    pub daily_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
            feed_file: "isotools-final-data.json".to_string(),
            daily_file: "isotools-daily-news.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn feed_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.feed_file)
    }

    pub fn daily_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.daily_file)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DailyConfig {
    /// How many articles the daily rotation publishes.
    pub count: usize,
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self { count: 3 }
    }
}

impl AppConfig {
    /// Parse a YAML document into a configuration.
    pub fn from_yaml(text: &str) -> Result<Self, Box<dyn Error>> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load the configuration file at `path`.
    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_blog_layout() {
        let config = AppConfig::default();
        assert_eq!(config.scrape.max_articles, 300);
        assert_eq!(config.scrape.max_pages, 363);
        assert_eq!(config.scrape.timeout(), Duration::from_secs(15));
        assert_eq!(config.scrape.page_delay(), Duration::from_millis(1000));
        assert_eq!(config.scrape.backoff_delay(), Duration::from_millis(2000));
        assert_eq!(config.daily.count, 3);
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
scrape:
  max_articles: 50
  max_pages: 15
output:
  dir: ./public
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.scrape.max_articles, 50);
        assert_eq!(config.scrape.max_pages, 15);
        assert_eq!(config.scrape.origin, "https://www.isotools.us");
        assert_eq!(config.output.dir, "./public");
        assert_eq!(config.output.feed_file, "isotools-final-data.json");
        assert_eq!(config.openai, OpenAiConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(AppConfig::from_yaml("scrape: [1, 2").is_err());
        assert!(AppConfig::from_yaml("scrape:\n  max_pages: many\n").is_err());
    }

    #[test]
    fn test_usable_key_rejects_placeholders() {
        let mut openai = OpenAiConfig::default();
        assert_eq!(openai.usable_key(), None);

        openai.api_key = Some("tu_api_key_aqui".to_string());
        assert_eq!(openai.usable_key(), None);

        openai.api_key = Some("not-a-key".to_string());
        assert_eq!(openai.usable_key(), None);

        openai.api_key = Some("  ".to_string());
        assert_eq!(openai.usable_key(), None);

        openai.api_key = Some("sk-test123".to_string());
        assert_eq!(openai.usable_key(), Some("sk-test123"));
    }

    #[test]
    fn test_output_paths_join_dir() {
        let output = OutputConfig {
            dir: "/tmp/out".to_string(),
            ..OutputConfig::default()
        };
        assert_eq!(
            output.feed_path(),
            PathBuf::from("/tmp/out/isotools-final-data.json")
        );
        assert_eq!(
            output.daily_path(),
            PathBuf::from("/tmp/out/isotools-daily-news.json")
        );
    }
}
