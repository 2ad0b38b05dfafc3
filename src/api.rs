//! LLM API interaction with exponential backoff retry logic.
//!
//! This module provides the interface used to fabricate article summaries
//! through an OpenAI-compatible chat-completions endpoint.
//!
//! # Architecture
//!
//! - [`AskAsync`]: Core trait defining async LLM interaction
//! - [`OpenAiAsk`]: Sends a single-message chat completion over `reqwest`
//! - [`RetryAsk`]: Decorator that adds retry logic to any `AskAsync` implementation
//!
//! # Retry Strategy
//!
//! - Configurable number of retries (3 by default)
//! - Exponential backoff starting at the configured base delay
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay

use crate::config::OpenAiConfig;
use rand::{Rng, rng};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors of this trait can send text to an LLM and receive a response.
/// This abstraction allows for different LLM backends or decorators (like retry logic).
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send text to the LLM and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>>;
}

/// Wrapper that adds exponential backoff retry logic to any [`AskAsync`] implementation.
///
/// # Backoff Strategy
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryAsk<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: AskAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    /// Delay before retry number `attempt` (1-based), without jitter.
    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = attempt.saturating_sub(1).min(16) as u32;
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> AskAsync for RetryAsk<T>
where
    T: AskAsync,
{
    type Response = T::Response;

    #[instrument(level = "debug", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.ask(text).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u64,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "ask() exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = self.backoff(attempt) + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "ask() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// [`AskAsync`] over an OpenAI-compatible `/chat/completions` endpoint.
///
/// Each call sends the text as a single user message and returns the trimmed
/// content of the first choice.
#[derive(Debug, Clone)]
pub struct OpenAiAsk {
    http: Client,
    api_key: String,
    config: OpenAiConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiAsk {
    pub fn new(config: &OpenAiConfig, api_key: &str) -> Result<Self, Box<dyn Error>> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            config: config.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn request<'a>(&'a self, text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: text,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            presence_penalty: self.config.presence_penalty,
            frequency_penalty: self.config.frequency_penalty,
        }
    }
}

/// First non-empty choice content of a chat-completions response body.
fn first_choice(body: &str) -> Result<String, Box<dyn Error>> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
        .ok_or_else(|| "chat completion returned no content".into())
}

impl AskAsync for OpenAiAsk {
    type Response = String;

    #[instrument(level = "debug", skip_all, fields(model = %self.config.model))]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request(text))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            warn!(elapsed_ms = dt.as_millis() as u64, %status, "API call failed");
            return Err(format!("chat completion failed with status {status}").into());
        }

        let content = first_choice(&body)?;
        info!(
            elapsed_ms = dt.as_millis() as u64,
            chars = content.chars().count(),
            "API call succeeded"
        );
        Ok(content)
    }
}

/// Build the retrying LLM client when the configuration carries a usable key.
pub fn client_from_config(
    config: &OpenAiConfig,
) -> Result<Option<RetryAsk<OpenAiAsk>>, Box<dyn Error>> {
    let Some(api_key) = config.usable_key() else {
        return Ok(None);
    };
    let inner = OpenAiAsk::new(config, api_key)?;
    Ok(Some(RetryAsk::new(
        inner,
        config.max_retries,
        StdDuration::from_millis(config.retry_base_delay_ms),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Fails a fixed number of times, then answers.
    #[derive(Debug)]
    struct Flaky {
        failures_left: Cell<usize>,
        calls: Cell<usize>,
    }

    impl AskAsync for Flaky {
        type Response = String;

        async fn ask(&self, text: &str) -> Result<String, Box<dyn Error>> {
            self.calls.set(self.calls.get() + 1);
            if self.failures_left.get() > 0 {
                self.failures_left.set(self.failures_left.get() - 1);
                return Err("temporary failure".into());
            }
            Ok(format!("echo: {text}"))
        }
    }

    fn flaky(failures: usize) -> Flaky {
        Flaky {
            failures_left: Cell::new(failures),
            calls: Cell::new(0),
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_after_failures() {
        let api = RetryAsk::new(flaky(2), 3, StdDuration::ZERO);
        let out = api.ask("hola").await.unwrap();
        assert_eq!(out, "echo: hola");
        assert_eq!(api.inner.calls.get(), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let api = RetryAsk::new(flaky(10), 2, StdDuration::ZERO);
        assert!(api.ask("hola").await.is_err());
        assert_eq!(api.inner.calls.get(), 3);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let api = RetryAsk::new(flaky(0), 5, StdDuration::from_secs(1));
        assert_eq!(api.backoff(1), StdDuration::from_secs(1));
        assert_eq!(api.backoff(2), StdDuration::from_secs(2));
        assert_eq!(api.backoff(4), StdDuration::from_secs(8));
        assert_eq!(api.backoff(6), StdDuration::from_secs(30));
        assert_eq!(api.backoff(60), StdDuration::from_secs(30));
    }

    #[test]
    fn test_request_carries_sampling_parameters() {
        let config = OpenAiConfig::default();
        let client = OpenAiAsk::new(&config, "sk-test").unwrap();
        let value = serde_json::to_value(client.request("Resume esto")).unwrap();

        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Resume esto");
        assert_eq!(value["max_tokens"], 280);
        assert!((value["temperature"].as_f64().unwrap() - 0.95).abs() < 1e-6);
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_first_choice_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Resumen listo.  "}}]}"#;
        assert_eq!(first_choice(body).unwrap(), "Resumen listo.");

        assert!(first_choice(r#"{"choices":[]}"#).is_err());
        assert!(first_choice(r#"{"choices":[{"message":{"content":null}}]}"#).is_err());
        assert!(first_choice("not json").is_err());
    }

    #[test]
    fn test_client_requires_usable_key() {
        let mut config = OpenAiConfig::default();
        assert!(client_from_config(&config).unwrap().is_none());

        config.api_key = Some("sk-live".to_string());
        assert!(client_from_config(&config).unwrap().is_some());
    }
}
