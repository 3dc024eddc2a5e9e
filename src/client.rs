use crate::config::ScrapeConfig;
use std::time::Duration;

/// HTTP client with bounded retries and linear backoff
///
/// Both fetch operations attempt up to `max_retries` times and yield `None`
/// after the last failure instead of an error. A non-success status counts
/// as a failure the same way a connection error does.
pub struct HttpClient {
    client: reqwest::Client,
    max_retries: u32,
    backoff: Duration,
    text_timeout: Duration,
    bytes_timeout: Duration,
}

impl HttpClient {
    /// Create a client from the given configuration
    pub fn new(config: &ScrapeConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .expect("HTTP client construction failed");

        Self {
            client,
            max_retries: config.max_retries.max(1),
            backoff: Duration::from_millis(config.backoff_ms),
            text_timeout: Duration::from_secs(config.text_timeout_secs),
            bytes_timeout: Duration::from_secs(config.bytes_timeout_secs),
        }
    }

    /// Fetch a URL and decode the response body as text
    ///
    /// Returns `None` once every attempt has failed; the cause is logged.
    pub async fn fetch_text(&self, url: &str) -> Option<String> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            match self.try_get(url, self.text_timeout).await {
                Ok(response) => match response.text().await {
                    Ok(text) => return Some(text),
                    Err(e) => last_error = e.to_string(),
                },
                Err(e) => last_error = e.to_string(),
            }

            if attempt < self.max_retries {
                tokio::time::sleep(self.backoff * attempt).await;
            }
        }

        ::log::warn!("fetch failed {}: {}", url, last_error);
        None
    }

    /// Fetch a URL and return the raw response bytes
    ///
    /// Returns `None` once every attempt has failed; the cause is logged.
    pub async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            match self.try_get(url, self.bytes_timeout).await {
                Ok(response) => match response.bytes().await {
                    Ok(bytes) => return Some(bytes.to_vec()),
                    Err(e) => last_error = e.to_string(),
                },
                Err(e) => last_error = e.to_string(),
            }

            if attempt < self.max_retries {
                tokio::time::sleep(self.backoff * attempt).await;
            }
        }

        ::log::warn!("fetch_bytes failed {}: {}", url, last_error);
        None
    }

    /// Issue a single GET and promote non-success statuses to errors
    async fn try_get(&self, url: &str, timeout: Duration) -> Result<reqwest::Response, reqwest::Error> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        response.error_for_status()
    }
}
