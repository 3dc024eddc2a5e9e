use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for one scraping run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Number of attempts per fetch before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff in milliseconds; the delay grows linearly per attempt
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Timeout for page (text) requests, in seconds
    #[serde(default = "default_text_timeout_secs")]
    pub text_timeout_secs: u64,

    /// Timeout for binary (image) requests, in seconds
    #[serde(default = "default_bytes_timeout_secs")]
    pub bytes_timeout_secs: u64,
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            text_timeout_secs: default_text_timeout_secs(),
            bytes_timeout_secs: default_bytes_timeout_secs(),
        }
    }
}

/// Default identifying header
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; ScraperBot/1.0)".to_string()
}

/// Default number of attempts per fetch
fn default_max_retries() -> u32 {
    2
}

/// Default base backoff in milliseconds
fn default_backoff_ms() -> u64 {
    500
}

/// Default timeout for page requests
fn default_text_timeout_secs() -> u64 {
    10
}

/// Default timeout for binary requests
fn default_bytes_timeout_secs() -> u64 {
    15
}
