use anyhow::{ensure, Context, Result};

const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Only malformed values fail startup; a missing API key surfaces on the first model call.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub host: String,
    pub port: u16,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_base_url: std::env::var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE_URL.to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8000)?,
            llm_timeout_secs: nonzero_timeout(parse_env("LLM_TIMEOUT_SECS", 120)?)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.gemini_api_key.trim().is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gemini_api_key: String::new(),
            gemini_api_base_url: DEFAULT_GEMINI_API_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            llm_timeout_secs: 120,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rust_log: "debug".to_string(),
        }
    }
}

fn nonzero_timeout(secs: u64) -> Result<u64> {
    ensure!(secs > 0, "Environment variable 'LLM_TIMEOUT_SECS' must be at least 1 second");
    Ok(secs)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'"))
}
