use anyhow::{bail, Context, Result};

/// Placeholder credential used when `GROQ_API_KEY` is unset.
/// Startup succeeds; every completion call is then rejected by the provider.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GROQ_API_KEY";

const DEFAULT_COMPLETION_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Read once at startup and passed explicitly to whatever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    /// True when `groq_api_key` is the placeholder rather than a real credential.
    pub api_key_missing: bool,
    pub completion_api_url: String,
    /// Total attempts per completion call. 1 means the bare adapter, no retry layer.
    pub completion_max_attempts: u32,
    pub completion_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let (groq_api_key, api_key_missing) = match get("GROQ_API_KEY") {
            Some(key) if !key.trim().is_empty() => (key, false),
            _ => (PLACEHOLDER_API_KEY.to_string(), true),
        };

        let completion_max_attempts = get("COMPLETION_MAX_ATTEMPTS")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("COMPLETION_MAX_ATTEMPTS must be a positive integer")?;
        if completion_max_attempts == 0 {
            bail!("COMPLETION_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            groq_api_key,
            api_key_missing,
            completion_api_url: get("COMPLETION_API_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_max_attempts,
            completion_timeout_secs: get("COMPLETION_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("COMPLETION_TIMEOUT_SECS must be a whole number of seconds")?,
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
