use anyhow::{Context, Result};
use dotenvy::dotenv;
use lead_agent::{FirecrawlSettings, DEFAULT_MODEL};
use std::env;

/// Application configuration loaded from environment variables
///
/// The Firecrawl API key is not part of it: operators send their own key
/// with every request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub firecrawl_api_url: String,
    pub ollama_base_url: String,
    pub default_model: String,
    pub extract_poll_interval_secs: u64,
    pub extract_poll_timeout_secs: u64,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            firecrawl_api_url: "https://api.firecrawl.dev/v1".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            extract_poll_interval_secs: 2,
            extract_poll_timeout_secs: 180,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            firecrawl_api_url: env::var("FIRECRAWL_API_URL")
                .unwrap_or(defaults.firecrawl_api_url),
            ollama_base_url: env::var("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            default_model: env::var("DEFAULT_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.default_model),
            extract_poll_interval_secs: env::var("EXTRACT_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .context("EXTRACT_POLL_INTERVAL_SECS must be a whole number of seconds")?,
            extract_poll_timeout_secs: env::var("EXTRACT_POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "180".to_string())
                .parse()
                .context("EXTRACT_POLL_TIMEOUT_SECS must be a whole number of seconds")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }

    /// Firecrawl connection settings for one run
    pub fn firecrawl_settings(&self) -> FirecrawlSettings {
        FirecrawlSettings {
            base_url: Some(self.firecrawl_api_url.clone()),
            poll_interval_secs: self.extract_poll_interval_secs,
            poll_timeout_secs: self.extract_poll_timeout_secs,
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://leads.example ,,"),
            vec!["http://localhost:3000", "https://leads.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_firecrawl_settings_follow_config() {
        let config = Config {
            extract_poll_interval_secs: 5,
            ..Default::default()
        };

        let settings = config.firecrawl_settings();

        assert_eq!(settings.base_url.as_deref(), Some("https://api.firecrawl.dev/v1"));
        assert_eq!(settings.poll_interval_secs, 5);
        assert_eq!(settings.poll_timeout_secs, 180);
    }
}
