use std::time::Duration;

use anyhow::{Context, Result};

/// Higher-quality tier, tried first for every analysis.
pub const PRIMARY_MODEL: &str = "models/gemini-1.5-pro-latest";
/// Cheaper tier used once when the primary model is over quota.
pub const FALLBACK_MODEL: &str = "models/gemini-1.5-flash-latest";
/// Pause between a quota-exceeded primary call and the fallback call.
pub const FALLBACK_DELAY: Duration = Duration::from_secs(2);
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
///
/// Only the API key, port and log level come from the environment. Model
/// identifiers and the fallback delay are fixed defaults, kept here so tests
/// can build a `Config` by hand and inject their own values.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub fallback_delay: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_base_url: GEMINI_BASE_URL.to_string(),
            primary_model: PRIMARY_MODEL.to_string(),
            fallback_model: FALLBACK_MODEL.to_string(),
            fallback_delay: FALLBACK_DELAY,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
