use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::stores::DEFAULT_MAPS_BASE_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub llm_temperature: f32,
    pub google_maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub affiliate_tag: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite://meal_plans.db"),
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_model: env_or("OPENAI_MODEL", DEFAULT_MODEL),
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            llm_temperature: std::env::var("LLM_TEMPERATURE")
                .map(|t| t.parse::<f32>())
                .unwrap_or(Ok(DEFAULT_TEMPERATURE))
                .context("LLM_TEMPERATURE must be a number")?,
            google_maps_api_key: optional_env("GOOGLE_MAPS_API_KEY"),
            maps_base_url: env_or("MAPS_BASE_URL", DEFAULT_MAPS_BASE_URL),
            affiliate_tag: optional_env("AMAZON_AFFILIATE_TAG"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
