use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
const DEFAULT_CONTACT_RESET_SECS: u64 = 5;

/// Identifiers for the EmailJS service that relays contact messages.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_url: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub emailjs: EmailJsConfig,
    /// How long a terminal contact status stays visible before reverting to idle.
    pub contact_reset: Duration,
    /// Export snippet to start from instead of the embedded default.
    pub seed_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let reset_secs = match std::env::var("CONTACT_RESET_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .context("CONTACT_RESET_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_CONTACT_RESET_SECS,
        };

        Ok(Config {
            emailjs: EmailJsConfig {
                service_id: require_env("EMAILJS_SERVICE_ID")?,
                template_id: require_env("EMAILJS_TEMPLATE_ID")?,
                public_key: require_env("EMAILJS_PUBLIC_KEY")?,
                api_url: std::env::var("EMAILJS_API_URL")
                    .unwrap_or_else(|_| DEFAULT_EMAILJS_API_URL.to_string()),
            },
            contact_reset: Duration::from_secs(reset_secs),
            seed_path: std::env::var("PORTFOLIO_SEED_PATH").ok().map(PathBuf::from),
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
