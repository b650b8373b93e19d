use anyhow::{Context, Result};

/// Placeholder shipped in `.env.example`; treated the same as a missing key.
const API_KEY_PLACEHOLDER: &str = "your_actual_claude_api_key_here";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Application configuration loaded from environment variables.
///
/// Only the listen port can fail to load. A missing API key is a soft
/// condition reported by [`Config::warnings`]: the email analysis workflow
/// still works through its heuristic fallback.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    /// Debug/production toggle. Raises log verbosity and echoes composed
    /// prompts back in conversation responses.
    pub debug: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY")
                .or_else(|| optional_env("CLAUDE_API_KEY"))
                .filter(|key| key != API_KEY_PLACEHOLDER),
            anthropic_base_url: optional_env("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            debug: optional_env("APP_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// `EnvFilter` directives for the subscriber.
    ///
    /// A bare level in `RUST_LOG` applies to this crate; a full directive list
    /// is used as given. Debug mode forces this crate to `debug` either way.
    pub fn log_filter(&self) -> String {
        let crate_name = env!("CARGO_CRATE_NAME");
        let rust_log = self.rust_log.trim();

        if !rust_log.contains('=') && !rust_log.contains(',') {
            let level = if self.debug { "debug" } else { rust_log };
            return format!("{crate_name}={level},tower_http=info");
        }

        if !self.debug {
            return rust_log.to_string();
        }

        let own_prefix = format!("{crate_name}=");
        let mut directives: Vec<&str> = rust_log
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty() && *d != crate_name && !d.starts_with(&own_prefix))
            .collect();
        let own = format!("{crate_name}=debug");
        directives.push(&own);
        directives.join(",")
    }

    /// Configuration problems worth a startup warning. None of them are fatal.
    pub fn warnings(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.anthropic_api_key.is_none() {
            issues.push(
                "ANTHROPIC_API_KEY is not set: conversations are disabled and email analysis \
                 will use the heuristic fallback"
                    .to_string(),
            );
        }
        issues
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
