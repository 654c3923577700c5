//! Environment-driven configuration.
//!
//! `.env` is loaded by the binary before any of these getters run.

pub mod rules;

use crate::indicators::trend::DEFAULT_EMA_PERIOD;
use crate::services::notification::DEFAULT_API_URL;
use crate::services::yahoo::{DEFAULT_BASE_URL, DEFAULT_COOKIE_URL};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub use rules::{load_rules, parse_rules, ConfigError};

pub const DEFAULT_RULES_FILE: &str = "nse_stocks.json";
pub const DEFAULT_HISTORY_SESSIONS: usize = 60;

/// Deployment environment name, lowercased (`sandbox` when unset).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_rules_file() -> PathBuf {
    env::var("RULES_FILE")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RULES_FILE))
}

fn get_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_parsed<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn get_flag(key: &str) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "" | "0" | "false" | "no" | "off" => false,
            _ => {
                warn!(key = key, value = %raw, "Invalid flag, treating as disabled");
                false
            }
        },
        Err(_) => false,
    }
}

/// Settings for one process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub rules_file: PathBuf,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_api_url: String,
    pub yahoo_api_url: String,
    pub yahoo_cookie_url: String,
    pub history_sessions: usize,
    pub default_ema_period: u32,
    pub export_csv: bool,
    pub export_dir: PathBuf,
    /// Seconds between runs; 0 runs once.
    pub eval_interval_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut default_ema_period = get_parsed("DEFAULT_EMA_PERIOD", DEFAULT_EMA_PERIOD);
        if default_ema_period == 0 {
            warn!("DEFAULT_EMA_PERIOD must be positive, using {}", DEFAULT_EMA_PERIOD);
            default_ema_period = DEFAULT_EMA_PERIOD;
        }

        let mut history_sessions = get_parsed("HISTORY_SESSIONS", DEFAULT_HISTORY_SESSIONS);
        if history_sessions == 0 {
            warn!("HISTORY_SESSIONS must be positive, using {}", DEFAULT_HISTORY_SESSIONS);
            history_sessions = DEFAULT_HISTORY_SESSIONS;
        }

        Self {
            environment: get_environment(),
            rules_file: get_rules_file(),
            telegram_bot_token: get_optional("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: get_optional("TELEGRAM_CHAT_ID"),
            telegram_api_url: get_optional("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            yahoo_api_url: get_optional("YAHOO_API_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            yahoo_cookie_url: get_optional("YAHOO_COOKIE_URL")
                .unwrap_or_else(|| DEFAULT_COOKIE_URL.to_string()),
            history_sessions,
            default_ema_period,
            export_csv: get_flag("EXPORT_CSV"),
            export_dir: get_optional("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            eval_interval_seconds: get_parsed("EVAL_INTERVAL_SECONDS", 0),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            rules_file: PathBuf::from(DEFAULT_RULES_FILE),
            telegram_bot_token: None,
            telegram_chat_id: None,
            telegram_api_url: DEFAULT_API_URL.to_string(),
            yahoo_api_url: DEFAULT_BASE_URL.to_string(),
            yahoo_cookie_url: DEFAULT_COOKIE_URL.to_string(),
            history_sessions: DEFAULT_HISTORY_SESSIONS,
            default_ema_period: DEFAULT_EMA_PERIOD,
            export_csv: false,
            export_dir: PathBuf::from("."),
            eval_interval_seconds: 0,
        }
    }
}
