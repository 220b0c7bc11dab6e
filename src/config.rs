use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_VOTES_URL: &str = "http://localhost:8081/votes";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive number of milliseconds, got {value:?}")]
    InvalidMillis { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub votes_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub option_a_label: String,
    pub option_b_label: String,
    pub bar_a_id: String,
    pub bar_b_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            votes_url: DEFAULT_VOTES_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: None,
            option_a_label: "Cats".to_string(),
            option_b_label: "Dogs".to_string(),
            bar_a_id: "background-stats-1".to_string(),
            bar_b_id: "background-stats-2".to_string(),
        }
    }
}

impl Config {
    // Reads the process environment. Call dotenvy::dotenv() first to pick up a .env file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let poll_interval = match lookup("POLL_INTERVAL_MS") {
            Some(raw) => parse_millis("POLL_INTERVAL_MS", &raw)?,
            None => defaults.poll_interval,
        };
        let request_timeout = match lookup("REQUEST_TIMEOUT_MS") {
            Some(raw) => Some(parse_millis("REQUEST_TIMEOUT_MS", &raw)?),
            None => None,
        };

        Ok(Self {
            votes_url: non_empty(&lookup, "VOTES_URL")?.unwrap_or(defaults.votes_url),
            poll_interval,
            request_timeout,
            option_a_label: non_empty(&lookup, "OPTION_A_LABEL")?.unwrap_or(defaults.option_a_label),
            option_b_label: non_empty(&lookup, "OPTION_B_LABEL")?.unwrap_or(defaults.option_b_label),
            bar_a_id: non_empty(&lookup, "BAR_A_ID")?.unwrap_or(defaults.bar_a_id),
            bar_b_id: non_empty(&lookup, "BAR_B_ID")?.unwrap_or(defaults.bar_b_id),
        })
    }
}

fn parse_millis(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidMillis {
            key,
            value: raw.to_string(),
        }),
    }
}

fn non_empty<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}
