use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const BOT_TOKEN_ENV: &str = "TELOXIDE_TOKEN";
const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
const BASE_URL_ENV: &str = "OPENWEATHER_BASE_URL";
const TIMEOUT_ENV: &str = "HTTP_TIMEOUT_SECS";
const RETRIES_ENV: &str = "HTTP_RETRIES";
const SESSION_TTL_ENV: &str = "SESSION_TTL_SECS";
const SESSION_SWEEP_ENV: &str = "SESSION_SWEEP_SECS";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub provider: ProviderConfig,
    /// Sessions idle for longer than this are dropped. `None` keeps them for
    /// the lifetime of the process.
    pub session_ttl: Option<Duration>,
    pub session_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} must be set", key))
        };

        let provider = ProviderConfig {
            api_key: required(API_KEY_ENV)?,
            base_url: lookup(BASE_URL_ENV)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(parse_or(&lookup, TIMEOUT_ENV, 10u64)?),
            max_retries: parse_or(&lookup, RETRIES_ENV, 0u32)?,
        };

        let session_ttl = match lookup(SESSION_TTL_ENV) {
            Some(raw) => Some(Duration::from_secs(parse_value(SESSION_TTL_ENV, &raw)?)),
            None => None,
        };

        Ok(Config {
            bot_token: required(BOT_TOKEN_ENV)?,
            provider,
            session_ttl,
            session_sweep_interval: Duration::from_secs(parse_or(&lookup, SESSION_SWEEP_ENV, 600u64)?),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{} has an invalid value: {:?}", key, raw))
}
