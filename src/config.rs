use crate::error::{Error, Result};
use crate::models::poll_window::{PollWindow, WindowMode};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "main.log";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub file: PathBuf,
    pub format: LogFormat,
}

impl LogSettings {
    /// Reads only `LOG_FILE` and `LOG_FORMAT`, so the sink can be installed
    /// before the rest of the config is validated.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match non_blank(&lookup, "LOG_FORMAT")
            .as_deref()
            .map(str::to_ascii_lowercase)
        {
            None => LogFormat::Text,
            Some(f) if f == "text" => LogFormat::Text,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(Error::Config(format!("Invalid value for LOG_FORMAT: {}", other)))
            }
        };

        Ok(Self {
            file: PathBuf::from(
                non_blank(&lookup, "LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            ),
            format,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoint: Url,
    pub telegram_api_url: Url,
    pub retry_period: Duration,
    pub http_timeout: Duration,
    pub poll_from: PollWindow,
    pub window_mode: WindowMode,
    pub log: LogSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    /// Missing credentials are not an error here; see [`Config::check_tokens`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_blank(&lookup, name);

        let credentials = Credentials {
            practicum_token: get("PRACTICUM_TOKEN").unwrap_or_default(),
            telegram_token: get("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat_id: get("TELEGRAM_CHAT_ID").unwrap_or_default(),
        };

        let endpoint = parse_url(
            "PRACTICUM_ENDPOINT",
            get("PRACTICUM_ENDPOINT").as_deref().unwrap_or(DEFAULT_ENDPOINT),
        )?;
        let telegram_api_url = parse_url(
            "TELEGRAM_API_URL",
            get("TELEGRAM_API_URL")
                .as_deref()
                .unwrap_or(DEFAULT_TELEGRAM_API_URL),
        )?;

        let retry_period: u64 =
            parse_or("RETRY_PERIOD_SECS", get("RETRY_PERIOD_SECS"), DEFAULT_RETRY_PERIOD_SECS)?;
        if retry_period == 0 {
            return Err(Error::Config(
                "Invalid value for RETRY_PERIOD_SECS: must be greater than 0".to_string(),
            ));
        }
        let http_timeout: u64 =
            parse_or("HTTP_TIMEOUT_SECS", get("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)?;

        let poll_from = match get("POLL_FROM_DATE") {
            Some(raw) => PollWindow::new(parse_value("POLL_FROM_DATE", &raw)?),
            None => PollWindow::now(),
        };
        let window_mode = match get("POLL_WINDOW_MODE") {
            Some(raw) => parse_value("POLL_WINDOW_MODE", &raw)?,
            None => WindowMode::Fixed,
        };

        let log = LogSettings::from_lookup(&lookup)?;

        Ok(Self {
            credentials,
            endpoint,
            telegram_api_url,
            retry_period: Duration::from_secs(retry_period),
            http_timeout: Duration::from_secs(http_timeout),
            poll_from,
            window_mode,
            log,
        })
    }

    /// Verifies that every credential is present. Must run before any network call.
    pub fn check_tokens(&self) -> Result<()> {
        let creds = &self.credentials;
        let missing: Vec<&str> = [
            ("PRACTICUM_TOKEN", &creds.practicum_token),
            ("TELEGRAM_TOKEN", &creds.telegram_token),
            ("TELEGRAM_CHAT_ID", &creds.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let names = missing.join(", ");
        tracing::error!(critical = true, "Missing required environment variables: {}", names);
        Err(Error::Config(format!(
            "Missing environment variable(s): {}",
            names
        )))
    }
}

fn non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}
