/*
[INPUT]:  Defaults, environment presets, YAML files, CARESPACE_* environment variables
[OUTPUT]: Validated CarespaceConfig and the retry policy derived from it
[POS]:    Configuration layer - consumed by the transport at construction
[UPDATE]: When adding new configuration options
*/

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::{CarespaceError, Result, RetryPolicy};

pub const DEVELOPMENT_BASE_URL: &str = "https://api-dev.carespace.ai";
pub const STAGING_BASE_URL: &str = "https://api-staging.carespace.ai";
pub const PRODUCTION_BASE_URL: &str = "https://api.carespace.ai";
pub const DEFAULT_USER_AGENT: &str = concat!("CarespaceSDK/", env!("CARGO_PKG_VERSION"), " (Rust)");

pub const ENV_BASE_URL: &str = "CARESPACE_BASE_URL";
pub const ENV_API_KEY: &str = "CARESPACE_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "CARESPACE_TIMEOUT_SECS";
pub const ENV_MAX_RETRY_ATTEMPTS: &str = "CARESPACE_MAX_RETRY_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "CARESPACE_RETRY_DELAY_MS";
pub const ENV_ENABLE_RETRY: &str = "CARESPACE_ENABLE_RETRY";
pub const ENV_LOG_LEVEL: &str = "CARESPACE_LOG_LEVEL";

/// Verbosity for the SDK's own tracing events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = CarespaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" | "information" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(CarespaceError::Config(format!("unknown log level: {other}"))),
        }
    }
}

/// Settings shared by the transport and every resource
#[derive(Debug, Clone, PartialEq)]
pub struct CarespaceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Retries after the first attempt
    pub max_retry_attempts: u32,
    /// Base delay for exponential backoff
    pub retry_delay: Duration,
    pub max_retry_delay: Duration,
    pub enable_retry: bool,
    /// Emit per-request debug/error events
    pub enable_logging: bool,
    pub log_level: LogLevel,
    pub user_agent: String,
    pub default_headers: BTreeMap<String, String>,
}

impl Default for CarespaceConfig {
    fn default() -> Self {
        Self {
            base_url: DEVELOPMENT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retry_attempts: 3,
            retry_delay: Duration::from_secs(1),
            max_retry_delay: Duration::from_secs(30),
            enable_retry: true,
            enable_logging: true,
            log_level: LogLevel::Info,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: BTreeMap::new(),
        }
    }
}

impl CarespaceConfig {
    pub fn development(api_key: Option<String>) -> Self {
        Self {
            base_url: DEVELOPMENT_BASE_URL.to_string(),
            api_key,
            log_level: LogLevel::Debug,
            ..Self::default()
        }
    }

    pub fn staging(api_key: impl Into<String>) -> Self {
        Self {
            base_url: STAGING_BASE_URL.to_string(),
            api_key: Some(api_key.into()),
            log_level: LogLevel::Info,
            ..Self::default()
        }
    }

    pub fn production(api_key: impl Into<String>) -> Self {
        Self {
            base_url: PRODUCTION_BASE_URL.to_string(),
            api_key: Some(api_key.into()),
            log_level: LogLevel::Warn,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Merge headers into the defaults; later values win.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.default_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, max_retry_attempts: u32, retry_delay: Duration) -> Self {
        self.enable_retry = true;
        self.max_retry_attempts = max_retry_attempts;
        self.retry_delay = retry_delay;
        if self.max_retry_delay < retry_delay {
            self.max_retry_delay = retry_delay;
        }
        self
    }

    pub fn without_retry(mut self) -> Self {
        self.enable_retry = false;
        self
    }

    pub fn with_logging(mut self, enabled: bool, level: LogLevel) -> Self {
        self.enable_logging = enabled;
        self.log_level = level;
        self
    }

    /// Check the settings the transport depends on
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CarespaceError::Config("base URL is required".to_string()));
        }
        let url = Url::parse(&self.base_url).map_err(|e| {
            CarespaceError::Config(format!("base URL must be an absolute URL: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CarespaceError::Config(format!(
                "base URL must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(CarespaceError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_retry_delay < self.retry_delay {
            return Err(CarespaceError::Config(
                "max retry delay must not be less than retry delay".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(CarespaceError::Config("user agent is required".to_string()));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        if self.enable_retry {
            RetryPolicy::new(self.max_retry_attempts, self.retry_delay, self.max_retry_delay)
        } else {
            RetryPolicy::disabled()
        }
    }

    /// Load configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(text)
            .map_err(|e| CarespaceError::Config(format!("invalid YAML config: {e}")))?;
        let mut config = Self::default();
        file.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CarespaceError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from `CARESPACE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`CarespaceConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BASE_URL) {
            config.base_url = value.trim().to_string();
        }
        if let Some(value) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            config.api_key = Some(value.trim().to_string());
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_env(ENV_TIMEOUT_SECS, &value)?);
        }
        if let Some(value) = lookup(ENV_MAX_RETRY_ATTEMPTS) {
            config.max_retry_attempts = parse_env(ENV_MAX_RETRY_ATTEMPTS, &value)?;
        }
        if let Some(value) = lookup(ENV_RETRY_DELAY_MS) {
            config.retry_delay = Duration::from_millis(parse_env(ENV_RETRY_DELAY_MS, &value)?);
        }
        if let Some(value) = lookup(ENV_ENABLE_RETRY) {
            config.enable_retry = parse_env(ENV_ENABLE_RETRY, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level = parse_env(ENV_LOG_LEVEL, &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| CarespaceError::Config(format!("{name} has an invalid value: {raw:?}")))
}

/// On-disk shape; every key is optional and falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_retry_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
    max_retry_delay_ms: Option<u64>,
    enable_retry: Option<bool>,
    enable_logging: Option<bool>,
    log_level: Option<LogLevel>,
    user_agent: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl ConfigFile {
    fn apply(self, config: &mut CarespaceConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(api_key) = self.api_key.filter(|key| !key.trim().is_empty()) {
            config.api_key = Some(api_key);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.max_retry_attempts {
            config.max_retry_attempts = attempts;
        }
        if let Some(ms) = self.retry_delay_ms {
            config.retry_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.max_retry_delay_ms {
            config.max_retry_delay = Duration::from_millis(ms);
        }
        if let Some(enabled) = self.enable_retry {
            config.enable_retry = enabled;
        }
        if let Some(enabled) = self.enable_logging {
            config.enable_logging = enabled;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        config.default_headers.extend(self.default_headers);
    }
}
