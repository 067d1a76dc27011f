use crate::model::ConfigError;
use crate::normalizer::normalize_watchlist;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub const TOKEN_VAR: &str = "LINE_CHANNEL_ACCESS_TOKEN";
pub const RECIPIENT_VAR: &str = "LINE_USER_ID";
pub const DEFAULT_PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

/// History range requested from the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Lookback {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    Max,
}

impl Lookback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
            Lookback::TenYears => "10y",
            Lookback::Max => "max",
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lookback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(Lookback::OneMonth),
            "3mo" => Ok(Lookback::ThreeMonths),
            "6mo" => Ok(Lookback::SixMonths),
            "1y" => Ok(Lookback::OneYear),
            "2y" => Ok(Lookback::TwoYears),
            "5y" => Ok(Lookback::FiveYears),
            "10y" => Ok(Lookback::TenYears),
            "max" => Ok(Lookback::Max),
            other => Err(format!("unsupported lookback '{}'", other)),
        }
    }
}

impl TryFrom<String> for Lookback {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Only symbols trading below a moving average are reported.
    #[default]
    Alert,
    /// Every symbol gets a daily change line.
    Digest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub watchlist: Vec<String>,
    pub lookback: Lookback,
    pub mode: ReportMode,
    pub long_window: usize,
    pub medium_window: usize,
    pub digest_min_observations: usize,
    pub push_endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            watchlist: ["NVDA", "TSLA", "AAPL", "AMD"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lookback: Lookback::TwoYears,
            mode: ReportMode::Alert,
            long_window: 200,
            medium_window: 100,
            digest_min_observations: 20,
            push_endpoint: DEFAULT_PUSH_ENDPOINT.to_string(),
        }
    }
}

impl AppConfig {
    fn finalize(mut self) -> Result<Self, ConfigError> {
        if self.long_window == 0 || self.medium_window == 0 {
            return Err(ConfigError::Invalid("moving-average windows must be positive".into()));
        }
        if self.medium_window > self.long_window {
            return Err(ConfigError::Invalid(format!(
                "medium_window ({}) exceeds long_window ({})",
                self.medium_window, self.long_window
            )));
        }
        if self.digest_min_observations < 2 {
            return Err(ConfigError::Invalid(
                "digest_min_observations must be at least 2".into(),
            ));
        }
        self.watchlist = normalize_watchlist(&self.watchlist);
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.finalize()
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Like [`load_config`], but a missing file falls back to the built-in defaults.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        info!("No config at {}, using defaults", path.display());
        return AppConfig::default().finalize();
    }
    load_config(path)
}

/// Push credentials, resolved once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    pub recipient: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"***")
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves both credentials through `lookup`; empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(key))
        };
        Ok(Self {
            access_token: get(TOKEN_VAR)?,
            recipient: get(RECIPIENT_VAR)?,
        })
    }
}
