//! Process configuration
//!
//! Read once from `CLIENTWATCH_*` environment variables at startup and passed
//! explicitly to each component.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::alerts::Thresholds;

const PREFIX: &str = "CLIENTWATCH_";

/// Assurance platform connection
#[derive(Debug, Clone)]
pub struct DnacConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Accept self-signed certificates on the platform
    pub insecure_tls: bool,
}

/// Messaging platform connection
#[derive(Debug, Clone)]
pub struct WebexConfig {
    pub base_url: String,
    pub bot_token: String,
}

/// The one client this monitor watches
#[derive(Debug, Clone, Default)]
pub struct ClientIdentity {
    pub username: String,
    /// Used when the username cannot be resolved to a wireless host
    pub fallback_mac: String,
}

/// Settings for the polling monitor
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub dnac: DnacConfig,
    pub webex: WebexConfig,
    pub client: ClientIdentity,
    pub thresholds: Thresholds,
    pub poll_interval_minutes: u64,
    /// Title of the space alerts are posted to
    pub webex_space: String,
    pub http_timeout: Duration,
    pub log_file: PathBuf,
}

impl MonitorSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let thresholds = Thresholds {
            health_low: env.parsed("HEALTH_LOW", 8)?,
            snr_min: env.parsed("SNR_MIN", 60.0)?,
            bw_low: env.parsed("BW_LOW", 100.0)?,
            counter_max: env.parsed("COUNTER_MAX", 3)?,
        };
        if thresholds.counter_max == 0 {
            return Err(ConfigError::Invalid {
                key: env.key("COUNTER_MAX"),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            dnac: dnac_config(&env)?,
            webex: webex_config(&env)?,
            client: ClientIdentity {
                username: env.or("CLIENT_USERNAME", ""),
                fallback_mac: env.or("CLIENT_MAC", ""),
            },
            thresholds,
            poll_interval_minutes: env.parsed("TIME_INTERVAL", 5)?,
            webex_space: env.or("WEBEX_SPACE", "Wireless Clients Monitoring"),
            http_timeout: Duration::from_secs(env.parsed("HTTP_TIMEOUT_SECS", 30)?),
            log_file: PathBuf::from(env.or("LOG_FILE", "application_run.log")),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_minutes * 60)
    }
}

/// Chat bot identity
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Person id of the bot, matched against message mentions
    pub bot_id: String,
    /// Display name, first word of every command
    pub bot_name: String,
    /// Title of the space replies are posted to
    pub room: String,
}

/// Settings for the webhook receiver and its bot
#[derive(Debug, Clone)]
pub struct ReceiverSettings {
    pub host: String,
    pub port: u16,
    pub webhook_username: String,
    pub webhook_password: String,
    pub wireless_folder: PathBuf,
    /// Base URL of the assurance platform, for client 360 links
    pub dnac_url: String,
    pub webex: WebexConfig,
    pub bot: BotConfig,
    pub http_timeout: Duration,
}

impl ReceiverSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        Ok(Self {
            host: env.or("RECEIVER_HOST", "0.0.0.0"),
            port: env.parsed("RECEIVER_PORT", 8080)?,
            webhook_username: env.required("WEBHOOK_USER")?,
            webhook_password: env.required("WEBHOOK_PASS")?,
            wireless_folder: PathBuf::from(env.or("WIRELESS_FOLDER", "wireless_clients")),
            dnac_url: env.required("DNAC_URL")?,
            webex: webex_config(&env)?,
            bot: BotConfig {
                bot_id: env.required("BOT_ID")?,
                bot_name: env.or("BOT_NAME", "WhatsOp"),
                room: env.or("BOT_ROOM", "Wireless Clients Monitoring"),
            },
            http_timeout: Duration::from_secs(env.parsed("HTTP_TIMEOUT_SECS", 30)?),
        })
    }
}

fn dnac_config(env: &Env<'_>) -> Result<DnacConfig, ConfigError> {
    Ok(DnacConfig {
        base_url: env.required("DNAC_URL")?,
        username: env.required("DNAC_USER")?,
        password: env.required("DNAC_PASS")?,
        insecure_tls: env.parsed("DNAC_INSECURE", false)?,
    })
}

fn webex_config(env: &Env<'_>) -> Result<WebexConfig, ConfigError> {
    Ok(WebexConfig {
        base_url: env.or("WEBEX_URL", "https://webexapis.com"),
        bot_token: env.required("BOT_TOKEN")?,
    })
}

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    fn key(&self, name: &str) -> String {
        format!("{PREFIX}{name}")
    }

    fn get(&self, name: &str) -> Option<String> {
        (self.0)(&self.key(name))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::Missing(self.key(name)))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T: FromStr>(&self, name: &str, default: T) -> Result<T, ConfigError> {
        match self.get(name) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: self.key(name),
                value,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(String),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}
