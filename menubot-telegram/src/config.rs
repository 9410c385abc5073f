//! Transport config: token, optional API URL, reconnect delay. Loaded from env: BOT_TOKEN,
//! TELEGRAM_API_URL (or TELOXIDE_API_URL), RECONNECT_DELAY_SECS.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// HTTP client timeout; must exceed [`crate::runner::POLL_TIMEOUT_SECS`] so long polls are not cut off.
const CLIENT_TIMEOUT_SECS: u64 = 45;
const DEFAULT_RECONNECT_DELAY_SECS: u64 = 5;

/// Telegram connectivity config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub reconnect_delay_secs: u64,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN required unless `token` is given; the rest optional.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let reconnect_delay_secs = match env::var("RECONNECT_DELAY_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("RECONNECT_DELAY_SECS is not a number: {}", raw))?,
            Err(_) => DEFAULT_RECONNECT_DELAY_SECS,
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            reconnect_delay_secs,
        })
    }

    /// Builds config with the given token; other fields default.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            reconnect_delay_secs: DEFAULT_RECONNECT_DELAY_SECS,
        }
    }

    /// Rejects a blank token, a zero reconnect delay and an API URL that does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if self.reconnect_delay_secs == 0 {
            anyhow::bail!("RECONNECT_DELAY_SECS must be at least 1");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    /// Builds a fresh connection handle. Called once per (re)connect attempt.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;
        let bot = teloxide::Bot::with_client(self.bot_token.clone(), client);
        match self.telegram_api_url {
            Some(ref url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
