//! Application config: transport settings plus logging and menu options. Loaded from env.

use anyhow::Result;
use menu_handlers::DEFAULT_MAX_INLINE_BUTTONS;
use menubot_telegram::TelegramConfig;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// LOG_FILE
    pub log_file: String,
    /// BOT_NAME, shown in greetings and the fallback reply
    pub bot_name: String,
    /// BOT_OWNER, contact shown by the owner command
    pub bot_owner: String,
    /// MENU_FILE, JSON catalog; built-in menu when unset
    pub menu_file: Option<PathBuf>,
    /// MENU_MAX_INLINE_BUTTONS: menus with more items are sent as a list
    pub max_inline_buttons: usize,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/menubot.log".to_string());
        let bot_name = env::var("BOT_NAME").unwrap_or_else(|_| "MenuBot".to_string());
        let bot_owner = env::var("BOT_OWNER").unwrap_or_else(|_| "@owner".to_string());
        let menu_file = env::var("MENU_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let max_inline_buttons = match env::var("MENU_MAX_INLINE_BUTTONS") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("MENU_MAX_INLINE_BUTTONS is not a number: {}", raw)
            })?,
            Err(_) => DEFAULT_MAX_INLINE_BUTTONS,
        };

        Ok(Self {
            telegram,
            log_file,
            bot_name,
            bot_owner,
            menu_file,
            max_inline_buttons,
        })
    }

    /// Validate config (API URL must parse, inline button limit must be positive).
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if self.max_inline_buttons == 0 {
            anyhow::bail!("MENU_MAX_INLINE_BUTTONS must be at least 1");
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.telegram.bot_token
    }
}
