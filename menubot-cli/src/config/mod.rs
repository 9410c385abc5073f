//! Bot configuration: Telegram transport + logging + menu options.

mod bot_config;


pub use bot_config::BotConfig;
