//! # menubot-telegram
//!
//! Telegram transport layer: update adapters, reply renderer, [`menubot_core::Bot`] implementation,
//! minimal config and the long-polling runner. Handles only Telegram connectivity and handler-chain
//! execution; menu logic lives in menu-handlers.

mod adapters;
mod bot_adapter;
mod config;
pub mod render;
mod runner;

pub use adapters::{update_to_event, TelegramCallbackWrapper, TelegramMessageWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use render::{decode_callback_data, render, TelegramReply};
pub use runner::{
    disconnect_reason, run_polling, spawn_callback_answer, spawn_event, POLL_TIMEOUT_SECS,
};
