//! Wraps teloxide::Bot and implements [`menubot_core::Bot`]. Production code sends payloads via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use menubot_core::{parse_chat_id, Bot as CoreBot, DbotError, OutboundPayload, Result, Sender};
use teloxide::{prelude::*, types::ChatId};

use crate::render::render;

/// Thin wrapper around one teloxide::Bot connection handle.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_payload(&self, recipient: &Sender, payload: &OutboundPayload) -> Result<()> {
        let chat_id = parse_chat_id(&recipient.chat_id)?;
        let reply = render(payload)?;

        let mut request = self.bot.send_message(ChatId(chat_id), reply.text);
        if let Some(keyboard) = reply.keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
