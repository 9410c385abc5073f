//! Adapters from Telegram (teloxide) updates to menubot_core events.
//! Depends only on teloxide and menubot_core type definitions (plus the callback codec in `render`).

use menubot_core::{MessageBody, MessageEvent, Sender, ToMessageEvent};
use teloxide::types::{CallbackQuery, Message, Update, UpdateKind, User, UserId};

use crate::render::decode_callback_data;

fn sender_from_user(user: &User, chat_id: String) -> Sender {
    Sender {
        id: user.id.0.to_string(),
        chat_id,
        display_name: Some(user.full_name()),
    }
}

/// Names the media kind of a message without text, or `None` for service messages.
fn media_kind(msg: &Message) -> Option<&'static str> {
    if msg.photo().is_some() {
        Some("photo")
    } else if msg.sticker().is_some() {
        Some("sticker")
    } else if msg.document().is_some() {
        Some("document")
    } else if msg.video().is_some() {
        Some("video")
    } else if msg.voice().is_some() {
        Some("voice")
    } else if msg.audio().is_some() {
        Some("audio")
    } else if msg.location().is_some() {
        Some("location")
    } else if msg.contact().is_some() {
        Some("contact")
    } else {
        None
    }
}

/// Wraps a teloxide Message for conversion to a core [`MessageEvent`].
/// `bot_id` marks messages authored by the bot itself as `from_me`.
pub struct TelegramMessageWrapper<'a> {
    pub message: &'a Message,
    pub bot_id: Option<UserId>,
}

impl<'a> ToMessageEvent for TelegramMessageWrapper<'a> {
    fn to_event(&self) -> MessageEvent {
        let msg = self.message;
        let chat_id = msg.chat.id.0.to_string();
        let sender = match msg.from.as_ref() {
            Some(user) => sender_from_user(user, chat_id),
            None => Sender {
                id: chat_id.clone(),
                chat_id,
                display_name: None,
            },
        };

        let from_me = match (msg.from.as_ref(), self.bot_id) {
            (Some(user), Some(bot_id)) => user.id == bot_id,
            _ => false,
        };

        let body = if let Some(text) = msg.text() {
            Some(MessageBody::Conversation(text.to_string()))
        } else if let Some(caption) = msg.caption() {
            Some(MessageBody::ExtendedText(caption.to_string()))
        } else {
            media_kind(msg).map(|kind| MessageBody::Unsupported(kind.to_string()))
        };

        MessageEvent {
            id: msg.id.0.to_string(),
            sender,
            from_me,
            body,
        }
    }
}

/// Wraps a teloxide CallbackQuery (inline button press) for conversion to a core [`MessageEvent`].
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> ToMessageEvent for TelegramCallbackWrapper<'a> {
    fn to_event(&self) -> MessageEvent {
        let query = self.0;
        // Private chats share the user's id; the message is missing only for very old or inline messages.
        let (chat_id, message_id) = match query.message.as_ref() {
            Some(message) => (message.chat().id.0.to_string(), message.id().0.to_string()),
            None => (query.from.id.0.to_string(), "inline".to_string()),
        };

        MessageEvent {
            id: format!("callback-{}", message_id),
            sender: sender_from_user(&query.from, chat_id),
            from_me: false,
            body: query.data.as_deref().map(decode_callback_data),
        }
    }
}

/// Converts the update kinds the bot reads; everything else yields `None`.
pub fn update_to_event(update: &Update, bot_id: Option<UserId>) -> Option<MessageEvent> {
    match &update.kind {
        UpdateKind::Message(message) => Some(
            TelegramMessageWrapper {
                message,
                bot_id,
            }
            .to_event(),
        ),
        UpdateKind::CallbackQuery(query) => Some(TelegramCallbackWrapper(query).to_event()),
        _ => None,
    }
}
