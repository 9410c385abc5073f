//! Reply renderer: maps [`OutboundPayload`] to a Telegram message (text + optional inline keyboard),
//! and decodes callback data from pressed buttons back into a [`MessageBody`].
//!
//! Button and list selections both carry the item id in callback data, so a selection always
//! comes back keyed by id regardless of the label the user saw.

use menubot_core::{DbotError, MessageBody, OutboundPayload, Result};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback data prefix for quick-reply buttons.
pub const BUTTON_PREFIX: &str = "btn:";
/// Callback data prefix for list rows.
pub const ROW_PREFIX: &str = "row:";
/// Telegram rejects callback data longer than this many bytes.
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// A payload ready for `sendMessage`.
#[derive(Debug, Clone)]
pub struct TelegramReply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

fn callback_data(prefix: &str, id: &str) -> Result<String> {
    let data = format!("{}{}", prefix, id);
    if data.len() > MAX_CALLBACK_DATA_LEN {
        return Err(DbotError::Render(format!(
            "callback data for id '{}' exceeds {} bytes",
            id, MAX_CALLBACK_DATA_LEN
        )));
    }
    Ok(data)
}

pub fn render(payload: &OutboundPayload) -> Result<TelegramReply> {
    match payload {
        OutboundPayload::PlainText(text) => Ok(TelegramReply {
            text: text.clone(),
            keyboard: None,
        }),
        OutboundPayload::ButtonMessage {
            text,
            footer,
            buttons,
        } => {
            let rows = buttons
                .iter()
                .map(|b| {
                    callback_data(BUTTON_PREFIX, &b.id)
                        .map(|data| vec![InlineKeyboardButton::callback(b.label.clone(), data)])
                })
                .collect::<Result<Vec<_>>>()?;
            let text = if footer.is_empty() {
                text.clone()
            } else {
                format!("{}\n\n{}", text, footer)
            };
            Ok(TelegramReply {
                text,
                keyboard: (!rows.is_empty()).then(|| InlineKeyboardMarkup::new(rows)),
            })
        }
        OutboundPayload::ListMessage {
            text,
            button_label,
            sections,
        } => {
            // Telegram has no list widget: section titles go into the text, rows become one button per line.
            let mut body = text.clone();
            let mut rows = Vec::new();
            for section in sections {
                if !section.title.is_empty() {
                    body.push_str(&format!("\n\n[{}]", section.title));
                }
                for row in &section.rows {
                    if !row.description.is_empty() {
                        body.push_str(&format!("\n• {}: {}", row.title, row.description));
                    }
                    let data = callback_data(ROW_PREFIX, &row.id)?;
                    rows.push(vec![InlineKeyboardButton::callback(row.title.clone(), data)]);
                }
            }
            if !button_label.is_empty() {
                body.push_str(&format!("\n\n{} ⬇️", button_label));
            }
            Ok(TelegramReply {
                text: body,
                keyboard: (!rows.is_empty()).then(|| InlineKeyboardMarkup::new(rows)),
            })
        }
    }
}

/// Decodes callback data produced by [`render`]. Data without a known prefix is treated as a button id.
pub fn decode_callback_data(data: &str) -> MessageBody {
    if let Some(id) = data.strip_prefix(ROW_PREFIX) {
        MessageBody::ListResponse {
            row_id: Some(id.to_string()),
            title: String::new(),
        }
    } else {
        let id = data.strip_prefix(BUTTON_PREFIX).unwrap_or(data);
        MessageBody::ButtonResponse { id: id.to_string() }
    }
}
