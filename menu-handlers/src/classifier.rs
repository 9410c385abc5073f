//! Message classifier: turns one inbound [`MessageEvent`] into an [`Intent`].
//!
//! Pure: the result depends only on the event and the immutable catalog, so classifying the same
//! event twice gives the same intent.

use std::fmt;
use std::sync::Arc;

use menubot_core::{MessageBody, MessageEvent};

use crate::catalog::Catalog;

/// Command name that opens the root menu.
pub const SHOW_MENU: &str = "show_menu";

/// Texts that open the root menu, compared case-insensitively. `"0"` doubles as the "back" button id.
pub const MENU_TRIGGERS: &[&str] = &["menu", "/menu", ".menu", "!menu", "0", "/start"];

/// Utility keywords and the command each maps to.
const KEYWORDS: &[(&str, &str)] = &[
    ("hi", "hi"),
    ("halo", "hi"),
    ("hello", "hi"),
    ("ping", "ping"),
    ("owner", "owner"),
];

const COMMAND_PREFIXES: &[char] = &['/', '.', '!'];

/// Normalized meaning of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Command(String),
    MenuSelect(String),
    FreeText(String),
    Unrecognized,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Command(name) => write!(f, "command:{}", name),
            Intent::MenuSelect(id) => write!(f, "menu_select:{}", id),
            Intent::FreeText(_) => f.write_str("free_text"),
            Intent::Unrecognized => f.write_str("unrecognized"),
        }
    }
}

/// Drops the `@BotName` suffix Telegram adds to commands in group chats (`/menu@MenuBot` -> `/menu`).
fn strip_bot_mention(text: &str) -> &str {
    let text = text.trim();
    if !text.starts_with('/') || text.contains(char::is_whitespace) {
        return text;
    }
    match text.split_once('@') {
        Some((command, bot)) if !bot.is_empty() => command,
        _ => text,
    }
}

pub fn is_menu_trigger(text: &str) -> bool {
    let text = strip_bot_mention(text);
    MENU_TRIGGERS.iter().any(|t| t.eq_ignore_ascii_case(text))
}

fn keyword_command(text: &str) -> Option<&'static str> {
    let word = strip_bot_mention(text)
        .trim_start_matches(COMMAND_PREFIXES)
        .to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == word)
        .map(|(_, command)| *command)
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Display text of a body: conversation text, extended text, button id, list title. Empty counts as absent.
pub fn extract_text(body: &MessageBody) -> Option<&str> {
    match body {
        MessageBody::Conversation(text) | MessageBody::ExtendedText(text) => non_empty(text),
        MessageBody::ButtonResponse { id } => non_empty(id),
        MessageBody::ListResponse { title, .. } => non_empty(title),
        MessageBody::Unsupported(_) => None,
    }
}

#[derive(Clone)]
pub struct Classifier {
    catalog: Arc<Catalog>,
}

impl Classifier {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Returns `None` for self-sent echoes and events without a body; those get no reply.
    pub fn classify(&self, event: &MessageEvent) -> Option<Intent> {
        if event.from_me {
            return None;
        }
        let body = event.body.as_ref()?;
        Some(self.classify_body(body))
    }

    fn classify_body(&self, body: &MessageBody) -> Intent {
        // A list row id wins over whatever title was echoed with it.
        if let MessageBody::ListResponse {
            row_id: Some(id), ..
        } = body
        {
            if let Some(id) = non_empty(id) {
                return self.select_or_trigger(id);
            }
        }

        let Some(text) = extract_text(body) else {
            return Intent::Unrecognized;
        };

        if is_menu_trigger(text) {
            return Intent::Command(SHOW_MENU.to_string());
        }

        match body {
            MessageBody::ButtonResponse { id } => Intent::MenuSelect(id.trim().to_string()),
            MessageBody::ListResponse { title, .. } => {
                let id = self.catalog.resolve_title(title).unwrap_or(text);
                Intent::MenuSelect(id.to_string())
            }
            MessageBody::Conversation(_) | MessageBody::ExtendedText(_) => {
                match keyword_command(text) {
                    Some(command) => Intent::Command(command.to_string()),
                    None => Intent::FreeText(text.to_string()),
                }
            }
            MessageBody::Unsupported(_) => Intent::Unrecognized,
        }
    }

    fn select_or_trigger(&self, id: &str) -> Intent {
        if is_menu_trigger(id) {
            Intent::Command(SHOW_MENU.to_string())
        } else {
            Intent::MenuSelect(id.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubot_core::Sender;

    fn classifier() -> Classifier {
        Classifier::new(Arc::new(Catalog::default()))
    }

    fn event(body: MessageBody) -> MessageEvent {
        MessageEvent::incoming(
            "evt-1",
            Sender {
                id: "u1".to_string(),
                chat_id: "c1".to_string(),
                display_name: None,
            },
            body,
        )
    }

    fn text(s: &str) -> MessageEvent {
        event(MessageBody::Conversation(s.to_string()))
    }

    #[test]
    fn test_menu_triggers_are_case_insensitive() {
        let c = classifier();
        for input in ["MENU", "Menu", "menu", "/menu", ".menu", "!menu", "0", " menu "] {
            assert_eq!(
                c.classify(&text(input)),
                Some(Intent::Command(SHOW_MENU.to_string())),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_from_me_and_empty_body_yield_nothing() {
        let c = classifier();
        let mut echo = text("menu");
        echo.from_me = true;
        assert_eq!(c.classify(&echo), None);

        let mut empty = text("menu");
        empty.body = None;
        assert_eq!(c.classify(&empty), None);
    }

    #[test]
    fn test_keywords_become_commands() {
        let c = classifier();
        assert_eq!(c.classify(&text("PING")), Some(Intent::Command("ping".into())));
        assert_eq!(c.classify(&text("/ping")), Some(Intent::Command("ping".into())));
        assert_eq!(c.classify(&text("Halo")), Some(Intent::Command("hi".into())));
        assert_eq!(c.classify(&text("owner")), Some(Intent::Command("owner".into())));
    }

    #[test]
    fn test_group_commands_with_bot_suffix() {
        let c = classifier();
        assert_eq!(
            c.classify(&text("/menu@MenuBot")),
            Some(Intent::Command(SHOW_MENU.into()))
        );
        assert_eq!(
            c.classify(&text("/start@MenuBot")),
            Some(Intent::Command(SHOW_MENU.into()))
        );
        assert_eq!(
            c.classify(&text("/ping@MenuBot")),
            Some(Intent::Command("ping".into()))
        );
        // Only commands lose the suffix; an address stays free text.
        assert_eq!(
            c.classify(&text("menu@MenuBot")),
            Some(Intent::FreeText("menu@MenuBot".into()))
        );
    }

    #[test]
    fn test_other_text_is_free_text() {
        let c = classifier();
        assert_eq!(
            c.classify(&text("apa kabar?")),
            Some(Intent::FreeText("apa kabar?".into()))
        );
        assert_eq!(
            c.classify(&event(MessageBody::ExtendedText("  ".into()))),
            Some(Intent::Unrecognized)
        );
        assert_eq!(
            c.classify(&event(MessageBody::Unsupported("sticker".into()))),
            Some(Intent::Unrecognized)
        );
    }

    #[test]
    fn test_extended_text_trigger() {
        let c = classifier();
        assert_eq!(
            c.classify(&event(MessageBody::ExtendedText("Menu".into()))),
            Some(Intent::Command(SHOW_MENU.into()))
        );
    }

    #[test]
    fn test_button_response_selects_item() {
        let c = classifier();
        assert_eq!(
            c.classify(&event(MessageBody::ButtonResponse { id: "2".into() })),
            Some(Intent::MenuSelect("2".into()))
        );
        // The back button carries the trigger id.
        assert_eq!(
            c.classify(&event(MessageBody::ButtonResponse { id: "0".into() })),
            Some(Intent::Command(SHOW_MENU.into()))
        );
    }

    #[test]
    fn test_list_response_prefers_row_id() {
        let c = classifier();
        assert_eq!(
            c.classify(&event(MessageBody::ListResponse {
                row_id: Some("5".into()),
                title: "Something else".into()
            })),
            Some(Intent::MenuSelect("5".into()))
        );
        assert_eq!(
            c.classify(&event(MessageBody::ListResponse {
                row_id: Some("7".into()),
                title: String::new()
            })),
            Some(Intent::MenuSelect("7".into()))
        );
    }

    #[test]
    fn test_list_response_title_resolves_against_catalog() {
        let c = classifier();
        assert_eq!(
            c.classify(&event(MessageBody::ListResponse {
                row_id: None,
                title: "Donasi".into()
            })),
            Some(Intent::MenuSelect("4".into()))
        );
        assert_eq!(
            c.classify(&event(MessageBody::ListResponse {
                row_id: None,
                title: "Unknown Entry".into()
            })),
            Some(Intent::MenuSelect("Unknown Entry".into()))
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let c = classifier();
        let e = event(MessageBody::ButtonResponse { id: "3".into() });
        assert_eq!(c.classify(&e), c.classify(&e));
        let t = text("hello there");
        assert_eq!(c.classify(&t), c.classify(&t));
    }
}
