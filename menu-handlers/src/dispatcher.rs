//! Menu dispatcher: maps an [`Intent`] to the [`OutboundPayload`] to send.
//!
//! Stateless. The only non-deterministic input is the [`Clock`] used by the server-time item.

use std::sync::Arc;

use menubot_core::{Button, ListRow, ListSection, OutboundPayload};

use crate::catalog::{Catalog, ItemReply};
use crate::classifier::{Intent, SHOW_MENU};
use crate::clock::{Clock, SystemClock};

/// Menus with more items than this render as a list message.
pub const DEFAULT_MAX_INLINE_BUTTONS: usize = 3;

/// Id of the "back to main menu" button; classified as a menu trigger.
pub const BACK_BUTTON_ID: &str = "0";
pub const BACK_BUTTON_LABEL: &str = "Kembali ke Menu Utama";

pub const PONG_TEXT: &str = "Pong! Bot aktif dan siap digunakan.";
pub const NOT_FOUND_TEXT: &str =
    "Maaf, menu tidak ditemukan. Ketik *menu* untuk melihat daftar menu.";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone)]
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    max_inline_buttons: usize,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            clock: Arc::new(SystemClock),
            max_inline_buttons: DEFAULT_MAX_INLINE_BUTTONS,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_inline_buttons(mut self, max: usize) -> Self {
        self.max_inline_buttons = max;
        self
    }

    pub fn dispatch(&self, intent: &Intent) -> OutboundPayload {
        match intent {
            Intent::Command(name) => match name.as_str() {
                SHOW_MENU => self.root_menu(),
                "hi" => OutboundPayload::PlainText(self.greeting_text()),
                "ping" => OutboundPayload::PlainText(PONG_TEXT.to_string()),
                "owner" => OutboundPayload::PlainText(self.owner_text()),
                _ => self.fallback(),
            },
            Intent::MenuSelect(id) => self.select(id),
            Intent::FreeText(_) | Intent::Unrecognized => self.fallback(),
        }
    }

    /// Root menu listing every item in catalog order.
    pub fn root_menu(&self) -> OutboundPayload {
        let text = format!(
            "🤖 {}\nHalo! Selamat datang di menu bot. Silakan pilih salah satu opsi di bawah ini:",
            self.catalog.bot_name
        );

        if self.catalog.items.len() <= self.max_inline_buttons {
            return OutboundPayload::ButtonMessage {
                text,
                footer: self.catalog.footer.clone(),
                buttons: self
                    .catalog
                    .items
                    .iter()
                    .map(|item| Button::new(&item.id, &item.title))
                    .collect(),
            };
        }

        OutboundPayload::ListMessage {
            text,
            button_label: self.catalog.button_label.clone(),
            sections: vec![ListSection {
                title: self.catalog.section_title.clone(),
                rows: self
                    .catalog
                    .items
                    .iter()
                    .map(|item| ListRow {
                        id: item.id.clone(),
                        title: item.title.clone(),
                        description: item.description.clone(),
                    })
                    .collect(),
            }],
        }
    }

    /// Reply text for one item; `None` when the id is unknown.
    pub fn item_text(&self, id: &str) -> Option<String> {
        let item = self.catalog.find(id)?;
        Some(match item.reply() {
            ItemReply::Text(text) => text,
            ItemReply::ServerTime => format!(
                "Tanggal dan waktu server saat ini: {}",
                self.clock.now().format(TIME_FORMAT)
            ),
            ItemReply::OwnerInfo => self.owner_text(),
        })
    }

    fn select(&self, id: &str) -> OutboundPayload {
        match self.item_text(id) {
            Some(text) => OutboundPayload::ButtonMessage {
                text,
                footer: self.catalog.footer.clone(),
                buttons: vec![Button::new(BACK_BUTTON_ID, BACK_BUTTON_LABEL)],
            },
            None => OutboundPayload::PlainText(NOT_FOUND_TEXT.to_string()),
        }
    }

    fn greeting_text(&self) -> String {
        format!(
            "Halo! Saya {}. Ketik *menu* untuk melihat daftar menu.",
            self.catalog.bot_name
        )
    }

    fn owner_text(&self) -> String {
        format!(
            "Owner bot ini adalah {}. Hubungi jika ada yang penting.",
            self.catalog.owner
        )
    }

    fn fallback(&self) -> OutboundPayload {
        OutboundPayload::PlainText(format!(
            "Halo, saya {}. Saya belum mengerti pesan itu. Ketik *menu* untuk melihat daftar menu.",
            self.catalog.bot_name
        ))
    }
}
