//! Menu catalog: the static table of menu items and bot identity, validated once at startup.

use std::collections::HashSet;
use std::path::Path;

use menubot_core::{DbotError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::is_menu_trigger;

/// Longest item id accepted: ids travel in Telegram callback data (64 bytes) behind a 4-byte prefix.
pub const MAX_ITEM_ID_LEN: usize = 60;

/// What selecting a menu item answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum ItemReply {
    /// Fixed canned text.
    Text(String),
    /// Current server date and time, rendered at dispatch.
    ServerTime,
    /// Owner contact from the catalog.
    OwnerInfo,
}

/// One selectable entry of the root menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Defaults to `Text(description)` when absent in a catalog file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<ItemReply>,
}

impl MenuItem {
    pub fn text(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            reply: None,
        }
    }

    fn with_reply(mut self, reply: ItemReply) -> Self {
        self.reply = Some(reply);
        self
    }

    fn with_text(self, text: &str) -> Self {
        self.with_reply(ItemReply::Text(text.to_string()))
    }

    pub fn reply(&self) -> ItemReply {
        self.reply
            .clone()
            .unwrap_or_else(|| ItemReply::Text(self.description.clone()))
    }
}

fn default_bot_name() -> String {
    "MenuBot".to_string()
}

fn default_owner() -> String {
    "@owner".to_string()
}

fn default_footer() -> String {
    "© MenuBot".to_string()
}

fn default_button_label() -> String {
    "Lihat Menu".to_string()
}

fn default_section_title() -> String {
    "Menu Utama".to_string()
}

/// Menu items in display order plus the bot identity used by canned replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_footer")]
    pub footer: String,
    /// Label of the button that opens a list message.
    #[serde(default = "default_button_label")]
    pub button_label: String,
    #[serde(default = "default_section_title")]
    pub section_title: String,
    pub items: Vec<MenuItem>,
}

impl Default for Catalog {
    /// Built-in ten-item menu.
    fn default() -> Self {
        let items = vec![
            MenuItem::text("1", "Info Bot", "Tentang bot ini").with_text(
                "Ini adalah informasi tentang bot ini. Bot dibuat untuk tujuan testing.",
            ),
            MenuItem::text("2", "Waktu Server", "Tanggal dan jam server")
                .with_reply(ItemReply::ServerTime),
            MenuItem::text("3", "Owner", "Kontak owner bot").with_reply(ItemReply::OwnerInfo),
            MenuItem::text("4", "Donasi", "Dukung bot ini").with_text(
                "Terima kasih atas niat berdonasinya. Silakan hubungi owner untuk info lebih lanjut.",
            ),
            MenuItem::text("5", "Rules", "Aturan pemakaian").with_text(
                "Rules:\n1. Jangan spam bot.\n2. Jangan gunakan untuk hal-hal negatif.",
            ),
            MenuItem::text("6", "Fitur A", "Segera hadir")
                .with_text("Fitur A sedang dalam tahap pengembangan."),
            MenuItem::text("7", "Fitur B", "Segera hadir")
                .with_text("Fitur B sedang dalam tahap pengembangan."),
            MenuItem::text("8", "Fitur C", "Segera hadir")
                .with_text("Fitur C sedang dalam tahap pengembangan."),
            MenuItem::text("9", "Fitur D", "Segera hadir")
                .with_text("Fitur D sedang dalam tahap pengembangan."),
            MenuItem::text("10", "Tutup Menu", "Tutup daftar menu")
                .with_text("Menu ditutup. Ketik \"menu\" lagi untuk membuka."),
        ];

        Self {
            bot_name: default_bot_name(),
            owner: default_owner(),
            footer: default_footer(),
            button_label: default_button_label(),
            section_title: default_section_title(),
            items,
        }
    }
}

impl Catalog {
    /// Reads a JSON catalog file. Does not validate; call [`Catalog::validate`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            DbotError::Catalog(format!("Invalid catalog file {}: {}", path.display(), e))
        })
    }

    /// Loads `path` if given, else the built-in catalog; validates either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        catalog.validate()?;
        info!(
            items = catalog.items.len(),
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".to_string()),
            "Menu catalog loaded"
        );
        Ok(catalog)
    }

    /// Overrides bot identity (from config).
    pub fn with_identity(mut self, bot_name: &str, owner: &str) -> Self {
        self.bot_name = bot_name.to_string();
        self.owner = owner.to_string();
        self
    }

    /// Checks the table is complete: at least one item, unique non-empty ids that are not menu
    /// triggers, carry no surrounding whitespace and fit in [`MAX_ITEM_ID_LEN`], non-empty titles,
    /// and a non-empty reply for every item.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(DbotError::Catalog("catalog has no menu items".to_string()));
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            let id = item.id.as_str();
            if id.trim().is_empty() {
                return Err(DbotError::Catalog(format!(
                    "menu item '{}' has an empty id",
                    item.title
                )));
            }
            if id != id.trim() {
                return Err(DbotError::Catalog(format!(
                    "menu item id '{}' has surrounding whitespace",
                    id
                )));
            }
            if id.len() > MAX_ITEM_ID_LEN {
                return Err(DbotError::Catalog(format!(
                    "menu item id '{}' is longer than {} bytes",
                    id, MAX_ITEM_ID_LEN
                )));
            }
            if is_menu_trigger(id) {
                return Err(DbotError::Catalog(format!(
                    "menu item id '{}' collides with a menu trigger",
                    id
                )));
            }
            if !seen.insert(id.to_string()) {
                return Err(DbotError::Catalog(format!("duplicate menu item id '{}'", id)));
            }
            if item.title.trim().is_empty() {
                return Err(DbotError::Catalog(format!(
                    "menu item '{}' has an empty title",
                    id
                )));
            }
            if let ItemReply::Text(text) = item.reply() {
                if text.trim().is_empty() {
                    return Err(DbotError::Catalog(format!(
                        "menu item '{}' has no reply text",
                        id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Maps a list selection echoed back as display text to an item id: exact id first, then case-insensitive title.
    pub fn resolve_title(&self, title: &str) -> Option<&str> {
        let title = title.trim();
        if let Some(item) = self.find(title) {
            return Some(item.id.as_str());
        }
        let lowered = title.to_lowercase();
        self.items
            .iter()
            .find(|item| item.title.to_lowercase() == lowered)
            .map(|item| item.id.as_str())
    }
}
