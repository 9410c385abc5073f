//! Builds the catalog and handler chain from config.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use menu_handlers::{Catalog, LoggingHandler, MenuHandler};
use std::sync::Arc;

use crate::config::BotConfig;

/// Loads MENU_FILE (or the built-in menu), applies bot identity from config and validates.
pub fn load_catalog(config: &BotConfig) -> Result<Arc<Catalog>> {
    let catalog = Catalog::load(config.menu_file.as_deref())
        .context("Failed to load menu catalog")?
        .with_identity(&config.bot_name, &config.bot_owner);
    Ok(Arc::new(catalog))
}

/// Chain order: LoggingHandler (before/after) -> MenuHandler (terminal).
pub fn build_handler_chain(config: &BotConfig, catalog: Arc<Catalog>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(
            MenuHandler::new(catalog).with_max_inline_buttons(config.max_inline_buttons),
        ))
}
