//! Entry points for the `run` and `menu` commands.

use anyhow::Result;
use menu_handlers::{Catalog, ItemReply};
use menubot_core::init_tracing;
use menubot_telegram::run_polling;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::components::{build_handler_chain, load_catalog};
use crate::config::BotConfig;

/// Main entry: validate config, init logging, load the catalog, build the chain, then poll until
/// `shutdown` is cancelled or the session is logged out. Catalog errors abort before connecting.
#[instrument(skip(config, shutdown))]
pub async fn run_bot(config: BotConfig, shutdown: CancellationToken) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        bot_name = %config.bot_name,
        menu_file = ?config.menu_file,
        max_inline_buttons = config.max_inline_buttons,
        "Initializing bot"
    );

    let catalog = load_catalog(&config)?;
    let chain = build_handler_chain(&config, catalog);

    info!("Bot started successfully");
    run_polling(config.telegram, chain, shutdown).await
}

/// Cancels `shutdown` on Ctrl-C.
pub fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            shutdown.cancel();
        }
    });
}

/// Loads and validates a catalog, returning a printable summary.
pub fn describe_catalog(path: Option<&Path>) -> Result<String> {
    let catalog = Catalog::load(path)?;
    Ok(format_catalog(&catalog))
}

fn format_catalog(catalog: &Catalog) -> String {
    let mut out = format!(
        "{} (owner {}): {} items\n",
        catalog.bot_name,
        catalog.owner,
        catalog.items.len()
    );
    for item in &catalog.items {
        let reply = match item.reply() {
            ItemReply::Text(_) => "text",
            ItemReply::ServerTime => "server_time",
            ItemReply::OwnerInfo => "owner_info",
        };
        out.push_str(&format!("  {:>3}  {:<24} [{}]\n", item.id, item.title, reply));
    }
    out
}
