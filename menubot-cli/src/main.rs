//! menubot CLI: run the Telegram menu bot, or check a menu catalog. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use menubot_cli::{cancel_on_ctrl_c, describe_catalog, run_bot, BotConfig, Cli, Commands};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            let shutdown = CancellationToken::new();
            cancel_on_ctrl_c(shutdown.clone());
            run_bot(config, shutdown).await
        }
        Commands::Menu { file } => {
            let file = file.or_else(|| {
                std::env::var("MENU_FILE")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from)
            });
            print!("{}", describe_catalog(file.as_deref())?);
            Ok(())
        }
    }
}
