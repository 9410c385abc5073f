//! CLI parser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menubot")]
#[command(about = "Menu chatbot: run the Telegram bot or check a menu catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Validate a menu catalog and print it. Without --file, checks MENU_FILE or the built-in menu.
    Menu {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
