//! # menubot-cli
//!
//! Binary support: argument parsing, config loading, catalog and handler chain assembly.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use components::{build_handler_chain, load_catalog};
pub use config::BotConfig;
pub use runner::{cancel_on_ctrl_c, describe_catalog, run_bot};
