//! # menubot-core
//!
//! Core types and traits for the menu bot: [`Bot`], [`Handler`], inbound [`MessageEvent`]s, outbound
//! [`OutboundPayload`]s, connection lifecycle events and tracing initialization. Transport-agnostic;
//! used by handler-chain, menu-handlers and menubot-telegram.

pub mod bot;
pub mod error;
pub mod lifecycle;
pub mod logger;
pub mod payload;
pub mod types;

pub use bot::{parse_chat_id, Bot};
pub use error::{DbotError, Result};
pub use lifecycle::{log_connection_event, ConnectionEvent, DisconnectReason};
pub use logger::init_tracing;
pub use payload::{Button, ListRow, ListSection, OutboundPayload, PayloadKind};
pub use types::{Handler, HandlerResponse, MessageBody, MessageEvent, Sender, ToMessageEvent};
