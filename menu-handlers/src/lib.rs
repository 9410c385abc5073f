//! # menu-handlers
//!
//! The menu bot's routing: [`Catalog`] (static menu table), [`Classifier`] (event → [`Intent`]),
//! [`Dispatcher`] (intent → payload), and the chain handlers [`MenuHandler`] and [`LoggingHandler`].

pub mod catalog;
pub mod classifier;
pub mod clock;
pub mod dispatcher;
mod logging_handler;
mod menu_handler;

pub use catalog::{Catalog, ItemReply, MenuItem, MAX_ITEM_ID_LEN};
pub use classifier::{is_menu_trigger, Classifier, Intent, MENU_TRIGGERS, SHOW_MENU};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatcher::{
    Dispatcher, BACK_BUTTON_ID, BACK_BUTTON_LABEL, DEFAULT_MAX_INLINE_BUTTONS, NOT_FOUND_TEXT,
    PONG_TEXT,
};
pub use logging_handler::LoggingHandler;
pub use menu_handler::MenuHandler;
