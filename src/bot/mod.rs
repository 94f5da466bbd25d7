//! Telegram-facing layer: message routing, the booking dialogue, the admin
//! console, and keyboard/message construction.

pub mod admin_handler;
pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

pub use callback_handler::callback_handler;
pub use message_handler::message_handler;
