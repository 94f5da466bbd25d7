pub mod booking;
pub mod bot;
pub mod bot_state;
pub mod config;
pub mod dialogue;
pub mod localization;
pub mod notifier;
pub mod queue;
pub mod sheets;
pub mod wait_time;
