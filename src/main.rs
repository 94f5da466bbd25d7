use anyhow::Result;
use log::info;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

use barbershop_bot::bot::{callback_handler, message_handler};
use barbershop_bot::bot_state::BotState;
use barbershop_bot::config::Config;
use barbershop_bot::dialogue::BookingDialogueState;
use barbershop_bot::localization::init_localization;
use barbershop_bot::notifier::notification_loop;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging. env_logger backs the log macros; the fmt
    // subscriber is installed without the log bridge so the two coexist.
    env_logger::init();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Barbershop Queue Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Load message catalogs before any handler runs
    init_localization()?;

    let config = Config::from_env()?;
    let bot_token = config.bot_token.clone();
    let notify_interval = config.notify_interval_secs;

    let state = BotState::new(config);

    // Initialize the bot
    let bot = Bot::new(bot_token);

    // Background scheduler for turn and early-warning notifications
    tokio::spawn(notification_loop(
        bot.clone(),
        state.store.clone(),
        state.notifications.clone(),
        notify_interval,
    ));

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<BookingDialogueState>, BookingDialogueState>()
                .endpoint(message_handler),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<BookingDialogueState>, BookingDialogueState>()
                .endpoint(callback_handler),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<BookingDialogueState>::new(),
            state
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
