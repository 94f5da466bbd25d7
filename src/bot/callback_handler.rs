//! Callback Handler module for processing inline keyboard interactions

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::localization::{t_args_lang, t_lang};

use crate::bot_state::BotState;
use crate::dialogue::{BookingDialogue, BookingDialogueState};

use super::admin_handler;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: BookingDialogue,
    state: BotState,
) -> Result<()> {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let chat = q
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or_else(|| ChatId::from(q.from.id));
    let language_code = q.from.language_code.as_deref();

    debug!(chat_id = %chat, data = %data, "Received callback query");

    if data.starts_with("barber_") {
        handle_barber_choice(&bot, chat, dialogue, &state, &data, language_code).await?;
    } else if data.starts_with("adm_") || data.starts_with("done_") || data.starts_with("del_") {
        if state.is_admin(chat).await {
            handle_admin_action(&bot, chat, &state, &data, language_code).await?;
        } else {
            warn!(chat_id = %chat, "Admin callback from unauthenticated chat");
            bot.send_message(chat, t_lang("admin-denied", language_code))
                .await?;
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

/// The barber choice is only meaningful while the booking form is on that
/// step; a stale button press outside it is ignored.
async fn handle_barber_choice(
    bot: &Bot,
    chat: ChatId,
    dialogue: BookingDialogue,
    state: &BotState,
    data: &str,
    language_code: Option<&str>,
) -> Result<()> {
    if dialogue.get().await? != Some(BookingDialogueState::SelectingBarber) {
        return Ok(());
    }

    let Some(barber) = state.config.barber_by_id(data) else {
        warn!(chat_id = %chat, data = %data, "Unknown barber id in callback");
        return Ok(());
    };

    bot.send_message(
        chat,
        t_args_lang("enter-name", &[("barber", &barber.name)], language_code),
    )
    .await?;
    dialogue
        .update(BookingDialogueState::EnteringName {
            barber: barber.name.clone(),
        })
        .await?;

    Ok(())
}

async fn handle_admin_action(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    data: &str,
    language_code: Option<&str>,
) -> Result<()> {
    if data == "adm_waiting" {
        admin_handler::list_waiting(bot, chat, state, language_code).await?;
    } else if data == "adm_done" {
        admin_handler::list_done(bot, chat, state, language_code).await?;
    } else if data == "adm_pick_done" {
        admin_handler::pick_mark_done(bot, chat, state, language_code).await?;
    } else if data == "adm_pick_del" {
        admin_handler::pick_delete(bot, chat, state, language_code).await?;
    } else if data == "adm_refresh" {
        admin_handler::refresh_store(bot, chat, state, language_code).await?;
    } else if let Some(barber_id) = data.strip_prefix("adm_barber_") {
        match state.config.barber_by_id(barber_id) {
            Some(barber) => {
                admin_handler::list_barber(bot, chat, state, &barber.name, language_code).await?;
            }
            None => {
                warn!(chat_id = %chat, data = %data, "Unknown barber id in admin callback");
            }
        }
    } else if let Some(ticket) = data.strip_prefix("done_") {
        match ticket.parse::<u32>() {
            Ok(ticket) => admin_handler::mark_done(bot, chat, state, ticket, language_code).await?,
            Err(_) => {
                bot.send_message(chat, t_lang("admin-not-found", language_code))
                    .await?;
            }
        }
    } else if let Some(ticket) = data.strip_prefix("del_") {
        match ticket.parse::<u32>() {
            Ok(ticket) => {
                admin_handler::delete_booking(bot, chat, state, ticket, language_code).await?
            }
            Err(_) => {
                bot.send_message(chat, t_lang("admin-not-found", language_code))
                    .await?;
            }
        }
    }

    Ok(())
}
