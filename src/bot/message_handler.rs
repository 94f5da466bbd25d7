//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use chrono::Local;
use teloxide::prelude::*;
use tracing::{debug, error};

// Import localization
use crate::localization::{matches_button, t_args_lang, t_lang};

use crate::booking;
use crate::bot_state::BotState;
use crate::dialogue::{BookingDialogue, BookingDialogueState};
use crate::queue;
use crate::wait_time::{estimated_completion_time, format_wait_time, wait_minutes};

use super::dialogue_manager::{
    handle_admin_password, handle_name_input, handle_phone_input, start_booking,
};
use super::ui_builder::main_menu_keyboard;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: BookingDialogue,
    state: BotState,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str());

    debug!(user_id = %msg.chat.id, "Received text message from user");

    // A cancel signal is accepted in any non-terminal state and discards
    // the in-progress form.
    if text == "/cancel" {
        dialogue.exit().await?;
        bot.send_message(msg.chat.id, t_lang("booking-cancelled", language_code))
            .reply_markup(main_menu_keyboard(language_code))
            .await?;
        return Ok(());
    }

    // Dialogue input takes precedence over command routing.
    match dialogue.get().await? {
        Some(BookingDialogueState::EnteringName { barber }) => {
            return handle_name_input(&bot, &msg, dialogue, barber, text, language_code).await;
        }
        Some(BookingDialogueState::EnteringPhone { barber, name }) => {
            return handle_phone_input(
                &bot,
                &msg,
                dialogue,
                &state,
                barber,
                name,
                text,
                language_code,
            )
            .await;
        }
        Some(BookingDialogueState::AwaitingAdminPassword) => {
            return handle_admin_password(&bot, &msg, dialogue, &state, text, language_code).await;
        }
        Some(BookingDialogueState::SelectingBarber) => {
            // Barber choice comes through the inline keyboard; remind.
            bot.send_message(msg.chat.id, t_lang("choose-barber", language_code))
                .await?;
            return Ok(());
        }
        Some(BookingDialogueState::Start) | None => {
            // Continue with normal command handling
        }
    }

    if text == "/start" {
        bot.send_message(msg.chat.id, t_lang("welcome", language_code))
            .reply_markup(main_menu_keyboard(language_code))
            .await?;
    } else if text == "/admin" {
        bot.send_message(msg.chat.id, t_lang("admin-password-prompt", language_code))
            .await?;
        dialogue
            .update(BookingDialogueState::AwaitingAdminPassword)
            .await?;
    } else if matches_button(text, "btn-book") {
        start_booking(&bot, &msg, dialogue, &state, language_code).await?;
    } else if matches_button(text, "btn-view-queue") {
        queue_status(&bot, &msg, &state, language_code).await?;
    } else if matches_button(text, "btn-check-wait") {
        wait_estimate(&bot, &msg, &state, language_code).await?;
    } else {
        bot.send_message(msg.chat.id, t_lang("unknown-command", language_code))
            .await?;
    }

    Ok(())
}

/// "View queue": position in line, or how long the line currently is.
async fn queue_status(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let rows = match state.store.get_all_rows().await {
        Ok(rows) => rows,
        Err(e) => {
            error!(user_id = %msg.chat.id, error = %e, "Failed to fetch queue");
            bot.send_message(msg.chat.id, t_lang("error-transient", language_code))
                .await?;
            return Ok(());
        }
    };

    let bookings = booking::parse_sheet(&rows);
    let customer_id = msg.chat.id.to_string();

    let reply = match queue::queue_position(&bookings, &customer_id) {
        None => {
            let total = queue::waiting_bookings(&bookings).len();
            format!(
                "📋 {}\n{}",
                count_phrase(total, language_code),
                t_lang("not-in-queue", language_code)
            )
        }
        Some(0) => t_lang("your-turn", language_code),
        Some(position) => format!(
            "{}\n{}",
            t_args_lang(
                "position-status",
                &[("position", &(position + 1).to_string())],
                language_code
            ),
            ahead_phrase(position, language_code)
        ),
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// "Check wait": remaining wait for queued customers, projected wait for
/// everyone else.
async fn wait_estimate(
    bot: &Bot,
    msg: &Message,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let rows = match state.store.get_all_rows().await {
        Ok(rows) => rows,
        Err(e) => {
            error!(user_id = %msg.chat.id, error = %e, "Failed to fetch queue");
            bot.send_message(msg.chat.id, t_lang("error-transient", language_code))
                .await?;
            return Ok(());
        }
    };

    let bookings = booking::parse_sheet(&rows);
    let customer_id = msg.chat.id.to_string();
    let per_customer = state.config.appointment_minutes;

    let reply = match queue::queue_position(&bookings, &customer_id) {
        None => {
            let total = queue::waiting_bookings(&bookings).len();
            let minutes = wait_minutes(total, per_customer);
            t_args_lang(
                "wait-if-book",
                &[
                    ("wait", &format_wait_time(minutes, language_code)),
                    (
                        "eta",
                        &estimated_completion_time(
                            Local::now().naive_local(),
                            minutes,
                            language_code,
                        ),
                    ),
                    ("count", &total.to_string()),
                ],
                language_code,
            )
        }
        Some(0) => t_lang("wait-first", language_code),
        Some(position) => {
            let minutes = wait_minutes(position, per_customer);
            t_args_lang(
                "wait-status",
                &[
                    ("position", &(position + 1).to_string()),
                    ("ahead", &position.to_string()),
                    ("wait", &format_wait_time(minutes, language_code)),
                    (
                        "eta",
                        &estimated_completion_time(
                            Local::now().naive_local(),
                            minutes,
                            language_code,
                        ),
                    ),
                ],
                language_code,
            )
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

fn count_phrase(total: usize, language_code: Option<&str>) -> String {
    match total {
        0 => t_lang("queue-empty", language_code),
        1 => t_lang("queue-one", language_code),
        2 => t_lang("queue-two", language_code),
        n => t_args_lang("queue-many", &[("count", &n.to_string())], language_code),
    }
}

fn ahead_phrase(ahead: usize, language_code: Option<&str>) -> String {
    match ahead {
        1 => t_lang("ahead-one", language_code),
        2 => t_lang("ahead-two", language_code),
        n => t_args_lang("ahead-many", &[("count", &n.to_string())], language_code),
    }
}
