//! Admin console operations: queue views, status mutations, store refresh.
//!
//! All of these assume the chat already passed the password prompt; the
//! callers check the session before dispatching here.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info};

use crate::booking::{self, find_row_by_ticket, BookingStatus, STATUS_COLUMN, STATUS_DONE};
use crate::bot_state::BotState;
use crate::localization::{t_args_lang, t_lang};
use crate::queue;

use super::ui_builder::{
    booking_pick_keyboard, format_booking_list, chunk_message, MESSAGE_CHUNK_LIMIT,
};

/// Send a possibly long listing in chunks under the message size limit.
async fn send_list(bot: &Bot, chat: ChatId, header: &str, body: &str) -> Result<()> {
    let text = format!("{}\n\n{}", header, body);
    for chunk in chunk_message(&text, MESSAGE_CHUNK_LIMIT) {
        bot.send_message(chat, chunk).await?;
    }
    Ok(())
}

async fn fetch_or_report(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<Option<Vec<Vec<String>>>> {
    match state.store.get_all_rows().await {
        Ok(rows) => Ok(Some(rows)),
        Err(e) => {
            error!(chat_id = %chat, error = %e, "Admin view failed to fetch rows");
            bot.send_message(chat, t_lang("error-transient", language_code))
                .await?;
            Ok(None)
        }
    }
}

pub async fn list_waiting(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };
    let bookings = booking::parse_sheet(&rows);
    let waiting = queue::waiting_bookings(&bookings);

    if waiting.is_empty() {
        bot.send_message(chat, t_lang("admin-no-waiting", language_code))
            .await?;
        return Ok(());
    }

    send_list(
        bot,
        chat,
        &t_lang("admin-waiting-header", language_code),
        &format_booking_list(&waiting, language_code),
    )
    .await
}

pub async fn list_done(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };
    let bookings = booking::parse_sheet(&rows);
    let done: Vec<&booking::Booking> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Done)
        .collect();

    if done.is_empty() {
        bot.send_message(chat, t_lang("admin-no-done", language_code))
            .await?;
        return Ok(());
    }

    send_list(
        bot,
        chat,
        &t_lang("admin-done-header", language_code),
        &format_booking_list(&done, language_code),
    )
    .await
}

/// Waiting customers of one barber.
pub async fn list_barber(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    barber_name: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };
    let bookings = booking::parse_sheet(&rows);
    let for_barber: Vec<&booking::Booking> = bookings
        .iter()
        .filter(|b| b.is_waiting() && b.barber == barber_name)
        .collect();

    if for_barber.is_empty() {
        bot.send_message(
            chat,
            t_args_lang("admin-no-barber-waiting", &[("barber", barber_name)], language_code),
        )
        .await?;
        return Ok(());
    }

    send_list(
        bot,
        chat,
        &t_args_lang("admin-barber-header", &[("barber", barber_name)], language_code),
        &format_booking_list(&for_barber, language_code),
    )
    .await
}

/// Offer the waiting bookings as buttons for the mark-done action.
pub async fn pick_mark_done(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };
    let bookings = booking::parse_sheet(&rows);
    let waiting = queue::waiting_bookings(&bookings);

    if waiting.is_empty() {
        bot.send_message(chat, t_lang("admin-no-waiting", language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(chat, t_lang("admin-pick-done", language_code))
        .reply_markup(booking_pick_keyboard(&waiting, "done"))
        .await?;
    Ok(())
}

/// Offer every booking as a button for the delete action.
pub async fn pick_delete(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };
    let bookings = booking::parse_sheet(&rows);
    let all: Vec<&booking::Booking> = bookings.iter().collect();

    if all.is_empty() {
        bot.send_message(chat, t_lang("admin-no-waiting", language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(chat, t_lang("admin-pick-delete", language_code))
        .reply_markup(booking_pick_keyboard(&all, "del"))
        .await?;
    Ok(())
}

/// Mark the Waiting booking with this ticket as Done.
pub async fn mark_done(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    ticket: u32,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };

    match find_row_by_ticket(&rows, ticket) {
        Some((row_index, booking)) if booking.is_waiting() => {
            if let Err(e) = state
                .store
                .update_cell(row_index, STATUS_COLUMN, STATUS_DONE)
                .await
            {
                error!(chat_id = %chat, ticket, error = %e, "Failed to mark booking done");
                bot.send_message(chat, t_lang("error-transient", language_code))
                    .await?;
                return Ok(());
            }
            info!(chat_id = %chat, ticket, "Booking marked done");
            bot.send_message(
                chat,
                t_args_lang("admin-marked-done", &[("name", &booking.name)], language_code),
            )
            .await?;
        }
        _ => {
            bot.send_message(chat, t_lang("admin-not-found", language_code))
                .await?;
        }
    }

    Ok(())
}

/// Physically remove the booking row with this ticket.
pub async fn delete_booking(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    ticket: u32,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(rows) = fetch_or_report(bot, chat, state, language_code).await? else {
        return Ok(());
    };

    match find_row_by_ticket(&rows, ticket) {
        Some((row_index, booking)) => {
            if let Err(e) = state.store.delete_row(row_index).await {
                error!(chat_id = %chat, ticket, error = %e, "Failed to delete booking");
                bot.send_message(chat, t_lang("error-transient", language_code))
                    .await?;
                return Ok(());
            }
            info!(chat_id = %chat, ticket, "Booking deleted");
            bot.send_message(
                chat,
                t_args_lang("admin-deleted", &[("name", &booking.name)], language_code),
            )
            .await?;
        }
        None => {
            bot.send_message(chat, t_lang("admin-not-found", language_code))
                .await?;
        }
    }

    Ok(())
}

/// Manual refresh: drop the read cache and probe the store connection.
pub async fn refresh_store(
    bot: &Bot,
    chat: ChatId,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    match state.store.refresh_connection().await {
        Ok(()) => {
            bot.send_message(chat, t_lang("admin-refreshed", language_code))
                .await?;
        }
        Err(e) => {
            error!(chat_id = %chat, error = %e, "Store refresh failed");
            bot.send_message(chat, t_lang("error-transient", language_code))
                .await?;
        }
    }
    Ok(())
}
