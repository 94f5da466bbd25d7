//! Dialogue Manager module for handling dialogue state transitions

use anyhow::Result;
use chrono::Local;
use teloxide::prelude::*;
use tracing::{error, info};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::booking::{self, format_created_at};
use crate::bot_state::BotState;
use crate::dialogue::{
    validate_name, validate_phone, BookingDialogue, BookingDialogueState,
};
use crate::notifier::NotificationTier;
use crate::queue::{self, BookingRejected};
use crate::wait_time::{estimated_completion_time, format_wait_time, wait_minutes};

use super::ui_builder::{admin_panel_keyboard, barber_keyboard};

/// Entry point of the booking form: guard against a second active booking,
/// then offer the barber choice.
pub async fn start_booking(
    bot: &Bot,
    msg: &Message,
    dialogue: BookingDialogue,
    state: &BotState,
    language_code: Option<&str>,
) -> Result<()> {
    let customer_id = msg.chat.id.to_string();

    let rows = match state.store.get_all_rows().await {
        Ok(rows) => rows,
        Err(e) => {
            error!(user_id = %msg.chat.id, error = %e, "Failed to fetch rows for booking guard");
            bot.send_message(msg.chat.id, t_lang("error-transient", language_code))
                .await?;
            return Ok(());
        }
    };

    let bookings = booking::parse_sheet(&rows);
    if queue::has_active_booking(&bookings, &customer_id) {
        bot.send_message(msg.chat.id, t_lang("already-booked", language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, t_lang("choose-barber", language_code))
        .reply_markup(barber_keyboard(&state.config.barbers))
        .await?;
    dialogue.update(BookingDialogueState::SelectingBarber).await?;

    Ok(())
}

/// Handle name input during the booking dialogue.
pub async fn handle_name_input(
    bot: &Bot,
    msg: &Message,
    dialogue: BookingDialogue,
    barber: String,
    name_input: &str,
    language_code: Option<&str>,
) -> Result<()> {
    match validate_name(name_input) {
        Ok(name) => {
            bot.send_message(msg.chat.id, t_lang("enter-phone", language_code))
                .await?;
            dialogue
                .update(BookingDialogueState::EnteringPhone { barber, name })
                .await?;
        }
        Err(key) => {
            bot.send_message(msg.chat.id, t_lang(key, language_code))
                .await?;
            // Keep dialogue active, customer can try again
        }
    }

    Ok(())
}

/// Handle phone input: the final step that persists the booking.
pub async fn handle_phone_input(
    bot: &Bot,
    msg: &Message,
    dialogue: BookingDialogue,
    state: &BotState,
    barber: String,
    name: String,
    phone_input: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let phone = match validate_phone(phone_input) {
        Ok(phone) => phone,
        Err(key) => {
            bot.send_message(msg.chat.id, t_lang(key, language_code))
                .await?;
            // Keep dialogue active, customer can try again
            return Ok(());
        }
    };

    let customer_id = msg.chat.id.to_string();

    let result = async {
        let rows = state.store.get_all_rows().await?;
        let bookings = booking::parse_sheet(&rows);

        let plan = match queue::plan_booking(
            &bookings,
            &customer_id,
            &name,
            &phone,
            &barber,
            format_created_at(Local::now().naive_local()),
        ) {
            Ok(plan) => plan,
            Err(BookingRejected::AlreadyWaiting) => return Ok(None),
        };

        state.store.append_row(&plan.booking.to_row()).await?;
        anyhow::Ok(Some(plan))
    }
    .await;

    let plan = match result {
        Ok(Some(plan)) => plan,
        Ok(None) => {
            bot.send_message(msg.chat.id, t_lang("already-booked", language_code))
                .await?;
            dialogue.exit().await?;
            return Ok(());
        }
        Err(e) => {
            // Append is the single mutating call, so nothing partial is
            // left behind; report and end the conversation uncommitted.
            error!(user_id = %msg.chat.id, error = %e, "Failed to persist booking");
            bot.send_message(msg.chat.id, t_lang("error-transient", language_code))
                .await?;
            dialogue.exit().await?;
            return Ok(());
        }
    };

    info!(
        user_id = %msg.chat.id,
        ticket = plan.ticket_number,
        position = plan.position,
        "Booking confirmed"
    );

    let header = t_args_lang(
        "booked-header",
        &[
            ("name", &name),
            ("barber", &barber),
            ("phone", &phone),
            ("ticket", &plan.ticket_number.to_string()),
        ],
        language_code,
    );

    if plan.position == 0 {
        bot.send_message(
            msg.chat.id,
            format!("{}\n{}", header, t_lang("booked-first", language_code)),
        )
        .await?;
        // The confirmation already says "your turn"; suppress the
        // scheduler's immediate duplicate.
        state.notifications.lock().await.mark_sent(
            &customer_id,
            NotificationTier::Turn,
            chrono::Utc::now(),
        );
    } else {
        let minutes = wait_minutes(plan.position, state.config.appointment_minutes);
        let wait = format_wait_time(minutes, language_code);
        let eta = estimated_completion_time(Local::now().naive_local(), minutes, language_code);

        let status = t_args_lang(
            "booked-queued",
            &[
                ("position", &(plan.position + 1).to_string()),
                ("wait", &wait),
                ("eta", &eta),
            ],
            language_code,
        );
        bot.send_message(msg.chat.id, format!("{}\n{}", header, status))
            .await?;
    }

    dialogue.exit().await?;
    Ok(())
}

/// Handle the admin password prompt. A wrong password re-prompts and is
/// not treated as a system failure.
pub async fn handle_admin_password(
    bot: &Bot,
    msg: &Message,
    dialogue: BookingDialogue,
    state: &BotState,
    password_input: &str,
    language_code: Option<&str>,
) -> Result<()> {
    if password_input.trim() == state.config.admin_password {
        state.grant_admin(msg.chat.id).await;
        bot.send_message(msg.chat.id, t_lang("admin-welcome", language_code))
            .reply_markup(admin_panel_keyboard(&state.config.barbers, language_code))
            .await?;
        dialogue.exit().await?;
    } else {
        bot.send_message(msg.chat.id, t_lang("admin-password-wrong", language_code))
            .await?;
        // Stay in the password prompt
    }

    Ok(())
}
