//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::booking::Booking;
use crate::config::Barber;

/// Telegram rejects messages longer than 4096 characters; stay well under.
pub const MESSAGE_CHUNK_LIMIT: usize = 3500;

/// The customer main menu: view queue / book / check wait.
pub fn main_menu_keyboard(language_code: Option<&str>) -> KeyboardMarkup {
    let buttons = vec![
        vec![
            KeyboardButton::new(t_lang("btn-view-queue", language_code)),
            KeyboardButton::new(t_lang("btn-book", language_code)),
        ],
        vec![KeyboardButton::new(t_lang("btn-check-wait", language_code))],
    ];
    KeyboardMarkup::new(buttons).resize_keyboard()
}

/// One inline button per barber; callback data is the barber id.
pub fn barber_keyboard(barbers: &[Barber]) -> InlineKeyboardMarkup {
    let buttons = barbers
        .iter()
        .map(|b| vec![InlineKeyboardButton::callback(b.name.clone(), b.id.clone())])
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons)
}

/// The admin panel actions.
pub fn admin_panel_keyboard(barbers: &[Barber], language_code: Option<&str>) -> InlineKeyboardMarkup {
    let mut buttons = vec![vec![
        InlineKeyboardButton::callback(t_lang("btn-admin-waiting", language_code), "adm_waiting"),
        InlineKeyboardButton::callback(t_lang("btn-admin-done", language_code), "adm_done"),
    ]];

    for barber in barbers {
        buttons.push(vec![InlineKeyboardButton::callback(
            t_args_lang("btn-admin-barber", &[("barber", &barber.name)], language_code),
            format!("adm_barber_{}", barber.id),
        )]);
    }

    buttons.push(vec![
        InlineKeyboardButton::callback(t_lang("btn-admin-mark-done", language_code), "adm_pick_done"),
        InlineKeyboardButton::callback(t_lang("btn-admin-delete", language_code), "adm_pick_del"),
    ]);
    buttons.push(vec![InlineKeyboardButton::callback(
        t_lang("btn-admin-refresh", language_code),
        "adm_refresh",
    )]);

    InlineKeyboardMarkup::new(buttons)
}

/// One button per booking for admin mutations; callback data is
/// `<action_prefix>_<ticket_number>` so the key survives row deletion.
pub fn booking_pick_keyboard(bookings: &[&Booking], action_prefix: &str) -> InlineKeyboardMarkup {
    let buttons = bookings
        .iter()
        .map(|b| {
            vec![InlineKeyboardButton::callback(
                format!("{} - {} (🎟 {})", b.name, b.barber, b.ticket_number),
                format!("{}_{}", action_prefix, b.ticket_number),
            )]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(buttons)
}

/// Format bookings as a numbered list for the admin views.
pub fn format_booking_list(bookings: &[&Booking], language_code: Option<&str>) -> String {
    let mut result = String::new();

    for (i, booking) in bookings.iter().enumerate() {
        result.push_str(&t_args_lang(
            "list-entry",
            &[
                ("index", &(i + 1).to_string()),
                ("name", &booking.name),
                ("phone", &booking.phone),
                ("barber", &booking.barber),
                ("time", &booking.created_at),
                ("ticket", &booking.ticket_number.to_string()),
            ],
            language_code,
        ));
        result.push('\n');
        result.push_str(&"─".repeat(20));
        result.push('\n');
    }

    result
}

/// Split a long message at line boundaries so every piece stays under the
/// Telegram message size limit.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if !current.is_empty() && current.len() + line.len() + 1 > limit {
            chunks.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_message_short() {
        let chunks = chunk_message("one\ntwo", 100);
        assert_eq!(chunks, vec!["one\ntwo".to_string()]);
    }

    #[test]
    fn test_chunk_message_splits_on_lines() {
        let text = (0..10).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let chunks = chunk_message(&text, 20);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 20));
        assert_eq!(chunks.join("\n"), text);
    }
}
