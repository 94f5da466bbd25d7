//! Booking dialogue module for handling conversation state with customers.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Represents the conversation state of the booking form (and the admin
/// password prompt, which rides the same per-chat dialogue).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum BookingDialogueState {
    #[default]
    Start,
    /// Waiting for the customer to pick a barber from the inline keyboard.
    SelectingBarber,
    EnteringName {
        barber: String,
    },
    EnteringPhone {
        barber: String,
        name: String,
    },
    AwaitingAdminPassword,
}

/// Type alias for our booking dialogue
pub type BookingDialogue = Dialogue<BookingDialogueState, InMemStorage<BookingDialogueState>>;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z\s]{3,30}$").unwrap();
    static ref PHONE_PATTERN: Regex = Regex::new(r"^0[567]\d{8}$").unwrap();
}

/// Validates a customer name: letters and spaces only, 3 to 30 characters.
/// The error is a message-catalog key.
pub fn validate_name(name: &str) -> Result<String, &'static str> {
    let trimmed = name.trim();
    if NAME_PATTERN.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err("invalid-name")
    }
}

/// Strip the separators people type into phone numbers.
pub fn normalize_phone(phone: &str) -> String {
    phone.trim().replace([' ', '-'], "")
}

/// Validates an Algerian mobile number: 10 digits starting 05/06/07,
/// spaces and dashes tolerated. Returns the normalized number.
pub fn validate_phone(phone: &str) -> Result<String, &'static str> {
    let normalized = normalize_phone(phone);
    if PHONE_PATTERN.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err("invalid-phone")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Karim Benali").is_ok());
        assert!(validate_name("  Omar  ").is_ok());

        assert!(validate_name("Al").is_err());
        assert!(validate_name("Karim123").is_err());
        assert!(validate_name(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert_eq!(validate_phone("0677366125").unwrap(), "0677366125");
        assert_eq!(validate_phone("06 77 36 61 25").unwrap(), "0677366125");
        assert_eq!(validate_phone("06-77-36-61-25").unwrap(), "0677366125");

        assert!(validate_phone("0877366125").is_err()); // bad prefix
        assert!(validate_phone("067736612").is_err()); // too short
        assert!(validate_phone("06773661255").is_err()); // too long
    }
}
