//! Wait-time estimation and rendering.
//!
//! Pure formatting logic: deterministic given `(position, now)`. The
//! dialect needs special-cased words for zero, singular and dual counts,
//! so the numeral grammar lives here and the words live in the catalogs.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::localization::{t_args_lang, t_lang};

/// Estimated wait in minutes for a 0-based queue position.
pub fn wait_minutes(position: usize, per_customer_minutes: i64) -> i64 {
    position as i64 * per_customer_minutes
}

/// Render a duration in the customer's language, with the zero/one/two
/// special forms the dialect requires.
pub fn format_wait_time(minutes: i64, language_code: Option<&str>) -> String {
    if minutes == 0 {
        return t_lang("wait-none", language_code);
    }

    if minutes < 60 {
        return format_minutes(minutes, language_code);
    }

    let hours = minutes / 60;
    let remaining = minutes % 60;

    let hours_text = match hours {
        1 => t_lang("hour-one", language_code),
        2 => t_lang("hour-two", language_code),
        n => t_args_lang("hours-many", &[("count", &n.to_string())], language_code),
    };

    if remaining == 0 {
        hours_text
    } else {
        format!(
            "{} {} {}",
            hours_text,
            t_lang("duration-and", language_code),
            format_minutes(remaining, language_code)
        )
    }
}

fn format_minutes(minutes: i64, language_code: Option<&str>) -> String {
    match minutes {
        1 => t_lang("minute-one", language_code),
        2 => t_lang("minute-two", language_code),
        n => t_args_lang("minutes-many", &[("count", &n.to_string())], language_code),
    }
}

/// Projected clock time after the wait, rendered 12-hour with the localized
/// morning/evening period word. Hour zero renders as 12.
pub fn estimated_completion_time(
    now: NaiveDateTime,
    wait_minutes: i64,
    language_code: Option<&str>,
) -> String {
    let completion = now + Duration::minutes(wait_minutes);
    let mut hour = completion.hour();
    let minute = completion.minute();

    let period = if hour < 12 {
        if hour == 0 {
            hour = 12;
        }
        t_lang("period-am", language_code)
    } else {
        if hour > 12 {
            hour -= 12;
        }
        t_lang("period-pm", language_code)
    };

    format!("{}:{:02} {}", hour, minute, period)
}
