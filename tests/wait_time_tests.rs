use chrono::NaiveDate;

use barbershop_bot::localization::init_localization;
use barbershop_bot::wait_time::{estimated_completion_time, format_wait_time, wait_minutes};

fn setup() {
    init_localization().expect("catalogs should load");
}

#[test]
fn wait_grows_with_position() {
    assert_eq!(wait_minutes(0, 10), 0);
    assert_eq!(wait_minutes(1, 10), 10);
    assert_eq!(wait_minutes(5, 10), 50);
    assert_eq!(wait_minutes(3, 15), 45);
}

#[test]
fn english_duration_forms() {
    setup();
    assert_eq!(format_wait_time(0, Some("en")), "no wait");
    assert_eq!(format_wait_time(1, Some("en")), "a minute");
    assert_eq!(format_wait_time(2, Some("en")), "two minutes");
    assert_eq!(format_wait_time(45, Some("en")), "45 minutes");
    assert_eq!(format_wait_time(60, Some("en")), "an hour");
    assert_eq!(format_wait_time(75, Some("en")), "an hour and 15 minutes");
    assert_eq!(format_wait_time(120, Some("en")), "two hours");
    assert_eq!(format_wait_time(195, Some("en")), "3 hours and 15 minutes");
}

#[test]
fn dialect_duration_forms() {
    setup();
    assert_eq!(format_wait_time(0, Some("ar")), "ما كان والو");
    assert_eq!(format_wait_time(1, Some("ar")), "دقيقة");
    assert_eq!(format_wait_time(2, Some("ar")), "دقيقتين");
    assert_eq!(format_wait_time(60, Some("ar")), "ساعة");
    assert_eq!(format_wait_time(75, Some("ar")), "ساعة و 15 دقايق");
    assert_eq!(format_wait_time(120, Some("ar")), "ساعتين");
}

#[test]
fn unknown_language_falls_back_to_dialect() {
    setup();
    assert_eq!(format_wait_time(0, Some("fr")), "ما كان والو");
    assert_eq!(format_wait_time(0, None), "ما كان والو");
}

#[test]
fn completion_time_renders_twelve_hour_clock() {
    setup();
    let afternoon = NaiveDate::from_ymd_opt(2026, 8, 23)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap();
    assert_eq!(estimated_completion_time(afternoon, 30, Some("en")), "2:35 PM");

    let morning = NaiveDate::from_ymd_opt(2026, 8, 23)
        .unwrap()
        .and_hms_opt(9, 50, 0)
        .unwrap();
    assert_eq!(estimated_completion_time(morning, 0, Some("en")), "9:50 AM");
}

#[test]
fn completion_time_handles_noon_and_midnight() {
    setup();
    let before_noon = NaiveDate::from_ymd_opt(2026, 8, 23)
        .unwrap()
        .and_hms_opt(11, 50, 0)
        .unwrap();
    assert_eq!(
        estimated_completion_time(before_noon, 20, Some("en")),
        "12:10 PM"
    );

    let before_midnight = NaiveDate::from_ymd_opt(2026, 8, 23)
        .unwrap()
        .and_hms_opt(23, 50, 0)
        .unwrap();
    assert_eq!(
        estimated_completion_time(before_midnight, 20, Some("en")),
        "12:10 AM"
    );
}

#[test]
fn completion_time_uses_localized_period_words() {
    setup();
    let morning = NaiveDate::from_ymd_opt(2026, 8, 23)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    assert_eq!(estimated_completion_time(morning, 0, Some("ar")), "10:00 صباح");
    assert_eq!(
        estimated_completion_time(morning, 8 * 60, Some("ar")),
        "6:00 مساء"
    );
}
