use barbershop_bot::localization::{
    detect_language, init_localization, matches_button, t_args_lang, t_lang, DEFAULT_LANGUAGE,
    SUPPORTED_LANGUAGES,
};

fn setup() {
    init_localization().expect("catalogs should load");
}

#[test]
fn language_detection_falls_back_to_the_dialect() {
    assert_eq!(detect_language(Some("en")), "en");
    assert_eq!(detect_language(Some("en-US")), "en");
    assert_eq!(detect_language(Some("ar")), "ar");
    assert_eq!(detect_language(Some("fr")), DEFAULT_LANGUAGE);
    assert_eq!(detect_language(None), DEFAULT_LANGUAGE);
}

#[test]
fn every_catalog_carries_the_core_keys() {
    setup();
    let keys = [
        "welcome",
        "btn-view-queue",
        "btn-book",
        "btn-check-wait",
        "already-booked",
        "choose-barber",
        "enter-phone",
        "invalid-name",
        "invalid-phone",
        "queue-empty",
        "your-turn",
        "wait-first",
        "notify-turn",
        "notify-warning-60",
        "admin-password-prompt",
        "admin-denied",
        "admin-refreshed",
        "wait-none",
        "period-am",
    ];

    for lang in SUPPORTED_LANGUAGES {
        for key in keys {
            let rendered = t_lang(key, Some(lang));
            assert!(
                !rendered.starts_with("Missing translation"),
                "{} missing in {}",
                key,
                lang
            );
        }
    }
}

#[test]
fn arguments_are_substituted() {
    setup();
    let text = t_args_lang(
        "notify-warning-15",
        &[("name", "Karim"), ("barber", "حلاق 1")],
        Some("en"),
    );
    assert!(text.contains("Karim"));
    assert!(text.contains("حلاق 1"));
    assert!(text.contains("15 minutes"));
    assert!(!text.contains("$name"));
}

#[test]
fn button_text_matches_in_any_supported_language() {
    setup();
    let en_label = t_lang("btn-book", Some("en"));
    let ar_label = t_lang("btn-book", Some("ar"));

    assert!(matches_button(&en_label, "btn-book"));
    assert!(matches_button(&ar_label, "btn-book"));
    // Keyboard echoes may carry stray whitespace.
    assert!(matches_button(&format!(" {} ", en_label), "btn-book"));

    assert!(!matches_button("random text", "btn-book"));
    assert!(!matches_button(&en_label, "btn-view-queue"));
}

#[test]
fn unknown_key_is_reported_not_panicked() {
    setup();
    assert_eq!(
        t_lang("no-such-key", Some("en")),
        "Missing translation: no-such-key"
    );
}
