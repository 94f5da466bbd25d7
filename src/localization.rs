use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, OnceLock};
use unic_langid::LanguageIdentifier;

/// Languages the bot ships message catalogs for.
pub const SUPPORTED_LANGUAGES: &[&str] = &["ar", "en"];

/// The shop's audience speaks Algerian Arabic; unknown Telegram language
/// codes fall back here.
pub const DEFAULT_LANGUAGE: &str = "ar";

/// Localization manager for the barbershop bot.
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager with all supported bundles loaded.
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for lang in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = lang.parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert(lang.to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale.
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);

        // Keep rendered strings free of Unicode isolation marks so button
        // text matching sees exactly what the catalog says.
        bundle.set_use_isolating(false);

        let resource_path = format!("./locales/{}/main.ftl", locale);
        if let Ok(content) = fs::read_to_string(&resource_path) {
            if let Ok(resource) = FluentResource::try_new(content) {
                let _ = bundle.add_resource(resource);
            }
        }

        Ok(bundle)
    }

    /// Get a localized message in the given language, falling back to the
    /// default language's bundle for unknown codes.
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
            .expect("default language bundle missing");

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut value = String::new();

        if let Some(args) = args {
            let fluent_args =
                FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
            let _ = bundle.write_pattern(&mut value, pattern, Some(&fluent_args), &mut vec![]);
        } else {
            let _ = bundle.write_pattern(&mut value, pattern, None, &mut vec![]);
        }

        value
    }
}

/// Global localization instance.
static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager. Safe to call more than once.
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_none() {
        let manager = LocalizationManager::new()?;
        let _ = LOCALIZATION_MANAGER.set(manager);
    }
    Ok(())
}

/// Get the global localization manager.
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER
        .get()
        .expect("Localization manager not initialized")
}

/// Map a Telegram language code to a supported language.
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    if let Some(code) = language_code {
        let primary = code.split('-').next().unwrap_or(code);
        for lang in SUPPORTED_LANGUAGES {
            if *lang == primary {
                return lang;
            }
        }
    }
    DEFAULT_LANGUAGE
}

/// Convenience function to get a localized message.
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    get_localization_manager().get_message_in_language(key, detect_language(language_code), None)
}

/// Convenience function to get a localized message with arguments.
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
    get_localization_manager().get_message_in_language(
        key,
        detect_language(language_code),
        Some(&args_map),
    )
}

/// Whether `text` is the rendering of the given message key in any supported
/// language. Reply-keyboard presses echo the button label back as plain
/// text, in whatever language the keyboard was rendered in.
pub fn matches_button(text: &str, key: &str) -> bool {
    let manager = get_localization_manager();
    SUPPORTED_LANGUAGES
        .iter()
        .any(|lang| manager.get_message_in_language(key, lang, None) == text.trim())
}
