pub mod fluent_loader;
pub mod helpers;
pub mod language;
pub mod localizer;

pub use fluent_loader::FluentLoader;
pub use helpers::I18n;
pub use language::SupportedLanguage;
pub use localizer::{LocalizedString, Localizer, MessageArgs};

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Build the localizer for every supported language
pub fn init_i18n(
    locales_dir: Option<&Path>,
    default_language: SupportedLanguage,
) -> Result<Localizer> {
    let mut loader = match locales_dir {
        Some(dir) => FluentLoader::with_locales_dir(dir),
        None => FluentLoader::new(),
    };

    for language in SupportedLanguage::all() {
        loader.load_locale(*language)?;
    }

    Ok(Localizer::new(loader, default_language))
}

/// Extract a dictionary of key-value pairs for client-side usage
pub fn extract_translations_for_client(
    localizer: &Localizer,
    language: SupportedLanguage,
    keys: &[&str],
) -> HashMap<String, String> {
    keys.iter()
        .filter_map(|key| {
            localizer
                .message(&language, key, None)
                .ok()
                .map(|translation| (key.to_string(), translation.into_string()))
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn test_localizer() -> Localizer {
    init_i18n(None, SupportedLanguage::Portuguese).expect("built-in resources parse")
}
