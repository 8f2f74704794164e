use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentValue};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::i18n::fluent_loader::FluentLoader;
use crate::i18n::language::SupportedLanguage;

/// A formatted message together with the language it was rendered in
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedString {
    value: String,
    language: SupportedLanguage,
}

impl LocalizedString {
    pub fn new(value: String, language: SupportedLanguage) -> Self {
        Self { value, language }
    }

    pub fn into_string(self) -> String {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<LocalizedString> for String {
    fn from(ls: LocalizedString) -> Self {
        ls.value
    }
}

pub type MessageArgs<'a> = HashMap<String, FluentValue<'a>>;

/// Read-only view over the loaded bundles; shared behind an `Arc`.
pub struct Localizer {
    loader: FluentLoader,
    default_language: SupportedLanguage,
}

impl Localizer {
    pub fn new(loader: FluentLoader, default_language: SupportedLanguage) -> Self {
        Self {
            loader,
            default_language,
        }
    }

    /// Format a message, falling back to the default language's bundle
    pub fn message(
        &self,
        language: &SupportedLanguage,
        key: &str,
        args: Option<&MessageArgs<'_>>,
    ) -> Result<LocalizedString> {
        let (bundle, resolved) = match self.loader.get_bundle(language) {
            Some(bundle) if bundle.has_message(key) => (bundle, *language),
            _ => (
                self.loader
                    .get_bundle(&self.default_language)
                    .ok_or_else(|| anyhow!("No bundle available for language: {}", language))?,
                self.default_language,
            ),
        };

        let message = bundle
            .get_message(key)
            .ok_or_else(|| anyhow!("Message not found: {}", key))?;

        let pattern = message
            .value()
            .ok_or_else(|| anyhow!("Message has no value: {}", key))?;

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (k, v) in args {
                fluent_args.set(k.clone(), v.clone());
            }
            fluent_args
        });

        let mut errors = Vec::new();
        let formatted = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);

        if !errors.is_empty() {
            tracing::warn!("Fluent formatting errors for key '{}': {:?}", key, errors);
        }

        Ok(LocalizedString::new(formatted.into_owned(), resolved))
    }

    /// Plain message; the key itself is returned when it cannot be resolved
    pub fn text(&self, language: &SupportedLanguage, key: &str) -> String {
        self.message(language, key, None)
            .map(LocalizedString::into_string)
            .unwrap_or_else(|_| key.to_string())
    }

    pub fn text_with_args(
        &self,
        language: &SupportedLanguage,
        key: &str,
        args: &MessageArgs<'_>,
    ) -> String {
        self.message(language, key, Some(args))
            .map(LocalizedString::into_string)
            .unwrap_or_else(|_| key.to_string())
    }

    pub fn has_message(&self, language: &SupportedLanguage, key: &str) -> bool {
        self.loader
            .get_bundle(language)
            .map(|bundle| bundle.has_message(key))
            .unwrap_or(false)
    }

    pub fn default_language(&self) -> SupportedLanguage {
        self.default_language
    }
}

/// Helper macro for creating FluentValue arguments
#[macro_export]
macro_rules! fluent_args {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut args: $crate::i18n::MessageArgs = std::collections::HashMap::new();
        $(
            args.insert($key.to_string(), fluent_bundle::FluentValue::from($value));
        )*
        args
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::test_localizer;

    #[test]
    fn formats_messages_with_arguments() {
        let localizer = test_localizer();
        let args = crate::fluent_args! { "from" => "Segunda", "to" => "Sexta" };
        assert_eq!(
            localizer.text_with_args(&SupportedLanguage::Portuguese, "availability-days", &args),
            "Segunda a Sexta"
        );
    }

    #[test]
    fn unknown_key_falls_back_to_the_key() {
        let localizer = test_localizer();
        assert_eq!(
            localizer.text(&SupportedLanguage::English, "does-not-exist"),
            "does-not-exist"
        );
        assert!(!localizer.has_message(&SupportedLanguage::English, "does-not-exist"));
    }

    #[test]
    fn missing_bundle_uses_default_language() {
        let mut loader = FluentLoader::new();
        loader
            .load_locale(SupportedLanguage::Portuguese)
            .expect("built-in resources parse");
        let localizer = Localizer::new(loader, SupportedLanguage::Portuguese);

        let message = localizer
            .message(&SupportedLanguage::English, "weekday-monday", None)
            .expect("falls back to pt-BR");
        assert_eq!(message.as_str(), "Segunda");
        assert_eq!(message.language(), SupportedLanguage::Portuguese);
    }
}
