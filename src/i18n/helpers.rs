use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::sync::Arc;

use crate::app_state::AppState;
use crate::i18n::{Localizer, SupportedLanguage};

/// Extractor for getting localized messages in handlers
pub struct I18n {
    pub localizer: Arc<Localizer>,
    pub language: SupportedLanguage,
}

impl I18n {
    pub fn get(&self, key: &str) -> String {
        self.localizer.text(&self.language, key)
    }

    pub fn language(&self) -> SupportedLanguage {
        self.language
    }
}

impl FromRequestParts<AppState> for I18n {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by the language middleware; fall back to the configured default
        let language = parts
            .extensions
            .get::<SupportedLanguage>()
            .copied()
            .unwrap_or_else(|| state.localizer.default_language());

        Ok(I18n {
            localizer: state.localizer.clone(),
            language,
        })
    }
}
