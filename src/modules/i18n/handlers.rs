use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::app_state::AppState;
use crate::i18n::{extract_translations_for_client, SupportedLanguage, I18n};

/// Sent when the client asks for no particular keys
const DEFAULT_CLIENT_KEYS: &[&str] = &[
    "app-name",
    "weekday-sunday",
    "weekday-monday",
    "weekday-tuesday",
    "weekday-wednesday",
    "weekday-thursday",
    "weekday-friday",
    "weekday-saturday",
    "doctor-details",
    "doctor-delete",
    "doctors-empty",
    "error-generic",
];

#[derive(Debug, Deserialize)]
pub struct TranslationQuery {
    /// Comma-separated list of keys
    pub keys: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
pub struct SupportedLanguagesResponse {
    pub languages: Vec<LanguageInfo>,
    pub default_language: String,
}

#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    pub translations: HashMap<String, String>,
    pub language: String,
    pub requested_keys: Vec<String>,
}

fn language_info(language: SupportedLanguage, default: SupportedLanguage) -> LanguageInfo {
    LanguageInfo {
        code: language.code().to_string(),
        name: language.name().to_string(),
        is_default: language == default,
    }
}

pub async fn get_supported_languages(State(state): State<AppState>) -> Json<SupportedLanguagesResponse> {
    let default = state.localizer.default_language();

    Json(SupportedLanguagesResponse {
        languages: SupportedLanguage::all()
            .iter()
            .map(|language| language_info(*language, default))
            .collect(),
        default_language: default.code().to_string(),
    })
}

/// Translations for client-side rendering; unknown keys are left out
pub async fn get_translations(
    State(state): State<AppState>,
    i18n: I18n,
    Query(query): Query<TranslationQuery>,
) -> Json<TranslationsResponse> {
    let language = query
        .language
        .and_then(|code| code.parse::<SupportedLanguage>().ok())
        .unwrap_or(i18n.language());

    let keys: Vec<String> = match query.keys {
        Some(keys) => keys
            .split(',')
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect(),
        None => DEFAULT_CLIENT_KEYS.iter().map(|key| key.to_string()).collect(),
    };
    let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();

    Json(TranslationsResponse {
        translations: extract_translations_for_client(&state.localizer, language, &key_refs),
        language: language.code().to_string(),
        requested_keys: keys,
    })
}

pub async fn get_current_language(i18n: I18n) -> Json<LanguageInfo> {
    Json(language_info(i18n.language(), i18n.localizer.default_language()))
}
