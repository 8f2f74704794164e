use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::i18n::SupportedLanguage;

/// Stores the caller's language in the request extensions. Nothing is
/// inserted when the headers name no supported language, so extractors fall
/// back to the configured default.
pub async fn language_middleware(mut request: Request, next: Next) -> Response {
    if let Some(language) = detect_language_from_headers(request.headers()) {
        request.extensions_mut().insert(language);
    }

    next.run(request).await
}

/// `X-Language` wins over `Accept-Language`
pub fn detect_language_from_headers(headers: &HeaderMap) -> Option<SupportedLanguage> {
    let explicit = headers
        .get("X-Language")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<SupportedLanguage>().ok());

    explicit.or_else(|| {
        headers
            .get(axum::http::header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(SupportedLanguage::from_accept_language)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn explicit_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Language", HeaderValue::from_static("en"));
        headers.insert("Accept-Language", HeaderValue::from_static("pt-BR,pt;q=0.9"));
        assert_eq!(detect_language_from_headers(&headers), Some(SupportedLanguage::English));
    }

    #[test]
    fn accept_language_is_used_as_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Language", HeaderValue::from_static("klingon"));
        headers.insert("Accept-Language", HeaderValue::from_static("fr-FR,en;q=0.8"));
        assert_eq!(detect_language_from_headers(&headers), Some(SupportedLanguage::English));
    }

    #[test]
    fn nothing_detected_without_headers() {
        assert_eq!(detect_language_from_headers(&HeaderMap::new()), None);
    }
}
