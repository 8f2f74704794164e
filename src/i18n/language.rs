use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use unic_langid::{langid, LanguageIdentifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[serde(rename = "pt-BR")]
    Portuguese,
    #[serde(rename = "en")]
    English,
}

impl SupportedLanguage {
    /// Get all supported languages
    pub fn all() -> &'static [SupportedLanguage] {
        &[SupportedLanguage::Portuguese, SupportedLanguage::English]
    }

    /// Get the language code as a string, also the locale directory name
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::Portuguese => "pt-BR",
            SupportedLanguage::English => "en",
        }
    }

    /// Get the language identifier for Fluent
    pub fn lang_id(&self) -> LanguageIdentifier {
        match self {
            SupportedLanguage::Portuguese => langid!("pt-BR"),
            SupportedLanguage::English => langid!("en-US"),
        }
    }

    /// Get the human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            SupportedLanguage::Portuguese => "Português",
            SupportedLanguage::English => "English",
        }
    }

    /// Parse from an Accept-Language header, first supported entry wins
    pub fn from_accept_language(accept_language: &str) -> Option<Self> {
        accept_language
            .split(',')
            .filter_map(|part| part.trim().split(';').next())
            .find_map(|tag| {
                let tag = tag.trim().to_lowercase();
                if tag.starts_with("pt") {
                    Some(SupportedLanguage::Portuguese)
                } else if tag.starts_with("en") {
                    Some(SupportedLanguage::English)
                } else {
                    None
                }
            })
    }
}

impl Default for SupportedLanguage {
    fn default() -> Self {
        SupportedLanguage::Portuguese
    }
}

impl Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for SupportedLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" | "portuguese" | "português" => {
                Ok(SupportedLanguage::Portuguese)
            }
            "en" | "en-us" | "en_us" | "english" => Ok(SupportedLanguage::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_language_picks_first_supported_tag() {
        assert_eq!(
            SupportedLanguage::from_accept_language("fr-FR,en-US;q=0.8,pt-BR;q=0.5"),
            Some(SupportedLanguage::English)
        );
        assert_eq!(
            SupportedLanguage::from_accept_language("pt-BR,pt;q=0.9"),
            Some(SupportedLanguage::Portuguese)
        );
        assert_eq!(SupportedLanguage::from_accept_language("de-DE"), None);
    }

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("pt-BR".parse(), Ok(SupportedLanguage::Portuguese));
        assert_eq!("EN".parse(), Ok(SupportedLanguage::English));
        assert!("tr".parse::<SupportedLanguage>().is_err());
    }
}
