//! Display languages and the translation catalog.
//!
//! English source text doubles as the lookup key. French and Arabic each ship
//! a plain string-to-string dictionary; English needs none.

use std::collections::HashMap;

use crate::error::ContentError;

const FR_DICTIONARY: &str = include_str!("../assets/locales/fr.json");
const AR_DICTIONARY: &str = include_str!("../assets/locales/ar.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
    Ar,
}

/// Static description of a selectable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    pub language: Language,
    pub code: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
}

/// Languages in selector order.
pub const SUPPORTED_LANGUAGES: [LanguageInfo; 3] = [
    LanguageInfo {
        language: Language::En,
        code: "en",
        label: "English",
        glyph: "🇺🇸",
    },
    LanguageInfo {
        language: Language::Fr,
        code: "fr",
        label: "Français",
        glyph: "🇫🇷",
    },
    LanguageInfo {
        language: Language::Ar,
        code: "ar",
        label: "العربية",
        glyph: "🇸🇦",
    },
];

impl Language {
    pub const DEFAULT: Language = Language::En;

    pub fn info(self) -> &'static LanguageInfo {
        match self {
            Language::En => &SUPPORTED_LANGUAGES[0],
            Language::Fr => &SUPPORTED_LANGUAGES[1],
            Language::Ar => &SUPPORTED_LANGUAGES[2],
        }
    }

    pub fn code(self) -> &'static str {
        self.info().code
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn glyph(self) -> &'static str {
        self.info().glyph
    }

    /// Parses a stored language code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|info| info.code == code)
            .map(|info| info.language)
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    /// Cycles through the selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

/// Human-readable label for a language code, or the code itself if unknown.
pub fn language_label(code: &str) -> &str {
    Language::from_code(code).map_or(code, |language| language.label())
}

pub fn is_rtl(language: Language) -> bool {
    language.is_rtl()
}

/// Dictionary from English source text to localized text.
pub type Dictionary = HashMap<String, String>;

/// Holds one dictionary per non-default language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    french: Dictionary,
    arabic: Dictionary,
}

impl Catalog {
    #[cfg(test)]
    pub fn new(french: Dictionary, arabic: Dictionary) -> Self {
        Self { french, arabic }
    }

    /// Parses the dictionaries embedded in the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Ok(Self {
            french: parse_dictionary("fr", FR_DICTIONARY)?,
            arabic: parse_dictionary("ar", AR_DICTIONARY)?,
        })
    }

    pub fn dictionary(&self, language: Language) -> Option<&Dictionary> {
        match language {
            Language::En => None,
            Language::Fr => Some(&self.french),
            Language::Ar => Some(&self.arabic),
        }
    }

    /// Resolves `text` for `language`.
    ///
    /// Looks the text up verbatim, then with surrounding whitespace trimmed.
    /// Anything without a (non-empty) mapping comes back untouched, including
    /// its original whitespace.
    pub fn resolve<'a>(&'a self, text: &'a str, language: Language) -> &'a str {
        if text.is_empty() {
            return text;
        }
        let Some(dictionary) = self.dictionary(language) else {
            return text;
        };
        if let Some(entry) = lookup(dictionary, text) {
            return entry;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return text;
        }
        lookup(dictionary, trimmed).unwrap_or(text)
    }
}

fn lookup<'a>(dictionary: &'a Dictionary, key: &str) -> Option<&'a str> {
    dictionary
        .get(key)
        .map(String::as_str)
        .filter(|entry| !entry.is_empty())
}

fn parse_dictionary(code: &'static str, raw: &str) -> Result<Dictionary, ContentError> {
    serde_json::from_str(raw).map_err(|source| ContentError::Parse {
        asset: code,
        source,
    })
}
