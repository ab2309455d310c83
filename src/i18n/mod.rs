//! i18n - Internationalization Module
//!
//! Supported languages, the translation catalog and locale-aware formatting.

mod catalog;
mod format;

pub use catalog::*;
pub use format::*;

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Spanish (Panama)
    Es,
}

impl Language {
    /// All supported languages, in preference order
    pub const ALL: [Language; 2] = [Language::En, Language::Es];

    /// Two-letter code used in storage and the `lang` attribute
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Parse a supported language code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }

    /// BCP 47 tag used for formatting
    pub fn locale_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Es => "es-PA",
        }
    }

    /// The other language of the pair
    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }

    /// Both languages are left-to-right
    pub fn is_rtl(&self) -> bool {
        false
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("es"), Some(Language::Es));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code("EN"), None);
        assert_eq!(Language::Es.locale_tag(), "es-PA");
    }

    #[test]
    fn test_toggle_is_an_involution() {
        for lang in Language::ALL {
            assert_eq!(lang.toggled().toggled(), lang);
            assert_ne!(lang.toggled(), lang);
        }
    }
}
