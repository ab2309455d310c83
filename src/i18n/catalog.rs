//! Translation Catalog
//!
//! Locale → key → string tables, loaded once from TOML and validated so that
//! every locale carries the same key set.

use std::collections::{BTreeMap, BTreeSet};

use rust_embed::RustEmbed;
use tracing::{debug, warn};

use super::Language;
use crate::error::{Error, Result};

/// Embedded translation files
#[derive(RustEmbed)]
#[folder = "locales"]
struct Locales;

const BUNDLED_FILE: &str = "translations.toml";

/// Translations for one language
pub type Dictionary = BTreeMap<String, String>;

/// Immutable translation catalog for all supported languages
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<Language, Dictionary>,
}

impl Catalog {
    /// Load the catalog bundled with the crate
    pub fn bundled() -> Result<Self> {
        let file = Locales::get(BUNDLED_FILE).ok_or_else(|| Error::Invalid {
            message: format!("bundled catalog {BUNDLED_FILE} not found"),
        })?;
        let text = std::str::from_utf8(&file.data).map_err(|e| Error::Invalid {
            message: format!("bundled catalog is not UTF-8: {e}"),
        })?;
        Self::from_toml_str(text)
    }

    /// Parse and validate a catalog from TOML text
    ///
    /// Top-level tables are language codes; keys must be quoted so dotted
    /// names stay flat (`"nav.home" = "Home"`).
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, Dictionary> = toml::from_str(text)?;

        let mut tables = BTreeMap::new();
        for (code, dictionary) in raw {
            let Some(language) = Language::from_code(&code) else {
                warn!(code = %code, "Ignoring translations for unsupported language");
                continue;
            };
            tables.insert(language, dictionary);
        }

        let catalog = Self { tables };
        catalog.validate()?;
        debug!(keys = catalog.len(), "Translation catalog loaded");
        Ok(catalog)
    }

    /// Check that every supported language is present with the same key set
    pub fn validate(&self) -> Result<()> {
        let all_keys: BTreeSet<&str> = self
            .tables
            .values()
            .flat_map(|table| table.keys().map(String::as_str))
            .collect();

        for language in Language::ALL {
            let Some(table) = self.tables.get(&language) else {
                return Err(Error::CatalogParity {
                    locale: language.code().to_string(),
                    missing: vec!["<all keys>".to_string()],
                });
            };

            let missing: Vec<String> = all_keys
                .iter()
                .filter(|key| !table.contains_key(**key))
                .map(|key| key.to_string())
                .collect();

            if !missing.is_empty() {
                return Err(Error::CatalogParity {
                    locale: language.code().to_string(),
                    missing,
                });
            }
        }

        Ok(())
    }

    /// Look up a key for a language
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Full dictionary for a language
    pub fn dictionary(&self, language: Language) -> Option<&Dictionary> {
        self.tables.get(&language)
    }

    /// Number of keys per language
    pub fn len(&self) -> usize {
        self.tables.values().next().map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
