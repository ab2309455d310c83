//! Language Controller
//!
//! Owns the active language, applies translations to the document and
//! announces every switch on the bus.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use locale_config::Locale;
use tracing::{debug, info, warn};

use crate::app::context::PageContext;
use crate::dom::DomEvent;
use crate::domain::config::SiteConfig;
use crate::error::{Error, Result};
use crate::eventing::PageEvent;
use crate::i18n::{self, Catalog, DateStyle, Dictionary, Language, NumberOptions};

/// Element id of the language toggle control
pub const LANGUAGE_TOGGLE_ID: &str = "language-toggle";

/// Body class set while Spanish is active
pub const SPANISH_CLASS: &str = "spanish";

/// Bilingual text switching
#[derive(Debug)]
pub struct LanguageManager {
    current: Language,
    catalog: Arc<Catalog>,
    dictionaries: BTreeMap<Language, Arc<Dictionary>>,
    storage_key: String,
    loaded: bool,
}

impl LanguageManager {
    pub fn new(catalog: Arc<Catalog>, config: &SiteConfig) -> Self {
        let dictionaries = Language::ALL
            .iter()
            .map(|lang| {
                let dictionary = catalog.dictionary(*lang).cloned().unwrap_or_default();
                (*lang, Arc::new(dictionary))
            })
            .collect();

        Self {
            current: Language::default(),
            catalog,
            dictionaries,
            storage_key: config.storage.language_key.clone(),
            loaded: false,
        }
    }

    /// Startup: saved preference, then translations
    pub fn init(&mut self, cx: &mut PageContext) {
        self.load_saved_language(cx);
        self.load_translations(cx);
    }

    fn load_saved_language(&mut self, cx: &mut PageContext) {
        let Some(saved) = cx.local_store.get_item(&self.storage_key) else {
            return;
        };
        match Language::from_code(&saved) {
            Some(language) => self.apply(language, cx),
            None => debug!(saved = %saved, "Ignoring unsupported saved language"),
        }
    }

    /// Mark the dictionary as available and fill the document
    fn load_translations(&mut self, cx: &mut PageContext) {
        self.loaded = true;
        debug!(keys = self.catalog.len(), "Translations loaded");
        self.update_dynamic_content(cx);
    }

    pub fn handle_event(&mut self, event: &DomEvent, cx: &mut PageContext) {
        if let DomEvent::Click { target } = event {
            let on_toggle = cx
                .document
                .closest(*target, |e| e.attr("id") == Some(LANGUAGE_TOGGLE_ID))
                .is_some();
            if on_toggle {
                self.toggle_language(cx);
            }
        }
    }

    /// Swap between English and Spanish
    pub fn toggle_language(&mut self, cx: &mut PageContext) {
        self.apply(self.current.toggled(), cx);
    }

    /// Switch to the language with the given code
    ///
    /// Unsupported codes are logged and leave everything untouched.
    pub fn set_language(&mut self, code: &str, cx: &mut PageContext) -> Result<()> {
        let Some(language) = Language::from_code(code) else {
            warn!("Language {code} not supported");
            return Err(Error::UnsupportedLanguage {
                code: code.to_string(),
            });
        };
        self.apply(language, cx);
        Ok(())
    }

    fn apply(&mut self, language: Language, cx: &mut PageContext) {
        self.current = language;

        let root = cx.document.root();
        cx.document.set_attr(root, "lang", language.code());

        let body = cx.document.body();
        if language == Language::Es {
            cx.document.add_class(body, SPANISH_CLASS);
        } else {
            cx.document.remove_class(body, SPANISH_CLASS);
        }

        if let Err(e) = cx.local_store.set_item(&self.storage_key, language.code()) {
            warn!(error = %e, "Failed to save language preference");
        }

        if self.loaded {
            self.update_dynamic_content(cx);
        }

        cx.bus.publish(PageEvent::LanguageChanged {
            language,
            translations: self.dictionary(language),
        });

        info!("Language changed to: {language}");
    }

    /// Re-apply translations to `data-translate` elements and form placeholders
    pub fn update_dynamic_content(&self, cx: &mut PageContext) {
        for element in cx.document.query_attr("data-translate") {
            let Some(key) = cx.document.attr(element, "data-translate").map(str::to_string) else {
                continue;
            };
            let translation = self.get_translation(&key, None);
            if !translation.is_empty() {
                cx.document.set_text(element, translation);
            }
        }

        self.update_form_placeholders(cx);
    }

    fn update_form_placeholders(&self, cx: &mut PageContext) {
        for form in cx.document.query_tag("form") {
            let inputs = cx.document.query_within(form, |e| {
                e.is_form_field() && e.attr("data-placeholder").is_some()
            });
            for input in inputs {
                let Some(key) = cx.document.attr(input, "data-placeholder").map(str::to_string)
                else {
                    continue;
                };
                let translation = self.get_translation(&key, None);
                if !translation.is_empty() {
                    cx.document.set_attr(input, "placeholder", translation);
                }
            }
        }
    }

    /// Text for `key` in the current language, else `fallback`, else the key
    pub fn get_translation(&self, key: &str, fallback: Option<&str>) -> String {
        self.catalog
            .get(self.current, key)
            .filter(|s| !s.is_empty())
            .or(fallback.filter(|s| !s.is_empty()))
            .unwrap_or(key)
            .to_string()
    }

    pub fn dictionary(&self, language: Language) -> Arc<Dictionary> {
        self.dictionaries.get(&language).cloned().unwrap_or_default()
    }

    pub fn current_language(&self) -> Language {
        self.current
    }

    pub fn supported_languages(&self) -> Vec<Language> {
        Language::ALL.to_vec()
    }

    pub fn is_language_supported(&self, code: &str) -> bool {
        Language::from_code(code).is_some()
    }

    pub fn is_rtl(&self) -> bool {
        self.current.is_rtl()
    }

    pub fn format_date(&self, date: NaiveDate, style: DateStyle) -> String {
        i18n::format_date(self.current, date, style)
    }

    pub fn format_currency(&self, amount: f64, currency: &str) -> String {
        i18n::format_currency(self.current, amount, currency)
    }

    pub fn format_number(&self, value: f64, options: &NumberOptions) -> String {
        i18n::format_number(self.current, value, options)
    }

    /// Language of the operating system locale, English when unsupported
    pub fn detect_system_language(&self) -> Language {
        language_from_locale_tag(&Locale::current().to_string())
    }

    /// Apply the system language unless a preference is already stored
    pub fn auto_detect_language(&mut self, cx: &mut PageContext) {
        if cx.local_store.get_item(&self.storage_key).is_none() {
            let detected = self.detect_system_language();
            debug!(language = %detected, "Auto-detected language");
            self.apply(detected, cx);
        }
    }
}

/// Primary subtag of the first tag in a locale list (`es-PA,en-US` → `es`)
pub fn language_from_locale_tag(tag: &str) -> Language {
    let first = tag.split(',').next().unwrap_or_default();
    let primary = first
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    Language::from_code(&primary).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, ElementId, Window};
    use crate::services::{LogAnalytics, MemoryStore};

    const KEY: &str = "pacific-panama-language";

    struct Fixture {
        cx: PageContext,
        manager: LanguageManager,
        title: ElementId,
        email: ElementId,
        toggle: ElementId,
    }

    fn fixture(saved: Option<&str>) -> Fixture {
        let mut document = Document::new();
        let body = document.body();
        let toggle = document.build("button").id(LANGUAGE_TOGGLE_ID).append_to(body);
        let title = document
            .build("h2")
            .attr("data-translate", "nav.contact")
            .text("Contact")
            .append_to(body);
        let form = document.build("form").append_to(body);
        let email = document
            .build("input")
            .attr("type", "email")
            .attr("data-placeholder", "form.email")
            .append_to(form);

        let local = match saved {
            Some(code) => MemoryStore::with_items([(KEY, code)]),
            None => MemoryStore::new(),
        };
        let cx = PageContext::new(
            document,
            Window::new("https://pacificpanama.test", "/index.html", 1280),
            Box::new(local),
            Box::new(MemoryStore::new()),
            Box::new(LogAnalytics),
        );
        let catalog = Arc::new(Catalog::bundled().expect("catalog"));
        let manager = LanguageManager::new(catalog, &SiteConfig::default());

        Fixture {
            cx,
            manager,
            title,
            email,
            toggle,
        }
    }

    #[test]
    fn test_saved_preference_applied_on_init() {
        let mut f = fixture(Some("es"));
        f.manager.init(&mut f.cx);

        assert_eq!(f.manager.current_language(), Language::Es);
        assert_eq!(f.cx.document.text(f.title), "Contacto");
        assert_eq!(f.cx.document.attr(f.email, "placeholder"), Some("Correo Electrónico"));
        assert_eq!(f.cx.document.attr(f.cx.document.root(), "lang"), Some("es"));
        assert!(f.cx.document.has_class(f.cx.document.body(), SPANISH_CLASS));
    }

    #[test]
    fn test_invalid_saved_preference_ignored() {
        let mut f = fixture(Some("de"));
        f.manager.init(&mut f.cx);

        assert_eq!(f.manager.current_language(), Language::En);
        assert_eq!(f.cx.local_store.get_item(KEY).as_deref(), Some("de"));
        assert_eq!(f.cx.document.text(f.title), "Contact");
    }

    #[test]
    fn test_unsupported_code_changes_nothing() {
        let mut f = fixture(None);
        f.manager.init(&mut f.cx);
        let rx = f.cx.bus.subscribe();

        for code in ["fr", "", "ES", "en-US"] {
            assert!(f.manager.set_language(code, &mut f.cx).is_err());
        }

        assert_eq!(f.manager.current_language(), Language::En);
        assert_eq!(f.cx.local_store.get_item(KEY), None);
        assert!(rx.try_recv().is_err());

        assert_eq!(f.manager.supported_languages(), vec![Language::En, Language::Es]);
        assert!(f.manager.is_language_supported("es"));
        assert!(!f.manager.is_language_supported("fr"));
        assert!(!f.manager.is_language_supported("ES"));
    }

    #[test]
    fn test_toggle_twice_restores_language_and_storage() {
        let mut f = fixture(Some("en"));
        f.manager.init(&mut f.cx);

        f.manager.toggle_language(&mut f.cx);
        assert_eq!(f.manager.current_language(), Language::Es);
        assert_eq!(f.cx.local_store.get_item(KEY).as_deref(), Some("es"));

        f.manager.toggle_language(&mut f.cx);
        assert_eq!(f.manager.current_language(), Language::En);
        assert_eq!(f.cx.local_store.get_item(KEY).as_deref(), Some("en"));
        assert!(!f.cx.document.has_class(f.cx.document.body(), SPANISH_CLASS));
    }

    #[test]
    fn test_toggle_click_publishes_language_changed() {
        let mut f = fixture(None);
        f.manager.init(&mut f.cx);
        let rx = f.cx.bus.subscribe();

        f.manager
            .handle_event(&DomEvent::Click { target: f.toggle }, &mut f.cx);

        match rx.try_recv() {
            Ok(PageEvent::LanguageChanged {
                language,
                translations,
            }) => {
                assert_eq!(language, Language::Es);
                assert_eq!(translations.get("nav.home").map(String::as_str), Some("Inicio"));
            }
            other => panic!("expected LanguageChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_translation_fallbacks() {
        let f = fixture(None);
        assert_eq!(f.manager.get_translation("nav.gallery", None), "Gallery");
        assert_eq!(f.manager.get_translation("missing.key", None), "missing.key");
        assert_eq!(f.manager.get_translation("missing.key", Some("Default")), "Default");
        assert_eq!(f.manager.get_translation("missing.key", Some("")), "missing.key");
    }

    #[test]
    fn test_formatting_follows_language() {
        let mut f = fixture(None);
        f.manager.init(&mut f.cx);
        assert_eq!(f.manager.format_currency(450.0, "USD"), "$450.00");

        f.manager.set_language("es", &mut f.cx).expect("es");
        assert_eq!(f.manager.format_currency(450.0, "USD"), "USD\u{a0}450.00");
        assert_eq!(
            f.manager.format_number(1500.0, &NumberOptions::default()),
            "1,500"
        );
    }

    #[test]
    fn test_auto_detect_respects_saved_preference() {
        let mut f = fixture(Some("en"));
        f.manager.init(&mut f.cx);
        f.manager.auto_detect_language(&mut f.cx);
        assert_eq!(f.manager.current_language(), Language::En);
    }

    #[test]
    fn test_locale_tag_parsing() {
        assert_eq!(language_from_locale_tag("es-PA"), Language::Es);
        assert_eq!(language_from_locale_tag("es_ES.UTF-8"), Language::Es);
        assert_eq!(language_from_locale_tag("en-US,es-PA"), Language::En);
        assert_eq!(language_from_locale_tag("pt-BR"), Language::En);
        assert_eq!(language_from_locale_tag(""), Language::En);
    }
}
