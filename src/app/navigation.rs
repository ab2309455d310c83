//! Navigation - Site Pages
//!
//! The pages of the site, their URLs and the catalog keys of their titles.

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SitePage {
    /// Landing page
    #[default]
    Home,
    /// Charter packages
    Charters,
    /// Fish species guide
    Species,
    /// Recent catches
    CatchLog,
    /// Photo gallery
    Gallery,
    /// Booking and contact form
    Contact,
}

impl SitePage {
    /// Page name as derived from the URL
    pub fn slug(&self) -> &'static str {
        match self {
            SitePage::Home => "home",
            SitePage::Charters => "charters",
            SitePage::Species => "species",
            SitePage::CatchLog => "catch-log",
            SitePage::Gallery => "gallery",
            SitePage::Contact => "contact",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.slug() == slug)
    }

    /// Like [`SitePage::from_slug`], but `index` names the home page
    pub fn from_page_name(name: &str) -> Option<Self> {
        match name {
            "index" => Some(SitePage::Home),
            _ => Self::from_slug(name),
        }
    }

    /// Get the translation key for the page title
    pub fn title_key(&self) -> &'static str {
        match self {
            SitePage::Home => "nav.home",
            SitePage::Charters => "nav.charters",
            SitePage::Species => "nav.species",
            SitePage::CatchLog => "nav.catch-log",
            SitePage::Gallery => "nav.gallery",
            SitePage::Contact => "nav.contact",
        }
    }

    /// Short label used in the breadcrumb trail
    pub fn breadcrumb_label(&self, language: Language) -> &'static str {
        match (self, language) {
            (SitePage::Home, Language::En) => "Home",
            (SitePage::Home, Language::Es) => "Inicio",
            (SitePage::Charters, Language::En) => "Charters",
            (SitePage::Charters, Language::Es) => "Excursiones",
            (SitePage::Species, Language::En) => "Fish Species",
            (SitePage::Species, Language::Es) => "Especies",
            (SitePage::CatchLog, Language::En) => "Catch Log",
            (SitePage::CatchLog, Language::Es) => "Registro",
            (SitePage::Gallery, Language::En) => "Gallery",
            (SitePage::Gallery, Language::Es) => "Galería",
            (SitePage::Contact, Language::En) => "Contact",
            (SitePage::Contact, Language::Es) => "Contacto",
        }
    }

    /// Link target relative to the site root
    pub fn url(&self) -> &'static str {
        match self {
            SitePage::Home => "index.html",
            SitePage::Charters => "pages/charters.html",
            SitePage::Species => "pages/species.html",
            SitePage::CatchLog => "pages/catch-log.html",
            SitePage::Gallery => "pages/gallery.html",
            SitePage::Contact => "pages/contact.html",
        }
    }

    /// Get all pages in menu order
    pub fn all() -> &'static [SitePage] {
        &[
            SitePage::Home,
            SitePage::Charters,
            SitePage::Species,
            SitePage::CatchLog,
            SitePage::Gallery,
            SitePage::Contact,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for page in SitePage::all() {
            assert_eq!(SitePage::from_slug(page.slug()), Some(*page));
        }
        assert_eq!(SitePage::from_slug("blog"), None);
    }

    #[test]
    fn test_index_names_home() {
        assert_eq!(SitePage::from_page_name("index"), Some(SitePage::Home));
        assert_eq!(SitePage::from_page_name("gallery"), Some(SitePage::Gallery));
        assert_eq!(SitePage::from_slug("index"), None);
    }
}
