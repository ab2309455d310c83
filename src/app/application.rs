//! Application - Site Composition and Event Dispatch
//!
//! [`Site`] owns the page context and the three page components, delivers
//! browser events to them in a fixed order and runs their timers.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use serde::Serialize;
use tracing::{debug, info};

use super::context::{PageContext, TimerTask};
use super::navigation::SitePage;
use super::page::{build_page, page_path};
use crate::dom::{Document, DomEvent, Window};
use crate::domain::config::SiteConfig;
use crate::domain::nav_state::page_from_path;
use crate::error::Result;
use crate::eventing::PageEvent;
use crate::features::language::LanguageManager;
use crate::features::navigation::{ACTIVE_CLASS, NAV_LINK_CLASS, NavigationManager};
use crate::features::site::SiteController;
use crate::i18n::{Catalog, Language};
use crate::services::{Analytics, KeyValueStore, LogAnalytics, MemoryStore};

/// Default origin for headless pages
pub const DEFAULT_ORIGIN: &str = "https://pacificpanamafishing.com";

/// Default viewport width (desktop)
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Builder for a [`Site`]
pub struct SiteBuilder {
    document: Option<Document>,
    config: SiteConfig,
    catalog: Option<Arc<Catalog>>,
    local_store: Option<Box<dyn KeyValueStore>>,
    session_store: Option<Box<dyn KeyValueStore>>,
    analytics: Option<Box<dyn Analytics>>,
    origin: String,
    path: String,
    viewport_width: u32,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self {
            document: None,
            config: SiteConfig::default(),
            catalog: None,
            local_store: None,
            session_store: None,
            analytics: None,
            origin: DEFAULT_ORIGIN.to_string(),
            path: page_path(SitePage::Home),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }
}

impl SiteBuilder {
    /// Page markup; defaults to the skeleton of the page at `path`
    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Translation catalog; defaults to the bundled one
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// `localStorage`; defaults to an in-memory store
    pub fn local_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.local_store = Some(Box::new(store));
        self
    }

    /// `sessionStorage`; defaults to an in-memory store
    pub fn session_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.session_store = Some(Box::new(store));
        self
    }

    pub fn analytics(mut self, analytics: impl Analytics + 'static) -> Self {
        self.analytics = Some(Box::new(analytics));
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Location path the page is loaded at
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    /// Assemble the page and run component startup
    pub fn build(self) -> Result<Site> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => Arc::new(Catalog::bundled()?),
        };

        let window = Window::new(self.origin, self.path, self.viewport_width);
        let document = self.document.unwrap_or_else(|| {
            let page = SitePage::from_slug(&page_from_path(window.pathname())).unwrap_or_default();
            build_page(page)
        });

        let cx = PageContext::new(
            document,
            window,
            self.local_store
                .unwrap_or_else(|| Box::new(MemoryStore::new())),
            self.session_store
                .unwrap_or_else(|| Box::new(MemoryStore::new())),
            self.analytics.unwrap_or_else(|| Box::new(LogAnalytics)),
        );

        Ok(Site::start(cx, catalog, self.config))
    }
}

/// A loaded page with its components
#[derive(Debug)]
pub struct Site {
    cx: PageContext,
    language: LanguageManager,
    controller: SiteController,
    navigation: NavigationManager,
}

impl Site {
    pub fn builder() -> SiteBuilder {
        SiteBuilder::default()
    }

    fn start(cx: PageContext, catalog: Arc<Catalog>, config: SiteConfig) -> Self {
        let language = LanguageManager::new(Arc::clone(&catalog), &config);
        let controller = SiteController::new(&catalog, &config);
        let navigation = NavigationManager::new(&config, &cx);

        let mut site = Self {
            cx,
            language,
            controller,
            navigation,
        };

        site.language.init(&mut site.cx);
        site.deliver_page_events();
        site.controller.init(&mut site.cx);
        site.deliver_page_events();
        site.navigation.init(&mut site.cx);
        site.deliver_page_events();

        info!(
            path = %site.cx.window.pathname(),
            language = %site.language.current_language(),
            "Page loaded"
        );
        site
    }

    /// Deliver a browser event; returns whether a handler prevented the default action
    pub fn dispatch(&mut self, event: DomEvent) -> bool {
        let event = self.apply_browser_effects(event);
        debug!(kind = event.kind(), "Dispatching event");

        self.cx.begin_dispatch();
        self.language.handle_event(&event, &mut self.cx);
        self.deliver_page_events();
        self.controller.handle_event(&event, &mut self.cx);
        self.deliver_page_events();
        self.navigation.handle_event(&event, &mut self.cx);
        self.deliver_page_events();

        self.cx.default_prevented()
    }

    /// State the browser itself updates before listeners run
    fn apply_browser_effects(&mut self, event: DomEvent) -> DomEvent {
        match &event {
            DomEvent::Scroll { y } => self.cx.window.set_scroll_y(*y),
            DomEvent::Input { target, value } => {
                self.cx.document.set_value(*target, value.as_str())
            }
            DomEvent::Focus { target } => self.cx.document.focus(*target),
            DomEvent::Blur { target } => {
                if self.cx.document.active_element() == Some(*target) {
                    self.cx.document.blur();
                }
            }
            DomEvent::Resize { width } => self.cx.window.set_inner_width(*width),
            DomEvent::VisibilityChange { hidden } => self.cx.window.set_hidden(*hidden),
            DomEvent::PopState { path, .. } => self.cx.window.set_location(path),
            DomEvent::KeyDown { key, target: None } => {
                // Key events target the focused element.
                return DomEvent::KeyDown {
                    key: key.clone(),
                    target: self.cx.document.active_element(),
                };
            }
            _ => {}
        }
        event
    }

    /// Hand bus events published by a callback to every component, in order
    fn deliver_page_events(&mut self) {
        while let Some(event) = self.cx.bus.next_pending() {
            debug!(kind = event.kind(), "Delivering page event");
            self.controller.on_page_event(&event, &mut self.cx);
            self.navigation.on_page_event(&event, &mut self.cx);
        }
    }

    /// Move the virtual clock forward, running every timer that falls due
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.cx.timers.now() + elapsed;
        while let Some(task) = self.cx.timers.pop_due(until) {
            match task {
                TimerTask::Site(timer) => self.controller.on_timer(timer, &mut self.cx),
                TimerTask::Navigation(timer) => self.navigation.on_timer(timer, &mut self.cx),
            }
            self.deliver_page_events();
        }
        self.cx.timers.settle(until);
    }

    /// Run timers until none are pending
    pub fn run_until_idle(&mut self) {
        while let Some(due) = self.cx.timers.next_due() {
            let elapsed = due.saturating_sub(self.cx.timers.now());
            self.advance(elapsed);
        }
    }

    /// Time since the page loaded
    pub fn now(&self) -> Duration {
        self.cx.timers.now()
    }

    pub fn document(&self) -> &Document {
        &self.cx.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.cx.document
    }

    pub fn window(&self) -> &Window {
        &self.cx.window
    }

    pub fn context(&self) -> &PageContext {
        &self.cx
    }

    pub fn language(&self) -> &LanguageManager {
        &self.language
    }

    pub fn controller(&self) -> &SiteController {
        &self.controller
    }

    pub fn navigation(&self) -> &NavigationManager {
        &self.navigation
    }

    /// Receive every page event published from now on
    pub fn subscribe(&mut self) -> Receiver<PageEvent> {
        self.cx.bus.subscribe()
    }

    pub fn set_language(&mut self, code: &str) -> Result<()> {
        let result = self.language.set_language(code, &mut self.cx);
        self.deliver_page_events();
        result
    }

    pub fn toggle_language(&mut self) {
        self.language.toggle_language(&mut self.cx);
        self.deliver_page_events();
    }

    pub fn auto_detect_language(&mut self) {
        self.language.auto_detect_language(&mut self.cx);
        self.deliver_page_events();
    }

    pub fn navigate_to(&mut self, href: &str) {
        self.navigation.navigate_to_page(href, &mut self.cx);
        self.deliver_page_events();
    }

    pub fn restore_navigation_state(&mut self) {
        self.navigation.restore_navigation_state(&mut self.cx);
        self.deliver_page_events();
    }

    /// Snapshot of the observable page state
    pub fn summary(&self) -> PageSummary {
        let doc = &self.cx.document;
        let notifications = doc
            .query_class("notification")
            .into_iter()
            .map(|n| NotificationSummary {
                class: doc
                    .element(n)
                    .map(|e| e.classes().join(" "))
                    .unwrap_or_default(),
                message: doc.text(n).to_string(),
            })
            .collect();

        PageSummary {
            path: self.cx.window.pathname().to_string(),
            language: self.language.current_language(),
            current_page: self.navigation.current_page().to_string(),
            active_nav_links: doc
                .query(|e| e.has_class(NAV_LINK_CLASS) && e.has_class(ACTIVE_CLASS))
                .into_iter()
                .filter_map(|l| doc.attr(l, "href").map(str::to_string))
                .collect(),
            mobile_menu_open: self.navigation.is_mobile_menu_open(),
            scroll_y: self.cx.window.scroll_y(),
            hidden: self.cx.window.is_hidden(),
            notifications,
            field_errors: doc
                .query_class("field-error")
                .into_iter()
                .map(|e| doc.text(e).to_string())
                .collect(),
            open_lightboxes: self.controller.open_lightboxes().len(),
            history: self
                .cx
                .window
                .history()
                .iter()
                .map(|h| h.path.clone())
                .collect(),
            pending_timers: self.cx.timers.pending(),
            elapsed_ms: self.now().as_millis() as u64,
        }
    }
}

/// A notification as shown on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationSummary {
    pub class: String,
    pub message: String,
}

/// Observable page state, printed by the CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub path: String,
    pub language: Language,
    pub current_page: String,
    pub active_nav_links: Vec<String>,
    pub mobile_menu_open: bool,
    pub scroll_y: f64,
    pub hidden: bool,
    pub notifications: Vec<NotificationSummary>,
    pub field_errors: Vec<String>,
    pub open_lightboxes: usize,
    pub history: Vec<String>,
    pub pending_timers: usize,
    pub elapsed_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::BOOKING_FORM_ID;
    use crate::features::language::LANGUAGE_TOGGLE_ID;
    use crate::features::navigation::MOBILE_MENU_BUTTON_ID;

    fn site_at(path: &str) -> Site {
        Site::builder().path(path).build().expect("site")
    }

    fn by_id(site: &Site, id: &str) -> crate::dom::ElementId {
        site.document().get_element_by_id(id).expect(id)
    }

    #[test]
    fn test_startup_applies_saved_language_everywhere() {
        let site = Site::builder()
            .path("/pages/contact.html")
            .local_store(MemoryStore::with_items([("pacific-panama-language", "es")]))
            .build()
            .expect("site");

        assert_eq!(site.language().current_language(), Language::Es);
        assert_eq!(site.controller().current_language(), Language::Es);

        let doc = site.document();
        let contact_link = doc
            .query(|e| e.attr("data-translate") == Some("nav.contact"))
            .into_iter()
            .next()
            .expect("contact link");
        assert_eq!(doc.text(contact_link), "Contacto");
        assert!(doc.has_class(contact_link, ACTIVE_CLASS));

        let wind = doc
            .query(|e| e.attr("data-weather") == Some("wind"))
            .into_iter()
            .next()
            .expect("wind");
        assert_eq!(doc.text(wind), "15 nudos E");
    }

    #[test]
    fn test_language_toggle_click_reaches_all_components() {
        let mut site = site_at("/index.html");
        let rx = site.subscribe();
        let toggle = by_id(&site, LANGUAGE_TOGGLE_ID);

        site.dispatch(DomEvent::Click { target: toggle });

        assert_eq!(site.language().current_language(), Language::Es);
        assert_eq!(site.controller().current_language(), Language::Es);
        assert!(matches!(
            rx.try_recv(),
            Ok(PageEvent::LanguageChanged {
                language: Language::Es,
                ..
            })
        ));
        assert_eq!(
            site.context().local_store.get_item("pacific-panama-language").as_deref(),
            Some("es")
        );

        site.dispatch(DomEvent::Click { target: toggle });
        assert_eq!(site.language().current_language(), Language::En);
    }

    #[test]
    fn test_unsupported_language_is_a_no_op() {
        let mut site = site_at("/index.html");
        let rx = site.subscribe();
        assert!(site.set_language("fr").is_err());
        assert_eq!(site.language().current_language(), Language::En);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_booking_submission_end_to_end() {
        let mut site = site_at("/pages/contact.html");
        let form = by_id(&site, BOOKING_FORM_ID);
        for (id, value) in [
            ("name", "Ana Pérez"),
            ("email", "ana@example.com"),
            ("phone", "+507 6123-4567"),
        ] {
            let field = by_id(&site, id);
            site.dispatch(DomEvent::Input {
                target: field,
                value: value.to_string(),
            });
        }
        assert!(site.summary().field_errors.is_empty());

        assert!(site.dispatch(DomEvent::Submit { form }));
        site.advance(Duration::from_millis(2000));

        let summary = site.summary();
        assert_eq!(summary.notifications.len(), 1);
        assert_eq!(summary.notifications[0].class, "notification notification-success");
        assert_eq!(site.document().value(by_id(&site, "email")), "");

        site.run_until_idle();
        assert!(site.summary().notifications.is_empty());
    }

    #[test]
    fn test_invalid_submission_in_spanish() {
        let mut site = site_at("/pages/contact.html");
        site.set_language("es").expect("es");
        let form = by_id(&site, BOOKING_FORM_ID);

        site.dispatch(DomEvent::Submit { form });

        let summary = site.summary();
        assert_eq!(summary.notifications.len(), 1);
        assert_eq!(
            summary.notifications[0].message,
            "Por favor, corrija los errores en el formulario"
        );
        assert_eq!(summary.field_errors, vec!["Este campo es requerido"; 3]);
    }

    #[test]
    fn test_navigation_records_page_view() {
        let mut site = site_at("/index.html");
        let rx = site.subscribe();

        let contact = site
            .document()
            .query(|e| e.attr("href") == Some("pages/contact.html"))
            .into_iter()
            .next()
            .expect("contact link");
        assert!(site.dispatch(DomEvent::Click { target: contact }));

        let summary = site.summary();
        assert_eq!(summary.current_page, "contact");
        assert_eq!(summary.active_nav_links, vec!["pages/contact.html"]);
        assert_eq!(summary.path, "/pages/contact.html");

        let kinds: Vec<&str> = rx.try_iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["pageView", "tracked"]);
    }

    #[test]
    fn test_resize_closes_menu_immediately_and_after_settling() {
        let mut site = Site::builder()
            .path("/index.html")
            .viewport_width(375)
            .build()
            .expect("site");
        let button = by_id(&site, MOBILE_MENU_BUTTON_ID);

        site.dispatch(DomEvent::Click { target: button });
        assert!(site.summary().mobile_menu_open);

        site.dispatch(DomEvent::Resize { width: 1024 });
        assert!(!site.summary().mobile_menu_open);

        site.dispatch(DomEvent::Click { target: button });
        site.dispatch(DomEvent::Resize { width: 600 });
        assert!(site.summary().mobile_menu_open);
        site.run_until_idle();
        assert!(site.summary().mobile_menu_open);
        assert_eq!(site.window().inner_width(), 600);
    }

    #[test]
    fn test_escape_closes_menu_and_lightbox() {
        let mut site = site_at("/pages/gallery.html");
        let button = by_id(&site, MOBILE_MENU_BUTTON_ID);
        let image = site.document().query_class("gallery-image")[0];

        site.dispatch(DomEvent::Click { target: image });
        site.dispatch(DomEvent::Click { target: button });
        assert_eq!(site.summary().open_lightboxes, 1);

        site.dispatch(DomEvent::key("Escape"));
        site.run_until_idle();

        let summary = site.summary();
        assert!(!summary.mobile_menu_open);
        assert_eq!(summary.open_lightboxes, 0);
    }

    #[test]
    fn test_hidden_page_pauses_animations() {
        let mut site = site_at("/index.html");
        let body = site.document().body();
        assert!(!site.summary().hidden);

        site.dispatch(DomEvent::VisibilityChange { hidden: true });
        assert!(site.summary().hidden);
        assert_eq!(site.document().style(body, "animation-play-state"), Some("paused"));

        site.dispatch(DomEvent::VisibilityChange { hidden: false });
        assert!(!site.summary().hidden);
        assert_eq!(site.document().style(body, "animation-play-state"), None);
    }

    #[test]
    fn test_hash_link_scrolls_to_section() {
        let mut site = site_at("/index.html");
        let cta = site
            .document()
            .query(|e| e.attr("href") == Some("#charters"))
            .into_iter()
            .next()
            .expect("cta");
        assert!(site.dispatch(DomEvent::Click { target: cta }));
        assert_eq!(site.window().scroll_y(), 820.0);
    }

    #[test]
    fn test_session_state_survives_reload() {
        let mut first = site_at("/pages/species.html");
        first.dispatch(DomEvent::Scroll { y: 300.0 });
        first.dispatch(DomEvent::BeforeUnload);
        let saved = first
            .context()
            .session_store
            .get_item("pacific-panama-nav-state")
            .expect("saved");

        let mut second = Site::builder()
            .path("/index.html")
            .session_store(MemoryStore::with_items([(
                "pacific-panama-nav-state",
                saved.as_str(),
            )]))
            .build()
            .expect("site");
        second.restore_navigation_state();
        second.advance(Duration::from_millis(100));

        let summary = second.summary();
        assert_eq!(summary.current_page, "species");
        assert_eq!(summary.scroll_y, 300.0);
    }
}
