//! Navigation Controller
//!
//! Current page tracking, active nav link, mobile menu, history, session
//! continuity, breadcrumb and in-page anchor scrolling.

use tracing::{debug, error, warn};

use crate::app::context::{NavTimer, PageContext};
use crate::app::navigation::SitePage;
use crate::dom::{DomEvent, ElementId, HistoryState, ScrollBehavior};
use crate::domain::config::SiteConfig;
use crate::domain::nav_state::{
    SavedNavState, is_internal_href, link_matches_page, link_page_name, page_from_href,
    page_from_path,
};
use crate::eventing::PageEvent;
use crate::i18n::Language;

pub const NAV_LINK_CLASS: &str = "nav-link";
pub const NAV_MENU_CLASS: &str = "nav-menu";
pub const MOBILE_MENU_BUTTON_ID: &str = "mobile-menu-btn";
pub const ACTIVE_CLASS: &str = "active";
pub const PAGE_LOADER_CLASS: &str = "page-loader";

const MENU_OPEN_GLYPH: &str = "✕";
const MENU_CLOSED_GLYPH: &str = "☰";

/// Navigation state for the current page
#[derive(Debug)]
pub struct NavigationManager {
    config: SiteConfig,
    current_page: String,
    mobile_menu_open: bool,
    scroll_position: f64,
    language: Language,
}

impl NavigationManager {
    /// The current page is derived from the window location
    pub fn new(config: &SiteConfig, cx: &PageContext) -> Self {
        Self {
            config: config.clone(),
            current_page: page_from_path(cx.window.pathname()),
            mobile_menu_open: false,
            scroll_position: 0.0,
            language: Language::default(),
        }
    }

    pub fn init(&mut self, cx: &mut PageContext) {
        self.set_active_nav_link(cx);
        self.update_breadcrumb(cx);
        debug!(page = %self.current_page, "Navigation initialized");
    }

    pub fn handle_event(&mut self, event: &DomEvent, cx: &mut PageContext) {
        match event {
            DomEvent::Click { target } => self.handle_click(*target, cx),
            DomEvent::Resize { width } => self.handle_window_resize(*width, cx),
            DomEvent::KeyDown { key, target } => self.handle_keydown(key, *target, cx),
            DomEvent::PopState { state, .. } => self.handle_pop_state(state.as_ref(), cx),
            DomEvent::BeforeUnload => self.save_navigation_state(cx),
            _ => {}
        }
    }

    pub fn on_timer(&mut self, timer: NavTimer, cx: &mut PageContext) {
        match timer {
            NavTimer::RestoreScroll { y } => cx.window.scroll_to(y, ScrollBehavior::Instant),
        }
    }

    pub fn on_page_event(&mut self, event: &PageEvent, cx: &mut PageContext) {
        match event {
            PageEvent::LanguageChanged { language, .. } => {
                self.language = *language;
                self.update_breadcrumb(cx);
            }
            PageEvent::ViewportSettled { width } => self.handle_window_resize(*width, cx),
            _ => {}
        }
    }

    // ==================== Clicks ====================

    fn handle_click(&mut self, target: ElementId, cx: &mut PageContext) {
        let button = cx.document.get_element_by_id(MOBILE_MENU_BUTTON_ID);
        let in_button = button.is_some_and(|b| cx.document.is_descendant(target, b));

        if in_button {
            self.toggle_mobile_menu(cx);
        } else if let Some(link) = cx.document.closest_class(target, NAV_LINK_CLASS) {
            self.handle_nav_click(link, cx);
        } else {
            self.handle_outside_click(target, cx);
        }

        self.handle_hash_link(target, cx);
    }

    fn handle_nav_click(&mut self, link: ElementId, cx: &mut PageContext) {
        let href = cx.document.attr(link, "href").unwrap_or_default().to_string();
        if is_internal_href(&href) {
            cx.prevent_default();
            self.navigate_to_page(&href, cx);
        }
        self.close_mobile_menu(cx);
    }

    fn handle_outside_click(&mut self, target: ElementId, cx: &mut PageContext) {
        if !self.mobile_menu_open {
            return;
        }
        let Some(menu) = nav_menu(cx) else {
            return;
        };
        if !cx.document.is_descendant(target, menu) {
            self.close_mobile_menu(cx);
        }
    }

    /// `a[href^="#"]` links scroll to their target instead of jumping
    fn handle_hash_link(&mut self, target: ElementId, cx: &mut PageContext) {
        let Some(link) = cx
            .document
            .closest(target, |e| e.tag() == "a" && e.attr("href").is_some_and(|h| h.starts_with('#')))
        else {
            return;
        };
        let href = cx.document.attr(link, "href").unwrap_or_default().to_string();
        if href == "#" {
            return;
        }
        cx.prevent_default();

        if let Some(element) = cx.document.query_selector(&href) {
            self.scroll_to_element(element, cx);
        }
    }

    /// Smooth scroll so `element` sits just below the fixed navbar
    pub fn scroll_to_element(&self, element: ElementId, cx: &mut PageContext) {
        let offset_top = cx
            .document
            .attr(element, "data-offset-top")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or_default();
        let top = offset_top - self.config.layout.anchor_scroll_offset;
        cx.window.scroll_to(top, ScrollBehavior::Smooth);
    }

    // ==================== Pages ====================

    /// Clear `active` from every nav link and set it on the current page's link
    pub fn set_active_nav_link(&self, cx: &mut PageContext) {
        let links = cx.document.query_class(NAV_LINK_CLASS);
        for link in &links {
            cx.document.remove_class(*link, ACTIVE_CLASS);
        }
        if let Some(link) = self.find_nav_link_for_page(&self.current_page, cx) {
            cx.document.add_class(link, ACTIVE_CLASS);
        }
    }

    fn find_nav_link_for_page(&self, page: &str, cx: &PageContext) -> Option<ElementId> {
        cx.document
            .query_class(NAV_LINK_CLASS)
            .into_iter()
            .find(|link| {
                cx.document
                    .attr(*link, "href")
                    .is_some_and(|href| link_matches_page(link_page_name(href), page))
            })
    }

    /// In-page navigation: active link, history entry, scroll to top, page view
    pub fn navigate_to_page(&mut self, href: &str, cx: &mut PageContext) {
        let page_name = page_from_href(href);
        self.current_page = page_name.clone();
        self.set_active_nav_link(cx);

        if href != cx.window.pathname() {
            cx.window.push_state(
                HistoryState {
                    page: page_name.clone(),
                },
                href,
            );
        }

        self.scroll_to_top(cx);
        self.track_page_view(&page_name, cx);
        self.update_breadcrumb(cx);
    }

    pub fn scroll_to_top(&self, cx: &mut PageContext) {
        cx.window.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    fn handle_pop_state(&mut self, state: Option<&HistoryState>, cx: &mut PageContext) {
        self.current_page = match state.filter(|s| !s.page.is_empty()) {
            Some(state) => state.page.clone(),
            None => page_from_path(cx.window.pathname()),
        };
        self.set_active_nav_link(cx);
        self.update_breadcrumb(cx);
    }

    /// Report a page view to analytics and the other components
    pub fn track_page_view(&self, page_name: &str, cx: &mut PageContext) {
        let page_url = cx.window.href();
        cx.analytics.page_config(page_name, &page_url);
        cx.bus.publish(PageEvent::PageView {
            page_name: page_name.to_string(),
            page_url,
        });
    }

    // ==================== Mobile Menu ====================

    pub fn toggle_mobile_menu(&mut self, cx: &mut PageContext) {
        if nav_menu(cx).is_none() {
            return;
        }
        if self.mobile_menu_open {
            self.close_mobile_menu(cx);
        } else {
            self.open_mobile_menu(cx);
        }
    }

    /// Show the menu and pin the body at the current scroll offset
    pub fn open_mobile_menu(&mut self, cx: &mut PageContext) {
        if let Some(menu) = nav_menu(cx) {
            cx.document.add_class(menu, ACTIVE_CLASS);
        }
        if let Some(button) = cx.document.get_element_by_id(MOBILE_MENU_BUTTON_ID) {
            cx.document.set_text(button, MENU_OPEN_GLYPH);
            cx.document.set_attr(button, "aria-expanded", "true");
        }

        self.scroll_position = cx.window.scroll_y();
        let body = cx.document.body();
        cx.document.set_style(body, "overflow", "hidden");
        cx.document.set_style(body, "position", "fixed");
        cx.document
            .set_style(body, "top", format!("-{}px", self.scroll_position));
        cx.document.set_style(body, "width", "100%");

        self.mobile_menu_open = true;
    }

    /// Hide the menu and unpin the body; scroll returns to where it was pinned
    pub fn close_mobile_menu(&mut self, cx: &mut PageContext) {
        if let Some(menu) = nav_menu(cx) {
            cx.document.remove_class(menu, ACTIVE_CLASS);
        }
        if let Some(button) = cx.document.get_element_by_id(MOBILE_MENU_BUTTON_ID) {
            cx.document.set_text(button, MENU_CLOSED_GLYPH);
            cx.document.set_attr(button, "aria-expanded", "false");
        }

        let body = cx.document.body();
        for property in ["overflow", "position", "top", "width"] {
            cx.document.set_style(body, property, "");
        }

        if self.mobile_menu_open {
            cx.window
                .scroll_to(self.scroll_position, ScrollBehavior::Instant);
        }
        self.mobile_menu_open = false;
    }

    fn handle_window_resize(&mut self, width: u32, cx: &mut PageContext) {
        if width > self.config.layout.mobile_breakpoint && self.mobile_menu_open {
            self.close_mobile_menu(cx);
        }
    }

    // ==================== Keyboard ====================

    fn handle_keydown(&mut self, key: &str, target: Option<ElementId>, cx: &mut PageContext) {
        if key == "Escape" && self.mobile_menu_open {
            self.close_mobile_menu(cx);
            return;
        }

        let Some(target) = target.filter(|t| cx.document.has_class(*t, NAV_LINK_CLASS)) else {
            return;
        };
        let step: isize = match key {
            "ArrowRight" | "ArrowDown" => 1,
            "ArrowLeft" | "ArrowUp" => -1,
            _ => return,
        };

        let links = cx.document.query_class(NAV_LINK_CLASS);
        let Some(index) = links.iter().position(|l| *l == target) else {
            return;
        };
        cx.prevent_default();
        let next = (index as isize + step).rem_euclid(links.len() as isize) as usize;
        cx.document.focus(links[next]);
    }

    // ==================== Session ====================

    /// Persist the current page and scroll offset for the next load
    pub fn save_navigation_state(&self, cx: &mut PageContext) {
        let state = SavedNavState {
            current_page: Some(self.current_page.clone()),
            scroll_position: cx.window.scroll_y(),
        };
        let payload = match serde_json::to_string(&state) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to encode navigation state");
                return;
            }
        };
        let key = &self.config.storage.nav_state_key;
        if let Err(e) = cx.session_store.set_item(key, &payload) {
            warn!(error = %e, "Failed to save navigation state");
        }
    }

    /// Re-apply a saved page; the scroll offset follows once layout settles
    pub fn restore_navigation_state(&mut self, cx: &mut PageContext) {
        let Some(saved) = cx.session_store.get_item(&self.config.storage.nav_state_key) else {
            return;
        };
        let state: SavedNavState = match serde_json::from_str(&saved) {
            Ok(state) => state,
            Err(e) => {
                error!(error = %e, "Failed to restore navigation state");
                return;
            }
        };

        self.current_page = state
            .current_page
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| page_from_path(cx.window.pathname()));
        self.set_active_nav_link(cx);
        self.update_breadcrumb(cx);

        if state.scroll_position != 0.0 {
            cx.schedule_navigation(
                self.config.timing.scroll_restore(),
                NavTimer::RestoreScroll {
                    y: state.scroll_position,
                },
            );
        }
    }

    // ==================== Breadcrumb ====================

    /// Breadcrumb markup for the current page; empty for unknown pages
    pub fn generate_breadcrumb(&self) -> String {
        let Some(page) = SitePage::from_page_name(&self.current_page) else {
            return String::new();
        };
        let home = SitePage::Home;
        let mut markup = format!(
            r#"<a href="{}">{}</a>"#,
            home.url(),
            home.breadcrumb_label(self.language)
        );
        if page != SitePage::Home {
            markup.push_str(&format!(
                " > <span>{}</span>",
                page.breadcrumb_label(self.language)
            ));
        }
        markup
    }

    /// Rebuild `.breadcrumb` for the current page
    pub fn update_breadcrumb(&self, cx: &mut PageContext) {
        let Some(container) = cx.document.query_selector(".breadcrumb") else {
            return;
        };
        let children = cx
            .document
            .element(container)
            .map(|e| e.children().to_vec())
            .unwrap_or_default();
        for child in children {
            cx.document.remove(child);
        }

        let Some(page) = SitePage::from_page_name(&self.current_page) else {
            return;
        };
        let home = SitePage::Home;
        cx.document
            .build("a")
            .attr("href", home.url())
            .text(home.breadcrumb_label(self.language))
            .append_to(container);
        if page != SitePage::Home {
            cx.document
                .build("span")
                .class("breadcrumb-separator")
                .text(">")
                .append_to(container);
            cx.document
                .build("span")
                .text(page.breadcrumb_label(self.language))
                .append_to(container);
        }
    }

    // ==================== Loading ====================

    pub fn show_loading_state(&self, cx: &mut PageContext) -> ElementId {
        let body = cx.document.body();
        let loader = cx
            .document
            .build("div")
            .class(PAGE_LOADER_CLASS)
            .append_to(body);
        cx.document.build("div").class("spinner").append_to(loader);
        loader
    }

    pub fn hide_loading_state(&self, cx: &mut PageContext) {
        if let Some(loader) = cx.document.query_class(PAGE_LOADER_CLASS).into_iter().next() {
            cx.document.remove(loader);
        }
    }

    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }
}

fn nav_menu(cx: &PageContext) -> Option<ElementId> {
    cx.document.query_class(NAV_MENU_CLASS).into_iter().next()
}
