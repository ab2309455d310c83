//! Site Controller
//!
//! Page-wide behaviour: navbar and hero scroll effects, image lightbox,
//! contact form validation and submission, notifications, viewport entry
//! animations and the weather widget.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, info};

use super::{forms, lightbox, notifications, notifications::NotificationKind};
use crate::app::context::{PageContext, SiteTimer};
use crate::dom::{DomEvent, ElementId, TimerId};
use crate::domain::config::SiteConfig;
use crate::domain::validation::FieldValidation;
use crate::domain::weather::WeatherReport;
use crate::error::{Error, Result};
use crate::eventing::PageEvent;
use crate::i18n::{Catalog, Dictionary, Language};
use crate::services::{ApiClient, RequestOptions};

/// Cards that animate in when they first enter the viewport
pub const ANIMATED_CARD_CLASSES: [&str; 4] =
    ["species-card", "charter-card", "log-entry", "feature-card"];

pub const ANIMATE_IN_CLASS: &str = "animate-in";

/// Page-wide behaviour controller
#[derive(Debug)]
pub struct SiteController {
    config: SiteConfig,
    language: Language,
    translations: Arc<Dictionary>,
    observed: BTreeSet<ElementId>,
    lightboxes: Vec<ElementId>,
    resize_timer: Option<TimerId>,
    api: Option<ApiClient>,
}

impl SiteController {
    pub fn new(catalog: &Catalog, config: &SiteConfig) -> Self {
        let language = Language::default();
        let translations = Arc::new(catalog.dictionary(language).cloned().unwrap_or_default());
        let api = config.api.base_url.as_deref().map(ApiClient::new);

        Self {
            config: config.clone(),
            language,
            translations,
            observed: BTreeSet::new(),
            lightboxes: Vec::new(),
            resize_timer: None,
            api,
        }
    }

    pub fn init(&mut self, cx: &mut PageContext) {
        self.observed = cx
            .document
            .query_any_class(&ANIMATED_CARD_CLASSES)
            .into_iter()
            .collect();
        self.load_weather_data(cx);
        debug!(observed = self.observed.len(), "Site controller initialized");
    }

    pub fn handle_event(&mut self, event: &DomEvent, cx: &mut PageContext) {
        match event {
            DomEvent::Scroll { y } => {
                self.handle_navbar_scroll(*y, cx);
                self.handle_parallax(*y, cx);
            }
            DomEvent::Click { target } => self.handle_click(*target, cx),
            DomEvent::Focus { target } => {
                if forms::owning_form(cx, *target).is_some() {
                    forms::mark_focused(cx, *target);
                }
            }
            DomEvent::Blur { target } => {
                if forms::owning_form(cx, *target).is_some() {
                    forms::unmark_focused(cx, *target);
                }
            }
            DomEvent::Input { target, .. } => {
                if forms::owning_form(cx, *target).is_some() {
                    self.validate_field(*target, cx);
                }
            }
            DomEvent::Submit { form } => self.handle_form_submission(*form, cx),
            DomEvent::Resize { .. } => self.handle_resize(cx),
            DomEvent::VisibilityChange { hidden } => self.handle_visibility_change(*hidden, cx),
            DomEvent::KeyDown { key, .. } if key == "Escape" => self.close_all_lightboxes(cx),
            DomEvent::Intersect { target } => self.handle_intersect(*target, cx),
            _ => {}
        }
    }

    pub fn on_timer(&mut self, timer: SiteTimer, cx: &mut PageContext) {
        let timing = &self.config.timing;
        match timer {
            SiteTimer::LightboxShow { overlay, image } => lightbox::show(cx, overlay, image),
            SiteTimer::LightboxRemove { overlay } => {
                lightbox::remove(cx, overlay);
                self.lightboxes.retain(|id| *id != overlay);
            }
            SiteTimer::NotificationFade { notification } => {
                notifications::fade(cx, timing, notification)
            }
            SiteTimer::NotificationRemove { notification } => {
                notifications::remove(cx, notification)
            }
            SiteTimer::SubmitComplete {
                request_id,
                form,
                button,
                original_label,
            } => self.complete_submission(&request_id, form, button, &original_label, cx),
            SiteTimer::ResizeSettled => {
                self.resize_timer = None;
                let width = cx.window.inner_width();
                debug!(width, "Viewport settled");
                cx.bus.publish(PageEvent::ViewportSettled { width });
            }
        }
    }

    pub fn on_page_event(&mut self, event: &PageEvent, cx: &mut PageContext) {
        match event {
            PageEvent::LanguageChanged {
                language,
                translations,
            } => {
                self.language = *language;
                self.translations = Arc::clone(translations);
                self.load_weather_data(cx);
            }
            PageEvent::PageView {
                page_name,
                page_url,
            } => {
                self.track_event(
                    "page_view",
                    json!({ "page_name": page_name, "page_url": page_url }),
                    cx,
                );
            }
            _ => {}
        }
    }

    // ==================== Scroll ====================

    fn handle_navbar_scroll(&self, y: f64, cx: &mut PageContext) {
        let Some(navbar) = cx.document.query_selector(".navbar") else {
            return;
        };
        let (background, shadow) = if y > self.config.layout.navbar_scroll_threshold {
            ("rgba(255, 255, 255, 0.98)", "0 2px 20px rgba(0,0,0,0.1)")
        } else {
            ("rgba(255, 255, 255, 0.95)", "none")
        };
        cx.document.set_style(navbar, "background", background);
        cx.document.set_style(navbar, "box-shadow", shadow);
    }

    fn handle_parallax(&self, y: f64, cx: &mut PageContext) {
        let Some(hero) = cx.document.query_selector(".hero") else {
            return;
        };
        let rate = y * self.config.layout.parallax_rate;
        // Avoid rendering "-0px" at the top of the page.
        let rate = if rate == 0.0 { 0.0 } else { rate };
        cx.document
            .set_style(hero, "transform", format!("translateY({rate}px)"));
    }

    // ==================== Lightbox ====================

    fn handle_click(&mut self, target: ElementId, cx: &mut PageContext) {
        if let Some(overlay) = cx.document.closest_class(target, lightbox::OVERLAY_CLASS) {
            lightbox::close(cx, &self.config.timing, overlay);
            return;
        }
        if lightbox::is_lightbox_image(cx, target) {
            let overlay = lightbox::open(cx, &self.config.timing, target);
            self.lightboxes.push(overlay);
        }
    }

    fn close_all_lightboxes(&mut self, cx: &mut PageContext) {
        for overlay in self.lightboxes.clone() {
            lightbox::close(cx, &self.config.timing, overlay);
        }
    }

    pub fn open_lightboxes(&self) -> &[ElementId] {
        &self.lightboxes
    }

    // ==================== Forms ====================

    /// Validate a field and show the result next to it
    pub fn validate_field(&self, field: ElementId, cx: &mut PageContext) -> FieldValidation {
        let validation = forms::check_field(cx, field, |key| self.translate(key));
        forms::apply_feedback(cx, field, &validation);
        validation
    }

    fn handle_form_submission(&mut self, form: ElementId, cx: &mut PageContext) {
        if cx.document.element(form).is_none_or(|e| e.tag() != "form") {
            return;
        }
        cx.prevent_default();

        let mut is_form_valid = true;
        for field in forms::required_fields(cx, form) {
            if !self.validate_field(field, cx).is_valid {
                is_form_valid = false;
            }
        }

        if !is_form_valid {
            let message = self.translate("message.form-error");
            self.show_notification(&message, NotificationKind::Error, cx);
            return;
        }

        self.process_form_submission(form, cx);
    }

    fn process_form_submission(&mut self, form: ElementId, cx: &mut PageContext) {
        let button = forms::submit_button(cx, form);
        let original_label = button
            .map(|b| cx.document.text(b).to_string())
            .unwrap_or_default();
        if let Some(button) = button {
            cx.document.set_text(button, self.translate("form.sending"));
            cx.document.set_attr(button, "disabled", "");
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        info!(request_id = %request_id, "Submitting booking request");
        cx.schedule_site(
            self.config.timing.submit_delay(),
            SiteTimer::SubmitComplete {
                request_id,
                form,
                button,
                original_label,
            },
        );
    }

    fn complete_submission(
        &self,
        request_id: &str,
        form: ElementId,
        button: Option<ElementId>,
        original_label: &str,
        cx: &mut PageContext,
    ) {
        let message = self.translate("message.booking-success");
        self.show_notification(&message, NotificationKind::Success, cx);
        cx.document.reset_form(form);

        if let Some(button) = button {
            cx.document.set_text(button, original_label);
            cx.document.remove_attr(button, "disabled");
        }
        info!(request_id, "Booking request completed");
    }

    // ==================== Notifications ====================

    pub fn show_notification(
        &self,
        message: &str,
        kind: NotificationKind,
        cx: &mut PageContext,
    ) -> ElementId {
        notifications::show(cx, &self.config.timing, message, kind)
    }

    // ==================== Viewport ====================

    fn handle_resize(&mut self, cx: &mut PageContext) {
        if let Some(pending) = self.resize_timer.take() {
            cx.timers.cancel(pending);
        }
        self.resize_timer =
            Some(cx.schedule_site(self.config.timing.resize_debounce(), SiteTimer::ResizeSettled));
    }

    fn handle_visibility_change(&self, hidden: bool, cx: &mut PageContext) {
        let body = cx.document.body();
        let state = if hidden { "paused" } else { "" };
        cx.document.set_style(body, "animation-play-state", state);
    }

    fn handle_intersect(&mut self, target: ElementId, cx: &mut PageContext) {
        if self.observed.remove(&target) {
            cx.document.add_class(target, ANIMATE_IN_CLASS);
        }
    }

    // ==================== Weather ====================

    fn load_weather_data(&self, cx: &mut PageContext) {
        let report = WeatherReport::placeholder(self.language);
        for widget in cx.document.query_class("weather-widget") {
            let fields = cx
                .document
                .query_within(widget, |e| e.attr("data-weather").is_some());
            for field in fields {
                let value = cx
                    .document
                    .attr(field, "data-weather")
                    .and_then(|name| report.field(name))
                    .map(str::to_string);
                if let Some(value) = value {
                    cx.document.set_text(field, value);
                }
            }
        }
    }

    // ==================== Analytics / API ====================

    /// Forward a custom event to analytics and announce it on the bus
    pub fn track_event(&self, name: &str, params: Value, cx: &mut PageContext) {
        cx.analytics.event(name, &params);
        cx.bus.publish(PageEvent::tracked(name, params));
    }

    /// JSON request against the configured backend
    pub async fn api_call(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let Some(api) = &self.api else {
            return Err(Error::Invalid {
                message: "no API base URL configured".to_string(),
            });
        };
        api.call(endpoint, options).await
    }

    fn translate(&self, key: &str) -> String {
        self.translations
            .get(key)
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn current_language(&self) -> Language {
        self.language
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::app::context::TimerTask;
    use crate::dom::{Document, Window};
    use crate::services::{LogAnalytics, MemoryStore};

    struct Fixture {
        cx: PageContext,
        site: SiteController,
        catalog: Catalog,
        form: ElementId,
        name: ElementId,
        email: ElementId,
        phone: ElementId,
        button: ElementId,
        image: ElementId,
        card: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let body = doc.body();
        doc.build("nav").class("navbar").append_to(body);
        doc.build("section").class("hero").append_to(body);
        let widget = doc.build("div").class("weather-widget").append_to(body);
        doc.build("span").attr("data-weather", "wind").append_to(widget);
        let card = doc.build("div").class("species-card").append_to(body);
        let image = doc
            .build("img")
            .class("species-image")
            .attr("src", "images/marlin.jpg")
            .attr("alt", "Black marlin")
            .append_to(card);

        let form = doc.build("form").id("contact-form").append_to(body);
        let mut field = |tag: &str, kind: &str| {
            let group = doc.build("div").class("form-group").append_to(form);
            doc.build(tag)
                .attr("type", kind)
                .attr("required", "")
                .append_to(group)
        };
        let name = field("input", "text");
        let email = field("input", "email");
        let phone = field("input", "tel");
        let button = doc
            .build("button")
            .attr("type", "submit")
            .text("Send Message")
            .append_to(form);

        let mut cx = PageContext::new(
            doc,
            Window::new("https://pacificpanama.test", "/pages/contact.html", 1280),
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
            Box::new(LogAnalytics),
        );
        let catalog = Catalog::bundled().expect("catalog");
        let mut site = SiteController::new(&catalog, &SiteConfig::default());
        site.init(&mut cx);

        Fixture {
            cx,
            site,
            catalog,
            form,
            name,
            email,
            phone,
            button,
            image,
            card,
        }
    }

    fn run_timers(f: &mut Fixture, elapsed: Duration) {
        let until = f.cx.timers.now() + elapsed;
        while let Some(task) = f.cx.timers.pop_due(until) {
            if let TimerTask::Site(timer) = task {
                f.site.on_timer(timer, &mut f.cx);
            }
        }
        f.cx.timers.settle(until);
    }

    fn switch_to_spanish(f: &mut Fixture) {
        let translations = Arc::new(f.catalog.dictionary(Language::Es).cloned().expect("es"));
        f.site.on_page_event(
            &PageEvent::LanguageChanged {
                language: Language::Es,
                translations,
            },
            &mut f.cx,
        );
    }

    fn notifications(f: &Fixture) -> Vec<ElementId> {
        f.cx.document.query_class(notifications::NOTIFICATION_CLASS)
    }

    #[test]
    fn test_navbar_and_parallax_follow_scroll() {
        let mut f = fixture();
        let navbar = f.cx.document.query_selector(".navbar").expect("navbar");
        let hero = f.cx.document.query_selector(".hero").expect("hero");

        f.site.handle_event(&DomEvent::Scroll { y: 150.0 }, &mut f.cx);
        assert_eq!(f.cx.document.style(navbar, "background"), Some("rgba(255, 255, 255, 0.98)"));
        assert_eq!(f.cx.document.style(hero, "transform"), Some("translateY(-75px)"));

        f.site.handle_event(&DomEvent::Scroll { y: 0.0 }, &mut f.cx);
        assert_eq!(f.cx.document.style(navbar, "box-shadow"), Some("none"));
        assert_eq!(f.cx.document.style(hero, "transform"), Some("translateY(0px)"));
    }

    #[test]
    fn test_required_empty_field_uses_active_language() {
        let mut f = fixture();
        let result = f.site.validate_field(f.name, &mut f.cx);
        assert_eq!(result, FieldValidation::invalid("This field is required"));

        switch_to_spanish(&mut f);
        let result = f.site.validate_field(f.name, &mut f.cx);
        assert_eq!(result.message, "Este campo es requerido");

        let errors = f.cx.document.query_class(forms::FIELD_ERROR_CLASS);
        assert_eq!(errors.len(), 1);
        assert_eq!(f.cx.document.style(f.name, "border-color"), Some("#e74c3c"));
    }

    #[test]
    fn test_input_revalidates_and_clears_error() {
        let mut f = fixture();
        f.cx.document.set_value(f.email, "user@ex");
        f.site.handle_event(
            &DomEvent::Input {
                target: f.email,
                value: "user@ex".into(),
            },
            &mut f.cx,
        );
        assert_eq!(f.cx.document.query_class(forms::FIELD_ERROR_CLASS).len(), 1);

        f.cx.document.set_value(f.email, "user@example.com");
        f.site.handle_event(
            &DomEvent::Input {
                target: f.email,
                value: "user@example.com".into(),
            },
            &mut f.cx,
        );
        assert!(f.cx.document.query_class(forms::FIELD_ERROR_CLASS).is_empty());
        assert_eq!(f.cx.document.style(f.email, "border-color"), None);
    }

    #[test]
    fn test_focus_marks_group_until_blurred_empty() {
        let mut f = fixture();
        let group = f.cx.document.parent(f.name).expect("group");

        f.site.handle_event(&DomEvent::Focus { target: f.name }, &mut f.cx);
        assert!(f.cx.document.has_class(group, forms::FOCUSED_CLASS));
        f.site.handle_event(&DomEvent::Blur { target: f.name }, &mut f.cx);
        assert!(!f.cx.document.has_class(group, forms::FOCUSED_CLASS));

        f.site.handle_event(&DomEvent::Focus { target: f.name }, &mut f.cx);
        f.cx.document.set_value(f.name, "Ana");
        f.site.handle_event(&DomEvent::Blur { target: f.name }, &mut f.cx);
        assert!(f.cx.document.has_class(group, forms::FOCUSED_CLASS));
    }

    #[test]
    fn test_invalid_submission_keeps_values() {
        let mut f = fixture();
        f.cx.document.set_value(f.name, "Ana");
        f.cx.document.set_value(f.email, "user@ex");
        f.cx.document.set_value(f.phone, "+15551234567");

        f.cx.begin_dispatch();
        f.site.handle_event(&DomEvent::Submit { form: f.form }, &mut f.cx);

        assert!(f.cx.default_prevented());
        let shown = notifications(&f);
        assert_eq!(shown.len(), 1);
        assert!(f.cx.document.has_class(shown[0], "notification-error"));
        assert_eq!(f.cx.document.text(shown[0]), "Please correct the errors in the form");
        assert_eq!(f.cx.document.value(f.email), "user@ex");
        assert_eq!(f.cx.document.text(f.button), "Send Message");
    }

    #[test]
    fn test_valid_submission_completes_after_delay() {
        let mut f = fixture();
        f.cx.document.set_value(f.name, "Ana");
        f.cx.document.set_value(f.email, "ana@example.com");
        f.cx.document.set_value(f.phone, "+507 6123-4567");

        f.site.handle_event(&DomEvent::Submit { form: f.form }, &mut f.cx);
        assert_eq!(f.cx.document.text(f.button), "Sending...");
        assert_eq!(f.cx.document.attr(f.button, "disabled"), Some(""));
        assert!(notifications(&f).is_empty());

        run_timers(&mut f, Duration::from_millis(2000));

        let shown = notifications(&f);
        assert_eq!(shown.len(), 1);
        assert!(f.cx.document.has_class(shown[0], "notification-success"));
        assert_eq!(f.cx.document.value(f.name), "");
        assert_eq!(f.cx.document.value(f.email), "");
        assert_eq!(f.cx.document.text(f.button), "Send Message");
        assert_eq!(f.cx.document.attr(f.button, "disabled"), None);
    }

    #[test]
    fn test_notification_replaces_and_dismisses() {
        let mut f = fixture();
        f.site.show_notification("first", NotificationKind::Info, &mut f.cx);
        let second = f.site.show_notification("second", NotificationKind::Error, &mut f.cx);
        assert_eq!(notifications(&f), vec![second]);

        run_timers(&mut f, Duration::from_millis(5000));
        assert_eq!(f.cx.document.style(second, "opacity"), Some("0"));
        assert!(f.cx.document.contains(second));

        run_timers(&mut f, Duration::from_millis(300));
        assert!(notifications(&f).is_empty());
    }

    #[test]
    fn test_lightbox_opens_and_closes_on_escape() {
        let mut f = fixture();
        f.site.handle_event(&DomEvent::Click { target: f.image }, &mut f.cx);
        f.site.handle_event(&DomEvent::Click { target: f.image }, &mut f.cx);

        let overlays = f.cx.document.query_class(lightbox::OVERLAY_CLASS);
        assert_eq!(overlays.len(), 2);
        assert_eq!(f.cx.document.style(overlays[0], "opacity"), Some("0"));

        run_timers(&mut f, Duration::from_millis(10));
        assert_eq!(f.cx.document.style(overlays[0], "opacity"), Some("1"));

        f.site.handle_event(&DomEvent::key("Escape"), &mut f.cx);
        run_timers(&mut f, Duration::from_millis(300));
        assert!(f.cx.document.query_class(lightbox::OVERLAY_CLASS).is_empty());
        assert!(f.site.open_lightboxes().is_empty());
    }

    #[test]
    fn test_lightbox_overlay_click_closes() {
        let mut f = fixture();
        f.site.handle_event(&DomEvent::Click { target: f.image }, &mut f.cx);
        let overlay = f.cx.document.query_class(lightbox::OVERLAY_CLASS)[0];
        let enlarged = f.cx.document.query_tag("img").into_iter().last().expect("img");
        assert_eq!(f.cx.document.attr(enlarged, "alt"), Some("Black marlin"));

        f.site.handle_event(&DomEvent::Click { target: enlarged }, &mut f.cx);
        run_timers(&mut f, Duration::from_millis(300));
        assert!(!f.cx.document.contains(overlay));
    }

    #[test]
    fn test_resize_is_debounced() {
        let mut f = fixture();
        let rx = f.cx.bus.subscribe();
        for width in [900, 800, 700] {
            f.cx.window.set_inner_width(width);
            f.site.handle_event(&DomEvent::Resize { width }, &mut f.cx);
            run_timers(&mut f, Duration::from_millis(100));
        }
        assert!(rx.try_recv().is_err());

        run_timers(&mut f, Duration::from_millis(250));
        assert!(matches!(rx.try_recv(), Ok(PageEvent::ViewportSettled { width: 700 })));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_card_animates_once() {
        let mut f = fixture();
        f.site.handle_event(&DomEvent::Intersect { target: f.card }, &mut f.cx);
        assert!(f.cx.document.has_class(f.card, ANIMATE_IN_CLASS));

        f.cx.document.remove_class(f.card, ANIMATE_IN_CLASS);
        f.site.handle_event(&DomEvent::Intersect { target: f.card }, &mut f.cx);
        assert!(!f.cx.document.has_class(f.card, ANIMATE_IN_CLASS));
    }

    #[test]
    fn test_visibility_pauses_animations() {
        let mut f = fixture();
        let body = f.cx.document.body();
        f.site
            .handle_event(&DomEvent::VisibilityChange { hidden: true }, &mut f.cx);
        assert_eq!(f.cx.document.style(body, "animation-play-state"), Some("paused"));
        f.site
            .handle_event(&DomEvent::VisibilityChange { hidden: false }, &mut f.cx);
        assert_eq!(f.cx.document.style(body, "animation-play-state"), None);
    }

    #[test]
    fn test_weather_follows_language() {
        let mut f = fixture();
        let wind = f.cx.document.query_attr("data-weather")[0];
        assert_eq!(f.cx.document.text(wind), "15 knots E");

        switch_to_spanish(&mut f);
        assert_eq!(f.cx.document.text(wind), "15 nudos E");
    }

    #[test]
    fn test_page_view_is_tracked() {
        let mut f = fixture();
        let rx = f.cx.bus.subscribe();
        f.site.on_page_event(
            &PageEvent::PageView {
                page_name: "contact".into(),
                page_url: "https://pacificpanama.test/pages/contact.html".into(),
            },
            &mut f.cx,
        );
        match rx.try_recv() {
            Ok(PageEvent::Tracked { name, params, .. }) => {
                assert_eq!(name, "page_view");
                assert_eq!(params["page_name"], "contact");
            }
            other => panic!("expected Tracked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_call_without_backend() {
        let f = fixture();
        let result = f.site.api_call("bookings", RequestOptions::default()).await;
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }
}
