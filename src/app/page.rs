//! Page - Default Page Skeleton
//!
//! The markup every site page shares (navbar, breadcrumb, hero, weather
//! widget, cards, gallery and booking form) as a [`Document`].

use crate::dom::{Document, ElementId};
use crate::features::language::LANGUAGE_TOGGLE_ID;
use crate::features::navigation::{MOBILE_MENU_BUTTON_ID, NAV_LINK_CLASS, NAV_MENU_CLASS};

use super::navigation::SitePage;

/// Id of the booking form in the default skeleton
pub const BOOKING_FORM_ID: &str = "booking-form";

/// `href` of `target` as written on a page living at `from`
pub fn relative_href(from: SitePage, target: SitePage) -> String {
    match (from, target) {
        (SitePage::Home, _) => target.url().to_string(),
        (_, SitePage::Home) => format!("../{}", target.url()),
        _ => target.url().trim_start_matches("pages/").to_string(),
    }
}

/// Location path of a page relative to the site root
pub fn page_path(page: SitePage) -> String {
    format!("/{}", page.url())
}

/// Build the skeleton for `page`
pub fn build_page(page: SitePage) -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    build_navbar(&mut doc, body, page);
    doc.build("nav").class("breadcrumb").append_to(body);
    build_hero(&mut doc, body);
    build_weather_widget(&mut doc, body);
    build_charters(&mut doc, body);
    build_species(&mut doc, body);
    build_gallery(&mut doc, body);
    build_booking_form(&mut doc, body);

    doc
}

fn build_navbar(doc: &mut Document, body: ElementId, page: SitePage) {
    let navbar = doc.build("nav").class("navbar").append_to(body);
    doc.build("a")
        .class("logo")
        .attr("href", &relative_href(page, SitePage::Home))
        .text("Pacific Panama Fishing")
        .append_to(navbar);
    doc.build("button")
        .id(MOBILE_MENU_BUTTON_ID)
        .attr("aria-expanded", "false")
        .text("☰")
        .append_to(navbar);

    let menu = doc.build("ul").class(NAV_MENU_CLASS).append_to(navbar);
    for target in SitePage::all() {
        let item = doc.build("li").append_to(menu);
        doc.build("a")
            .class(NAV_LINK_CLASS)
            .attr("href", &relative_href(page, *target))
            .attr("data-translate", target.title_key())
            .append_to(item);
    }

    doc.build("button")
        .id(LANGUAGE_TOGGLE_ID)
        .text("EN | ES")
        .append_to(navbar);
}

fn build_hero(doc: &mut Document, body: ElementId) {
    let hero = doc.build("section").class("hero").append_to(body);
    doc.build("a")
        .class("btn btn-primary")
        .attr("href", "#charters")
        .attr("data-translate", "common.book-now")
        .append_to(hero);
    doc.build("a")
        .class("btn btn-secondary")
        .attr("href", "tel:+15551234567")
        .attr("data-translate", "common.call-now")
        .append_to(hero);
}

fn build_weather_widget(doc: &mut Document, body: ElementId) {
    let widget = doc.build("div").class("weather-widget").append_to(body);
    for field in ["condition", "temp", "wind", "waves"] {
        doc.build("span").attr("data-weather", field).append_to(widget);
    }
}

fn build_charters(doc: &mut Document, body: ElementId) {
    let section = doc
        .build("section")
        .id("charters")
        .attr("data-offset-top", "900")
        .append_to(body);
    for key in ["charter.half-day", "charter.full-day", "charter.multi-day"] {
        let card = doc.build("div").class("charter-card").append_to(section);
        doc.build("h3").attr("data-translate", key).append_to(card);
    }
}

fn build_species(doc: &mut Document, body: ElementId) {
    let section = doc
        .build("section")
        .id("species")
        .attr("data-offset-top", "1800")
        .append_to(body);
    for (key, image, alt) in [
        ("fish.blue-marlin", "blue-marlin.jpg", "Blue marlin"),
        ("fish.sailfish", "sailfish.jpg", "Pacific sailfish"),
        ("fish.yellowfin-tuna", "yellowfin-tuna.jpg", "Yellowfin tuna"),
        ("fish.roosterfish", "roosterfish.jpg", "Roosterfish"),
    ] {
        let card = doc.build("div").class("species-card").append_to(section);
        doc.build("img")
            .class("species-image")
            .attr("src", &format!("images/species/{image}"))
            .attr("alt", alt)
            .append_to(card);
        doc.build("h3").attr("data-translate", key).append_to(card);
    }
}

fn build_gallery(doc: &mut Document, body: ElementId) {
    let section = doc.build("section").class("gallery").append_to(body);
    for n in 1..=3 {
        doc.build("img")
            .class("gallery-image")
            .attr("src", &format!("images/gallery/catch-{n}.jpg"))
            .attr("alt", &format!("Catch {n}"))
            .append_to(section);
    }
}

fn build_booking_form(doc: &mut Document, body: ElementId) {
    let form = doc.build("form").id(BOOKING_FORM_ID).append_to(body);

    let fields = [
        ("input", "text", "name", "form.name", true),
        ("input", "email", "email", "form.email", true),
        ("input", "tel", "phone", "form.phone", true),
        ("input", "date", "date", "form.date", false),
        ("textarea", "", "message", "form.message", false),
    ];
    for (tag, kind, name, key, required) in fields {
        let group = doc.build("div").class("form-group").append_to(form);
        doc.build("label").attr("data-translate", key).append_to(group);
        let mut field = doc
            .build(tag)
            .id(name)
            .attr("name", name)
            .attr("data-placeholder", key);
        if !kind.is_empty() {
            field = field.attr("type", kind);
        }
        if required {
            field = field.attr("required", "");
        }
        field.append_to(group);
    }

    doc.build("button")
        .attr("type", "submit")
        .attr("data-translate", "form.submit")
        .text("Send Message")
        .append_to(form);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_hrefs() {
        assert_eq!(relative_href(SitePage::Home, SitePage::Contact), "pages/contact.html");
        assert_eq!(relative_href(SitePage::Contact, SitePage::Home), "../index.html");
        assert_eq!(relative_href(SitePage::Gallery, SitePage::Species), "species.html");
        assert_eq!(page_path(SitePage::CatchLog), "/pages/catch-log.html");
    }

    #[test]
    fn test_skeleton_structure() {
        let doc = build_page(SitePage::Species);
        assert_eq!(doc.query_class(NAV_LINK_CLASS).len(), SitePage::all().len());
        assert!(doc.get_element_by_id(MOBILE_MENU_BUTTON_ID).is_some());
        assert!(doc.get_element_by_id(LANGUAGE_TOGGLE_ID).is_some());

        let form = doc.get_element_by_id(BOOKING_FORM_ID).expect("form");
        let required = doc.query_within(form, |e| e.is_form_field() && e.is_required());
        assert_eq!(required.len(), 3);
    }
}
