//! Lightbox - Enlarged Image Overlay

use crate::app::context::{PageContext, SiteTimer};
use crate::dom::ElementId;
use crate::domain::config::TimingConfig;

pub const OVERLAY_CLASS: &str = "lightbox-overlay";

/// Images that open in the lightbox when clicked
pub const LIGHTBOX_IMAGE_CLASSES: [&str; 3] = ["species-image", "log-image", "gallery-image"];

pub fn is_lightbox_image(cx: &PageContext, id: ElementId) -> bool {
    LIGHTBOX_IMAGE_CLASSES
        .iter()
        .any(|class| cx.document.has_class(id, class))
}

/// Append a transparent overlay holding a copy of `source`; it fades in shortly after
pub fn open(cx: &mut PageContext, timing: &TimingConfig, source: ElementId) -> ElementId {
    let src = cx.document.attr(source, "src").unwrap_or_default().to_string();
    let alt = cx.document.attr(source, "alt").unwrap_or_default().to_string();

    let body = cx.document.body();
    let overlay = cx.document.build("div").class(OVERLAY_CLASS).append_to(body);
    cx.document.set_style(overlay, "opacity", "0");

    let image = cx
        .document
        .build("img")
        .attr("src", &src)
        .attr("alt", &alt)
        .append_to(overlay);
    cx.document.set_style(image, "transform", "scale(0.8)");

    cx.schedule_site(timing.lightbox_open(), SiteTimer::LightboxShow { overlay, image });
    overlay
}

pub fn show(cx: &mut PageContext, overlay: ElementId, image: ElementId) {
    if !cx.document.contains(overlay) {
        return;
    }
    cx.document.set_style(overlay, "opacity", "1");
    cx.document.set_style(image, "transform", "scale(1)");
}

/// Fade out; a detached overlay is left alone
pub fn close(cx: &mut PageContext, timing: &TimingConfig, overlay: ElementId) {
    if !cx.document.contains(overlay) {
        return;
    }
    cx.document.set_style(overlay, "opacity", "0");
    cx.schedule_site(timing.lightbox_close(), SiteTimer::LightboxRemove { overlay });
}

pub fn remove(cx: &mut PageContext, overlay: ElementId) {
    if cx.document.contains(overlay) {
        cx.document.remove(overlay);
    }
}
