//! Notifications - Transient Toast Messages

use serde::Serialize;
use tracing::debug;

use crate::app::context::{PageContext, SiteTimer};
use crate::dom::ElementId;
use crate::domain::config::TimingConfig;

pub const NOTIFICATION_CLASS: &str = "notification";

/// Visual style of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

/// Replace any visible notification with a new one and schedule its dismissal
pub fn show(
    cx: &mut PageContext,
    timing: &TimingConfig,
    message: &str,
    kind: NotificationKind,
) -> ElementId {
    for existing in cx.document.query_class(NOTIFICATION_CLASS) {
        cx.document.remove(existing);
    }

    let body = cx.document.body();
    let class = format!("{NOTIFICATION_CLASS} {NOTIFICATION_CLASS}-{}", kind.as_str());
    let notification = cx
        .document
        .build("div")
        .class(&class)
        .attr("role", "alert")
        .text(message)
        .append_to(body);

    cx.schedule_site(
        timing.notification_dismiss(),
        SiteTimer::NotificationFade { notification },
    );
    debug!(kind = kind.as_str(), message, "Notification shown");
    notification
}

/// Start the fade-out; removal follows once the transition ends
pub fn fade(cx: &mut PageContext, timing: &TimingConfig, notification: ElementId) {
    if !cx.document.contains(notification) {
        return;
    }
    cx.document.set_style(notification, "opacity", "0");
    cx.schedule_site(
        timing.notification_fade(),
        SiteTimer::NotificationRemove { notification },
    );
}

pub fn remove(cx: &mut PageContext, notification: ElementId) {
    if cx.document.contains(notification) {
        cx.document.remove(notification);
    }
}
