//! PageContext - Shared Page Resources
//!
//! Everything a component callback may touch, passed explicitly instead of
//! through globals.

use crate::dom::{Document, ElementId, Scheduler, TimerId, Window};
use crate::eventing::EventBus;
use crate::services::{Analytics, KeyValueStore};

/// Delayed work owned by the site controller
#[derive(Debug, Clone, PartialEq)]
pub enum SiteTimer {
    /// Fade a new lightbox in
    LightboxShow { overlay: ElementId, image: ElementId },
    /// Detach a faded-out lightbox
    LightboxRemove { overlay: ElementId },
    /// Start fading a notification out
    NotificationFade { notification: ElementId },
    /// Detach a faded-out notification
    NotificationRemove { notification: ElementId },
    /// The simulated submission request finished
    SubmitComplete {
        request_id: String,
        form: ElementId,
        button: Option<ElementId>,
        original_label: String,
    },
    /// No resize event arrived during the debounce window
    ResizeSettled,
}

/// Delayed work owned by the navigation manager
#[derive(Debug, Clone, PartialEq)]
pub enum NavTimer {
    /// Apply a restored scroll offset once layout has settled
    RestoreScroll { y: f64 },
}

/// A scheduled task, routed to its owning component when due
#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    Site(SiteTimer),
    Navigation(NavTimer),
}

/// Resources shared by the page components
#[derive(Debug)]
pub struct PageContext {
    pub document: Document,
    pub window: Window,
    pub timers: Scheduler<TimerTask>,
    pub bus: EventBus,
    pub local_store: Box<dyn KeyValueStore>,
    pub session_store: Box<dyn KeyValueStore>,
    pub analytics: Box<dyn Analytics>,
    default_prevented: bool,
}

impl PageContext {
    pub fn new(
        document: Document,
        window: Window,
        local_store: Box<dyn KeyValueStore>,
        session_store: Box<dyn KeyValueStore>,
        analytics: Box<dyn Analytics>,
    ) -> Self {
        Self {
            document,
            window,
            timers: Scheduler::new(),
            bus: EventBus::new(),
            local_store,
            session_store,
            analytics,
            default_prevented: false,
        }
    }

    pub fn schedule_site(&mut self, delay: std::time::Duration, timer: SiteTimer) -> TimerId {
        self.timers.schedule(delay, TimerTask::Site(timer))
    }

    pub fn schedule_navigation(&mut self, delay: std::time::Duration, timer: NavTimer) -> TimerId {
        self.timers.schedule(delay, TimerTask::Navigation(timer))
    }

    /// `event.preventDefault()` for the event being dispatched
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn begin_dispatch(&mut self) {
        self.default_prevented = false;
    }
}
