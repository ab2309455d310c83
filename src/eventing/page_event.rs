//! PageEvent - Component-to-Component Notifications
//!
//! Events the page components publish on the [`EventBus`](super::EventBus)
//! instead of reaching into each other's state.

use std::sync::Arc;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::i18n::{Dictionary, Language};

/// Events published by the page components
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// The active language changed (`languageChanged`)
    LanguageChanged {
        language: Language,
        translations: Arc<Dictionary>,
    },

    /// A page view was recorded by the navigation manager
    PageView { page_name: String, page_url: String },

    /// The viewport settled after a resize burst
    ViewportSettled { width: u32 },

    /// A custom analytics event was tracked
    Tracked {
        name: String,
        params: Value,
        timestamp: DateTime<Local>,
    },
}

impl PageEvent {
    /// Create a tracked event with current timestamp
    pub fn tracked(name: impl Into<String>, params: Value) -> Self {
        Self::Tracked {
            name: name.into(),
            params,
            timestamp: Local::now(),
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            PageEvent::LanguageChanged { .. } => "languageChanged",
            PageEvent::PageView { .. } => "pageView",
            PageEvent::ViewportSettled { .. } => "viewportSettled",
            PageEvent::Tracked { .. } => "tracked",
        }
    }
}
