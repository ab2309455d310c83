//! Analytics - Page View and Event Sink
//!
//! Integration point for an external tracker. Without one, events are logged.

use serde_json::Value;
use tracing::info;

/// Receives analytics calls from the page
pub trait Analytics: std::fmt::Debug {
    /// Page configuration call (`gtag('config', ...)`)
    fn page_config(&mut self, page_title: &str, page_location: &str);

    /// Custom event
    fn event(&mut self, name: &str, params: &Value);
}

/// Fallback sink that writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn page_config(&mut self, page_title: &str, page_location: &str) {
        info!(page_title, page_location, "Analytics page config");
    }

    fn event(&mut self, name: &str, params: &Value) {
        info!(event = name, params = %params, "Event tracked");
    }
}
