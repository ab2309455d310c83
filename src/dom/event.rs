//! DomEvent - Browser Events Delivered to the Page

use super::document::ElementId;
use super::window::HistoryState;

/// A browser event, already resolved to its target element
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    /// Mouse click on an element
    Click { target: ElementId },

    /// The page scrolled to a new offset
    Scroll { y: f64 },

    /// A form field's value changed
    Input { target: ElementId, value: String },

    Focus { target: ElementId },

    Blur { target: ElementId },

    /// A form was submitted
    Submit { form: ElementId },

    /// The viewport was resized
    Resize { width: u32 },

    /// Key press; `target` is the focused element, if any
    KeyDown {
        key: String,
        target: Option<ElementId>,
    },

    /// The page became hidden or visible
    VisibilityChange { hidden: bool },

    /// Back/forward navigation
    PopState {
        path: String,
        state: Option<HistoryState>,
    },

    /// An element scrolled into the viewport
    Intersect { target: ElementId },

    /// The page is about to unload
    BeforeUnload,
}

impl DomEvent {
    pub fn key(key: impl Into<String>) -> Self {
        Self::KeyDown {
            key: key.into(),
            target: None,
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            DomEvent::Click { .. } => "click",
            DomEvent::Scroll { .. } => "scroll",
            DomEvent::Input { .. } => "input",
            DomEvent::Focus { .. } => "focus",
            DomEvent::Blur { .. } => "blur",
            DomEvent::Submit { .. } => "submit",
            DomEvent::Resize { .. } => "resize",
            DomEvent::KeyDown { .. } => "keydown",
            DomEvent::VisibilityChange { .. } => "visibilitychange",
            DomEvent::PopState { .. } => "popstate",
            DomEvent::Intersect { .. } => "intersect",
            DomEvent::BeforeUnload => "beforeunload",
        }
    }
}
