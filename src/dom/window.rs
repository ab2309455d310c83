//! Window - Viewport, Location and History

use serde::{Deserialize, Serialize};

/// State stored with a history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub page: String,
}

/// One entry of the session history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub path: String,
    pub state: Option<HistoryState>,
}

/// How a scroll request should be animated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The browser window as seen by the page components
#[derive(Debug, Clone)]
pub struct Window {
    origin: String,
    path: String,
    inner_width: u32,
    scroll_y: f64,
    history: Vec<HistoryEntry>,
    hidden: bool,
    last_scroll_behavior: Option<ScrollBehavior>,
}

impl Window {
    pub fn new(origin: impl Into<String>, path: impl Into<String>, inner_width: u32) -> Self {
        let path = normalize_path(&path.into());
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            history: vec![HistoryEntry {
                path: path.clone(),
                state: None,
            }],
            path,
            inner_width,
            scroll_y: 0.0,
            hidden: false,
            last_scroll_behavior: None,
        }
    }

    /// `location.pathname`
    pub fn pathname(&self) -> &str {
        &self.path
    }

    /// `location.href`
    pub fn href(&self) -> String {
        format!("{}{}", self.origin, self.path)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Set the location without touching history (back/forward, reloads)
    pub fn set_location(&mut self, path: &str) {
        self.path = normalize_path(path);
    }

    pub fn inner_width(&self) -> u32 {
        self.inner_width
    }

    pub fn set_inner_width(&mut self, width: u32) {
        self.inner_width = width;
    }

    /// `window.pageYOffset`
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.scroll_y = y.max(0.0);
        self.last_scroll_behavior = Some(behavior);
    }

    /// Record a user scroll (no behavior, the user moved the page)
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    /// `history.pushState(state, '', href)`
    pub fn push_state(&mut self, state: HistoryState, href: &str) {
        let path = resolve_path(&self.path, href);
        self.history.push(HistoryEntry {
            path: path.clone(),
            state: Some(state),
        });
        self.path = path;
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Resolve `href` against the directory of `base`, the way relative links are
pub fn resolve_path(base: &str, href: &str) -> String {
    let href = href.split(['?', '#']).next().unwrap_or_default();
    if href.starts_with('/') {
        return href.to_string();
    }

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    // Drop the file part of the base path
    if !base.ends_with('/') {
        segments.pop();
    }

    for part in href.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut resolved = format!("/{}", segments.join("/"));
    if href.ends_with('/') && resolved.len() > 1 {
        resolved.push('/');
    }
    resolved
}
