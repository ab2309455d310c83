//! Navigation State - Page Names and Session Snapshot

use serde::{Deserialize, Serialize};

/// Navigation snapshot kept in the session store across reloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedNavState {
    #[serde(default)]
    pub current_page: Option<String>,
    #[serde(default)]
    pub scroll_position: f64,
}

/// Page name for a location path: `/` and `index.html` are `home`,
/// otherwise the file name without `.html`
pub fn page_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or_default();
    if file.is_empty() || file == "index.html" {
        return "home".to_string();
    }
    strip_html(file).to_string()
}

/// Page name an `href` points at; an empty file name is `home`
pub fn page_from_href(href: &str) -> String {
    let file = href.rsplit('/').next().unwrap_or_default();
    let name = strip_html(file);
    if name.is_empty() {
        "home".to_string()
    } else {
        name.to_string()
    }
}

/// Page name a nav link's `href` refers to, without the `home` substitution
pub fn link_page_name(href: &str) -> &str {
    strip_html(href.rsplit('/').next().unwrap_or_default())
}

/// Whether a nav link for `link_page` represents `page` (`home` ≡ `index`)
pub fn link_matches_page(link_page: &str, page: &str) -> bool {
    link_page == page || (page == "home" && link_page == "index")
}

/// Links handled in-page rather than by the browser
pub fn is_internal_href(href: &str) -> bool {
    !href.is_empty()
        && !href.starts_with("http")
        && !href.starts_with("tel:")
        && !href.starts_with("mailto:")
}

fn strip_html(file: &str) -> &str {
    file.strip_suffix(".html").unwrap_or(file)
}
