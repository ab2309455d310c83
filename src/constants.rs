//! Site Constants
//!
//! Defaults for thresholds, delays and storage keys. `SiteConfig` starts from these.

/// Local storage key for the language preference
pub const LANGUAGE_STORAGE_KEY: &str = "pacific-panama-language";

/// Session storage key for the navigation state
pub const NAV_STATE_STORAGE_KEY: &str = "pacific-panama-nav-state";

/// Scroll offset past which the navbar switches to its solid style
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 100.0;

/// Hero translation per scrolled pixel
pub const PARALLAX_RATE: f64 = -0.5;

/// Viewport width above which the mobile menu is closed
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Offset subtracted when scrolling to an anchor target
pub const ANCHOR_SCROLL_OFFSET: f64 = 80.0;

/// Delays in milliseconds
pub const LIGHTBOX_OPEN_DELAY_MS: u64 = 10;
pub const LIGHTBOX_CLOSE_DELAY_MS: u64 = 300;
pub const NOTIFICATION_DISMISS_MS: u64 = 5000;
pub const NOTIFICATION_FADE_MS: u64 = 300;
pub const SUBMIT_DELAY_MS: u64 = 2000;
pub const RESIZE_DEBOUNCE_MS: u64 = 250;
pub const SCROLL_RESTORE_DELAY_MS: u64 = 100;

/// Error accent used on invalid fields
pub const ERROR_COLOR: &str = "#e74c3c";
