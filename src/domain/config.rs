//! Config - Site Configuration
//!
//! Tunables for the page components. Every field has a default, so a partial
//! TOML file only needs the values it overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::*;
use crate::error::Result;

/// Main site configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Storage keys
    pub storage: StorageConfig,
    /// Scroll and layout thresholds
    pub layout: LayoutConfig,
    /// Timer delays
    pub timing: TimingConfig,
    /// Booking backend
    pub api: ApiConfig,
}

/// Keys used in the local and session stores
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Language preference key (local store)
    pub language_key: String,
    /// Navigation state key (session store)
    pub nav_state_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            language_key: LANGUAGE_STORAGE_KEY.to_string(),
            nav_state_key: NAV_STATE_STORAGE_KEY.to_string(),
        }
    }
}

/// Scroll and layout thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub navbar_scroll_threshold: f64,
    pub parallax_rate: f64,
    pub mobile_breakpoint: u32,
    pub anchor_scroll_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold: NAVBAR_SCROLL_THRESHOLD,
            parallax_rate: PARALLAX_RATE,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            anchor_scroll_offset: ANCHOR_SCROLL_OFFSET,
        }
    }
}

/// Timer delays in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub lightbox_open_ms: u64,
    pub lightbox_close_ms: u64,
    pub notification_dismiss_ms: u64,
    pub notification_fade_ms: u64,
    pub submit_delay_ms: u64,
    pub resize_debounce_ms: u64,
    pub scroll_restore_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            lightbox_open_ms: LIGHTBOX_OPEN_DELAY_MS,
            lightbox_close_ms: LIGHTBOX_CLOSE_DELAY_MS,
            notification_dismiss_ms: NOTIFICATION_DISMISS_MS,
            notification_fade_ms: NOTIFICATION_FADE_MS,
            submit_delay_ms: SUBMIT_DELAY_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            scroll_restore_ms: SCROLL_RESTORE_DELAY_MS,
        }
    }
}

/// Backend used by the generic API helper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL requests are resolved against; unset disables the helper
    pub base_url: Option<String>,
}

impl TimingConfig {
    pub fn lightbox_open(&self) -> Duration {
        Duration::from_millis(self.lightbox_open_ms)
    }

    pub fn lightbox_close(&self) -> Duration {
        Duration::from_millis(self.lightbox_close_ms)
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }

    pub fn notification_fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn scroll_restore(&self) -> Duration {
        Duration::from_millis(self.scroll_restore_ms)
    }
}

impl SiteConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(value)?)
    }

    /// Load a configuration file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = ?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        Self::from_toml_str(&value)
    }
}
