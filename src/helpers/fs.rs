//! File System Utilities
//!
//! Configuration and data directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "pacific-panama", "pacific-panama-site").ok_or_else(|| {
        Error::Invalid {
            message: "Could not determine project directories".to_string(),
        }
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/pacific-panama-site/` or `$XDG_CONFIG_HOME/pacific-panama-site/`
/// - **macOS**: `~/Library/Application Support/com.pacific-panama.pacific-panama-site/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\pacific-panama\pacific-panama-site\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Get the data directory used for persistent page storage
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/pacific-panama-site/`
/// - **macOS**: `~/Library/Application Support/com.pacific-panama.pacific-panama-site/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\pacific-panama\pacific-panama-site\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

/// Default location of the site configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join("site.toml"))
}
