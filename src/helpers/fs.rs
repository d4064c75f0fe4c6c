//! File System Utilities
//!
//! Platform directories for settings, persisted collaborators and log files.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "pokedex", "pokedex-core").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the configuration directory (holds `settings.toml`)
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/pokedex-core/` or `$XDG_CONFIG_HOME/pokedex-core/`
/// - **macOS**: `~/Library/Application Support/dev.pokedex.pokedex-core/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\pokedex\pokedex-core\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Get or create the data directory (favorites, preferences)
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/pokedex-core/`
/// - **macOS**: `~/Library/Application Support/dev.pokedex.pokedex-core/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\pokedex\pokedex-core\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Get or create the log directory under the data directory
pub fn get_or_create_log_dir() -> Result<PathBuf> {
    ensure_dir(&get_or_create_data_dir()?.join("logs"))
}

/// Check if running in development mode
pub fn is_development() -> bool {
    cfg!(debug_assertions)
}
