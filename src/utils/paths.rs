//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application directory and config file.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Boundary Guard directory (~/.boundary-guard/)
pub fn boundary_guard_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".boundary-guard"))
}

/// Get the config file path (~/.boundary-guard/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(boundary_guard_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Boundary Guard directory, creating if it doesn't exist
pub fn ensure_boundary_guard_dir() -> AppResult<PathBuf> {
    let path = boundary_guard_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
