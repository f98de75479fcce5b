//! XDG directory helpers for config/data locations.

use std::path::PathBuf;

/// Base directory for persistent data.
///
/// Uses `CKS_DATA_DIR` if set, otherwise `$XDG_DATA_HOME/checklist-sync` or
/// `~/.local/share/checklist-sync`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CKS_DATA_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_DATA_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".local")
                .join("share")
        })
        .join("checklist-sync")
}

/// Local snapshot blobs.
pub fn local_dir() -> PathBuf {
    data_dir().join("local")
}

/// Default directory-backed remote.
pub fn remote_dir() -> PathBuf {
    data_dir().join("remote")
}

pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Base directory for configuration files.
///
/// Uses `CKS_CONFIG_DIR` if set, otherwise `$XDG_CONFIG_HOME/checklist-sync`
/// or `~/.config/checklist-sync`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CKS_CONFIG_DIR")
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".config")
        })
        .join("checklist-sync")
}
