use std::path::PathBuf;

use dirs::preference_dir;

pub fn base_path() -> PathBuf {
    preference_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mazepath")
}

pub fn settings_path() -> PathBuf {
    base_path().join("settings.ron")
}
