use crate::resources::NavigationSettings;
use crate::simulation::errors::{CrowdNavError, CrowdNavResult};
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

pub mod range_types;

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("crowdnav");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Load settings from the user config file, falling back to defaults
pub fn load_config() -> NavigationSettings {
    match get_config_path() {
        Some(path) if path.exists() => load_config_from(&path).unwrap_or_else(|e| {
            warn!("Ignoring config at {}: {e}", path.display());
            NavigationSettings::default()
        }),
        _ => NavigationSettings::default(),
    }
}

pub fn load_config_from(path: &Path) -> CrowdNavResult<NavigationSettings> {
    let contents = fs::read_to_string(path)?;
    let settings = toml::from_str::<NavigationSettings>(&contents)?;
    Ok(settings.sanitized())
}

pub fn save_config(settings: &NavigationSettings) -> CrowdNavResult<()> {
    let path = get_config_path().ok_or(CrowdNavError::ConfigDirNotFound)?;
    save_config_to(settings, &path)
}

pub fn save_config_to(settings: &NavigationSettings, path: &Path) -> CrowdNavResult<()> {
    let contents = toml::to_string_pretty(settings)?;
    fs::write(path, contents)?;
    Ok(())
}
