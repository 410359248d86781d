//! Locally persisted drawer settings.
//!
//! A single RON file holding the remembered panel width, the sidebar
//! collapsed flag, and the set of collapsed folder paths. No schema
//! versioning; a corrupt file degrades to defaults with a warning.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerSettings {
    pub panel_width: u32,
    pub sidebar_collapsed: bool,
    pub collapsed_folders: HashSet<String>,
}

impl Default for DrawerSettings {
    fn default() -> Self {
        Self {
            panel_width: defaults::PANEL_WIDTH,
            sidebar_collapsed: false,
            collapsed_folders: HashSet::new(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    settings: DrawerSettings,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: PathBuf) -> Self {
        let settings = match fs::read_to_string(&path) {
            Ok(raw) => match ron::from_str(&raw) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {:?}: {}", path, e);
                    DrawerSettings::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => DrawerSettings::default(),
            Err(e) => {
                log::warn!("Could not read settings file {:?}: {}", path, e);
                DrawerSettings::default()
            }
        };

        Self { path, settings }
    }

    pub fn get(&self) -> &DrawerSettings {
        &self.settings
    }

    /// Apply a mutation and rewrite the file.
    pub fn update(&mut self, apply: impl FnOnce(&mut DrawerSettings)) -> Result<(), String> {
        apply(&mut self.settings);
        self.persist()
    }

    /// Flip one folder path's collapsed state and persist. Returns whether
    /// the folder is collapsed afterwards.
    pub fn toggle_folder(&mut self, path: &str) -> Result<bool, String> {
        let collapsed = if self.settings.collapsed_folders.remove(path) {
            false
        } else {
            self.settings.collapsed_folders.insert(path.to_string());
            true
        };
        self.persist()?;
        Ok(collapsed)
    }

    fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Create settings directory: {}", e))?;
        }
        let raw = ron::ser::to_string_pretty(&self.settings, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Encode settings: {}", e))?;
        fs::write(&self.path, raw).map_err(|e| format!("Write settings file: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("settings.ron"));
        assert_eq!(store.get().panel_width, defaults::PANEL_WIDTH);
        assert!(!store.get().sidebar_collapsed);
        assert!(store.get().collapsed_folders.is_empty());
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ron");

        let mut store = SettingsStore::load(path.clone());
        store
            .update(|s| {
                s.panel_width = 720;
                s.sidebar_collapsed = true;
            })
            .unwrap();

        let reloaded = SettingsStore::load(path);
        assert_eq!(reloaded.get().panel_width, 720);
        assert!(reloaded.get().sidebar_collapsed);
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "not ron at all {{{").unwrap();

        let store = SettingsStore::load(path);
        assert_eq!(store.get().panel_width, defaults::PANEL_WIDTH);
    }

    #[test]
    fn folder_toggle_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.ron");

        let mut store = SettingsStore::load(path.clone());
        assert!(store.toggle_folder("Work/Archive").unwrap());
        assert!(!store.toggle_folder("Work/Archive").unwrap());
        assert!(store.toggle_folder("Play").unwrap());

        let reloaded = SettingsStore::load(path);
        assert!(reloaded.get().collapsed_folders.contains("Play"));
        assert!(!reloaded.get().collapsed_folders.contains("Work/Archive"));
    }
}
