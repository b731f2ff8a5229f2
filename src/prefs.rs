//! Persisted preferences: theme and the upscaling server address.
//!
//! Stored as JSON under the platform config directory. A missing or
//! unreadable file yields defaults; persistence failures are logged and never
//! interrupt the UI.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

impl ThemeChoice {
    pub fn toggled(self) -> Self {
        match self {
            ThemeChoice::Light => ThemeChoice::Dark,
            ThemeChoice::Dark => ThemeChoice::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeChoice::Dark
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub theme: ThemeChoice,
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::Light,
            server_url: default_server_url(),
        }
    }
}

fn prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("upscale_studio").join("prefs.json"))
}

pub fn load() -> Prefs {
    match prefs_path() {
        Some(path) => load_from(&path),
        None => Prefs::default(),
    }
}

pub fn save(prefs: &Prefs) -> Result<()> {
    let path = prefs_path().context("no config directory available")?;
    save_to(prefs, &path)
}

fn load_from(path: &Path) -> Prefs {
    fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default()
}

fn save_to(prefs: &Prefs, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(prefs)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
