//! Configuration model and JSON persistence.
//!
//! The on-disk format mirrors the struct layout with camelCase keys:
//!
//! ```json
//! {
//!   "reverseMouseScroll": true,
//!   "reverseTrackpadScroll": false,
//!   "buttonMappings": [
//!     { "button": 3, "action": { "type": "key", "keyCode": 124, "modifiers": ["control"] } }
//!   ]
//! }
//! ```
//!
//! Loading only guarantees the file is well-typed. Semantically broken
//! entries (unknown action types, missing key codes) are dealt with when the
//! action table is built, see [`crate::action::ActionTable::build`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delay between the synthesized key-down and key-up, in milliseconds.
pub const DEFAULT_KEY_COMBO_DELAY_MS: u64 = 10;

/// Immutable settings snapshot handed to the remapping core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Reverse the vertical axis of discrete wheel scrolling.
    #[serde(default = "default_true")]
    pub reverse_mouse_scroll: bool,
    /// Reverse the vertical axis of continuous (trackpad) scrolling.
    #[serde(default)]
    pub reverse_trackpad_scroll: bool,
    /// Button mappings; later entries for the same button win.
    #[serde(default)]
    pub button_mappings: Vec<ButtonMapping>,
    /// Gap between synthesized key-down and key-up.
    #[serde(default = "default_key_delay")]
    pub key_combo_delay_ms: u64,
}

/// One physical button and what it should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMapping {
    pub button: u32,
    pub action: ActionConfig,
}

/// Declarative action description as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfig {
    /// One of `"key"`, `"mouse"` or `"passthrough"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_button: Option<u32>,
}

fn default_true() -> bool {
    true
}

fn default_key_delay() -> u64 {
    DEFAULT_KEY_COMBO_DELAY_MS
}

impl ActionConfig {
    /// A `"key"` action sending `key_code` with the named modifiers.
    pub fn key(key_code: u16, modifiers: &[&str]) -> Self {
        Self {
            kind: "key".into(),
            key_code: Some(key_code),
            modifiers: Some(modifiers.iter().map(|m| m.to_string()).collect()),
            mouse_button: None,
        }
    }

    /// A `"mouse"` action remapping to `button`.
    pub fn mouse(button: u32) -> Self {
        Self {
            kind: "mouse".into(),
            key_code: None,
            modifiers: None,
            mouse_button: Some(button),
        }
    }

    /// A `"passthrough"` action.
    pub fn passthrough() -> Self {
        Self {
            kind: "passthrough".into(),
            key_code: None,
            modifiers: None,
            mouse_button: None,
        }
    }
}

impl Default for Config {
    /// Back/forward buttons switch spaces (Ctrl+Right / Ctrl+Left) and the
    /// wheel scrolls in reverse.
    fn default() -> Self {
        Self {
            reverse_mouse_scroll: true,
            reverse_trackpad_scroll: false,
            button_mappings: vec![
                ButtonMapping {
                    button: 3,
                    action: ActionConfig::key(124, &["control"]),
                },
                ButtonMapping {
                    button: 4,
                    action: ActionConfig::key(123, &["control"]),
                },
            ],
            key_combo_delay_ms: DEFAULT_KEY_COMBO_DELAY_MS,
        }
    }
}

impl Config {
    /// `~/.config/mouse-remapper/config.json`, or a relative path when no
    /// home directory can be resolved.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".config")
            .join("mouse-remapper")
            .join("config.json")
    }

    /// Key-down to key-up gap as a [`Duration`].
    pub fn key_combo_delay(&self) -> Duration {
        Duration::from_millis(self.key_combo_delay_ms)
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Strictly load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source: std::io::Error| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = self.to_json().map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json + "\n").map_err(io_err)
    }

    /// Load the config at `path` (or the default path), never failing.
    ///
    /// A missing file is created with the default config. A file that can't
    /// be read or parsed is left alone and the default config is used.
    pub fn load_or_create(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            let config = Self::default();
            match config.save(&path) {
                Ok(()) => log::info!("Created default config at: {}", path.display()),
                Err(e) => log::error!("Error saving default config: {}", e),
            }
            return config;
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from: {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Error loading config: {}", e);
                log::warn!("Using default config");
                Self::default()
            }
        }
    }
}
