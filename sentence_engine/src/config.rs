//! Game configuration.
//!
//! Settings come from `data/config.toml`, optionally overridden by the same
//! file under the user's config directory. Missing or broken files never stop
//! the game: the loader logs a warning and falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data_paths::data_path;

pub const CONFIG_FILE: &str = "config.toml";
/// Directory name under the platform config dir.
pub const SHORT_NAME: &str = "suspended-sentence";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub start_scene: String,
    pub sound: bool,
    /// Outline hit regions when drawing.
    pub debug_rects: bool,
    /// Translation catalog, relative to the data directory.
    pub locale: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Suspended Sentence".to_string(),
            start_scene: "cryo".to_string(),
            sound: true,
            debug_rects: false,
            locale: None,
        }
    }
}

/// Fields a user override may set. Anything left out keeps the base value.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    title: Option<String>,
    start_scene: Option<String>,
    sound: Option<bool>,
    debug_rects: Option<bool>,
    locale: Option<String>,
}

impl GameConfig {
    fn apply(&mut self, over: ConfigOverride) {
        if let Some(title) = over.title {
            self.title = title;
        }
        if let Some(start_scene) = over.start_scene {
            self.start_scene = start_scene;
        }
        if let Some(sound) = over.sound {
            self.sound = sound;
        }
        if let Some(debug_rects) = over.debug_rects {
            self.debug_rects = debug_rects;
        }
        if over.locale.is_some() {
            self.locale = over.locale;
        }
    }
}

/// Path of the per-user override file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SHORT_NAME).join(CONFIG_FILE))
}

/// Load the shipped config and any user override.
pub fn load_config() -> GameConfig {
    load_config_from(&data_path(CONFIG_FILE), user_config_path().as_deref())
}

/// Load `base`, then apply `user` on top if it exists.
///
/// Never fails; unreadable files are logged and skipped.
pub fn load_config_from(base: &Path, user: Option<&Path>) -> GameConfig {
    let mut config = match try_load_config(base) {
        Ok(config) => {
            info!("game config loaded from '{}'", base.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load game config from '{}': {e:#}. Using defaults.",
                base.display()
            );
            GameConfig::default()
        },
    };

    if let Some(user) = user.filter(|path| path.is_file()) {
        match try_load_override(user) {
            Ok(over) => {
                info!("user config override applied from '{}'", user.display());
                config.apply(over);
            },
            Err(e) => warn!("Ignoring user config '{}': {e:#}", user.display()),
        }
    }
    config
}

fn try_load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config from '{}'", path.display()))
}

fn try_load_override(path: &Path) -> Result<ConfigOverride> {
    let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config from '{}'", path.display()))
}
