// SPDX-License-Identifier: MPL-2.0
//! This module handles the scheduler configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use torch_scheduler::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.concurrency_cap = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.concurrency_cap, Some(3));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::domain::scheduling::{
    ConcurrencyCap, CooldownInterval, DisplayDuration, HistoryCapacity, TransitionDuration,
};
use crate::error::Result;
use crate::notifications::{EffectId, Settings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Torch";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub concurrency_cap: Option<usize>,
    #[serde(default)]
    pub display_duration_ms: Option<u64>,
    #[serde(default)]
    pub cooldown_ms: Option<u64>,
    #[serde(default)]
    pub transition_ms: Option<u64>,
    #[serde(default)]
    pub default_enter_effect: Option<u32>,
    #[serde(default)]
    pub default_exit_effect: Option<u32>,
    #[serde(default)]
    pub history_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency_cap: Some(DEFAULT_CONCURRENCY_CAP),
            display_duration_ms: Some(DEFAULT_DISPLAY_DURATION_MS),
            cooldown_ms: Some(DEFAULT_COOLDOWN_MS),
            transition_ms: Some(DEFAULT_TRANSITION_MS),
            default_enter_effect: Some(DEFAULT_ENTER_EFFECT),
            default_exit_effect: Some(DEFAULT_EXIT_EFFECT),
            history_capacity: Some(DEFAULT_HISTORY_CAPACITY),
        }
    }
}

impl Config {
    /// Converts the raw file values into validated scheduler settings.
    ///
    /// Missing fields fall back to their defaults and out-of-range values
    /// are clamped.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            concurrency_cap: ConcurrencyCap::new(
                self.concurrency_cap.unwrap_or(DEFAULT_CONCURRENCY_CAP),
            ),
            display_duration: DisplayDuration::from_millis(
                self.display_duration_ms
                    .unwrap_or(DEFAULT_DISPLAY_DURATION_MS),
            ),
            cooldown_interval: CooldownInterval::from_millis(
                self.cooldown_ms.unwrap_or(DEFAULT_COOLDOWN_MS),
            ),
            transition_duration: TransitionDuration::from_millis(
                self.transition_ms.unwrap_or(DEFAULT_TRANSITION_MS),
            ),
            default_enter_effect: EffectId::new(
                self.default_enter_effect.unwrap_or(DEFAULT_ENTER_EFFECT),
            ),
            default_exit_effect: EffectId::new(
                self.default_exit_effect.unwrap_or(DEFAULT_EXIT_EFFECT),
            ),
            history_capacity: HistoryCapacity::new(
                self.history_capacity.unwrap_or(DEFAULT_HISTORY_CAPACITY),
            ),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
