// SPDX-License-Identifier: MPL-2.0
//! Scheduler state snapshot, used to survive a host-driven reconfiguration.
//!
//! The snapshot holds the scheduler tunables and every message that was
//! displayed or waiting, in display-then-queue order. Nothing is restored as
//! "already displayed": on restore every message goes back to the pending
//! queue.
//!
//! Snapshots are stored in CBOR (Concise Binary Object Representation):
//! compact, fast, and clearly separate from the user-editable TOML settings.

use super::message::{EffectId, Message};
use super::settings::Settings;
use crate::app::paths;
use crate::domain::scheduling::{ConcurrencyCap, CooldownInterval, DisplayDuration};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Snapshot file name within the data directory.
const SNAPSHOT_FILE: &str = "scheduler.cbor";

/// One message as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: u32,
    pub view_type: i32,
    pub content: String,
    pub enter_effect: Option<EffectId>,
    pub exit_effect: Option<EffectId>,
    pub dismissable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_duration_ms: Option<u64>,
}

impl From<&Message> for MessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id(),
            view_type: message.view_type(),
            content: message.content().to_string(),
            enter_effect: message.enter_effect(),
            exit_effect: message.exit_effect(),
            dismissable: message.is_dismissable(),
            display_duration_ms: message
                .display_duration()
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        let mut message = Message::new(record.content)
            .with_id(record.id)
            .with_view_type(record.view_type)
            .dismissable(record.dismissable);
        if let Some(effect) = record.enter_effect {
            message = message.with_enter_effect(effect);
        }
        if let Some(effect) = record.exit_effect {
            message = message.with_exit_effect(effect);
        }
        if let Some(millis) = record.display_duration_ms {
            message = message.with_display_duration(Duration::from_millis(millis));
        }
        message
    }
}

/// Saved scheduler state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSnapshot {
    pub cooldown_interval_ms: u64,
    pub concurrency_cap: usize,
    pub display_duration_ms: u64,
    pub default_enter_effect: EffectId,
    pub default_exit_effect: EffectId,
    /// Displayed messages followed by pending ones.
    pub messages: Vec<MessageRecord>,
}

impl SchedulerSnapshot {
    #[allow(clippy::cast_possible_truncation)] // Durations are clamped to minutes
    pub(crate) fn capture<'a>(
        settings: &Settings,
        messages: impl Iterator<Item = &'a Message>,
    ) -> Self {
        Self {
            cooldown_interval_ms: settings.cooldown_interval.value().as_millis() as u64,
            concurrency_cap: settings.concurrency_cap.value(),
            display_duration_ms: settings.display_duration.value().as_millis() as u64,
            default_enter_effect: settings.default_enter_effect,
            default_exit_effect: settings.default_exit_effect,
            messages: messages.map(MessageRecord::from).collect(),
        }
    }

    /// Applies the saved tunables on top of `base`, keeping the fields the
    /// snapshot does not carry (transition duration, history capacity).
    #[must_use]
    pub fn settings(&self, base: Settings) -> Settings {
        Settings {
            concurrency_cap: ConcurrencyCap::new(self.concurrency_cap),
            display_duration: DisplayDuration::from_millis(self.display_duration_ms),
            cooldown_interval: CooldownInterval::from_millis(self.cooldown_interval_ms),
            default_enter_effect: self.default_enter_effect,
            default_exit_effect: self.default_exit_effect,
            ..base
        }
    }

    /// Saves the snapshot to the default data directory.
    ///
    /// # Path Resolution
    ///
    /// Uses the standard path resolution (see [`paths::get_app_data_dir`]):
    /// 1. `TORCH_DATA_DIR` environment variable (if set)
    /// 2. Platform-specific data directory
    pub fn save(&self) -> Result<()> {
        self.save_to(None)
    }

    /// Saves the snapshot to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Result<()> {
        match Self::snapshot_file_path_with_override(base_dir) {
            Some(path) => self.save_to_path(&path),
            None => Ok(()),
        }
    }

    /// Writes the snapshot to `path`, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(path)?);
        ciborium::into_writer(self, writer)?;
        Ok(())
    }

    /// Loads the snapshot from the default data directory.
    ///
    /// Returns `Ok(None)` when no snapshot has been saved.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(None)
    }

    /// Loads the snapshot from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Option<Self>> {
        let Some(path) = Self::snapshot_file_path_with_override(base_dir) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from_path(&path).map(Some)
    }

    /// Reads a snapshot from `path`.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let reader = BufReader::new(fs::File::open(path)?);
        Ok(ciborium::from_reader(reader)?)
    }

    /// Returns the full path to the snapshot file with optional override.
    fn snapshot_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(SNAPSHOT_FILE);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::display_duration_bounds;
    use crate::error::Error;
    use tempfile::tempdir;

    fn sample() -> SchedulerSnapshot {
        let settings = Settings::default().with_concurrency_cap(2);
        let messages = [
            Message::new("one").with_id(1).dismissable(true),
            Message::new("two")
                .with_view_type(3)
                .with_enter_effect(EffectId::new(40))
                .with_display_duration(Duration::from_millis(750)),
        ];
        SchedulerSnapshot::capture(&settings, messages.iter())
    }

    #[test]
    fn record_preserves_every_message_field() {
        let message = Message::new("styled")
            .with_id(9)
            .with_view_type(-2)
            .with_enter_effect(EffectId::new(5))
            .with_exit_effect(EffectId::new(6))
            .dismissable(true)
            .with_display_duration(Duration::from_millis(1200));

        let restored = Message::from(MessageRecord::from(&message));
        assert_eq!(restored, message);
    }

    #[test]
    fn huge_display_duration_saturates_instead_of_wrapping() {
        let message = Message::new("forever").with_display_duration(Duration::from_secs(u64::MAX));
        let record = MessageRecord::from(&message);
        assert_eq!(record.display_duration_ms, Some(u64::MAX));

        let restored = Message::from(record);
        assert_eq!(
            DisplayDuration::new(restored.display_duration().expect("duration kept")).value(),
            Duration::from_millis(display_duration_bounds::MAX_MS)
        );
    }

    #[test]
    fn settings_keeps_fields_not_in_snapshot() {
        let snapshot = sample();
        let base = Settings::default()
            .with_transition_duration(crate::domain::scheduling::TransitionDuration::from_millis(80));
        let settings = snapshot.settings(base);

        assert_eq!(settings.concurrency_cap.value(), 2);
        assert_eq!(settings.transition_duration, base.transition_duration);
        assert_eq!(settings.history_capacity, base.history_capacity);
    }

    #[test]
    fn save_to_and_load_from_custom_directory() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let original = sample();

        original
            .save_to(Some(base_dir.clone()))
            .expect("save should succeed");
        assert!(base_dir.join(SNAPSHOT_FILE).exists(), "snapshot file should exist");

        let loaded = SchedulerSnapshot::load_from(Some(base_dir))
            .expect("load should succeed")
            .expect("snapshot should exist");
        assert_eq!(loaded, original);
    }

    #[test]
    fn load_from_empty_directory_returns_none() {
        let temp_dir = tempdir().expect("create temp dir");
        let loaded = SchedulerSnapshot::load_from(Some(temp_dir.path().to_path_buf()))
            .expect("missing file is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_corrupted_file_is_a_snapshot_error() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join(SNAPSHOT_FILE);
        fs::write(&path, "not valid cbor data").expect("write file");

        let result = SchedulerSnapshot::load_from_path(&path);
        assert!(matches!(result, Err(Error::Snapshot(_))));
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join("nested").join("deeply").join("state.cbor");

        sample().save_to_path(&path).expect("save should succeed");
        assert!(path.exists());
    }
}
