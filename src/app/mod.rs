// SPDX-License-Identifier: MPL-2.0
//! Terminal demo that drives the scheduler service end to end.
//!
//! The demo loads the user settings, applies command-line overrides, feeds a
//! batch of plain and titled messages through a [`ConsoleSurface`], dismisses
//! the first dismissable one as soon as it shows up, and exits when every
//! message has left the display. With `--stop-after` it saves a snapshot
//! instead of waiting for the rest, and `--resume` picks that snapshot up on
//! the next run.

pub mod console;
pub mod paths;

pub use console::{ConsoleListener, ConsoleSurface, Lifecycle, MessageView, VIEW_TITLED};

use crate::config;
use crate::domain::scheduling::{concurrency_cap_bounds, CooldownInterval, DisplayDuration};
use crate::error::{Error, Result};
use crate::notifications::{Message, MessageKey, Scheduler, SchedulerSnapshot, Settings};
use crate::service;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Default number of messages the demo submits.
pub const DEFAULT_MESSAGE_COUNT: usize = 6;

/// Command-line options for the demo.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides `concurrency_cap` from the settings file.
    pub cap: Option<usize>,
    /// Overrides `display_duration_ms`.
    pub duration_ms: Option<u64>,
    /// Overrides `cooldown_ms`.
    pub cooldown_ms: Option<u64>,
    /// Number of messages to submit.
    pub count: Option<usize>,
    /// Settings file to read instead of the platform default.
    pub config_path: Option<PathBuf>,
    /// Data directory override for snapshots.
    pub data_dir: Option<PathBuf>,
    /// Save a snapshot and stop after this many removals.
    pub stop_after: Option<usize>,
    /// Restore the saved snapshot before submitting new messages.
    pub resume: bool,
}

impl Flags {
    /// Settings from `config`, with the command-line overrides applied.
    pub fn settings(&self, config: &config::Config) -> Settings {
        let mut settings = config.settings();
        if let Some(cap) = self.cap {
            if cap > concurrency_cap_bounds::MAX {
                tracing::warn!(
                    cap,
                    max = concurrency_cap_bounds::MAX,
                    "concurrency cap above the supported ceiling, clamping"
                );
            }
            settings = settings.with_concurrency_cap(cap);
        }
        if let Some(ms) = self.duration_ms {
            settings = settings.with_display_duration(DisplayDuration::from_millis(ms));
        }
        if let Some(ms) = self.cooldown_ms {
            settings = settings.with_cooldown(CooldownInterval::from_millis(ms));
        }
        settings
    }
}

/// Builds the demo batch: every other message has a title line, every third
/// carries an id and can be dismissed.
pub fn demo_messages(count: usize) -> Vec<Message> {
    (1..=count)
        .map(|n| {
            let message = if n % 2 == 0 {
                Message::new(format!("Title for message\nMessage #{n}..."))
                    .with_view_type(VIEW_TITLED)
            } else {
                Message::new(format!("Message #{n}..."))
            };
            if n % 3 == 0 {
                message.with_id(u32::try_from(n).unwrap_or(u32::MAX)).dismissable(true)
            } else {
                message
            }
        })
        .collect()
}

/// Runs the demo to completion.
pub async fn run(flags: Flags) -> Result<()> {
    let config = match &flags.config_path {
        Some(path) if path.exists() => config::load_from_path(path)?,
        Some(path) => {
            tracing::warn!(path = %path.display(), "settings file not found, using defaults");
            config::Config::default()
        }
        None => config::load()?,
    };
    let settings = flags.settings(&config);
    tracing::info!(?settings, "starting demo");

    let (handle, inbox) = service::channel();
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let scheduler = Scheduler::new(ConsoleSurface::new(handle.clone()), settings)
        .with_listener(ConsoleListener::new(events_tx));
    let task = inbox.serve(scheduler);

    let mut expected = 0;
    if flags.resume {
        if let Some(snapshot) = SchedulerSnapshot::load_from(flags.data_dir.clone())? {
            expected += snapshot.messages.len();
            tracing::info!(restored = expected, "resuming from snapshot");
            handle.restore(snapshot).await?;
            handle.show().await?;
        }
    }

    let messages = demo_messages(flags.count.unwrap_or(DEFAULT_MESSAGE_COUNT));
    let dismissable: HashSet<usize> = messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_dismissable())
        .map(|(i, _)| i)
        .collect();
    let admissions = handle.enqueue_all(messages).await?;
    let mut dismiss_target: Option<MessageKey> = admissions
        .iter()
        .enumerate()
        .find(|(i, _)| dismissable.contains(i))
        .and_then(|(_, a)| a.key());
    expected += admissions.iter().filter(|a| a.is_accepted()).count();

    let mut removed = 0;
    while removed < expected {
        let Some(event) = events_rx.recv().await else {
            return Err(Error::ServiceStopped);
        };
        match event {
            Lifecycle::Displayed(key) if dismiss_target == Some(key) => {
                dismiss_target = None;
                let honored = handle.dismiss(key).await?;
                tracing::info!(%key, honored, "dismissed by user");
            }
            Lifecycle::Displayed(_) => {}
            Lifecycle::Removed(_) => removed += 1,
        }

        if flags.stop_after.is_some_and(|limit| removed >= limit) && removed < expected {
            let snapshot = handle.snapshot().await?;
            tracing::info!(saved = snapshot.messages.len(), "saving snapshot");
            snapshot.save_to(flags.data_dir.clone())?;
            handle.clear(true).await?;
            break;
        }
    }

    handle.shutdown()?;
    let scheduler = task.await.map_err(|_| Error::ServiceStopped)?;
    for record in scheduler.history().iter() {
        tracing::debug!(
            kind = ?record.kind,
            outcome = ?record.outcome,
            duration_ms = record.duration().as_millis(),
            "transition"
        );
    }
    tracing::info!(removed, "demo finished");
    Ok(())
}
