// SPDX-License-Identifier: MPL-2.0
//! Core message data structures.
//!
//! This module defines the `Message` value type submitted by hosts, the
//! scheduler-assigned `MessageKey`, and the opaque `EffectId` naming a
//! transition effect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque identifier of a transition effect understood by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectId(u32);

impl EffectId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

/// Identity assigned by the scheduler when a message is admitted.
///
/// Unlike [`Message::id`], keys are unique for every admitted message, so two
/// zero-id messages with identical content remain distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey(u64);

impl MessageKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A notification request.
///
/// Messages are built by the host before submission and are never mutated by
/// the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Dedup key; `0` means no identity.
    id: u32,
    /// Tag the presentation layer branches on.
    view_type: i32,
    content: String,
    enter_effect: Option<EffectId>,
    exit_effect: Option<EffectId>,
    dismissable: bool,
    /// Custom display duration (overrides the scheduler default).
    display_duration: Option<Duration>,
}

impl Message {
    /// Creates a message with no identity, using the scheduler defaults for
    /// everything but its content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: 0,
            view_type: 0,
            content: content.into(),
            enter_effect: None,
            exit_effect: None,
            dismissable: false,
            display_duration: None,
        }
    }

    /// Sets the dedup identifier. Non-zero ids are unique across the pending
    /// queue and the display set.
    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Sets the view type.
    #[must_use]
    pub fn with_view_type(mut self, view_type: i32) -> Self {
        self.view_type = view_type;
        self
    }

    /// Replaces the default enter effect.
    ///
    /// Ignored when the message is the first one shown, which uses the
    /// container reveal instead.
    #[must_use]
    pub fn with_enter_effect(mut self, effect: EffectId) -> Self {
        self.enter_effect = Some(effect);
        self
    }

    /// Replaces the default exit effect.
    ///
    /// Ignored when the message is the last one shown, which uses the
    /// container conceal instead.
    #[must_use]
    pub fn with_exit_effect(mut self, effect: EffectId) -> Self {
        self.exit_effect = Some(effect);
        self
    }

    /// Sets whether a manual dismiss signal is honored.
    #[must_use]
    pub fn dismissable(mut self, dismissable: bool) -> Self {
        self.dismissable = dismissable;
        self
    }

    /// Sets a custom display duration. Zero keeps the message until it is
    /// dismissed or cleared.
    #[must_use]
    pub fn with_display_duration(mut self, duration: Duration) -> Self {
        self.display_duration = Some(duration);
        self
    }

    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns true if this message takes part in deduplication.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        self.id != 0
    }

    #[must_use]
    pub fn view_type(&self) -> i32 {
        self.view_type
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn enter_effect(&self) -> Option<EffectId> {
        self.enter_effect
    }

    #[must_use]
    pub fn exit_effect(&self) -> Option<EffectId> {
        self.exit_effect
    }

    #[must_use]
    pub fn is_dismissable(&self) -> bool {
        self.dismissable
    }

    #[must_use]
    pub fn display_duration(&self) -> Option<Duration> {
        self.display_duration
    }
}
