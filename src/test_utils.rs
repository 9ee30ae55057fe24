// SPDX-License-Identifier: MPL-2.0
//! Test doubles for driving a scheduler without a real host.
//!
//! - [`RecordingSurface`] records every handle and effect request
//! - [`RecordingListener`] records owner notifications
//! - [`ManualClock`] hands out instants that only move when told to

use crate::notifications::{
    EffectTicket, Listener, Message, MessageKey, Surface, TransitionRequest,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Handle type produced by [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordedHandle(pub MessageKey);

/// A surface that performs nothing and remembers everything.
#[derive(Debug)]
pub struct RecordingSurface {
    attached: bool,
    requests: Vec<TransitionRequest>,
    cancelled: Vec<EffectTicket>,
    created: Vec<MessageKey>,
    released: Vec<MessageKey>,
    live: HashSet<MessageKey>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            attached: true,
            requests: Vec::new(),
            cancelled: Vec::new(),
            created: Vec::new(),
            released: Vec::new(),
            live: HashSet::new(),
        }
    }
}

impl RecordingSurface {
    /// Creates an attached surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface that is not attached to any host.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::default()
        }
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Every request made so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> &[TransitionRequest] {
        &self.requests
    }

    /// The most recent awaited (single-flight) request.
    #[must_use]
    pub fn last_awaited(&self) -> Option<&TransitionRequest> {
        self.requests.iter().rev().find(|r| r.awaited)
    }

    #[must_use]
    pub fn cancelled(&self) -> &[EffectTicket] {
        &self.cancelled
    }

    #[must_use]
    pub fn created(&self) -> &[MessageKey] {
        &self.created
    }

    #[must_use]
    pub fn released(&self) -> &[MessageKey] {
        &self.released
    }

    /// Number of handles created and not yet released.
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.live.len()
    }
}

impl Surface for RecordingSurface {
    type Handle = RecordedHandle;

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn create_handle(&mut self, key: MessageKey, _message: &Message) -> Self::Handle {
        self.created.push(key);
        self.live.insert(key);
        RecordedHandle(key)
    }

    fn release_handle(&mut self, key: MessageKey, handle: Self::Handle) {
        assert_eq!(handle.0, key, "handle released under the wrong key");
        assert!(self.live.remove(&key), "handle {key} released twice");
        self.released.push(key);
    }

    fn request_effect(&mut self, request: &TransitionRequest) {
        self.requests.push(request.clone());
    }

    fn cancel_effect(&mut self, ticket: EffectTicket) {
        self.cancelled.push(ticket);
    }
}

/// One owner notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Displayed(MessageKey, String),
    Removed(MessageKey, String),
}

/// A listener that shares what it saw with the test holding a clone.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Contents of displayed messages, in notification order.
    #[must_use]
    pub fn displayed(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Displayed(_, content) => Some(content),
                Notice::Removed(..) => None,
            })
            .collect()
    }

    /// Contents of removed messages, in notification order.
    #[must_use]
    pub fn removed(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Removed(_, content) => Some(content),
                Notice::Displayed(..) => None,
            })
            .collect()
    }

    fn push(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

impl Listener for RecordingListener {
    fn on_displayed(&mut self, key: MessageKey, message: &Message) {
        self.push(Notice::Displayed(key, message.content().to_string()));
    }

    fn on_removed(&mut self, key: MessageKey, message: &Message) {
        self.push(Notice::Removed(key, message.content().to_string()));
    }
}

/// A clock that only moves when advanced.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: Instant,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Instant::now(),
        }
    }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Moves the clock forward and returns the new instant.
    pub fn advance(&mut self, by: Duration) -> Instant {
        self.now += by;
        self.now
    }

    /// Moves the clock forward by `millis` milliseconds.
    pub fn advance_ms(&mut self, millis: u64) -> Instant {
        self.advance(Duration::from_millis(millis))
    }

    /// Jumps to `at` if it lies in the future.
    pub fn advance_to(&mut self, at: Instant) -> Instant {
        self.now = self.now.max(at);
        self.now
    }
}
