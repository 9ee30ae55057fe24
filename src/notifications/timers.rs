// SPDX-License-Identifier: MPL-2.0
//! Deadlines owned by the scheduler.
//!
//! The scheduler never sleeps. It arms deadlines here and whoever drives it
//! (the tokio service, or a test) asks for [`Timers::next_deadline`] and
//! calls back once that instant has passed.

use super::message::MessageKey;
use std::time::Instant;

/// A timer that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    /// A displayed message reached the end of its display duration.
    Expiry(MessageKey),
    /// The cooldown after a removal elapsed.
    Cooldown,
}

#[derive(Debug, Default)]
pub struct Timers {
    /// Sorted by deadline; equal deadlines keep arming order.
    expiries: Vec<(Instant, MessageKey)>,
    cooldown: Option<Instant>,
}

impl Timers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_expiry(&mut self, key: MessageKey, at: Instant) {
        let pos = self.expiries.partition_point(|(deadline, _)| *deadline <= at);
        self.expiries.insert(pos, (at, key));
    }

    pub fn cancel_expiry(&mut self, key: MessageKey) {
        self.expiries.retain(|(_, k)| *k != key);
    }

    pub fn arm_cooldown(&mut self, at: Instant) {
        self.cooldown = Some(at);
    }

    /// Returns the end of the running cooldown, if any.
    #[must_use]
    pub fn cooldown(&self) -> Option<Instant> {
        self.cooldown
    }

    #[must_use]
    pub fn has_expiry(&self, key: MessageKey) -> bool {
        self.expiries.iter().any(|(_, k)| *k == key)
    }

    /// Returns the earliest armed deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let expiry = self.expiries.first().map(|(deadline, _)| *deadline);
        match (expiry, self.cooldown) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Removes and returns the earliest timer due at `now`.
    ///
    /// When an expiry and the cooldown share a deadline the cooldown fires
    /// first, so the expired message can be removed in the same pass.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired> {
        let expiry = self
            .expiries
            .first()
            .map(|(deadline, _)| *deadline)
            .filter(|deadline| *deadline <= now);
        let cooldown = self.cooldown.filter(|deadline| *deadline <= now);

        match (expiry, cooldown) {
            (Some(e), Some(c)) if c <= e => {
                self.cooldown = None;
                Some(Fired::Cooldown)
            }
            (Some(_), _) => {
                let (_, key) = self.expiries.remove(0);
                Some(Fired::Expiry(key))
            }
            (None, Some(_)) => {
                self.cooldown = None;
                Some(Fired::Cooldown)
            }
            (None, None) => None,
        }
    }

    pub fn clear(&mut self) {
        self.expiries.clear();
        self.cooldown = None;
    }
}
