// SPDX-License-Identifier: MPL-2.0
//! Transition records kept by the scheduler for inspection.

use crate::notifications::MessageKey;
use std::time::{Duration, Instant};

/// The shape of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// First message shown together with the container.
    Reveal,
    /// Message added next to already displayed ones.
    Add,
    /// Expired message leaving while a pending one enters.
    Replace,
    /// Expired message leaving, others stay.
    Remove,
    /// Last message leaving together with the container.
    Conceal,
    /// Manual dismissal, outside the single-flight slot.
    Dismiss,
}

impl TransitionKind {
    /// Returns true for transitions that take an expired message out and
    /// are therefore followed by the cooldown.
    #[must_use]
    pub fn is_removal(self) -> bool {
        matches!(
            self,
            TransitionKind::Replace | TransitionKind::Remove | TransitionKind::Conceal
        )
    }
}

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    Completed,
    /// The surface reported the effect as cancelled.
    Cancelled,
    /// An interrupting clear tore the transition down.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    pub kind: TransitionKind,
    pub leaving: Option<MessageKey>,
    pub entering: Option<MessageKey>,
    pub started_at: Instant,
    pub finished_at: Instant,
    pub outcome: TransitionOutcome,
}

impl TransitionRecord {
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.finished_at.saturating_duration_since(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_kinds() {
        assert!(TransitionKind::Replace.is_removal());
        assert!(TransitionKind::Remove.is_removal());
        assert!(TransitionKind::Conceal.is_removal());
        assert!(!TransitionKind::Reveal.is_removal());
        assert!(!TransitionKind::Add.is_removal());
        assert!(!TransitionKind::Dismiss.is_removal());
    }

    #[test]
    fn record_duration_never_underflows() {
        let now = Instant::now();
        let record = TransitionRecord {
            kind: TransitionKind::Add,
            leaving: None,
            entering: None,
            started_at: now + Duration::from_millis(5),
            finished_at: now,
            outcome: TransitionOutcome::Completed,
        };
        assert_eq!(record.duration(), Duration::ZERO);
    }
}
