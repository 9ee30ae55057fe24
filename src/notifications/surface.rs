// SPDX-License-Identifier: MPL-2.0
//! Seams between the scheduler and the host presentation layer.
//!
//! The scheduler never draws anything. It asks a [`Surface`] for handles and
//! transition effects, and tells a [`Listener`] when a message has finished
//! appearing or disappearing.

use super::message::{EffectId, Message, MessageKey};
use std::fmt;
use std::time::Duration;

/// Identifies one transition request.
///
/// The host reports the outcome of an awaited request with
/// `Scheduler::effect_completed` or `Scheduler::effect_cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectTicket(u64);

impl EffectTicket {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EffectTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Shows the container together with its first message.
    Reveal,
    /// Hides the container together with its last message.
    Conceal,
    /// Brings a message in.
    Enter,
    /// Takes a message out.
    Exit,
    /// Resizes the container and moves the remaining messages into place.
    Reflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    Container,
    Message(MessageKey),
}

/// One effect inside a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectStep {
    pub kind: EffectKind,
    pub target: EffectTarget,
    /// Effect to play; `None` for reflows, which the surface computes.
    pub effect: Option<EffectId>,
}

impl EffectStep {
    pub fn container(kind: EffectKind, effect: EffectId) -> Self {
        Self {
            kind,
            target: EffectTarget::Container,
            effect: Some(effect),
        }
    }

    pub fn message(kind: EffectKind, key: MessageKey, effect: EffectId) -> Self {
        Self {
            kind,
            target: EffectTarget::Message(key),
            effect: Some(effect),
        }
    }

    pub fn reflow() -> Self {
        Self {
            kind: EffectKind::Reflow,
            target: EffectTarget::Container,
            effect: None,
        }
    }
}

/// A set of effects that run together and resolve as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub ticket: EffectTicket,
    pub steps: Vec<EffectStep>,
    pub duration: Duration,
    /// False for fire-and-forget effects (manual dismissal). Their outcome
    /// is ignored by the scheduler and need not be reported.
    pub awaited: bool,
}

impl TransitionRequest {
    /// Returns true if any step has the given kind.
    #[must_use]
    pub fn has_step(&self, kind: EffectKind) -> bool {
        self.steps.iter().any(|s| s.kind == kind)
    }

    /// Returns the message targeted by the first step of the given kind.
    #[must_use]
    pub fn target_of(&self, kind: EffectKind) -> Option<MessageKey> {
        self.steps.iter().find_map(|s| match (s.kind == kind, s.target) {
            (true, EffectTarget::Message(key)) => Some(key),
            _ => None,
        })
    }
}

/// The host surface messages are shown in.
pub trait Surface {
    /// Visual binding for one displayed message.
    type Handle;

    /// Returns true while the surface is attached to a host.
    ///
    /// The scheduler refuses to dispatch while detached.
    fn is_attached(&self) -> bool;

    fn create_handle(&mut self, key: MessageKey, message: &Message) -> Self::Handle;

    fn release_handle(&mut self, key: MessageKey, handle: Self::Handle);

    /// Starts a transition. Awaited transitions must eventually be reported
    /// back exactly once, as completed or cancelled.
    fn request_effect(&mut self, request: &TransitionRequest);

    /// Stops a running transition. The scheduler has already forgotten it,
    /// so reporting its outcome afterwards is harmless.
    fn cancel_effect(&mut self, ticket: EffectTicket);
}

/// Owner notifications.
pub trait Listener {
    /// The message finished entering and its display time started.
    fn on_displayed(&mut self, key: MessageKey, message: &Message) {
        let _ = (key, message);
    }

    /// The message left the display for good.
    fn on_removed(&mut self, key: MessageKey, message: &Message) {
        let _ = (key, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_step_queries() {
        let key = MessageKey::new(3);
        let request = TransitionRequest {
            ticket: EffectTicket::new(1),
            steps: vec![
                EffectStep::message(EffectKind::Exit, key, EffectId::new(2)),
                EffectStep::reflow(),
            ],
            duration: Duration::from_millis(300),
            awaited: true,
        };

        assert!(request.has_step(EffectKind::Exit));
        assert!(request.has_step(EffectKind::Reflow));
        assert!(!request.has_step(EffectKind::Enter));
        assert_eq!(request.target_of(EffectKind::Exit), Some(key));
        assert_eq!(request.target_of(EffectKind::Reflow), None);
    }

    #[test]
    fn ticket_display() {
        assert_eq!(EffectTicket::new(9).to_string(), "fx9");
    }
}
